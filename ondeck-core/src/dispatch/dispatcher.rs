//! Display dispatcher
//!
//! Owns the display set and turns [`Action`]s into device writes.

use crate::heat::{Action, DisplayIndex, DisplayInstruction, HeatUpdate};
use crate::traits::{DisplayError, DisplaySet};

use super::report::DispatchReport;

/// Applies decoded actions to the injected display set
pub struct Dispatcher<D> {
    displays: D,
}

impl<D: DisplaySet> Dispatcher<D> {
    /// Create a dispatcher owning `displays`
    pub const fn new(displays: D) -> Self {
        Self { displays }
    }

    /// Access the display set
    pub fn displays(&self) -> &D {
        &self.displays
    }

    /// Mutable access to the display set
    pub fn displays_mut(&mut self) -> &mut D {
        &mut self.displays
    }

    /// Release the display set
    pub fn into_inner(self) -> D {
        self.displays
    }

    /// Clear one display, then render the instruction on it
    pub fn apply(
        &mut self,
        index: DisplayIndex,
        instruction: DisplayInstruction<'_>,
    ) -> Result<(), DisplayError> {
        self.displays.clear(index)?;
        self.render(index, instruction)
    }

    /// Carry out a decoded action
    pub fn dispatch(&mut self, action: &Action<'_>) -> DispatchReport {
        match action {
            Action::Ignore => DispatchReport::new(),
            Action::BroadcastLiteral(text) => self.broadcast(text),
            Action::UpdateHeats(update) => self.update_heats(update),
        }
    }

    /// Write `text` to every display in place, without clearing
    pub fn broadcast(&mut self, text: &str) -> DispatchReport {
        let mut report = DispatchReport::new();
        for index in DisplayIndex::all() {
            report.check(index, self.displays.show_text(index, text));
        }
        report
    }

    /// Clear all six displays, then render each instruction
    ///
    /// Every clear is attempted before the first render. A display whose
    /// clear failed is skipped for the rest of the batch.
    pub fn update_heats(&mut self, update: &HeatUpdate<'_>) -> DispatchReport {
        let mut report = self.clear_all();

        for (index, instruction) in update.iter() {
            if report.failure(index).is_some() {
                continue;
            }
            let result = self.render(index, instruction);
            report.check(index, result);
        }

        report
    }

    /// Blank every display
    pub fn clear_all(&mut self) -> DispatchReport {
        let mut report = DispatchReport::new();
        for index in DisplayIndex::all() {
            report.check(index, self.displays.clear(index));
        }
        report
    }

    /// Show 1111, 2222 ... 6666 so each display identifies itself
    pub fn show_test_pattern(&mut self) -> DispatchReport {
        let mut report = DispatchReport::new();
        for index in DisplayIndex::all() {
            let pattern = i32::from(index.number()) * 1111;
            let result = self.apply(index, DisplayInstruction::ShowNumber(pattern));
            report.check(index, result);
        }
        report
    }

    fn render(
        &mut self,
        index: DisplayIndex,
        instruction: DisplayInstruction<'_>,
    ) -> Result<(), DisplayError> {
        match instruction {
            DisplayInstruction::Clear => Ok(()),
            DisplayInstruction::ShowNumber(value) => self.displays.show_number(index, value),
            DisplayInstruction::ShowText(text) => self.displays.show_text(index, text),
            DisplayInstruction::ShowLiteral(text) => self.displays.show_text(index, text),
        }
    }
}
