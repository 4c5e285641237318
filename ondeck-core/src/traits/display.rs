//! Segment display traits

use crate::heat::{DisplayIndex, DISPLAY_COUNT};

/// Errors reported by a segment display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The display did not accept the write (bus fault, missing device)
    Bus,
    /// Value has more characters than the display has digits
    Overflow,
}

/// One 4-character segment display
pub trait SegmentDisplay {
    /// Blank every segment
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Show an integer, right-aligned
    fn show_number(&mut self, value: i32) -> Result<(), DisplayError>;

    /// Show text
    ///
    /// Text is written over the current content without clearing first.
    /// When it is longer than the display, the driver decides how to fit it.
    fn show_text(&mut self, text: &str) -> Result<(), DisplayError>;
}

/// The six displays on the gate, addressed by [`DisplayIndex`]
pub trait DisplaySet {
    /// Blank one display
    fn clear(&mut self, index: DisplayIndex) -> Result<(), DisplayError>;

    /// Show an integer on one display
    fn show_number(&mut self, index: DisplayIndex, value: i32) -> Result<(), DisplayError>;

    /// Show text on one display
    fn show_text(&mut self, index: DisplayIndex, text: &str) -> Result<(), DisplayError>;
}

impl<D: SegmentDisplay> DisplaySet for [D; DISPLAY_COUNT] {
    fn clear(&mut self, index: DisplayIndex) -> Result<(), DisplayError> {
        self[index.offset()].clear()
    }

    fn show_number(&mut self, index: DisplayIndex, value: i32) -> Result<(), DisplayError> {
        self[index.offset()].show_number(value)
    }

    fn show_text(&mut self, index: DisplayIndex, text: &str) -> Result<(), DisplayError> {
        self[index.offset()].show_text(text)
    }
}
