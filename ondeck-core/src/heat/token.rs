//! Racer tokens
//!
//! A heat slot holds up to four characters naming the racer in that lane.
//! Slot text is classified exactly once here; nothing downstream looks at
//! the raw characters again.

use core::ops::Range;

/// Slot content marking a lane with no racer
pub const VACANT_LANE: &str = "----";

/// Classified content of one heat slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RacerToken<'a> {
    /// Whitespace only, the display stays blank
    Blank,
    /// `----`, no racer in this lane
    Vacant,
    /// Racer number
    Number(i32),
    /// Anything else, shown as text
    Text(&'a str),
}

impl<'a> RacerToken<'a> {
    /// Classify raw slot text
    ///
    /// Surrounding whitespace is trimmed first. Numbers must parse in full
    /// as base-10; `12ab` is text, not 12.
    pub fn classify(slot: &'a str) -> Self {
        let racer = slot.trim();

        if racer.is_empty() {
            RacerToken::Blank
        } else if racer == VACANT_LANE {
            RacerToken::Vacant
        } else {
            match racer.parse::<i32>() {
                Ok(number) => RacerToken::Number(number),
                Err(_) => RacerToken::Text(racer),
            }
        }
    }
}

/// Characters `range` of `lane`, counted in chars rather than bytes
///
/// Returns `None` when the lane has fewer than `range.end` characters, so a
/// short lane string never yields a partial slot.
pub fn slot_text(lane: &str, range: Range<usize>) -> Option<&str> {
    let width = range.len().checked_sub(1)?;
    let mut bounds = lane
        .char_indices()
        .map(|(i, _)| i)
        .chain(core::iter::once(lane.len()));

    let start = bounds.nth(range.start)?;
    let end = bounds.nth(width)?;
    Some(&lane[start..end])
}
