//! Per-batch write failure report

use crate::heat::{DisplayIndex, DISPLAY_COUNT};
use crate::traits::DisplayError;

/// Which displays failed during one dispatch
///
/// Only the first error per display is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchReport {
    failures: [Option<DisplayError>; DISPLAY_COUNT],
}

impl DispatchReport {
    /// Report with no failures
    pub const fn new() -> Self {
        Self {
            failures: [None; DISPLAY_COUNT],
        }
    }

    /// Record a failed write
    pub fn record(&mut self, index: DisplayIndex, error: DisplayError) {
        let slot = &mut self.failures[index.offset()];
        if slot.is_none() {
            *slot = Some(error);
        }
    }

    /// Record the outcome of a write, passing success through
    pub fn check(&mut self, index: DisplayIndex, result: Result<(), DisplayError>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                self.record(index, error);
                false
            }
        }
    }

    /// Error recorded for one display
    pub fn failure(&self, index: DisplayIndex) -> Option<DisplayError> {
        self.failures[index.offset()]
    }

    /// Failed displays in ascending order
    pub fn failures(&self) -> impl Iterator<Item = (DisplayIndex, DisplayError)> + '_ {
        DisplayIndex::all().filter_map(move |index| self.failure(index).map(|e| (index, e)))
    }

    /// Number of failed displays
    pub fn failure_count(&self) -> usize {
        self.failures.iter().filter(|f| f.is_some()).count()
    }

    /// True when every write succeeded
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_error() {
        let index = DisplayIndex::new(3).unwrap();
        let mut report = DispatchReport::new();
        assert!(report.is_clean());

        report.record(index, DisplayError::Overflow);
        report.record(index, DisplayError::Bus);

        assert_eq!(report.failure(index), Some(DisplayError::Overflow));
        assert_eq!(report.failure_count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_failures_ascending() {
        let mut report = DispatchReport::new();
        assert!(!report.check(DisplayIndex::new(5).unwrap(), Err(DisplayError::Bus)));
        assert!(report.check(DisplayIndex::new(4).unwrap(), Ok(())));
        assert!(!report.check(DisplayIndex::new(2).unwrap(), Err(DisplayError::Bus)));

        let mut failures = report.failures();
        assert_eq!(failures.next().map(|(i, _)| i.number()), Some(2));
        assert_eq!(failures.next().map(|(i, _)| i.number()), Some(5));
        assert!(failures.next().is_none());
    }
}
