//! Recording display set shared by the dispatch and station tests

use heapless::{String, Vec};

use crate::heat::{DisplayIndex, DISPLAY_COUNT};
use crate::traits::{DisplayError, DisplaySet};

/// Visible content of one mock display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Blank,
    Number(i32),
    Text(String<16>),
}

impl Shown {
    pub fn number(value: i32) -> Self {
        Shown::Number(value)
    }

    pub fn text(text: &str) -> Self {
        Shown::Text(String::try_from(text).unwrap())
    }
}

/// One call made on the display set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Clear,
    Number(i32),
    Text(String<16>),
}

impl Op {
    pub fn text(text: &str) -> Self {
        Op::Text(String::try_from(text).unwrap())
    }
}

/// Six displays that record every call; one may be set to fail
pub struct MockDisplays {
    shown: [Shown; DISPLAY_COUNT],
    ops: Vec<(u8, Op), 64>,
    fail_on: Option<u8>,
}

impl MockDisplays {
    pub fn new() -> Self {
        Self {
            shown: core::array::from_fn(|_| Shown::Blank),
            ops: Vec::new(),
            fail_on: None,
        }
    }

    /// Every write to display `number` fails with a bus error
    pub fn failing(number: u8) -> Self {
        let mut displays = Self::new();
        displays.fail_on = Some(number);
        displays
    }

    pub fn ops(&self) -> &[(u8, Op)] {
        &self.ops
    }

    pub fn shown(&self, index: DisplayIndex) -> &Shown {
        &self.shown[index.offset()]
    }

    pub fn snapshot(&self) -> [Shown; DISPLAY_COUNT] {
        self.shown.clone()
    }

    fn record(&mut self, index: DisplayIndex, op: Op, shown: Shown) -> Result<(), DisplayError> {
        if self.fail_on == Some(index.number()) {
            return Err(DisplayError::Bus);
        }
        self.ops.push((index.number(), op)).unwrap();
        self.shown[index.offset()] = shown;
        Ok(())
    }
}

impl DisplaySet for MockDisplays {
    fn clear(&mut self, index: DisplayIndex) -> Result<(), DisplayError> {
        self.record(index, Op::Clear, Shown::Blank)
    }

    fn show_number(&mut self, index: DisplayIndex, value: i32) -> Result<(), DisplayError> {
        self.record(index, Op::Number(value), Shown::number(value))
    }

    fn show_text(&mut self, index: DisplayIndex, text: &str) -> Result<(), DisplayError> {
        self.record(index, Op::text(text), Shown::text(text))
    }
}
