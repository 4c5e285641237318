//! Fixed display layout
//!
//! Six displays show two lane sides over three heats. Displays are numbered
//! from 1 in wiring order: left then right for the current heat, then the
//! next heat, then the heat after that.

use core::ops::Range;

/// Number of displays on the gate
pub const DISPLAY_COUNT: usize = 6;

/// Heats shown per lane side
pub const HEAT_COUNT: usize = 3;

/// Characters per heat slot (and per display)
pub const SLOT_WIDTH: usize = 4;

/// Track side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    /// Left track (lane 1)
    Left,
    /// Right track (lane 2)
    Right,
}

impl Side {
    /// Both sides, left first
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    const fn column(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Heat position in the on-deck queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Heat {
    /// Heat 1: racing now
    Current,
    /// Heat 2: next up
    Next,
    /// Heat 3: after next
    AfterNext,
}

impl Heat {
    /// All heats in queue order
    pub const ALL: [Heat; HEAT_COUNT] = [Heat::Current, Heat::Next, Heat::AfterNext];

    /// 1-based heat number
    pub const fn number(self) -> u8 {
        match self {
            Heat::Current => 1,
            Heat::Next => 2,
            Heat::AfterNext => 3,
        }
    }

    /// Character window of this heat within a lane string
    pub const fn slot(self) -> Range<usize> {
        let start = (self.number() as usize - 1) * SLOT_WIDTH;
        start..start + SLOT_WIDTH
    }
}

/// Display number, always in `1..=6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayIndex(u8);

impl DisplayIndex {
    /// Create from a 1-based display number
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number as usize <= DISPLAY_COUNT {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Create from a 0-based array offset
    pub const fn from_offset(offset: usize) -> Option<Self> {
        if offset < DISPLAY_COUNT {
            Some(Self(offset as u8 + 1))
        } else {
            None
        }
    }

    /// Display showing the given side and heat
    pub const fn for_slot(side: Side, heat: Heat) -> Self {
        Self((heat.number() - 1) * 2 + side.column() + 1)
    }

    /// 1-based display number
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based array offset
    pub const fn offset(self) -> usize {
        self.0 as usize - 1
    }

    /// Lane side shown on this display
    pub const fn side(self) -> Side {
        if self.offset() % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Heat shown on this display
    pub const fn heat(self) -> Heat {
        match self.offset() / 2 {
            0 => Heat::Current,
            1 => Heat::Next,
            _ => Heat::AfterNext,
        }
    }

    /// All displays in ascending order
    pub fn all() -> impl Iterator<Item = DisplayIndex> {
        (1..=DISPLAY_COUNT as u8).map(DisplayIndex)
    }
}
