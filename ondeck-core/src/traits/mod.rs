//! Hardware abstraction traits
//!
//! These traits define the interface between the display logic and the
//! segment display drivers.

pub mod display;

pub use display::{DisplayError, DisplaySet, SegmentDisplay};
