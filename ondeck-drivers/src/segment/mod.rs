//! Segment display drivers

pub mod font;
pub mod ht16k33;

pub use ht16k33::{BlinkRate, Ht16k33, SegmentError};
