//! Board-agnostic core logic for the on-deck display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Heat layout (which display shows which lane and heat)
//! - Status message decoding into per-display instructions
//! - Dispatching instructions onto a set of segment displays
//! - The station: topic gate plus decode and dispatch for one message
//! - Station configuration types and the embedded config parser
//! - Hardware abstraction traits for the displays

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod heat;
pub mod station;
pub mod traits;
