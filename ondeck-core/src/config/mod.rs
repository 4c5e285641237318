//! Station configuration
//!
//! Board-agnostic configuration structures and the parser for the TOML
//! subset used by `station.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
