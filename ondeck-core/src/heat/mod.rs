//! Heat status decoding
//!
//! Maps the comma-delimited on-deck status string onto the fixed grid of
//! six displays (two lane sides, three heats).

pub mod decoder;
pub mod layout;
pub mod token;

pub use decoder::{
    decode_payload, split_lanes, Action, Decoder, DisplayInstruction, HeatUpdate, TopicTooLong,
    BROADCAST_LITERAL,
};
pub use layout::{DisplayIndex, Heat, Side, DISPLAY_COUNT, HEAT_COUNT, SLOT_WIDTH};
pub use token::{RacerToken, VACANT_LANE};
