//! Station configuration loading
//!
//! The configuration is compiled in from station.toml. build.rs has already
//! validated it, so a parse failure here means the two parsers disagree;
//! the station then runs on defaults rather than not at all.

use defmt::*;

use ondeck_core::config::{parse_config, StationConfig};

/// Embedded configuration (edit station.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../station.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> StationConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded station.toml");
            config
        }
        Err(e) => {
            warn!("Embedded station.toml rejected ({}), using defaults", e);
            StationConfig::default()
        }
    }
}
