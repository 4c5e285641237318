//! RP2040-specific HAL for the on-deck display firmware
//!
//! This crate provides RP2040 implementations of the shared `ondeck-hal`
//! traits, plus Pico W specific functionality:
//!
//! - Blocking I2C master adapter (implements `ondeck_hal::I2cBus`)
//! - CYW43439 radio bring-up over PIO SPI

#![no_std]

pub mod i2c;
pub mod wifi;

pub use i2c::RpI2c;
pub use ondeck_hal::{I2cBus, I2cBusError, I2cConfig};
