//! On-Deck Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the display drivers are
//! written against, so the same driver code runs on the RP2040 board and on
//! the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ondeck-drivers (HT16K33 backpacks)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ondeck-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ ondeck-hal-   │       │  test mocks   │
//! │    rp2040     │       │   (host)      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`i2c::SharedBus`] - several devices sharing one bus

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{I2cBus, I2cBusError, I2cConfig, SharedBus};
