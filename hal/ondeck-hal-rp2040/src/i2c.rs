//! I2C master for RP2040
//!
//! Wraps any blocking `embedded-hal` 1.0 I2C master (in practice
//! `embassy_rp::i2c::I2c<'_, _, Blocking>`) and implements the
//! `ondeck_hal::I2cBus` trait on top of it.

use embedded_hal::i2c::{Error as _, I2c};
use ondeck_hal::{I2cBus, I2cBusError, I2cConfig};

/// Blocking I2C master implementing [`I2cBus`]
pub struct RpI2c<T> {
    i2c: T,
}

impl<T: I2c> RpI2c<T> {
    /// Wrap an already configured I2C master
    pub fn new(i2c: T) -> Self {
        Self { i2c }
    }

    /// Release the underlying peripheral
    pub fn release(self) -> T {
        self.i2c
    }
}

/// embassy-rp I2C settings for the configured bus clock
pub fn rp_config(config: &I2cConfig) -> embassy_rp::i2c::Config {
    let mut rp = embassy_rp::i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}

impl<T: I2c> I2cBus for RpI2c<T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c
            .read(address, buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}
