//! I2C master abstraction
//!
//! The segment drivers only ever talk to the bus through [`I2cBus`]. Chip
//! HALs implement it for their peripheral; [`SharedBus`] hands one master
//! to every display on the gate.

use core::cell::RefCell;

/// Blocking I2C master, 7-bit addressing
pub trait I2cBus {
    type Error;

    /// Send `data` to the device at `address`
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` from the device at `address`
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read with a repeated start, e.g. register select then data
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Bus clock settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode, 100 kHz
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode, 400 kHz
    pub const FAST: Self = Self { frequency: 400_000 };
}

/// Chip-independent classification of I2C failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received (no device at the address)
    Nack,
    /// Receive or transmit overrun
    Overrun,
    /// Bus already in use by another device handle
    Busy,
    /// Other error
    Other,
}

impl From<embedded_hal::i2c::ErrorKind> for I2cBusError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;

        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// One device's handle onto a bus shared through a `RefCell`
///
/// The firmware is single-threaded and every transaction completes
/// before the next begins, so a `RefCell` is enough to hand the same
/// bus master to every display.
pub struct SharedBus<'a, B> {
    bus: &'a RefCell<B>,
}

impl<'a, B> SharedBus<'a, B> {
    /// Create a handle onto the shared bus
    pub const fn new(bus: &'a RefCell<B>) -> Self {
        Self { bus }
    }
}

impl<B> Clone for SharedBus<'_, B> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<B> I2cBus for SharedBus<'_, B>
where
    B: I2cBus,
    B::Error: From<I2cBusError>,
{
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut bus = self.bus.try_borrow_mut().map_err(|_| I2cBusError::Busy)?;
        bus.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let mut bus = self.bus.try_borrow_mut().map_err(|_| I2cBusError::Busy)?;
        bus.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.try_borrow_mut().map_err(|_| I2cBusError::Busy)?;
        bus.write_read(address, write_data, read_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the address of every write
    struct MockBus {
        addresses: heapless::Vec<u8, 8>,
    }

    impl I2cBus for MockBus {
        type Error = I2cBusError;

        fn write(&mut self, address: u8, _data: &[u8]) -> Result<(), Self::Error> {
            self.addresses.push(address).map_err(|_| I2cBusError::Overrun)
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
            buf.fill(0xA5);
            Ok(())
        }

        fn write_read(
            &mut self,
            address: u8,
            write_data: &[u8],
            read_buf: &mut [u8],
        ) -> Result<(), Self::Error> {
            self.write(address, write_data)?;
            self.read(address, read_buf)
        }
    }

    #[test]
    fn test_default_config_is_standard_mode() {
        assert_eq!(I2cConfig::default(), I2cConfig::STANDARD);
        assert_eq!(I2cConfig::FAST.frequency, 400_000);
    }

    #[test]
    fn test_error_kind_classification() {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

        assert_eq!(
            I2cBusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            I2cBusError::Nack
        );
        assert_eq!(
            I2cBusError::from(ErrorKind::ArbitrationLoss),
            I2cBusError::ArbitrationLost
        );
        assert_eq!(I2cBusError::from(ErrorKind::Other), I2cBusError::Other);
    }

    #[test]
    fn test_shared_bus_handles_use_same_master() {
        let bus = RefCell::new(MockBus {
            addresses: heapless::Vec::new(),
        });
        let mut first = SharedBus::new(&bus);
        let mut second = first.clone();

        first.write(0x70, &[0x21]).unwrap();
        second.write(0x71, &[0x21]).unwrap();

        let mut buf = [0u8; 2];
        second.write_read(0x72, &[0x00], &mut buf).unwrap();
        assert_eq!(buf, [0xA5, 0xA5]);

        assert_eq!(bus.borrow().addresses.as_slice(), &[0x70, 0x71, 0x72]);
    }

    #[test]
    fn test_shared_bus_reports_busy_when_borrowed() {
        let bus = RefCell::new(MockBus {
            addresses: heapless::Vec::new(),
        });
        let mut handle = SharedBus::new(&bus);

        let _guard = bus.borrow_mut();
        assert_eq!(handle.write(0x70, &[0x21]), Err(I2cBusError::Busy));
    }
}
