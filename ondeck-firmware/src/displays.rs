//! The six HT16K33 backpacks on one shared I2C bus

use core::cell::RefCell;

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::{I2C0, PIN_4, PIN_5};
use embassy_rp::Peri;
use static_cell::StaticCell;

use ondeck_core::config::DisplayHwConfig;
use ondeck_core::heat::{DisplayIndex, DISPLAY_COUNT};
use ondeck_drivers::segment::Ht16k33;
use ondeck_hal::{I2cConfig, SharedBus};
use ondeck_hal_rp2040::i2c::{rp_config, RpI2c};

/// Bus master driving every display
pub type GateBus = RpI2c<I2c<'static, I2C0, Blocking>>;

/// Displays 1 through 6
pub type GateDisplays = [Ht16k33<SharedBus<'static, GateBus>>; DISPLAY_COUNT];

static I2C_BUS: StaticCell<RefCell<GateBus>> = StaticCell::new();

/// Bring up I2C0 (SDA on GPIO4, SCL on GPIO5) and initialise each display
///
/// A display that fails to initialise is logged and kept: it is retried
/// implicitly by every later write.
pub fn init(
    i2c: Peri<'static, I2C0>,
    sda: Peri<'static, PIN_4>,
    scl: Peri<'static, PIN_5>,
    config: &DisplayHwConfig,
) -> GateDisplays {
    let bus_config = I2cConfig {
        frequency: config.i2c_frequency,
    };
    let master = I2c::new_blocking(i2c, scl, sda, rp_config(&bus_config));
    let bus: &'static RefCell<GateBus> = I2C_BUS.init(RefCell::new(RpI2c::new(master)));
    info!("I2C0 initialized at {} Hz", config.i2c_frequency);

    let mut displays: GateDisplays = core::array::from_fn(|offset| {
        Ht16k33::new(SharedBus::new(bus), config.addresses[offset])
    });

    for (index, display) in DisplayIndex::all().zip(displays.iter_mut()) {
        match display.init(config.brightness) {
            Ok(()) => debug!(
                "Display {} at {=u8:#x} ready",
                index.number(),
                display.address()
            ),
            Err(e) => warn!(
                "Display {} at {=u8:#x} failed to initialise: {}",
                index.number(),
                display.address(),
                e
            ),
        }
    }

    displays
}
