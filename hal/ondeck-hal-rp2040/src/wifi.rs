//! CYW43439 radio on the Pico W
//!
//! The radio hangs off a PIO-driven half-duplex SPI on fixed pins:
//! power on GPIO23, chip select on GPIO25, data on GPIO24 and clock on
//! GPIO29. Firmware and CLM blobs are passed in by the binary so this
//! crate does not depend on where they live.

use cyw43::{Control, NetDriver, PowerManagementMode, Runner, State};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::Peri;
use static_cell::StaticCell;

bind_interrupts!(struct PioIrqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// SPI link to the radio
pub type RadioSpi = PioSpi<'static, PIO0, 0, DMA_CH0>;

/// Background driver that must be polled for the radio to work
pub type RadioRunner = Runner<'static, Output<'static>, RadioSpi>;

static RADIO_STATE: StaticCell<State> = StaticCell::new();

/// Peripherals owned by the radio
pub struct RadioPeripherals {
    pub pwr: Peri<'static, PIN_23>,
    pub cs: Peri<'static, PIN_25>,
    pub dio: Peri<'static, PIN_24>,
    pub clk: Peri<'static, PIN_29>,
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH0>,
}

/// Power up the radio and load its firmware
///
/// Returns the network device for the IP stack, the control handle and the
/// runner to spawn. May only be called once.
pub async fn start_radio(
    p: RadioPeripherals,
    firmware: &[u8],
) -> (NetDriver<'static>, Control<'static>, RadioRunner) {
    let pwr = Output::new(p.pwr, Level::Low);
    let cs = Output::new(p.cs, Level::High);

    let mut pio = Pio::new(p.pio, PioIrqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.dio,
        p.clk,
        p.dma,
    );

    let state = RADIO_STATE.init(State::new());
    cyw43::new(state, pwr, spi, firmware).await
}

/// Load the country locale matrix and enable power saving
pub async fn init_control(control: &mut Control<'_>, clm: &[u8]) {
    control.init(clm).await;
    control
        .set_power_management(PowerManagementMode::PowerSave)
        .await;
}

/// Run the radio driver
#[embassy_executor::task]
pub async fn radio_task(runner: RadioRunner) -> ! {
    runner.run().await
}
