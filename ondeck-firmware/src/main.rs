//! On-deck heat display firmware
//!
//! Main firmware binary for the starting-gate display: a Raspberry Pi
//! Pico W driving six HT16K33 4-digit backpacks, fed heat line-ups over
//! MQTT.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, StackResources};
use embassy_time::{Instant, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ondeck_core::config::StationConfig;
use ondeck_core::station::Station;
use ondeck_hal_rp2040::wifi::{self, RadioPeripherals};

mod channels;
mod config;
mod displays;
mod tasks;

/// CYW43439 firmware and country locale matrix
const RADIO_FIRMWARE: &[u8] = include_bytes!("../../firmware/cyw43/43439A0.bin");
const RADIO_CLM: &[u8] = include_bytes!("../../firmware/cyw43/43439A0_clm.bin");

/// Hold time of the blank displays at power-up
const BLANK_HOLD_MS: u64 = 1000;

// Static cells (must live forever for task references)
static STATION_CONFIG: StaticCell<StationConfig> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("On-deck display firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static StationConfig = STATION_CONFIG.init(config::load());

    // Displays on I2C0 (Pico W: SDA=GPIO4, SCL=GPIO5)
    let gate = displays::init(p.I2C0, p.PIN_4, p.PIN_5, &config.displays);
    let mut station = unwrap!(Station::new(config.mqtt.topic.as_str(), gate));

    let report = station.dispatcher_mut().clear_all();
    for (index, error) in report.failures() {
        warn!("Display {} clear failed: {}", index.number(), error);
    }
    Timer::after_millis(BLANK_HOLD_MS).await;

    if config.displays.self_test {
        let report = station.dispatcher_mut().show_test_pattern();
        for (index, error) in report.failures() {
            warn!("Display {} test pattern failed: {}", index.number(), error);
        }
        Timer::after_millis(u64::from(config.displays.self_test_ms)).await;
    }

    spawner.spawn(tasks::display_task(station)).unwrap();

    // Radio: PWR=GPIO23, CS=GPIO25, DIO=GPIO24, CLK=GPIO29 on PIO0
    let radio = RadioPeripherals {
        pwr: p.PIN_23,
        cs: p.PIN_25,
        dio: p.PIN_24,
        clk: p.PIN_29,
        pio: p.PIO0,
        dma: p.DMA_CH0,
    };
    let (net_device, mut control, runner) = wifi::start_radio(radio, RADIO_FIRMWARE).await;
    spawner.spawn(wifi::radio_task(runner)).unwrap();
    wifi::init_control(&mut control, RADIO_CLM).await;
    info!("Radio initialized");

    // Varies with radio bring-up timing
    let seed = Instant::now().as_ticks() ^ 0x6f6e_6465_636b_2d31;
    let (stack, net_runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(tasks::net_task(net_runner)).unwrap();

    tasks::join_wifi(&mut control, &config.wifi).await;
    tasks::wait_for_address(stack).await;

    spawner.spawn(tasks::mqtt_task(stack, &config.mqtt)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
