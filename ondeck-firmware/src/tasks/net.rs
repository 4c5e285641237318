//! Wi-Fi association and the IP stack
//!
//! The radio runner lives in ondeck-hal-rp2040; this module drives the
//! embassy-net stack on top of it.

use cyw43::{Control, JoinOptions, NetDriver};
use defmt::*;
use embassy_net::{Runner, Stack};
use embassy_time::Timer;

use ondeck_core::config::WifiConfig;

/// Delay between failed join attempts
const JOIN_RETRY_MS: u64 = 2000;

/// Run the embassy-net stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Join the configured network, retrying until it succeeds
pub async fn join_wifi(control: &mut Control<'_>, wifi: &WifiConfig) {
    info!("Connecting to {}", wifi.ssid.as_str());

    let mut attempt: u32 = 1;
    loop {
        let options = if wifi.password.is_empty() {
            JoinOptions::new_open()
        } else {
            JoinOptions::new(wifi.password.as_bytes())
        };

        match control.join(wifi.ssid.as_str(), options).await {
            Ok(()) => break,
            Err(e) => {
                warn!(
                    "Join attempt {} failed with status {}",
                    attempt, e.status
                );
                attempt += 1;
                Timer::after_millis(JOIN_RETRY_MS).await;
            }
        }
    }

    info!("Connected to {}!", wifi.ssid.as_str());
}

/// Wait for the link and a DHCP lease
pub async fn wait_for_address(stack: Stack<'static>) {
    stack.wait_link_up().await;
    debug!("Link up, waiting for DHCP");
    stack.wait_config_up().await;

    if let Some(config) = stack.config_v4() {
        info!("DHCP address {}", config.address);
    }
}
