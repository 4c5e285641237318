//! Configuration type definitions

use heapless::String;

/// Maximum Wi-Fi SSID length (802.11 limit)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum subscribed topic length
pub const MAX_TOPIC_LEN: usize = 64;

/// Maximum MQTT client identifier length every broker must accept
pub const MAX_CLIENT_ID_LEN: usize = 23;

/// Brightest HT16K33 dimming level
pub const MAX_BRIGHTNESS: u8 = 15;

/// Backpack addresses with A0-A2 jumpered 0 through 5
pub const DEFAULT_ADDRESSES: [u8; 6] = [0x70, 0x71, 0x72, 0x73, 0x74, 0x75];

/// Wireless network credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WifiConfig {
    /// Network name
    pub ssid: String<MAX_SSID_LEN>,
    /// Passphrase (empty for an open network)
    pub password: String<MAX_PASSWORD_LEN>,
}

/// Broker connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MqttConfig {
    /// Broker IPv4 address
    pub broker: [u8; 4],
    /// Broker TCP port
    pub port: u16,
    /// Topic carrying heat status
    pub topic: String<MAX_TOPIC_LEN>,
    /// Client identifier presented to the broker
    pub client_id: String<MAX_CLIENT_ID_LEN>,
    /// Keepalive interval in seconds, never zero
    pub keepalive_s: u16,
    /// How long one poll window waits for a packet, in milliseconds
    pub poll_timeout_ms: u32,
    /// Idle time between readiness checks in milliseconds
    pub idle_ms: u32,
    /// Delay before reconnecting after a transport failure
    pub reconnect_ms: u32,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker: [192, 168, 1, 10],
            port: 1883,
            topic: String::try_from("ondeck").unwrap_or_default(),
            client_id: String::try_from("ondeck-gate").unwrap_or_default(),
            keepalive_s: 60,
            poll_timeout_ms: 1000,
            idle_ms: 100,
            reconnect_ms: 5000,
        }
    }
}

/// Segment display hardware settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayHwConfig {
    /// I2C address of displays 1 through 6
    pub addresses: [u8; 6],
    /// Dimming level, 0 (dimmest) to 15
    pub brightness: u8,
    /// I2C clock in Hz
    pub i2c_frequency: u32,
    /// Show 1111..6666 at boot
    pub self_test: bool,
    /// How long the boot pattern is held before connecting
    pub self_test_ms: u32,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            addresses: DEFAULT_ADDRESSES,
            brightness: MAX_BRIGHTNESS,
            i2c_frequency: 100_000,
            self_test: true,
            self_test_ms: 2000,
        }
    }
}

/// Complete station configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StationConfig {
    pub wifi: WifiConfig,
    pub mqtt: MqttConfig,
    pub displays: DisplayHwConfig,
}

impl StationConfig {
    /// Create a configuration with every default
    pub fn new() -> Self {
        Self::default()
    }
}
