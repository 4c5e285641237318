//! Parser for the `station.toml` subset
//!
//! Handles only what the station configuration needs:
//! - `[section]` headers (`wifi`, `mqtt`, `displays`)
//! - `key = value` pairs with string, integer, boolean and single-line
//!   integer-array values
//! - Decimal and `0x` hexadecimal integers
//! - Comments (`# ...`), including trailing ones
//!
//! Keys that are not present keep their default value.

use heapless::String;

use super::types::{
    DisplayHwConfig, MqttConfig, StationConfig, WifiConfig, MAX_BRIGHTNESS, MAX_TOPIC_LEN,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String value longer than its field
    TooLong,
    /// Array has more items than the field holds
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Wifi,
    Mqtt,
    Displays,
}

/// Parse `station.toml` text into a [`StationConfig`]
pub fn parse_config(input: &str) -> Result<StationConfig, ParseError> {
    let mut config = StationConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = match comment_start(line) {
            Some(hash_pos) => line[..hash_pos].trim(),
            None => line.trim(),
        };

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') && !line.contains('=') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Wifi => apply_wifi(&mut config.wifi, key, value)?,
            Section::Mqtt => apply_mqtt(&mut config.mqtt, key, value)?,
            Section::Displays => apply_displays(&mut config.displays, key, value)?,
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "wifi" => Ok(Section::Wifi),
        "mqtt" => Ok(Section::Mqtt),
        "displays" => Ok(Section::Displays),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_wifi(wifi: &mut WifiConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "ssid" => wifi.ssid = parse_bounded(value)?,
        "password" => wifi.password = parse_bounded(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_mqtt(mqtt: &mut MqttConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "broker" => mqtt.broker = parse_ipv4(parse_string(value)?)?,
        "port" => mqtt.port = parse_int(value)?,
        "topic" => {
            let topic: String<MAX_TOPIC_LEN> = parse_bounded(value)?;
            // Subscribing to a filter would let other topics through the gate
            if topic.is_empty() || topic.contains(['+', '#']) {
                return Err(ParseError::InvalidValue);
            }
            mqtt.topic = topic;
        }
        "client_id" => mqtt.client_id = parse_bounded(value)?,
        "keepalive_s" => {
            let keepalive_s: u16 = parse_int(value)?;
            if keepalive_s == 0 {
                return Err(ParseError::InvalidValue);
            }
            mqtt.keepalive_s = keepalive_s;
        }
        "poll_timeout_ms" => mqtt.poll_timeout_ms = parse_int(value)?,
        "idle_ms" => mqtt.idle_ms = parse_int(value)?,
        "reconnect_ms" => mqtt.reconnect_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_displays(
    displays: &mut DisplayHwConfig,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match key {
        "addresses" => displays.addresses = parse_addresses(value)?,
        "brightness" => {
            let level: u8 = parse_int(value)?;
            if level > MAX_BRIGHTNESS {
                return Err(ParseError::InvalidValue);
            }
            displays.brightness = level;
        }
        "i2c_frequency" => displays.i2c_frequency = parse_int(value)?,
        "self_test" => displays.self_test = parse_bool(value)?,
        "self_test_ms" => displays.self_test_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Split `key = value`, dropping a trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    let value = match comment_start(value) {
        Some(hash_pos) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Byte offset of the first `#` outside a quoted string
fn comment_start(value: &str) -> Option<usize> {
    let mut quoted = false;
    for (pos, c) in value.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return Some(pos),
            _ => {}
        }
    }
    None
}

/// Strip the quotes from a string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

fn parse_bounded<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    String::try_from(parse_string(value)?).map_err(|_| ParseError::TooLong)
}

/// Parse a decimal or `0x` hexadecimal integer
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let value = value.trim();
    let raw = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a dotted-quad IPv4 address
fn parse_ipv4(value: &str) -> Result<[u8; 4], ParseError> {
    let mut octets = [0u8; 4];
    let mut parts = value.split('.');

    for octet in octets.iter_mut() {
        let part = parts.next().ok_or(ParseError::InvalidValue)?;
        *octet = part.parse().map_err(|_| ParseError::InvalidValue)?;
    }

    if parts.next().is_some() {
        return Err(ParseError::InvalidValue);
    }
    Ok(octets)
}

/// Parse an array of exactly six 7-bit I2C addresses
fn parse_addresses(value: &str) -> Result<[u8; 6], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut addresses = [0u8; 6];
    let mut count = 0;

    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let slot = addresses.get_mut(count).ok_or(ParseError::TooManyItems)?;
        let address: u8 = parse_int(item)?;
        if address > 0x7F {
            return Err(ParseError::InvalidValue);
        }
        *slot = address;
        count += 1;
    }

    if count != addresses.len() {
        return Err(ParseError::InvalidValue);
    }
    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ADDRESSES;

    const STATION: &str = r#"
# Starting gate
[wifi]   # credentials
ssid = "Pinewood"
password = "derby#2024"   # hash inside quotes is kept

[mqtt]
broker = "10.0.0.5"
port = 8883
topic = "track/ondeck"
client_id = "gate-1"
keepalive_s = 30
poll_timeout_ms = 500
idle_ms = 50
reconnect_ms = 2000

[displays]
addresses = [0x70, 0x71, 0x72, 0x73, 0x74, 0x77]
brightness = 8
i2c_frequency = 400000
self_test = false
self_test_ms = 0
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(STATION).unwrap();

        assert_eq!(config.wifi.ssid.as_str(), "Pinewood");
        assert_eq!(config.wifi.password.as_str(), "derby#2024");

        assert_eq!(config.mqtt.broker, [10, 0, 0, 5]);
        assert_eq!(config.mqtt.port, 8883);
        assert_eq!(config.mqtt.topic.as_str(), "track/ondeck");
        assert_eq!(config.mqtt.client_id.as_str(), "gate-1");
        assert_eq!(config.mqtt.keepalive_s, 30);
        assert_eq!(config.mqtt.poll_timeout_ms, 500);
        assert_eq!(config.mqtt.idle_ms, 50);
        assert_eq!(config.mqtt.reconnect_ms, 2000);

        assert_eq!(config.displays.addresses, [0x70, 0x71, 0x72, 0x73, 0x74, 0x77]);
        assert_eq!(config.displays.brightness, 8);
        assert_eq!(config.displays.i2c_frequency, 400_000);
        assert!(!config.displays.self_test);
        assert_eq!(config.displays.self_test_ms, 0);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[wifi]\nssid = \"Pinewood\"\n").unwrap();
        assert_eq!(config.wifi.ssid.as_str(), "Pinewood");
        assert_eq!(config.mqtt, MqttConfig::default());
        assert_eq!(config.mqtt.broker, [192, 168, 1, 10]);
        assert_eq!(config.mqtt.topic.as_str(), "ondeck");
        assert_eq!(config.displays.addresses, DEFAULT_ADDRESSES);
        assert_eq!(config.displays.brightness, 15);

        assert_eq!(parse_config("").unwrap(), StationConfig::default());
    }

    #[test]
    fn test_rejects_unknown_section_and_key() {
        assert_eq!(parse_config("[stepper]"), Err(ParseError::InvalidSection));
        assert_eq!(
            parse_config("[mqtt]\nqos = 1"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(parse_config("ssid = \"x\""), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            parse_config("[displays]\nbrightness = 16"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[mqtt]\nport = 70000"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[mqtt]\nbroker = \"192.168.1\""),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[mqtt]\nbroker = \"192.168.1.256\""),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[mqtt]\ntopic = \"ondeck/#\""),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[wifi]\nssid = Pinewood"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[displays]\nself_test = yes"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_keepalive_must_be_positive() {
        assert_eq!(
            parse_config("[mqtt]\nkeepalive_s = 0"),
            Err(ParseError::InvalidValue)
        );

        let config = parse_config("[mqtt]\nkeepalive_s = 1").unwrap();
        assert_eq!(config.mqtt.keepalive_s, 1);
    }

    #[test]
    fn test_rejects_long_strings() {
        assert_eq!(
            parse_config("[mqtt]\nclient_id = \"a-client-id-well-over-the-limit\""),
            Err(ParseError::TooLong)
        );
    }

    #[test]
    fn test_address_array_length() {
        assert_eq!(
            parse_addresses("[0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76]"),
            Err(ParseError::TooManyItems)
        );
        assert_eq!(parse_addresses("[0x70, 0x71]"), Err(ParseError::InvalidValue));
        assert_eq!(
            parse_addresses("[112, 113, 114, 115, 116, 117]"),
            Ok(DEFAULT_ADDRESSES)
        );
        assert_eq!(
            parse_addresses("[0x70, 0x71, 0x72, 0x73, 0x74, 0x80]"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("port = 1883"), Some(("port", "1883")));
        assert_eq!(parse_key_value("port = 1883 # mqtt"), Some(("port", "1883")));
        assert_eq!(
            parse_key_value("ssid = \"a#b\" # c"),
            Some(("ssid", "\"a#b\""))
        );
        assert_eq!(parse_key_value("port ="), None);
        assert_eq!(parse_key_value("port"), None);
    }

    #[test]
    fn test_parse_int_hex() {
        assert_eq!(parse_int::<u8>("0x70"), Ok(0x70));
        assert_eq!(parse_int::<u8>("0X7f"), Ok(0x7F));
        assert_eq!(parse_int::<u32>("100000"), Ok(100_000));
        assert_eq!(parse_int::<u8>("256"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("-1"), Err(ParseError::InvalidValue));
    }
}
