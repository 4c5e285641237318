//! Build script for ondeck-firmware
//!
//! - Sets up linker search paths for memory.x and the embassy link scripts
//! - Validates station.toml at compile time
//! - Checks that the CYW43439 firmware blobs are present

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Radio firmware expected next to the workspace root
const RADIO_BLOBS: [&str; 2] = [
    "../firmware/cyw43/43439A0.bin",
    "../firmware/cyw43/43439A0_clm.bin",
];

fn main() {
    setup_linker();
    validate_config();
    check_radio_firmware();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DEFMT_LOG");
}

/// Print a boxed error and abort the build
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| format!("║  • {:<62} ║", truncate(line)))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn truncate(line: &str) -> String {
    if line.chars().count() > 62 {
        format!("{}...", line.chars().take(59).collect::<String>())
    } else {
        line.to_string()
    }
}

/// Validate station.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=station.toml");

    let config_path = Path::new("station.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(
            "Failed to read station.toml",
            &[e.to_string(), "Create one in the ondeck-firmware directory".into()],
        ),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in station.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    if let Some(root) = config.as_table() {
        for (key, value) in root {
            if !value.is_table() || !["wifi", "mqtt", "displays"].contains(&key.as_str()) {
                errors.push(format!("unknown section or key '{}'", key));
            }
        }
    }
    validate_wifi(&config, &mut errors);
    validate_mqtt(&config, &mut errors);
    validate_displays(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid station.toml", &errors);
    }

    println!("cargo:warning=station.toml validated successfully");
}

fn table<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|t| t.as_table())
}

fn check_string(section: &toml::value::Table, name: &str, key: &str, max: usize, errors: &mut Vec<String>) {
    match section.get(key) {
        Some(toml::Value::String(s)) if s.len() > max => {
            errors.push(format!("[{}] {} longer than {} bytes", name, key, max));
        }
        Some(toml::Value::String(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be a string", name, key)),
    }
}

fn check_int(
    section: &toml::value::Table,
    name: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    match section.get(key) {
        Some(toml::Value::Integer(v)) if !range.contains(v) => errors.push(format!(
            "[{}] {} must be {}-{}",
            name,
            key,
            range.start(),
            range.end()
        )),
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer", name, key)),
    }
}

fn check_keys(section: &toml::value::Table, name: &str, known: &[&str], errors: &mut Vec<String>) {
    for key in section.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", name, key));
        }
    }
}

fn validate_wifi(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(wifi) = table(config, "wifi") else {
        errors.push("Missing [wifi] section with ssid and password".into());
        return;
    };

    check_keys(wifi, "wifi", &["ssid", "password"], errors);
    if wifi.get("ssid").is_none() {
        errors.push("[wifi] missing 'ssid'".into());
    }
    check_string(wifi, "wifi", "ssid", 32, errors);
    check_string(wifi, "wifi", "password", 64, errors);
}

fn validate_mqtt(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(mqtt) = table(config, "mqtt") else {
        return;
    };

    check_keys(
        mqtt,
        "mqtt",
        &[
            "broker",
            "port",
            "topic",
            "client_id",
            "keepalive_s",
            "poll_timeout_ms",
            "idle_ms",
            "reconnect_ms",
        ],
        errors,
    );

    if let Some(broker) = mqtt.get("broker") {
        let valid = broker
            .as_str()
            .map(|s| s.parse::<std::net::Ipv4Addr>().is_ok())
            .unwrap_or(false);
        if !valid {
            errors.push("[mqtt] broker must be an IPv4 address like \"192.168.1.10\"".into());
        }
    }

    check_string(mqtt, "mqtt", "topic", 64, errors);
    if let Some(toml::Value::String(topic)) = mqtt.get("topic") {
        if topic.is_empty() || topic.contains(['+', '#']) {
            errors.push("[mqtt] topic must be non-empty with no wildcards".into());
        }
    }
    check_string(mqtt, "mqtt", "client_id", 23, errors);
    check_int(mqtt, "mqtt", "port", 1..=65535, errors);
    check_int(mqtt, "mqtt", "keepalive_s", 1..=65535, errors);
    check_int(mqtt, "mqtt", "poll_timeout_ms", 1..=u32::MAX as i64, errors);
    check_int(mqtt, "mqtt", "idle_ms", 0..=u32::MAX as i64, errors);
    check_int(mqtt, "mqtt", "reconnect_ms", 0..=u32::MAX as i64, errors);
}

fn validate_displays(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(displays) = table(config, "displays") else {
        return;
    };

    check_keys(
        displays,
        "displays",
        &["addresses", "brightness", "i2c_frequency", "self_test", "self_test_ms"],
        errors,
    );

    match displays.get("addresses") {
        Some(toml::Value::Array(addresses)) => {
            if addresses.len() != 6 {
                errors.push("[displays] addresses must list exactly 6 displays".into());
            }
            for address in addresses {
                match address.as_integer() {
                    Some(a) if (0..=0x7F).contains(&a) => {}
                    _ => errors.push(format!("[displays] {} is not a 7-bit address", address)),
                }
            }
        }
        Some(_) => errors.push("[displays] addresses must be an array".into()),
        None => {}
    }

    check_int(displays, "displays", "brightness", 0..=15, errors);
    check_int(displays, "displays", "i2c_frequency", 1..=1_000_000, errors);
    check_int(displays, "displays", "self_test_ms", 0..=u32::MAX as i64, errors);
    if let Some(value) = displays.get("self_test") {
        if !value.is_bool() {
            errors.push("[displays] self_test must be true or false".into());
        }
    }
}

/// The radio firmware is not distributed with the source
fn check_radio_firmware() {
    let missing: Vec<String> = RADIO_BLOBS
        .iter()
        .inspect(|blob| println!("cargo:rerun-if-changed={}", blob))
        .filter(|blob| !Path::new(blob).exists())
        .map(|blob| format!("missing {}", blob))
        .collect();

    if !missing.is_empty() {
        let mut lines = missing;
        lines.push("Copy 43439A0.bin and 43439A0_clm.bin from the".into());
        lines.push("embassy repository's cyw43-firmware directory".into());
        fail("CYW43439 firmware not found", &lines);
    }
}
