//! Build script for pharos-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds panel.toml at build time.                   ║\n\
            ║  Please create one in the pharos-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_light_sensor(&config, &mut errors);
    validate_frame_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only `[timing]` and `[light_sensor]` tables, nothing at the top level
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        match (name.as_str(), value) {
            ("timing" | "light_sensor", toml::Value::Table(_)) => {}
            ("timing" | "light_sensor", _) => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

/// Check that every key in `section` is known and an integer within its range
fn check_integers(
    config: &toml::Value,
    section: &str,
    keys: &[(&str, i64, i64)],
    errors: &mut Vec<String>,
) {
    let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
        return;
    };

    for (key, value) in table {
        let Some(&(_, min, max)) = keys.iter().find(|(k, _, _)| *k == key.as_str()) else {
            errors.push(format!("[{}] unknown key '{}'", section, key));
            continue;
        };

        match value {
            toml::Value::Integer(v) if (min..=max).contains(v) => {}
            toml::Value::Integer(_) => {
                errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
            }
            _ => errors.push(format!("[{}] {} must be an integer", section, key)),
        }
    }
}

/// Validate the [timing] section
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    check_integers(
        config,
        "timing",
        &[
            ("tick_interval_ms", 1, u32::MAX as i64),
            ("shift_step_ms", 0, u32::MAX as i64),
            ("pulse_hold_ms", 1, u32::MAX as i64),
        ],
        errors,
    );
}

/// Validate the [light_sensor] section
fn validate_light_sensor(config: &toml::Value, errors: &mut Vec<String>) {
    check_integers(
        config,
        "light_sensor",
        &[
            ("channel", 0, 7),
            ("dark_threshold", 0, u16::MAX as i64),
            ("indicator_led", 0, 2),
        ],
        errors,
    );
}

/// A full 16-bit display frame must finish within one sampling period
fn validate_frame_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let timing = |key: &str, default: i64| {
        config
            .get("timing")
            .and_then(|t| t.get(key))
            .and_then(|v| v.as_integer())
            .unwrap_or(default)
    };

    let tick = timing("tick_interval_ms", 1000);
    let step = timing("shift_step_ms", 1);
    if step.saturating_mul(16) >= tick {
        errors.push(format!(
            "[timing] 16 x shift_step_ms ({}) must be below tick_interval_ms ({})",
            step.saturating_mul(16),
            tick
        ));
    }
}
