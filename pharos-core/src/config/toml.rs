//! Minimal TOML reader for `panel.toml`
//!
//! Handles only the subset the panel configuration needs:
//! - `[section]` headers
//! - `key = integer` pairs
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys left out of the file keep their defaults. Unknown sections and keys
//! are rejected so a typo never silently falls back to a default.

use pharos_protocol::{AdcChannel, LedId};

use super::types::PanelConfig;

/// Parse error, with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed or unknown section header
    InvalidSection { line: u16 },
    /// Key not valid in the current section
    UnknownKey { line: u16 },
    /// Line is neither a header nor `key = value`
    InvalidLine { line: u16 },
    /// Value is not an integer in range for its key
    InvalidValue { line: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    LightSensor,
}

/// Parse a configuration file, starting from the defaults
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for (number, raw) in input.lines().enumerate() {
        let line = strip_comment(raw).trim();
        let line_no = u16::try_from(number + 1).unwrap_or(u16::MAX);

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ParseError::InvalidLine { line: line_no })?;
        apply(&mut config, section, key, value, line_no)?;
    }

    Ok(config)
}

fn apply(
    config: &mut PanelConfig,
    section: Section,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue { line };

    match (section, key) {
        (Section::Timing, "tick_interval_ms") => {
            config.timing.tick_interval_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Timing, "shift_step_ms") => {
            config.timing.shift_step_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Timing, "pulse_hold_ms") => {
            config.timing.pulse_hold_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::LightSensor, "channel") => {
            config.light_sensor.channel = parse_int(value)
                .and_then(AdcChannel::new)
                .ok_or(invalid)?;
        }
        (Section::LightSensor, "dark_threshold") => {
            config.light_sensor.dark_threshold = parse_int(value).ok_or(invalid)?;
        }
        (Section::LightSensor, "indicator_led") => {
            config.light_sensor.indicator_led =
                parse_int(value).and_then(LedId::new).ok_or(invalid)?;
        }
        _ => return Err(ParseError::UnknownKey { line }),
    }

    Ok(())
}

fn parse_section_header(line: &str) -> Option<Section> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    match name {
        "timing" => Some(Section::Timing),
        "light_sensor" => Some(Section::LightSensor),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: TryFrom<u64>>(value: &str) -> Option<T> {
    let mut result: u64 = 0;
    let mut digits = 0;

    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10)?;
        result = result.checked_mul(10)?.checked_add(u64::from(digit))?;
        digits += 1;
    }

    if digits == 0 {
        return None;
    }
    T::try_from(result).ok()
}
