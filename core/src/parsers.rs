// core/src/parsers.rs
//! Value parsers for command-line arguments.

use std::collections::HashMap;

use chrono::NaiveTime;
use log::debug;
use once_cell::sync::Lazy;

use crate::error::{Result, SportError};

/// Seconds per accepted time unit.
static TIME_UNITS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("h", 3600),
        ("hour", 3600),
        ("hours", 3600),
        ("m", 60),
        ("min", 60),
        ("minute", 60),
        ("minutes", 60),
        ("s", 1),
        ("sec", 1),
        ("second", 1),
        ("seconds", 1),
    ])
});

pub const DEFAULT_LAP_DISTANCE_KM: f64 = 0.4;

/// Elapsed time from `"1.5 h"`, `"90min"`, `"01:30:00"`, `"01:30"` or `"1.5"` (hours).
pub fn parse_time(txt: &str) -> Result<NaiveTime> {
    parse_time_with_unit(txt)
        .or_else(|_| parse_iso_time(txt))
        .map_err(|_| SportError::InvalidTime(txt.to_string()))
}

/// A number followed by one of the units in the time table. Sub-second parts
/// are truncated.
pub fn parse_time_with_unit(txt: &str) -> Result<NaiveTime> {
    let invalid = || SportError::InvalidTime(txt.to_string());

    let unit = txt.trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, ',' | '.' | ' '));
    let number: String = txt
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == ' ')
        .chars()
        .filter(|c| *c != ' ')
        .collect();
    debug!("time unit: '{unit}', number: '{number}'");

    if number.is_empty() {
        return Err(invalid());
    }
    let factor = *TIME_UNITS.get(unit).ok_or_else(invalid)?;
    let value: f64 = number.parse().map_err(|_| invalid())?;

    seconds_to_time((value * f64::from(factor)).trunc()).ok_or_else(invalid)
}

fn seconds_to_time(total: f64) -> Option<NaiveTime> {
    if !(0.0..86_400.0).contains(&total) {
        return None;
    }
    NaiveTime::from_num_seconds_from_midnight_opt(total as u32, 0)
}

/// `HH:MM:SS` or `HH:MM`; a bare float is read as hours first.
pub fn parse_iso_time(txt: &str) -> Result<NaiveTime> {
    let iso = float_to_iso(txt)?;
    NaiveTime::parse_from_str(&iso, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&iso, "%H:%M"))
        .map_err(|_| SportError::InvalidTime(txt.to_string()))
}

/// `"1.5"` → `"01:30:00"`. Anything that is not a float is returned unchanged;
/// NaN, infinite and negative hours are rejected.
pub fn float_to_iso(txt: &str) -> Result<String> {
    let Ok(hours) = txt.trim().parse::<f64>() else {
        return Ok(txt.trim().to_string());
    };
    if !hours.is_finite() || hours < 0.0 {
        return Err(SportError::InvalidTime(txt.to_string()));
    }
    let whole_hours = hours.trunc() as i64;
    let minutes = ((hours - whole_hours as f64) * 60.0) as i64;
    let seconds = ((hours - whole_hours as f64 - minutes as f64 / 60.0) * 3600.0) as i64;
    Ok(format!("{whole_hours:02}:{minutes:02}:{seconds:02}"))
}

/// `"25"`, `"25%"` or `"12.5 %"` → 25.0 / 12.5. Must lie within 0–100.
pub fn parse_percentage(txt: &str) -> Result<f64> {
    let invalid = || {
        SportError::InvalidPercentage(format!(
            "'{txt}' (expected a number between 0 and 100, a % sign is allowed)"
        ))
    };
    let pct: f64 = txt.replace('%', "").trim().parse().map_err(|_| invalid())?;
    if !(0.0..=100.0).contains(&pct) {
        return Err(invalid());
    }
    Ok(pct)
}

/// Distance argument, either kilometres or a number of laps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Km(f64),
    Laps(f64),
}

impl Distance {
    pub fn to_km(self, lap_distance_km: f64) -> f64 {
        match self {
            Distance::Km(km) => km,
            Distance::Laps(laps) => laps * lap_distance_km,
        }
    }
}

/// `"10"` → 10 km, `"25 laps"` / `"25l"` / `"1 lap"` → laps.
pub fn parse_distance(txt: &str) -> Result<Distance> {
    let invalid = || SportError::InvalidDistance(txt.to_string());
    let lower = txt.trim().to_lowercase();

    let laps = ["laps", "lap", "l"].iter().find_map(|suffix| lower.strip_suffix(suffix));
    match laps {
        Some(n) => n.trim().parse().map(Distance::Laps).map_err(|_| invalid()),
        None => lower.parse().map(Distance::Km).map_err(|_| invalid()),
    }
}
