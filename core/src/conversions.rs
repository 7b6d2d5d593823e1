// core/src/conversions.rs
use chrono::{NaiveTime, Timelike};

use crate::error::{Result, SportError};

pub const JOULES_PER_KCAL: f64 = 4184.0;

#[inline]
pub fn joules_to_kilojoules(joules: f64) -> f64 {
    joules / 1000.0
}

#[inline]
pub fn joules_to_kcal(joules: f64) -> f64 {
    joules / JOULES_PER_KCAL
}

#[inline]
pub fn kcal_to_joules(kcal: f64) -> f64 {
    kcal * JOULES_PER_KCAL
}

/// m/s → km/h
#[inline]
pub fn mps_to_kmph(mps: f64) -> f64 {
    mps * 3.6
}

/// h·3600 + m·60 + s.
///
/// With `check` set the result must be strictly positive, otherwise
/// `InvalidDuration` is returned. Callers dividing by the result must check.
pub fn duration_to_seconds(hours: i64, minutes: i64, seconds: i64, check: bool) -> Result<f64> {
    let total = hours * 3600 + minutes * 60 + seconds;
    if check && total <= 0 {
        return Err(SportError::InvalidDuration { seconds: total });
    }
    Ok(total as f64)
}

/// Same as [`duration_to_seconds`] for an elapsed time stored as a time of day.
pub fn time_to_seconds(time: NaiveTime, check: bool) -> Result<f64> {
    duration_to_seconds(
        i64::from(time.hour()),
        i64::from(time.minute()),
        i64::from(time.second()),
        check,
    )
}
