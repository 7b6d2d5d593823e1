// core/src/error.rs
use thiserror::Error;

/// Every failure the engine and its parsers can report.
///
/// All of them are local validation failures; nothing is retried and a failed
/// computation produces no summary.
#[derive(Debug, Error)]
pub enum SportError {
    /// Elapsed time resolved to zero (or less) seconds where it feeds a division.
    #[error("elapsed time must be positive, got {seconds} s")]
    InvalidDuration { seconds: i64 },

    #[error("invalid percentage: {0}")]
    InvalidPercentage(String),

    #[error("{field} must not be negative, got {value} m")]
    NegativeElevation { field: &'static str, value: f64 },

    /// A cycling model parameter outside its physical range.
    #[error("invalid {name}: {value} (expected {expected})")]
    InvalidParameter { name: &'static str, value: f64, expected: &'static str },

    #[error(
        "invalid time '{0}': use iso format (HH:MM:SS), a single float (hours) \
         or a float with a time unit (s, m, h)"
    )]
    InvalidTime(String),

    #[error("invalid distance '{0}'")]
    InvalidDistance(String),

    #[error("missing distance: provide distance_m or distance_km")]
    MissingDistance,

    #[error("invalid METs table: {0}")]
    InvalidMetsTable(&'static str),

    #[error("unknown sport '{0}'")]
    UnknownSport(String),

    /// Input mapping could not be decoded; `path` points at the offending key.
    #[error("input parse at {path}: {message}")]
    Input { path: String, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SportError>;
