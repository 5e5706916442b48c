use std::time::Duration;

use crate::config::parse_duration_value;
use crate::error::{AppError, AppResult, ValidationError};

/// Splits a `Key: Value` header on the first colon and trims both halves.
///
/// # Errors
///
/// Returns an error when the input has no colon or an empty name.
pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        Some(_) | None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

/// Parses `--duration` and `--timeout`, which must be positive.
///
/// # Errors
///
/// Returns an error for malformed, overflowing or zero durations.
pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let duration = parse_duration_value(s).map_err(AppError::validation)?;
    if duration.is_zero() {
        return Err(AppError::validation(ValidationError::DurationZero));
    }
    Ok(duration)
}

/// Parses `--ramp-up`, where `0` disables the ramp.
///
/// # Errors
///
/// Returns an error for malformed or overflowing durations.
pub(crate) fn parse_ramp_up_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::validation)
}
