use std::time::Duration;

use crate::args::parse_header;
use crate::config::{parse_duration_value, validate_header};
use crate::error::{AppError, AppResult};
use crate::http::{Header, PreparedRequest, ResponseHead, Target, parse_response_head, parse_status_code};

/// Parses a target URL.
///
/// # Errors
///
/// Returns an error when the URL is not a valid http(s) target.
pub fn parse_target_input(input: &str) -> AppResult<Target> {
    Target::parse(input).map_err(AppError::from)
}

/// Parses the status code from the first bytes of a response.
///
/// # Errors
///
/// Returns an error when the status line is malformed.
pub fn parse_status_line_input(input: &[u8]) -> AppResult<u16> {
    parse_status_code(input).map_err(AppError::from)
}

/// Parses a response head and its reuse verdict.
///
/// # Errors
///
/// Returns an error when the status line is malformed.
pub fn parse_response_head_input(input: &[u8]) -> AppResult<ResponseHead> {
    parse_response_head(input).map_err(AppError::from)
}

/// Parses a header string in `Key: Value` format.
///
/// # Errors
///
/// Returns an error when the header is malformed.
pub fn parse_header_input(input: &str) -> AppResult<(String, String)> {
    parse_header(input).map_err(AppError::from)
}

/// Parses and validates a header against HTTP token rules and length limits.
///
/// # Errors
///
/// Returns an error when the header is malformed or too long.
pub fn validate_header_input(input: &str) -> AppResult<Header> {
    validate_header(input).map_err(AppError::from)
}

/// Parses a duration value (e.g. `10s`, `500ms`, `2m`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_value_input(input: &str) -> AppResult<Duration> {
    parse_duration_value(input).map_err(AppError::from)
}

/// Builds the wire bytes for a GET to `url` with the given raw headers.
///
/// # Errors
///
/// Returns an error when the URL or a header is invalid.
pub fn prepare_request_input(url: &str, raw_headers: &[&str]) -> AppResult<PreparedRequest> {
    let target = parse_target_input(url)?;
    let headers = raw_headers
        .iter()
        .map(|raw| validate_header_input(raw))
        .collect::<AppResult<Vec<Header>>>()?;
    Ok(PreparedRequest::build(
        &http::Method::GET,
        &target,
        &headers,
        None,
    ))
}
