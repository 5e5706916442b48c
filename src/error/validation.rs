use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Invalid header name '{name}'.")]
    InvalidHeaderName { name: String },
    #[error("Invalid value for header '{name}'.")]
    InvalidHeaderValue { name: String },
    #[error("Header name '{name}' exceeds {max} bytes.")]
    HeaderNameTooLong { name: String, max: usize },
    #[error("Value for header '{name}' exceeds {max} bytes.")]
    HeaderValueTooLong { name: String, max: usize },
    #[error("Too many headers ({count}); at most {max} are allowed.")]
    TooManyHeaders { count: usize, max: usize },
    #[error("Invalid HTTP method '{value}'.")]
    InvalidMethod { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration must be greater than zero.")]
    DurationZero,
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("No target URL given. Pass a URL or --urls-file.")]
    MissingUrl,
    #[error("URLs file '{path}' is empty or missing.")]
    UrlFileEmpty { path: PathBuf },
    #[error("Body file '{path}' could not be read.")]
    BodyFileMissing { path: PathBuf },
    #[error("Concurrency must be >= 1.")]
    ConcurrencyZero,
    #[error("Requests must be >= 1 when no duration is set.")]
    RequestsZero,
    #[error("Requests per second must be >= 1.")]
    RpsZero,
    #[error("Timeout must be > 0.")]
    TimeoutZero,
    #[error("--{flag} requires --tag <name>.")]
    TagRequired { flag: &'static str },
    #[error("Invalid tag '{tag}'. Tags may not be empty or contain path separators.")]
    InvalidTag { tag: String },
    #[error("Threshold must be a non-negative percentage, got {value}.")]
    InvalidThreshold { value: f64 },
    #[error("Baseline ('before') not found for tag: {tag}")]
    BaselineMissing { tag: String },
    #[error("Target ('after') not found for tag: {tag}")]
    TargetMissing { tag: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
