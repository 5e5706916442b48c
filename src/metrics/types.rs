use std::sync::Arc;
use std::time::Duration;

use crate::error::HttpError;

/// Outcome of one request attempt. Produced once and never mutated after it
/// enters the shared result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    pub url: Arc<str>,
    pub worker_id: usize,
    /// HTTP status code, 0 when no valid response was read.
    pub status_code: u16,
    /// Time spent writing the request and reading the response.
    pub latency: Duration,
    pub error: Option<String>,
}

impl RequestResult {
    #[must_use]
    pub const fn completed(url: Arc<str>, worker_id: usize, status_code: u16, latency: Duration) -> Self {
        Self {
            url,
            worker_id,
            status_code,
            latency,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(url: Arc<str>, worker_id: usize, latency: Duration, error: &HttpError) -> Self {
        Self {
            url,
            worker_id,
            status_code: 0,
            latency,
            error: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.latency.as_secs_f64() * 1_000.0
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 400
    }
}
