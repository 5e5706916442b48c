use std::collections::BTreeMap;
use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::RequestResult;

/// Status codes tracked by the histogram.
pub const STATUS_RANGE: Range<u16> = 100..600;

const P50: usize = 50;
const P95: usize = 95;
const P99: usize = 99;
const PERCENT: usize = 100;

/// Count of responses per status code in [`STATUS_RANGE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusHistogram(BTreeMap<u16, u64>);

impl StatusHistogram {
    /// Counts `code`, ignoring codes outside [`STATUS_RANGE`].
    pub fn record(&mut self, code: u16) -> bool {
        if !STATUS_RANGE.contains(&code) {
            return false;
        }
        let count = self.0.entry(code).or_insert(0);
        *count = count.saturating_add(1);
        true
    }

    #[must_use]
    pub fn count(&self, code: u16) -> u64 {
        self.0.get(&code).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.0.iter().map(|(code, count)| (*code, *count))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Summary of a result set. Latencies are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_requests: u64,
    pub success: u64,
    pub failed: u64,
    pub avg_latency: f64,
    pub min_latency: f64,
    pub max_latency: f64,
    pub p50_latency: f64,
    pub p95_latency: f64,
    pub p99_latency: f64,
    #[serde(default)]
    pub status_codes: StatusHistogram,
    pub rps: f64,
    pub total_duration_s: f64,
}

impl Stats {
    /// Percentage of successful requests, 0 for an empty run.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.success as f64 / self.total_requests as f64 * 100.0
    }
}

/// Computes [`Stats`] from a result set and the run's wall-clock duration.
///
/// Success is `200..400`. Only results with a positive latency contribute to
/// the latency figures; percentiles use the nearest rank `sorted[floor(n * p)]`.
#[must_use]
pub fn calculate_stats(results: &[RequestResult], total_duration: Duration) -> Stats {
    let total_duration_s = total_duration.as_secs_f64();
    let total_requests = u64::try_from(results.len()).unwrap_or(u64::MAX);
    let mut stats = Stats {
        total_requests,
        total_duration_s,
        ..Stats::default()
    };
    if results.is_empty() {
        return stats;
    }

    let mut latencies: Vec<f64> = Vec::with_capacity(results.len());
    for result in results {
        if result.is_success() {
            stats.success = stats.success.saturating_add(1);
        } else {
            stats.failed = stats.failed.saturating_add(1);
        }
        stats.status_codes.record(result.status_code);
        if !result.latency.is_zero() {
            latencies.push(result.duration_ms());
        }
    }

    if !latencies.is_empty() {
        let sum: f64 = latencies.iter().sum();
        stats.avg_latency = sum / latencies.len() as f64;
        stats.min_latency = latencies.iter().copied().fold(f64::INFINITY, f64::min);
        stats.max_latency = latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        latencies.sort_by(f64::total_cmp);
        stats.p50_latency = nearest_rank(&latencies, P50);
        stats.p95_latency = nearest_rank(&latencies, P95);
        stats.p99_latency = nearest_rank(&latencies, P99);
    }

    if total_duration_s > 0.0 {
        stats.rps = total_requests as f64 / total_duration_s;
    }

    stats
}

fn nearest_rank(sorted: &[f64], percent: usize) -> f64 {
    let index = sorted
        .len()
        .saturating_mul(percent)
        .checked_div(PERCENT)
        .unwrap_or(0);
    sorted
        .get(index)
        .or_else(|| sorted.last())
        .copied()
        .unwrap_or(0.0)
}
