//! Pure scheduling arithmetic shared by the orchestrator and its workers.
use std::num::NonZeroU32;
use std::time::Duration;

use crate::config::Termination;
use crate::metrics::DURATION_RESULT_CAPACITY;

/// Requests owned by worker `id`: an even share, with the remainder going to
/// the lowest ids.
#[must_use]
pub fn worker_budget(total: u64, concurrency: usize, id: usize) -> u64 {
    let workers = u64::try_from(concurrency).unwrap_or(u64::MAX).max(1);
    let id = u64::try_from(id).unwrap_or(u64::MAX);
    let base = total.checked_div(workers).unwrap_or(0);
    let remainder = total.checked_rem(workers).unwrap_or(0);
    if id < remainder {
        base.saturating_add(1)
    } else {
        base
    }
}

/// Start offset of worker `id`: `id * ramp_up / concurrency`.
#[must_use]
pub fn ramp_delay(ramp_up: Duration, concurrency: usize, id: usize) -> Duration {
    if ramp_up.is_zero() || concurrency == 0 {
        return Duration::ZERO;
    }
    let nanos = ramp_up
        .as_nanos()
        .saturating_mul(id as u128)
        .checked_div(concurrency as u128)
        .unwrap_or(0);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Pause a rate-limited worker takes after every attempt.
#[must_use]
pub fn rate_interval(rps: NonZeroU32) -> Duration {
    Duration::from_secs(1)
        .checked_div(rps.get())
        .unwrap_or(Duration::ZERO)
}

/// Result buffer size: exact for fixed-count runs, a ceiling otherwise.
#[must_use]
pub fn result_capacity(termination: Termination) -> usize {
    match termination {
        Termination::Requests(count) => usize::try_from(count.get()).unwrap_or(usize::MAX),
        Termination::Duration(_) => DURATION_RESULT_CAPACITY,
    }
}

/// Round-robin target slot for a worker's `iteration`.
#[must_use]
pub const fn target_index(iteration: u64, targets: usize) -> usize {
    match iteration.checked_rem(targets as u64) {
        Some(slot) => slot as usize,
        None => 0,
    }
}
