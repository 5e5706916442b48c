use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

use crate::config::RunConfig;
use crate::metrics::ResultSet;
use crate::shutdown::StopFlag;

use super::super::connection::Connection;
use super::super::request::PreparedRequest;
use super::super::tls::ClientContext;
use super::plan::{ramp_delay, rate_interval, target_index, worker_budget};

/// Everything one worker task needs; cheap to clone per worker.
pub(super) struct WorkerContext {
    pub worker_id: usize,
    pub config: Arc<RunConfig>,
    pub requests: Arc<[PreparedRequest]>,
    pub client: Arc<ClientContext>,
    pub results: Arc<ResultSet>,
    pub stop: StopFlag,
    /// Shared run start, used for the duration check.
    pub started: Instant,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub connect_failures: u64,
}

/// Runs one worker: ramp delay, then connect/send iterations until the
/// budget, the deadline or the stop flag ends the loop.
///
/// A failed connect consumes the iteration without recording a result. A
/// live connection is kept while consecutive targets share an endpoint.
pub(super) async fn run_worker(ctx: WorkerContext) -> WorkerReport {
    let config = Arc::clone(&ctx.config);
    let concurrency = config.concurrency.get();
    let budget = config
        .termination
        .total_requests()
        .map(|total| worker_budget(total, concurrency, ctx.worker_id));
    let deadline = config.termination.duration();
    let ends_at = deadline.and_then(|limit| ctx.started.checked_add(limit));
    let pause = config.rps.map(rate_interval);
    let mut report = WorkerReport::default();

    let delay = ramp_delay(config.ramp_up, concurrency, ctx.worker_id);
    if !delay.is_zero() {
        trace!(worker = ctx.worker_id, ?delay, "Ramp-up delay.");
        if !idle(&ctx.stop, delay, ends_at).await {
            return report;
        }
    }

    let mut connection: Option<Connection> = None;
    let mut iteration: u64 = 0;
    loop {
        if budget.is_some_and(|budget| iteration >= budget) || ctx.stop.is_stopped() {
            break;
        }
        if deadline.is_some_and(|limit| ctx.started.elapsed() >= limit) {
            break;
        }

        let slot = target_index(iteration, config.targets.len());
        iteration = iteration.saturating_add(1);
        let (Some(target), Some(request)) = (config.targets.get(slot), ctx.requests.get(slot))
        else {
            break;
        };

        if let Some(mut open) = connection.take_if(|conn| !conn.serves(target)) {
            open.close().await;
        }
        if connection.is_none() {
            match Connection::connect(target, &ctx.client, config.timeout, ctx.worker_id).await {
                Ok(conn) => connection = Some(conn),
                Err(err) => {
                    debug!(worker = ctx.worker_id, url = %target, "Connect failed: {}", err);
                    report.connect_failures = report.connect_failures.saturating_add(1);
                }
            }
        }

        if let Some(conn) = connection.as_mut() {
            let result = conn.send(target, request.as_bytes()).await;
            if !conn.is_open() {
                connection = None;
            }
            ctx.results.push(result);
        }

        if let Some(pause) = pause
            && !idle(&ctx.stop, pause, ends_at).await
        {
            break;
        }
    }

    if let Some(mut open) = connection.take() {
        open.close().await;
    }
    trace!(worker = ctx.worker_id, ?report, "Worker finished.");
    report
}

/// Waits out `delay`, cut short by a stop or by the run deadline.
///
/// Returns `false` when the worker should exit instead of sending again.
async fn idle(stop: &StopFlag, delay: Duration, ends_at: Option<Instant>) -> bool {
    let wake = match (Instant::now().checked_add(delay), ends_at) {
        (Some(wake), Some(end)) => wake.min(end),
        (Some(wake), None) => wake,
        (None, Some(end)) => end,
        (None, None) => {
            stop.stopped().await;
            return false;
        }
    };
    tokio::select! {
        () = sleep_until(wake) => {}
        () = stop.stopped() => return false,
    }
    !stop.is_stopped() && ends_at.is_none_or(|end| Instant::now() < end)
}
