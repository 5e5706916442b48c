mod plan;
mod worker;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::AppResult;
use crate::metrics::{RequestResult, ResultSet};
use crate::shutdown::StopFlag;

use super::request::PreparedRequest;
use super::tls::ClientContext;
use worker::{WorkerContext, run_worker};

pub use plan::{rate_interval, ramp_delay, result_capacity, target_index, worker_budget};
pub use worker::WorkerReport;

/// How often the orchestrator samples progress and checks the deadline.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Progress sample handed to the caller on every orchestrator tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    pub current: u64,
    /// Fixed-count target, `None` in duration mode.
    pub total: Option<u64>,
    pub elapsed: Duration,
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct LoadOutcome {
    pub results: Vec<RequestResult>,
    pub elapsed: Duration,
    /// Results discarded because the buffer was full.
    pub dropped: u64,
    pub connect_failures: u64,
}

/// Spawns one task per worker, polls progress until the run ends and joins
/// every worker before returning the collected results.
///
/// The loop ends when the stop flag is set, when the fixed request count has
/// been recorded, or when every worker has returned. In duration mode the
/// orchestrator flips the stop flag itself once the duration has elapsed.
///
/// # Errors
///
/// Returns an error when the TLS context cannot be set up or a worker task
/// panics.
pub async fn run_load<F>(
    config: Arc<RunConfig>,
    client: Arc<ClientContext>,
    stop: StopFlag,
    mut on_progress: F,
) -> AppResult<LoadOutcome>
where
    F: FnMut(ProgressUpdate),
{
    if config.targets.iter().any(|target| target.is_tls()) {
        client.setup()?;
    }

    let requests: Arc<[PreparedRequest]> = config
        .targets
        .iter()
        .map(|target| {
            PreparedRequest::build(&config.method, target, &config.headers, config.body.as_deref())
        })
        .collect();
    let results = Arc::new(ResultSet::with_capacity(result_capacity(config.termination)));
    let total = config.termination.total_requests();
    let deadline = config.termination.duration();
    let concurrency = config.concurrency.get();

    info!(
        workers = concurrency,
        targets = config.targets.len(),
        "Starting load run against {}.",
        config.first_url()
    );
    let started = Instant::now();
    let mut handles = Vec::with_capacity(concurrency);
    for worker_id in 0..concurrency {
        let ctx = WorkerContext {
            worker_id,
            config: Arc::clone(&config),
            requests: Arc::clone(&requests),
            client: Arc::clone(&client),
            results: Arc::clone(&results),
            stop: stop.clone(),
            started,
        };
        handles.push(tokio::spawn(run_worker(ctx)));
    }

    let mut ticker = interval(PROGRESS_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let elapsed = started.elapsed();
        let current = u64::try_from(results.len()).unwrap_or(u64::MAX);
        on_progress(ProgressUpdate {
            current,
            total,
            elapsed,
        });

        if let Some(limit) = deadline
            && elapsed >= limit
        {
            debug!("Duration reached; stopping workers.");
            stop.stop();
        }
        if stop.is_stopped() {
            break;
        }
        if total.is_some_and(|total| current >= total) {
            break;
        }
        if handles.iter().all(tokio::task::JoinHandle::is_finished) {
            break;
        }
    }

    let connect_failures = join_workers(handles, &stop).await?;
    let elapsed = started.elapsed();
    on_progress(ProgressUpdate {
        current: u64::try_from(results.len()).unwrap_or(u64::MAX),
        total,
        elapsed,
    });

    let dropped = results.dropped();
    if dropped > 0 {
        warn!("Result buffer full; {} results were dropped.", dropped);
    }
    if connect_failures > 0 {
        warn!("{} connection attempts failed.", connect_failures);
    }

    let results =
        Arc::try_unwrap(results).map_or_else(|shared| shared.snapshot(), ResultSet::into_results);
    Ok(LoadOutcome {
        results,
        elapsed,
        dropped,
        connect_failures,
    })
}

/// Joins every worker and sums their connect failures.
///
/// After the first worker panics the run is stopped and the remaining tasks
/// are aborted, but each one is still awaited so none outlives the run.
///
/// # Errors
///
/// Returns the first worker panic once all tasks have ended.
pub(crate) async fn join_workers(
    handles: Vec<JoinHandle<WorkerReport>>,
    stop: &StopFlag,
) -> AppResult<u64> {
    let mut connect_failures: u64 = 0;
    let mut panicked: Option<JoinError> = None;
    for handle in handles {
        if panicked.is_some() {
            handle.abort();
        }
        match handle.await {
            Ok(report) => {
                connect_failures = connect_failures.saturating_add(report.connect_failures);
            }
            Err(err) if err.is_cancelled() => {}
            Err(err) => {
                warn!("Worker task failed: {}", err);
                stop.stop();
                if panicked.is_none() {
                    panicked = Some(err);
                }
            }
        }
    }
    match panicked {
        Some(err) => Err(err.into()),
        None => Ok(connect_failures),
    }
}
