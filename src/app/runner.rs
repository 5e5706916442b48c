use std::sync::Arc;

use tracing::debug;

use crate::config::AttackPlan;
use crate::error::AppResult;
use crate::http::{ClientContext, run_load};
use crate::shutdown::{StopFlag, setup_signal_stop_handler};
use crate::storage::Store;

use super::RunStatus;
use super::finalize::finalize_run;
use super::progress::ProgressLine;

/// Runs one load test end to end: network setup, the worker pool with a live
/// progress line, then statistics, storage and the regression gate.
///
/// # Errors
///
/// Returns an error when TLS setup fails, a worker panics, or results cannot
/// be reported or stored.
pub(crate) async fn run_attack(
    plan: AttackPlan,
    store: &Store,
    no_color: bool,
) -> AppResult<RunStatus> {
    let stop = StopFlag::new();
    let signal_handle = setup_signal_stop_handler(&stop);
    let mut client = Arc::new(ClientContext::new(plan.run.insecure));
    let mut progress = ProgressLine::new(plan.quiet, no_color);
    let config = Arc::new(plan.run.clone());

    let outcome = run_load(config, Arc::clone(&client), stop.clone(), |update| {
        progress.update(&update);
    })
    .await;
    progress.finish();
    signal_handle.abort();
    if let Some(context) = Arc::get_mut(&mut client) {
        context.teardown();
    }
    let outcome = outcome?;

    if stop.is_stopped() && plan.run.termination.duration().is_none() {
        debug!("Run interrupted; reporting partial results.");
    }
    finalize_run(&outcome, &plan, store, no_color)
}
