use crossterm::style::Color;
use tracing::{info, warn};

use crate::config::{AttackPlan, TagPlan};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::LoadOutcome;
use crate::metrics::{GateVerdict, Stats, calculate_stats, evaluate_gate};
use crate::storage::{Store, TagKind};

use super::console::{Line, Segment, print_lines};
use super::RunStatus;
use super::summary::{comparison_lines, summary_lines};

/// Turns a finished run into stats, prints and stores them, and applies the
/// regression gate for `--after` runs.
///
/// # Errors
///
/// Returns an error when output cannot be written or a tagged snapshot
/// cannot be stored or read. A failed history save only logs a warning.
pub(crate) fn finalize_run(
    outcome: &LoadOutcome,
    plan: &AttackPlan,
    store: &Store,
    no_color: bool,
) -> AppResult<RunStatus> {
    let stats = calculate_stats(&outcome.results, outcome.elapsed);
    print_lines(&summary_lines(&stats), no_color)?;

    match store.save_run(plan.run.first_url(), &stats) {
        Ok(path) => info!("Saved run to {}", path.display()),
        Err(err) => warn!("Failed to save run history: {}", err),
    }

    let Some(tag_plan) = plan.tag.as_ref() else {
        return Ok(RunStatus::Completed);
    };
    store.save_tagged(&tag_plan.tag, tag_plan.kind, &stats)?;
    print_lines(
        &[vec![Segment::colored(
            format!("Saved '{}' snapshot for tag '{}'.", tag_plan.kind, tag_plan.tag),
            Color::Green,
        )]],
        no_color,
    )?;

    match tag_plan.kind {
        TagKind::Before => Ok(RunStatus::Completed),
        TagKind::After => compare_with_baseline(tag_plan, &stats, store, no_color),
    }
}

fn compare_with_baseline(
    tag_plan: &TagPlan,
    after: &Stats,
    store: &Store,
    no_color: bool,
) -> AppResult<RunStatus> {
    let Some(before) = store.load_tagged(&tag_plan.tag, TagKind::Before)? else {
        warn!(
            "No baseline for tag '{}'; run with --before first to compare.",
            tag_plan.tag
        );
        return Ok(RunStatus::Completed);
    };
    print_lines(&comparison_lines(&tag_plan.tag, &before, after), no_color)?;

    let Some(threshold) = tag_plan.threshold else {
        return Ok(RunStatus::Completed);
    };
    let verdict = evaluate_gate(&before, after, threshold);
    print_lines(&[gate_line(verdict)], no_color)?;
    if verdict.is_failure() {
        Ok(RunStatus::RegressionFailed)
    } else {
        Ok(RunStatus::Completed)
    }
}

pub(crate) fn gate_line(verdict: GateVerdict) -> Line {
    match verdict {
        GateVerdict::Passed { regression_pct } => vec![Segment::colored(
            format!("Regression check passed ({:+.2}% avg latency).", regression_pct),
            Color::Green,
        )],
        GateVerdict::Failed {
            regression_pct,
            threshold_pct,
        } => vec![Segment::heading(
            format!(
                "REGRESSION: avg latency {:+.2}% exceeds threshold of {:.2}%.",
                regression_pct, threshold_pct
            ),
            Color::Red,
        )],
        GateVerdict::Inconclusive => vec![Segment::colored(
            "Baseline has no latency data; regression check skipped.",
            Color::Yellow,
        )],
    }
}

/// Prints the stored comparison for `tag` without running a test.
///
/// # Errors
///
/// Returns an error when either snapshot is missing or unreadable.
pub(crate) fn show_result(store: &Store, tag: &str, no_color: bool) -> AppResult<()> {
    let before = store
        .load_tagged(tag, TagKind::Before)?
        .ok_or_else(|| {
            AppError::validation(ValidationError::BaselineMissing {
                tag: tag.to_owned(),
            })
        })?;
    let after = store.load_tagged(tag, TagKind::After)?.ok_or_else(|| {
        AppError::validation(ValidationError::TargetMissing {
            tag: tag.to_owned(),
        })
    })?;
    print_lines(&comparison_lines(tag, &before, &after), no_color)?;
    Ok(())
}
