use tracing::info;

use crate::app::{
    RunStatus, examples_lines, history_lines, print_lines, run_attack, show_result,
};
use crate::error::AppResult;
use crate::storage::Store;

use super::types::{EXIT_REGRESSION, EXIT_SUCCESS, RunPlan};

/// Runs the plan and returns the process exit code.
pub(crate) fn execute_plan(plan: RunPlan, store: &Store, no_color: bool) -> AppResult<u8> {
    match plan {
        RunPlan::Attack(plan) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let status = runtime.block_on(run_attack(*plan, store, no_color))?;
            Ok(match status {
                RunStatus::Completed => EXIT_SUCCESS,
                RunStatus::RegressionFailed => EXIT_REGRESSION,
            })
        }
        RunPlan::ShowResult { tag } => {
            show_result(store, &tag, no_color)?;
            Ok(EXIT_SUCCESS)
        }
        RunPlan::Dashboard => {
            crate::ui::run_dashboard(store, no_color)?;
            Ok(EXIT_SUCCESS)
        }
        RunPlan::HistoryList => {
            let runs = store.list_history()?;
            if runs.is_empty() {
                println!("No saved runs in {}.", store.history_dir().display());
            } else {
                print_lines(&history_lines(&runs), no_color)?;
            }
            Ok(EXIT_SUCCESS)
        }
        RunPlan::HistoryClear => {
            let removed = store.clear_history()?;
            info!("Removed {} saved runs.", removed);
            println!("Cleared {} saved runs.", removed);
            Ok(EXIT_SUCCESS)
        }
        RunPlan::Examples => {
            print_lines(&examples_lines(), no_color)?;
            Ok(EXIT_SUCCESS)
        }
        RunPlan::Version => {
            println!("mach {}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}
