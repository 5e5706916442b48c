//! Command handlers tying the engine to terminal output and storage.
mod console;
mod finalize;
mod progress;
mod runner;
mod summary;


pub(crate) use console::print_lines;
pub(crate) use finalize::show_result;
pub(crate) use runner::run_attack;
pub(crate) use summary::{examples_lines, history_lines};

/// How a completed attack ended, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// The `--after` run regressed past `--threshold`.
    RegressionFailed,
}
