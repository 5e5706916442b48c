mod build;
mod execute;
mod types;

pub(super) use build::build_plan;
pub(super) use execute::execute_plan;
pub(super) use types::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
