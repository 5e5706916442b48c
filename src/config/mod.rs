//! Configuration loading and resolution of a validated run plan.
mod build;
mod loader;
mod parse;
mod run;
pub mod types;


pub use build::{
    MAX_HEADER_NAME_LEN, MAX_HEADER_VALUE_LEN, MAX_HEADERS, build_attack_plan, resolve_method,
    resolve_tag_plan, validate_header, validate_tag,
};
pub use loader::{DEFAULT_CONFIG_FILES, load_config};
pub use run::{AttackPlan, RunConfig, TagPlan, Termination};

#[cfg(test)]
pub(crate) use loader::load_config_file;
pub(crate) use parse::parse_duration_value;
