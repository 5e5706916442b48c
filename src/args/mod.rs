//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{AttackArgs, Cli, Command, HistoryAction};
pub use defaults::default_data_dir;
pub use types::{Profile, ProfileSettings};

pub(crate) use defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_METHOD, DEFAULT_REQUESTS, DEFAULT_TIMEOUT_SECS,
};
pub(crate) use parsers::parse_header;
