mod app;
mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod metrics;
mod shutdown;
mod storage;
mod ui;

use std::process::ExitCode;

fn main() -> ExitCode {
    entry::run()
}
