mod plan;

use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use crate::args::{Cli, default_data_dir};
use crate::config::DEFAULT_CONFIG_FILES;
use crate::error::AppResult;
use crate::storage::Store;
use plan::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE, build_plan, execute_plan};

/// Parses the command line, runs it and maps the outcome to an exit code:
/// 0 success, 1 error, 2 usage error, 3 regression gate failure.
pub(crate) fn run() -> ExitCode {
    match try_run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn try_run() -> AppResult<u8> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    if should_show_help(&raw_args) {
        Cli::command().print_help()?;
        println!();
        return Ok(EXIT_SUCCESS);
    }

    let cli = match Cli::try_parse_from(raw_args) {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            let code = if err.use_stderr() {
                EXIT_USAGE
            } else {
                EXIT_SUCCESS
            };
            return Ok(code);
        }
    };

    crate::logger::init_logging(cli.verbose, cli.no_color);

    let store = Store::new(cli.data_dir.unwrap_or_else(default_data_dir));
    let plan = build_plan(cli.command, cli.attack)?;
    execute_plan(plan, &store, cli.no_color)
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
