use super::*;
use crate::args::parsers::{parse_duration_arg, parse_ramp_up_arg};
use crate::error::{AppError, AppResult};
use clap::Parser;
use std::time::Duration;

#[test]
fn bare_url_parses_as_attack() -> AppResult<()> {
    let cli = Cli::try_parse_from(["mach", "-n", "50", "-c", "5", "http://localhost:8080"])?;
    if cli.command.is_some() {
        return Err(AppError::validation("Expected no subcommand"));
    }
    if cli.attack.url.as_deref() != Some("http://localhost:8080") {
        return Err(AppError::validation("Unexpected url"));
    }
    if cli.attack.requests != Some(50) || cli.attack.concurrency != Some(5) {
        return Err(AppError::validation("Unexpected requests/concurrency"));
    }
    Ok(())
}

#[test]
fn attack_subcommand_collects_repeated_headers() -> AppResult<()> {
    let cli = Cli::try_parse_from([
        "mach",
        "attack",
        "-H",
        "Accept: */*",
        "-H",
        "X-Trace: 1",
        "-m",
        "post",
        "http://localhost",
    ])?;
    match cli.command {
        Some(Command::Attack(args)) => {
            if args.headers.len() != 2 {
                return Err(AppError::validation("Expected two headers"));
            }
            if args.method.as_deref() != Some("post") {
                return Err(AppError::validation("Unexpected method"));
            }
            Ok(())
        }
        Some(_) | None => Err(AppError::validation("Expected attack subcommand")),
    }
}

#[test]
fn dash_alias_selects_dashboard() -> AppResult<()> {
    let cli = Cli::try_parse_from(["mach", "dash"])?;
    match cli.command {
        Some(Command::Dashboard) => Ok(()),
        Some(_) | None => Err(AppError::validation("Expected dashboard")),
    }
}

#[test]
fn history_clear_parses_with_global_data_dir() -> AppResult<()> {
    let cli = Cli::try_parse_from(["mach", "history", "clear", "--data-dir", "/tmp/mach-test"])?;
    match cli.command {
        Some(Command::History {
            action: Some(HistoryAction::Clear),
        }) => {}
        Some(_) | None => return Err(AppError::validation("Expected history clear")),
    }
    if cli.data_dir.as_deref() == Some(std::path::Path::new("/tmp/mach-test")) {
        Ok(())
    } else {
        Err(AppError::validation("Global --data-dir not captured"))
    }
}

#[test]
fn before_and_after_conflict() -> AppResult<()> {
    match Cli::try_parse_from(["mach", "--tag", "v1", "--before", "--after", "http://x"]) {
        Err(_) => Ok(()),
        Ok(_) => Err(AppError::validation("Expected conflict error")),
    }
}

#[test]
fn body_and_body_file_conflict() -> AppResult<()> {
    match Cli::try_parse_from(["mach", "-b", "x", "--body-file", "body.json", "http://x"]) {
        Err(_) => Ok(()),
        Ok(_) => Err(AppError::validation("Expected conflict error")),
    }
}

#[test]
fn profile_values_parse() -> AppResult<()> {
    let cli = Cli::try_parse_from(["mach", "-p", "soak", "http://x"])?;
    let settings = cli
        .attack
        .profile
        .map(Profile::settings)
        .ok_or_else(|| AppError::validation("Expected a profile"))?;
    if settings.duration == Some(Duration::from_secs(300))
        && settings.concurrency == 50
        && settings.requests.is_none()
    {
        Ok(())
    } else {
        Err(AppError::validation("Unexpected soak settings"))
    }
}

#[test]
fn negative_threshold_reaches_validation() -> AppResult<()> {
    let cli = Cli::try_parse_from(["mach", "--tag", "t", "--threshold", "-5", "http://x"])?;
    if cli.attack.threshold.is_some_and(|value| value < 0.0) {
        Ok(())
    } else {
        Err(AppError::validation("Threshold should parse as negative"))
    }
}

#[test]
fn duration_arg_units() -> AppResult<()> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("30", Duration::from_secs(30)),
        ("30s", Duration::from_secs(30)),
        ("5m", Duration::from_secs(300)),
        ("2h", Duration::from_secs(7200)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "{} parsed as {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn duration_arg_rejects_zero_and_garbage() -> AppResult<()> {
    for input in ["0", "0s", "", "abc", "5x", "10 s"] {
        if parse_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!("{} should be rejected", input)));
        }
    }
    Ok(())
}

#[test]
fn ramp_up_accepts_zero() -> AppResult<()> {
    if parse_ramp_up_arg("0")? == Duration::ZERO {
        Ok(())
    } else {
        Err(AppError::validation("Expected a zero ramp-up"))
    }
}

#[test]
fn header_parsing_trims_and_keeps_colons_in_value() -> AppResult<()> {
    let (name, value) = parse_header("X-Url :  http://a:1 ")?;
    if name != "X-Url" || value != "http://a:1" {
        return Err(AppError::validation(format!("Unexpected header {}={}", name, value)));
    }
    if parse_header("NoColon").is_ok() || parse_header(": value").is_ok() {
        return Err(AppError::validation("Malformed headers must be rejected"));
    }
    Ok(())
}

#[test]
fn default_data_dir_is_named_mach() -> AppResult<()> {
    let dir = default_data_dir();
    if dir.file_name().is_some_and(|name| name == ".mach") {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Unexpected data dir {}",
            dir.display()
        )))
    }
}
