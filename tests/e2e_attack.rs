mod support;

use std::fs;

use tempfile::tempdir;

use support::{describe, run_mach, spawn_http_server_or_skip};

fn history_files(dir: &std::path::Path) -> Result<usize, String> {
    let history = dir.join("history");
    if !history.exists() {
        return Ok(0);
    }
    let entries =
        fs::read_dir(&history).map_err(|err| format!("read history dir failed: {}", err))?;
    Ok(entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
        .count())
}

#[test]
fn e2e_attack_basic_run_saves_history() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_mach(dir.path(), ["-n", "20", "-c", "4", "-q", url.as_str()])?;
    if output.status.code() != Some(0) {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("SUMMARY") || !stdout.contains("Successful") {
        return Err(format!("Summary missing from output\n{}", describe(&output)));
    }
    if history_files(dir.path())? != 1 {
        return Err("Expected one saved run in history/.".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_attack_subcommand_with_duration() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_mach(
        dir.path(),
        ["attack", "-d", "300ms", "-c", "2", "-r", "50", "-q", url.as_str()],
    )?;
    if output.status.code() != Some(0) {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_missing_url_is_a_config_error() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_mach(dir.path(), ["-n", "5"])?;
    if output.status.code() != Some(1) {
        return Err(describe(&output));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("No target URL") {
        return Err(format!("Expected a missing URL error\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_unknown_flag_is_a_usage_error() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_mach(dir.path(), ["--definitely-not-a-flag", "http://127.0.0.1/"])?;
    if output.status.code() != Some(2) {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_before_without_tag_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_mach(dir.path(), ["--before", "http://127.0.0.1/"])?;
    if output.status.code() != Some(1) {
        return Err(describe(&output));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("--before requires --tag") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_regression_gate_fails_with_exit_code_3() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let tag_dir = dir.path().join("tags").join("gate");
    fs::create_dir_all(&tag_dir).map_err(|err| format!("create tag dir failed: {}", err))?;
    let baseline = r#"{
        "total_requests": 10,
        "success": 10,
        "failed": 0,
        "avg_latency": 0.0001,
        "min_latency": 0.0001,
        "max_latency": 0.0001,
        "p50_latency": 0.0001,
        "p95_latency": 0.0001,
        "p99_latency": 0.0001,
        "status_codes": {"200": 10},
        "rps": 100000.0,
        "total_duration_s": 0.0001
    }"#;
    fs::write(tag_dir.join("before.json"), baseline)
        .map_err(|err| format!("write baseline failed: {}", err))?;

    let output = run_mach(
        dir.path(),
        [
            "-n",
            "10",
            "-c",
            "2",
            "-q",
            "--tag",
            "gate",
            "--after",
            "--threshold",
            "1",
            url.as_str(),
        ],
    )?;
    if output.status.code() != Some(3) {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("REGRESSION") || !stdout.contains("COMPARISON: gate") {
        return Err(describe(&output));
    }
    if !tag_dir.join("after.json").is_file() {
        return Err("Expected the after snapshot to be saved.".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_before_after_result_flow() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let missing = run_mach(dir.path(), ["--tag", "flow", "--result"])?;
    if missing.status.code() != Some(1) {
        return Err(describe(&missing));
    }

    let before = run_mach(
        dir.path(),
        ["-n", "5", "-c", "1", "-q", "--tag", "flow", "--before", url.as_str()],
    )?;
    if before.status.code() != Some(0) {
        return Err(describe(&before));
    }
    let after = run_mach(
        dir.path(),
        ["-n", "5", "-c", "1", "-q", "--tag", "flow", "--after", url.as_str()],
    )?;
    if after.status.code() != Some(0) {
        return Err(describe(&after));
    }

    let result = run_mach(dir.path(), ["--tag", "flow", "--result"])?;
    if result.status.code() != Some(0) {
        return Err(describe(&result));
    }
    if !String::from_utf8_lossy(&result.stdout).contains("COMPARISON: flow") {
        return Err(describe(&result));
    }
    Ok(())
}

#[test]
fn e2e_history_list_and_clear() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    for _ in 0..2 {
        let output = run_mach(dir.path(), ["-n", "3", "-c", "1", "-q", url.as_str()])?;
        if output.status.code() != Some(0) {
            return Err(describe(&output));
        }
    }

    let list = run_mach(dir.path(), ["history", "list"])?;
    if list.status.code() != Some(0) {
        return Err(describe(&list));
    }
    let stdout = String::from_utf8_lossy(&list.stdout);
    if !stdout.contains("HISTORY") || stdout.matches(url.as_str()).count() != 2 {
        return Err(describe(&list));
    }

    let clear = run_mach(dir.path(), ["history", "clear"])?;
    if clear.status.code() != Some(0) {
        return Err(describe(&clear));
    }
    if !String::from_utf8_lossy(&clear.stdout).contains("Cleared 2 saved runs.") {
        return Err(describe(&clear));
    }
    if history_files(dir.path())? != 0 {
        return Err("Expected history/ to be empty after clear.".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_examples_and_version() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let examples = run_mach(dir.path(), ["examples"])?;
    if examples.status.code() != Some(0)
        || !String::from_utf8_lossy(&examples.stdout).contains("USAGE EXAMPLES")
    {
        return Err(describe(&examples));
    }

    let version = run_mach(dir.path(), ["version"])?;
    if version.status.code() != Some(0)
        || !String::from_utf8_lossy(&version.stdout).contains(env!("CARGO_PKG_VERSION"))
    {
        return Err(describe(&version));
    }
    Ok(())
}
