use super::*;
use crate::error::{AppError, AppResult};
use crate::metrics::{Stats, StatusHistogram};
use chrono::{Local, TimeZone};
use tempfile::tempdir;

fn sample_stats(avg: f64) -> Stats {
    let mut status_codes = StatusHistogram::default();
    status_codes.record(200);
    status_codes.record(200);
    status_codes.record(503);
    Stats {
        total_requests: 3,
        success: 2,
        failed: 1,
        avg_latency: avg,
        min_latency: 1.25,
        max_latency: 40.5,
        p50_latency: 12.0,
        p95_latency: 40.5,
        p99_latency: 40.5,
        status_codes,
        rps: 150.0,
        total_duration_s: 0.02,
    }
}

#[test]
fn tagged_snapshot_roundtrips() -> AppResult<()> {
    let dir = tempdir()?;
    let store = Store::new(dir.path());
    let stats = sample_stats(17.333_333);

    store.save_tagged("release-1", TagKind::Before, &stats)?;
    let loaded = store
        .load_tagged("release-1", TagKind::Before)?
        .ok_or_else(|| AppError::storage("Expected a saved baseline"))?;
    if loaded != stats {
        return Err(AppError::storage(format!("Loaded {:?}", loaded)));
    }
    if !dir.path().join("tags/release-1/before.json").is_file() {
        return Err(AppError::storage("Snapshot written to an unexpected path"));
    }
    Ok(())
}

#[test]
fn missing_tag_loads_as_none() -> AppResult<()> {
    let dir = tempdir()?;
    let store = Store::new(dir.path());
    if store.load_tagged("nothing", TagKind::After)?.is_some() {
        return Err(AppError::storage("Expected no snapshot"));
    }
    Ok(())
}

#[test]
fn corrupt_tag_is_an_error() -> AppResult<()> {
    let dir = tempdir()?;
    let store = Store::new(dir.path());
    let tag_dir = store.tag_dir("broken");
    std::fs::create_dir_all(&tag_dir)?;
    std::fs::write(tag_dir.join("after.json"), "{not json")?;
    match store.load_tagged("broken", TagKind::After) {
        Err(StorageError::Parse { .. }) => Ok(()),
        Err(err) => Err(AppError::storage(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::storage("Expected a parse error")),
    }
}

#[test]
fn history_lists_newest_first_and_clears() -> AppResult<()> {
    let dir = tempdir()?;
    let store = Store::new(dir.path());
    store.init()?;

    let older = Local
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .ok_or_else(|| AppError::storage("Invalid timestamp"))?;
    let newer = Local
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::storage("Invalid timestamp"))?;
    store.save_run_at(older, "http://old.example/", &sample_stats(10.0))?;
    store.save_run_at(newer, "http://new.example/", &sample_stats(20.0))?;
    std::fs::write(store.history_dir().join("notes.txt"), "ignored")?;

    let runs = store.list_history()?;
    let urls: Vec<&str> = runs.iter().map(|(_, record)| record.url.as_str()).collect();
    if urls != ["http://new.example/", "http://old.example/"] {
        return Err(AppError::storage(format!("Unexpected order: {:?}", urls)));
    }
    let (name, _) = runs
        .last()
        .ok_or_else(|| AppError::storage("Missing run"))?;
    if name != "20240102-030405-000" {
        return Err(AppError::storage(format!("Unexpected run name {}", name)));
    }
    if store.read_run(name)?.total_requests != 3 {
        return Err(AppError::storage("Unexpected run contents"));
    }

    if store.clear_history()? != 2 {
        return Err(AppError::storage("Expected two removed runs"));
    }
    if !store.list_history()?.is_empty() {
        return Err(AppError::storage("History should be empty"));
    }
    Ok(())
}

#[test]
fn same_millisecond_runs_do_not_overwrite() -> AppResult<()> {
    let dir = tempdir()?;
    let store = Store::new(dir.path());
    let now = Local::now();
    let first = store.save_run_at(now, "http://a/", &sample_stats(1.0))?;
    let second = store.save_run_at(now, "http://b/", &sample_stats(2.0))?;
    if first == second || store.list_history()?.len() != 2 {
        return Err(AppError::storage("Second run replaced the first"));
    }
    Ok(())
}

#[test]
fn read_run_rejects_unknown_names() -> AppResult<()> {
    let dir = tempdir()?;
    let store = Store::new(dir.path());
    match store.read_run("../escape") {
        Err(StorageError::RunNotFound { .. }) => Ok(()),
        Err(err) => Err(AppError::storage(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::storage("Expected RunNotFound")),
    }
}

#[test]
fn load_urls_skips_comments_and_blanks() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("urls.txt");
    std::fs::write(
        &path,
        "# targets\n\n  http://a.example/one  \r\nhttp://b.example/two\n   \n#http://skipped\n",
    )?;
    let urls = load_urls(&path);
    if urls == ["http://a.example/one", "http://b.example/two"] {
        Ok(())
    } else {
        Err(AppError::storage(format!("Unexpected urls: {:?}", urls)))
    }
}

#[test]
fn load_urls_caps_entries() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("many.txt");
    let content: String = (0..MAX_URLS.saturating_add(10))
        .map(|idx| format!("http://host/{}\n", idx))
        .collect();
    std::fs::write(&path, content)?;
    if load_urls(&path).len() == MAX_URLS {
        Ok(())
    } else {
        Err(AppError::storage("Expected the URL cap to apply"))
    }
}

#[test]
fn missing_files_yield_empty_results() -> AppResult<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("absent");
    if !load_urls(&missing).is_empty() || read_file(&missing).is_some() {
        return Err(AppError::storage("Missing files must be empty"));
    }
    Ok(())
}
