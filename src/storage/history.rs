use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StorageError;
use crate::metrics::Stats;

use super::{Store, ensure_dir, read_json, write_json};

const RUN_FILE_FORMAT: &str = "%Y%m%d-%H%M%S-%3f";

/// One saved run as listed by `history` and the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: DateTime<Local>,
    pub url: String,
    pub total_requests: u64,
    pub success: u64,
    pub failed: u64,
    pub avg_latency: f64,
    pub rps: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<f64>,
}

impl RunRecord {
    #[must_use]
    pub fn new(timestamp: DateTime<Local>, url: &str, stats: &Stats) -> Self {
        Self {
            timestamp,
            url: url.to_owned(),
            total_requests: stats.total_requests,
            success: stats.success,
            failed: stats.failed,
            avg_latency: stats.avg_latency,
            rps: stats.rps,
            duration_s: Some(stats.total_duration_s),
        }
    }
}

impl Store {
    /// Saves a summary of a finished run as `history/<timestamp>.json` and
    /// returns the file path.
    ///
    /// # Errors
    ///
    /// Returns an error when the history directory or file cannot be written.
    pub fn save_run(&self, url: &str, stats: &Stats) -> Result<PathBuf, StorageError> {
        self.save_run_at(Local::now(), url, stats)
    }

    pub(crate) fn save_run_at(
        &self,
        timestamp: DateTime<Local>,
        url: &str,
        stats: &Stats,
    ) -> Result<PathBuf, StorageError> {
        let dir = self.history_dir();
        ensure_dir(&dir)?;
        let stem = timestamp.format(RUN_FILE_FORMAT).to_string();
        let mut path = dir.join(format!("{}.json", stem));
        let mut suffix: u32 = 1;
        while path.exists() {
            path = dir.join(format!("{}-{}.json", stem, suffix));
            suffix = suffix.saturating_add(1);
        }
        write_json(&path, &RunRecord::new(timestamp, url, stats))?;
        debug!("Saved run to {}", path.display());
        Ok(path)
    }

    /// Lists saved runs newest first. Unreadable entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when the history directory exists but cannot be read.
    pub fn list_history(&self) -> Result<Vec<(String, RunRecord)>, StorageError> {
        let mut runs = Vec::new();
        for path in self.run_files()? {
            let Some(name) = run_name(&path) else {
                continue;
            };
            match read_json::<RunRecord>(&path) {
                Ok(record) => runs.push((name, record)),
                Err(err) => debug!("Skipping unreadable run {}: {}", path.display(), err),
            }
        }
        runs.sort_by(|left, right| {
            right
                .1
                .timestamp
                .cmp(&left.1.timestamp)
                .then_with(|| right.0.cmp(&left.0))
        });
        Ok(runs)
    }

    /// Loads one run by its file stem as printed by `history list`.
    ///
    /// # Errors
    ///
    /// Returns an error when the run does not exist or cannot be parsed.
    pub fn read_run(&self, name: &str) -> Result<RunRecord, StorageError> {
        let path = self.history_dir().join(format!("{}.json", name));
        if name.contains(['/', '\\']) || !path.exists() {
            return Err(StorageError::RunNotFound {
                name: name.to_owned(),
            });
        }
        read_json(&path)
    }

    /// Deletes every saved run and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be read or a file cannot be
    /// removed.
    pub fn clear_history(&self) -> Result<usize, StorageError> {
        let mut removed: usize = 0;
        for path in self.run_files()? {
            std::fs::remove_file(&path).map_err(|err| StorageError::Remove {
                path: path.clone(),
                source: err,
            })?;
            removed = removed.saturating_add(1);
        }
        Ok(removed)
    }

    fn run_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let dir = self.history_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&dir).map_err(|err| StorageError::Read {
            path: dir.clone(),
            source: err,
        })?;
        Ok(entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_run_file(path))
            .collect())
    }
}

fn is_run_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

fn run_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
}
