//! JSON persistence under the data directory: run history and tagged
//! before/after snapshots.
mod files;
mod history;
mod tags;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crate::error::StorageError;

pub use files::{MAX_URLS, load_urls, read_file};
pub use history::RunRecord;
pub use tags::TagKind;

const HISTORY_DIR: &str = "history";
const TAGS_DIR: &str = "tags";

/// Handle on the data directory. Sub-directories are created on demand.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY_DIR)
    }

    #[must_use]
    pub fn tag_dir(&self, tag: &str) -> PathBuf {
        self.root.join(TAGS_DIR).join(tag)
    }

    /// Creates the data directory and its `history/` and `tags/` children.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory cannot be created.
    pub fn init(&self) -> Result<(), StorageError> {
        ensure_dir(&self.history_dir())?;
        ensure_dir(&self.root.join(TAGS_DIR))
    }
}

fn ensure_dir(path: &Path) -> Result<(), StorageError> {
    std::fs::create_dir_all(path).map_err(|err| StorageError::CreateDir {
        path: path.to_path_buf(),
        source: err,
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let encoded = serde_json::to_vec_pretty(value).map_err(|err| StorageError::Encode {
        path: path.to_path_buf(),
        source: err,
    })?;
    std::fs::write(path, encoded).map_err(|err| StorageError::Write {
        path: path.to_path_buf(),
        source: err,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let content = std::fs::read(path).map_err(|err| StorageError::Read {
        path: path.to_path_buf(),
        source: err,
    })?;
    serde_json::from_slice(&content).map_err(|err| StorageError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}
