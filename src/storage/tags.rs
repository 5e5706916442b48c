use std::fmt;

use crate::error::StorageError;
use crate::metrics::Stats;

use super::{Store, ensure_dir, read_json, write_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Before,
    After,
}

impl TagKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TagKind::Before => "before",
            TagKind::After => "after",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Store {
    /// Writes `stats` to `tags/<tag>/<kind>.json`, replacing any earlier
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or file cannot be written.
    pub fn save_tagged(&self, tag: &str, kind: TagKind, stats: &Stats) -> Result<(), StorageError> {
        let dir = self.tag_dir(tag);
        ensure_dir(&dir)?;
        write_json(&dir.join(format!("{}.json", kind)), stats)
    }

    /// Loads a tagged snapshot; `Ok(None)` when none was saved.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot exists but cannot be read or parsed.
    pub fn load_tagged(&self, tag: &str, kind: TagKind) -> Result<Option<Stats>, StorageError> {
        let path = self.tag_dir(tag).join(format!("{}.json", kind));
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }
}
