use std::path::Path;

use tracing::{debug, warn};

/// URLs kept from a URLs file; later lines are ignored.
pub const MAX_URLS: usize = 1024;

/// Reads one URL per line, skipping blank lines and `#` comments. A missing
/// or unreadable file yields an empty list.
#[must_use]
pub fn load_urls(path: &Path) -> Vec<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            debug!("Failed to read URLs file {}: {}", path.display(), err);
            return Vec::new();
        }
    };

    let mut urls = Vec::new();
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if urls.len() >= MAX_URLS {
            warn!(
                "URLs file {} has more than {} entries; ignoring the rest.",
                path.display(),
                MAX_URLS
            );
            break;
        }
        urls.push(line.to_owned());
    }
    urls
}

/// Reads a whole file, or `None` when it cannot be read.
#[must_use]
pub fn read_file(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            debug!("Failed to read {}: {}", path.display(), err);
            None
        }
    }
}
