use std::path::PathBuf;

pub(crate) const DEFAULT_REQUESTS: u64 = 100;
pub(crate) const DEFAULT_CONCURRENCY: usize = 10;
pub(crate) const DEFAULT_METHOD: &str = "GET";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `~/.mach`, or `.mach` in the working directory when no home is known.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    if let Some(home) = user_home_dir() {
        return home.join(".mach");
    }

    PathBuf::from(".mach")
}

fn user_home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(value) = std::env::var_os("USERPROFILE") {
            return Some(PathBuf::from(value));
        }
        let drive = std::env::var_os("HOMEDRIVE");
        let path = std::env::var_os("HOMEPATH");
        if let (Some(drive), Some(path)) = (drive, path) {
            let mut full = PathBuf::from(drive);
            full.push(path);
            return Some(full);
        }
    }

    std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
