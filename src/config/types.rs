use std::path::PathBuf;

use serde::Deserialize;

use crate::args::Profile;

/// Contents of `mach.toml` / `mach.json`. Every field is optional and is
/// overridden by the profile and by explicit CLI flags.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub urls: Option<Vec<String>>,
    pub urls_file: Option<PathBuf>,
    pub method: Option<String>,
    pub headers: Option<Vec<String>>,
    pub body: Option<String>,
    pub body_file: Option<PathBuf>,
    pub requests: Option<u64>,
    pub duration: Option<DurationValue>,
    #[serde(alias = "workers")]
    pub concurrency: Option<usize>,
    pub rps: Option<u32>,
    pub ramp_up: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub insecure: Option<bool>,
    pub profile: Option<Profile>,
}

/// A duration written either as a number of seconds or as text like `"5m"`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}
