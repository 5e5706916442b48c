use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

/// Named load shapes selectable with `--profile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// 10 requests over 2 workers
    Smoke,
    /// 10000 requests over 100 workers
    Stress,
    /// 5 minutes with 50 workers
    Soak,
}

/// Values a profile layers over the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSettings {
    pub requests: Option<u64>,
    pub duration: Option<Duration>,
    pub concurrency: usize,
}

impl Profile {
    #[must_use]
    pub const fn settings(self) -> ProfileSettings {
        match self {
            Profile::Smoke => ProfileSettings {
                requests: Some(10),
                duration: None,
                concurrency: 2,
            },
            Profile::Stress => ProfileSettings {
                requests: Some(10_000),
                duration: None,
                concurrency: 100,
            },
            Profile::Soak => ProfileSettings {
                requests: None,
                duration: Some(Duration::from_secs(300)),
                concurrency: 50,
            },
        }
    }
}
