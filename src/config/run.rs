use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};
use std::time::Duration;

use http::Method;

use crate::http::{Header, Target};
use crate::storage::TagKind;

/// When a run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A fixed number of requests split across the workers.
    Requests(NonZeroU64),
    /// Every worker loops until this much time has passed since the run started.
    Duration(Duration),
}

impl Termination {
    #[must_use]
    pub const fn total_requests(self) -> Option<u64> {
        match self {
            Termination::Requests(count) => Some(count.get()),
            Termination::Duration(_) => None,
        }
    }

    #[must_use]
    pub const fn duration(self) -> Option<Duration> {
        match self {
            Termination::Requests(_) => None,
            Termination::Duration(duration) => Some(duration),
        }
    }
}

/// Fully validated description of one load test; read-only once built.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Cycled round-robin by each worker. Never empty.
    pub targets: Vec<Target>,
    pub method: Method,
    pub headers: Vec<Header>,
    pub body: Option<Vec<u8>>,
    pub termination: Termination,
    pub concurrency: NonZeroUsize,
    /// Per-worker cap.
    pub rps: Option<NonZeroU32>,
    pub ramp_up: Duration,
    /// Bound for every connect, handshake, write and read.
    pub timeout: Duration,
    pub insecure: bool,
}

impl RunConfig {
    #[must_use]
    pub fn first_url(&self) -> &str {
        self.targets.first().map_or("", Target::as_str)
    }
}

/// Snapshot handling requested with `--tag`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagPlan {
    pub tag: String,
    pub kind: TagKind,
    /// Regression gate, only consulted for `--after`.
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AttackPlan {
    pub run: RunConfig,
    pub tag: Option<TagPlan>,
    pub quiet: bool,
}
