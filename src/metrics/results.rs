use std::sync::{Mutex, MutexGuard, PoisonError};

use super::types::RequestResult;

/// Results kept for a duration-based run before further results are dropped.
pub const DURATION_RESULT_CAPACITY: usize = 1_000_000;
/// Upper bound on the up-front allocation; the buffer grows up to its capacity.
const MAX_PREALLOCATED: usize = 65_536;

#[derive(Debug, Default)]
struct Inner {
    results: Vec<RequestResult>,
    dropped: u64,
}

/// Append-only result buffer shared by all workers behind a single mutex.
///
/// The buffer never holds more than `capacity` results; appends past that
/// point are counted and discarded.
#[derive(Debug)]
pub struct ResultSet {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                results: Vec::with_capacity(capacity.min(MAX_PREALLOCATED)),
                dropped: 0,
            }),
            capacity,
        }
    }

    /// Appends a result, returning `false` when the buffer is full.
    pub fn push(&self, result: RequestResult) -> bool {
        let mut inner = self.lock();
        if inner.results.len() >= self.capacity {
            inner.dropped = inner.dropped.saturating_add(1);
            return false;
        }
        inner.results.push(result);
        true
    }

    /// Number of stored results; doubles as the live progress counter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.lock().dropped
    }

    /// Copies the current contents, for reports taken while workers run.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RequestResult> {
        self.lock().results.clone()
    }

    #[must_use]
    pub fn into_results(self) -> Vec<RequestResult> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .results
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
