//! The shared result sink of one run and its frozen form.

use scout_core::ProviderId;
use scout_registry::RawProbeResult;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Append-only collection written by every probe task of one run.
///
/// Clones share the same storage. Appends are serialized by a mutex, so
/// every push from every task is observed when the sink is frozen.
#[derive(Debug, Clone, Default)]
pub struct ProbeSink {
    results: Arc<Mutex<Vec<RawProbeResult>>>,
}

impl ProbeSink {
    /// Create an empty sink sized for `capacity` providers.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::with_capacity(capacity))),
        }
    }

    /// Append one result.
    pub fn push(&self, result: RawProbeResult) {
        self.results
            .lock()
            .expect("acquire lock on probe sink")
            .push(result);
    }

    /// Number of results appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.lock().expect("acquire lock on probe sink").len()
    }

    /// Whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Providers that already have a result.
    #[must_use]
    pub fn provider_ids(&self) -> HashSet<ProviderId> {
        self.results
            .lock()
            .expect("acquire lock on probe sink")
            .iter()
            .map(|r| r.provider_id.clone())
            .collect()
    }

    /// Stop collecting and hand the results over, ordered by provider ID.
    #[must_use]
    pub fn freeze(self, email: &str) -> ProbeBatch {
        let mut results = {
            let mut guard = self.results.lock().expect("acquire lock on probe sink");
            std::mem::take(&mut *guard)
        };
        results.sort_by(|a, b| a.provider_id.cmp(&b.provider_id));
        ProbeBatch::new(email, results)
    }
}

/// All raw results of one run, frozen before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeBatch {
    email: String,
    results: Vec<RawProbeResult>,
}

impl ProbeBatch {
    /// Wrap already collected results.
    #[must_use]
    pub fn new(email: impl Into<String>, results: Vec<RawProbeResult>) -> Self {
        Self {
            email: email.into(),
            results,
        }
    }

    /// The email that was looked up.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The raw results.
    #[must_use]
    pub fn results(&self) -> &[RawProbeResult] {
        &self.results
    }

    /// Number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the batch holds no result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether the batch holds a result for the provider.
    #[must_use]
    pub fn contains(&self, provider_id: &ProviderId) -> bool {
        self.results.iter().any(|r| &r.provider_id == provider_id)
    }

    /// Providers whose result is not a confident answer.
    #[must_use]
    pub fn inconclusive(&self) -> Vec<ProviderId> {
        self.results
            .iter()
            .filter(|r| r.is_inconclusive())
            .map(|r| r.provider_id.clone())
            .collect()
    }
}
