//! Decides whether a message should be delivered, based on the record of
//! fingerprints that were already sent.

use std::sync::Arc;

use crate::{
    fingerprint::Fingerprint,
    models::FrequencyPolicy,
    persistence::{RecordStore, error::PersistenceError},
};

/// The outcome of a deduplication check.
#[derive(Debug)]
pub enum DedupDecision {
    /// The policy never deduplicates; the store was not consulted.
    Bypass,
    /// The fingerprint has not been recorded yet.
    FirstInWindow,
    /// The fingerprint is already recorded; delivery should be skipped.
    Duplicate,
    /// The record could not be loaded. Delivery proceeds, favoring a
    /// duplicate notification over a missed one.
    StoreUnavailable(PersistenceError),
}

impl DedupDecision {
    /// Whether delivery should go ahead.
    pub fn should_send(&self) -> bool {
        !matches!(self, DedupDecision::Duplicate)
    }
}

/// Consults and updates the sent-message record.
pub struct DedupEngine {
    store: Arc<dyn RecordStore>,
}

impl DedupEngine {
    /// Creates an engine over `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Checks whether `fingerprint` was already delivered.
    ///
    /// Never mutates the record.
    pub async fn check(&self, policy: FrequencyPolicy, fingerprint: &Fingerprint) -> DedupDecision {
        if policy == FrequencyPolicy::Always {
            return DedupDecision::Bypass;
        }

        match self.store.load().await {
            Ok(record) if record.contains_key(fingerprint.as_str()) => DedupDecision::Duplicate,
            Ok(_) => DedupDecision::FirstInWindow,
            Err(e) => DedupDecision::StoreUnavailable(e),
        }
    }

    /// Records that `message` was delivered under `fingerprint`.
    pub async fn mark_sent(
        &self,
        fingerprint: &Fingerprint,
        message: &str,
    ) -> Result<(), PersistenceError> {
        let mut record = self.store.load().await?;
        record.insert(fingerprint.to_string(), message.to_string());
        self.store.save(&record).await
    }
}
