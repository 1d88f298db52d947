//! This module contains the storage interface for the sent-message record.

use std::collections::BTreeMap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::persistence::error::PersistenceError;

/// Fingerprint -> text of the message that was delivered under it.
pub type Record = BTreeMap<String, String>;

/// Loads and saves the complete record in one piece.
///
/// Implementations do not lock across a `load`/`save` pair: two callers that
/// interleave their load-mutate-save cycles can lose an update.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the full record, initializing an empty one if none exists yet.
    async fn load(&self) -> Result<Record, PersistenceError>;

    /// Replaces the stored record with `record`.
    async fn save(&self, record: &Record) -> Result<(), PersistenceError>;
}
