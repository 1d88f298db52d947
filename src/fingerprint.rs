//! Deduplication keys for outgoing messages.
//!
//! A fingerprint identifies "this message, under this tag, within this time
//! bucket". Two sends that produce the same fingerprint are duplicates of one
//! another; the bucket width comes from the [`FrequencyPolicy`].

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};

use crate::models::FrequencyPolicy;

/// A deduplication key. Empty for [`FrequencyPolicy::Always`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Returns the key as it is stored in the record.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the empty fingerprint produced by the `Always` policy.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the fingerprint of `message` sent under `tag` at `now`.
///
/// For [`FrequencyPolicy::Always`] the result is empty and nothing is encoded.
/// Otherwise the result is `<bucket>:<tag>:<message>`, where the bucket is
/// `now` truncated to the hour (`YYYY-MM-DD-HH`) or day (`YYYY-MM-DD`) in
/// `now`'s own offset.
pub fn compute_fingerprint(
    policy: FrequencyPolicy,
    tag: &str,
    message: &str,
    now: &DateTime<FixedOffset>,
) -> Fingerprint {
    match policy.bucket_format() {
        None => Fingerprint::default(),
        Some(format) => Fingerprint(format!("{}:{}:{}", now.format(format), tag, message)),
    }
}

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The wall clock in the local time zone, so buckets roll over at local
/// midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
