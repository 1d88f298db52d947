//! Frequency policies controlling how often an identical message may be sent.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How often an identical (tag, message) pair may be delivered.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyPolicy {
    /// Every message is delivered; no deduplication takes place.
    #[default]
    Always,
    /// At most once per clock hour.
    OncePerHour,
    /// At most once per calendar day.
    OncePerDay,
}

impl FrequencyPolicy {
    /// The `chrono` format string for the time bucket of this policy, or
    /// `None` when the policy never deduplicates.
    pub fn bucket_format(&self) -> Option<&'static str> {
        match self {
            FrequencyPolicy::Always => None,
            FrequencyPolicy::OncePerHour => Some("%Y-%m-%d-%H"),
            FrequencyPolicy::OncePerDay => Some("%Y-%m-%d"),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            FrequencyPolicy::Always => "always",
            FrequencyPolicy::OncePerHour => "once_per_hour",
            FrequencyPolicy::OncePerDay => "once_per_day",
        }
    }
}

impl fmt::Display for FrequencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known frequency policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown frequency policy '{0}', expected one of: always, once_per_hour, once_per_day")]
pub struct ParseFrequencyPolicyError(String);

impl FromStr for FrequencyPolicy {
    type Err = ParseFrequencyPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "always" => Ok(FrequencyPolicy::Always),
            "once_per_hour" | "hourly" => Ok(FrequencyPolicy::OncePerHour),
            "once_per_day" | "daily" => Ok(FrequencyPolicy::OncePerDay),
            _ => Err(ParseFrequencyPolicyError(s.to_string())),
        }
    }
}
