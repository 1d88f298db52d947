//! This module contains the data models for the slacker notifier.

pub mod frequency;
pub mod message;
pub mod recipient;

pub use frequency::FrequencyPolicy;
pub use message::SlackMessage;
pub use recipient::Recipient;
