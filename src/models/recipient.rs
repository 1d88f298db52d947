//! Delivery destinations for a notification.

use serde::{Deserialize, Serialize};

/// A single destination for a notification.
///
/// Every message sent by a [`Notifier`](crate::notification::Notifier) fans
/// out to each configured recipient, in order.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Recipient {
    /// The channel identifier, e.g. `#ops` or `@someone`.
    pub channel: String,
    /// Text prefixed to the message body for this recipient, typically a
    /// mention such as `@oncall`.
    pub username: String,
}

impl Recipient {
    /// Creates a new recipient.
    pub fn new(channel: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            username: username.into(),
        }
    }

    /// Returns the text delivered to this recipient for `message`.
    pub fn format_text(&self, message: &str) -> String {
        format!("{} {}", self.username, message)
    }
}
