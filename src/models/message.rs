//! The JSON body posted to the webhook endpoint.

use serde::{Deserialize, Serialize};

/// A channel-specific message as accepted by a Slack-compatible incoming
/// webhook.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SlackMessage {
    /// Target channel.
    pub channel: String,
    /// Display name of the sender.
    pub username: String,
    /// Message text, already prefixed for the recipient.
    pub text: String,
    /// Emoji shortcode used as the sender's icon.
    pub icon_emoji: String,
}
