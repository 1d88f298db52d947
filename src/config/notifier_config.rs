//! The resolved configuration of a [`Notifier`](crate::notification::Notifier).

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use super::BaseHttpClientConfig;
use crate::models::{FrequencyPolicy, Recipient};

/// Icon used when none is configured.
pub const DEFAULT_ICON_EMOJI: &str = ":ghost:";
/// Sender display name used when none is configured.
pub const DEFAULT_USERNAME: &str = "Slacker Notifier";
/// Tag used when none is configured.
pub const DEFAULT_MESSAGE_TAG: &str = "default_tag";
/// Record file used when none is configured.
pub const DEFAULT_RECORD_PATH: &str = "slacker.json";

/// Errors raised while building or loading a notifier configuration.
#[derive(Debug, Error)]
pub enum NotifierConfigError {
    /// No webhook URL was provided.
    #[error("Web hook url is not set")]
    MissingWebhookUrl,

    /// The webhook URL could not be parsed.
    #[error("Invalid web hook url '{url}': {source}")]
    InvalidWebhookUrl {
        /// The rejected value.
        url: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The recipient list is empty.
    #[error("Recipients are not set")]
    MissingRecipients,

    /// The configuration sources could not be read or deserialized.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// A fully resolved, validated notifier configuration.
///
/// Only obtainable through [`NotifierConfigBuilder::build`], so every value
/// carries a webhook URL, at least one recipient and concrete defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    webhook_url: Url,
    recipients: Vec<Recipient>,
    icon_emoji: String,
    username: String,
    frequency: FrequencyPolicy,
    tag: String,
    record_path: PathBuf,
    http: BaseHttpClientConfig,
}

impl NotifierConfig {
    /// Starts a new builder.
    pub fn builder() -> NotifierConfigBuilder {
        NotifierConfigBuilder::default()
    }

    /// The webhook every message is posted to.
    pub fn webhook_url(&self) -> &Url {
        &self.webhook_url
    }

    /// Recipients, in delivery order.
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Emoji shortcode used as the sender icon.
    pub fn icon_emoji(&self) -> &str {
        &self.icon_emoji
    }

    /// Sender display name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// How often an identical message may be delivered.
    pub fn frequency(&self) -> FrequencyPolicy {
        self.frequency
    }

    /// Tag partitioning the deduplication namespace.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Location of the sent-message record.
    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    /// Transport settings for the webhook HTTP client.
    pub fn http(&self) -> &BaseHttpClientConfig {
        &self.http
    }
}

/// Collects notifier settings and resolves them into a [`NotifierConfig`].
///
/// Empty strings count as unset, so they fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct NotifierConfigBuilder {
    webhook_url: Option<String>,
    recipients: Vec<Recipient>,
    icon_emoji: Option<String>,
    username: Option<String>,
    frequency: FrequencyPolicy,
    tag: Option<String>,
    record_path: Option<PathBuf>,
    http: BaseHttpClientConfig,
}

impl NotifierConfigBuilder {
    /// Sets the webhook URL. Required.
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Appends one recipient.
    pub fn recipient(mut self, recipient: Recipient) -> Self {
        self.recipients.push(recipient);
        self
    }

    /// Appends several recipients, keeping their order.
    pub fn recipients(mut self, recipients: impl IntoIterator<Item = Recipient>) -> Self {
        self.recipients.extend(recipients);
        self
    }

    /// Sets the sender icon.
    pub fn icon_emoji(mut self, icon: impl Into<String>) -> Self {
        self.icon_emoji = Some(icon.into());
        self
    }

    /// Sets the sender display name.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the frequency policy.
    pub fn frequency(mut self, frequency: FrequencyPolicy) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the message tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the record file location.
    pub fn record_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.record_path = Some(path.into());
        self
    }

    /// Sets the HTTP transport settings.
    pub fn http(mut self, http: BaseHttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Validates the required fields and fills in defaults.
    pub fn build(self) -> Result<NotifierConfig, NotifierConfigError> {
        let raw_url =
            non_empty(self.webhook_url).ok_or(NotifierConfigError::MissingWebhookUrl)?;
        let webhook_url = Url::parse(&raw_url)
            .map_err(|source| NotifierConfigError::InvalidWebhookUrl {
                url: raw_url,
                source,
            })?;

        if self.recipients.is_empty() {
            return Err(NotifierConfigError::MissingRecipients);
        }

        let record_path = self
            .record_path
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORD_PATH));

        Ok(NotifierConfig {
            webhook_url,
            recipients: self.recipients,
            icon_emoji: non_empty(self.icon_emoji)
                .unwrap_or_else(|| DEFAULT_ICON_EMOJI.to_string()),
            username: non_empty(self.username)
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            frequency: self.frequency,
            tag: non_empty(self.tag)
                .unwrap_or_else(|| DEFAULT_MESSAGE_TAG.to_string()),
            record_path,
            http: self.http,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
