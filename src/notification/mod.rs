//! # Notification Service
//!
//! This module sends a message to every configured recipient through a
//! webhook, unless an identical message was already sent within the window of
//! the configured [`FrequencyPolicy`].
//!
//! ## Core Components
//!
//! - **`Notifier`**: The orchestrator. Holds the resolved configuration, a
//!   [`DedupEngine`] over the record store, a [`DeliveryClient`] and a
//!   [`Clock`].
//! - **`DeliveryClient` Trait**: Sends one message to one channel.
//!   [`WebhookNotifier`] is the HTTP implementation.
//!
//! ## Workflow
//!
//! 1. The configuration is validated and resolved by
//!    [`NotifierConfigBuilder`] before a `Notifier` exists.
//! 2. `send` computes the fingerprint of the message for the current time.
//! 3. The dedup engine looks the fingerprint up in the record. A duplicate is
//!    skipped and reported as success.
//! 4. The message is delivered to each recipient in order. The first failure
//!    stops the fan-out; recipients already served are not rolled back.
//! 5. Once every recipient succeeded, the fingerprint is written to the
//!    record. If that write fails the error is returned even though the
//!    message went out.
//!
//! Concurrent sends are not serialized. Two of them can interleave their
//! record updates and lose one; callers that need otherwise must serialize
//! calls themselves.

use std::sync::Arc;

use crate::{
    config::{NotifierConfig, NotifierConfigBuilder},
    dedup::{DedupDecision, DedupEngine},
    fingerprint::{Clock, Fingerprint, SystemClock, compute_fingerprint},
    models::{FrequencyPolicy, Recipient, SlackMessage},
    persistence::{JsonFileRecordStore, RecordStore},
};

pub mod error;
pub mod webhook;

pub use error::{DeliveryError, NotificationError};
pub use webhook::{DeliveryClient, WebhookNotifier};

/// The successful outcomes of a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// An identical message was already delivered in the current window.
    Skipped {
        /// The fingerprint found in the record.
        fingerprint: Fingerprint,
    },
    /// The message reached every recipient and was recorded.
    Delivered {
        /// Number of recipients the message was posted to.
        recipients: usize,
    },
}

/// Sends deduplicated notifications to a fixed set of recipients.
pub struct Notifier {
    config: NotifierConfig,
    dedup: DedupEngine,
    client: Arc<dyn DeliveryClient>,
    clock: Arc<dyn Clock>,
}

impl Notifier {
    /// Creates a notifier that posts to the configured webhook and keeps its
    /// record in the configured JSON file.
    pub fn new(config: NotifierConfig) -> Result<Self, NotificationError> {
        let client = WebhookNotifier::from_config(&config)?;
        let store = JsonFileRecordStore::new(config.record_path());
        Ok(Self::with_parts(
            config,
            Arc::new(store),
            Arc::new(client),
            Arc::new(SystemClock),
        ))
    }

    /// Validates `builder` and creates a notifier from the result.
    pub fn from_builder(builder: NotifierConfigBuilder) -> Result<Self, NotificationError> {
        Self::new(builder.build()?)
    }

    /// Creates a notifier from explicit collaborators.
    pub fn with_parts(
        config: NotifierConfig,
        store: Arc<dyn RecordStore>,
        client: Arc<dyn DeliveryClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            dedup: DedupEngine::new(store),
            client,
            clock,
        }
    }

    /// The configuration this notifier was built with.
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Sends `message` under the configured tag.
    pub async fn send(&self, message: &str) -> Result<SendOutcome, NotificationError> {
        self.send_tagged(message, self.config.tag()).await
    }

    /// Sends `message` under `tag`, which replaces the configured tag for this
    /// call only. An empty `tag` means the configured one.
    #[tracing::instrument(skip(self, message), fields(frequency = %self.config.frequency()))]
    pub async fn send_tagged(
        &self,
        message: &str,
        tag: &str,
    ) -> Result<SendOutcome, NotificationError> {
        let tag = if tag.is_empty() { self.config.tag() } else { tag };
        let policy = self.config.frequency();
        let fingerprint = compute_fingerprint(policy, tag, message, &self.clock.now());

        if !self.should_send(policy, &fingerprint).await {
            tracing::info!(%fingerprint, text = message, "Skip message");
            return Ok(SendOutcome::Skipped { fingerprint });
        }

        let recipients = self.config.recipients();
        for recipient in recipients {
            let payload = self.build_payload(recipient, message);
            match self.client.deliver(&payload).await {
                Ok(response) => {
                    tracing::info!(
                        tag,
                        channel = %recipient.channel,
                        text = message,
                        response = %response,
                        "Send message"
                    );
                }
                Err(source) => {
                    tracing::error!(
                        tag,
                        channel = %recipient.channel,
                        error = %source,
                        "Failed to send message"
                    );
                    return Err(NotificationError::DeliveryFailed {
                        channel: recipient.channel.clone(),
                        source,
                    });
                }
            }
        }

        self.dedup.mark_sent(&fingerprint, message).await.map_err(|source| {
            tracing::error!(%fingerprint, error = %source, "Failed to record sent message");
            NotificationError::StoreUnavailable {
                fingerprint: fingerprint.to_string(),
                delivered: recipients.len(),
                source,
            }
        })?;

        Ok(SendOutcome::Delivered {
            recipients: recipients.len(),
        })
    }

    async fn should_send(&self, policy: FrequencyPolicy, fingerprint: &Fingerprint) -> bool {
        let decision = self.dedup.check(policy, fingerprint).await;
        if let DedupDecision::StoreUnavailable(e) = &decision {
            tracing::warn!(error = %e, "Failed to load record, sending anyway");
        }
        decision.should_send()
    }

    fn build_payload(&self, recipient: &Recipient, message: &str) -> SlackMessage {
        SlackMessage {
            channel: recipient.channel.clone(),
            username: self.config.username().to_string(),
            text: recipient.format_text(message),
            icon_emoji: self.config.icon_emoji().to_string(),
        }
    }
}
