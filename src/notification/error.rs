//! Error types for the notification service.

use thiserror::Error;

use crate::{
    config::NotifierConfigError, http_client::HttpClientError,
    persistence::error::PersistenceError,
};

/// Why a single POST to the webhook did not succeed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request could not be sent or its response could not be read.
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with something other than `ok`.
    #[error("Response from webhook ({status}): {body}")]
    UnexpectedResponse {
        /// HTTP status of the response.
        status: reqwest::StatusCode,
        /// The full response body.
        body: String,
    },
}

/// Defines the possible errors that can occur within the notification service.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Required settings are missing or malformed. Raised before any I/O.
    #[error("Configuration error: {0}")]
    ConfigInvalid(#[from] NotifierConfigError),

    /// An error originating from HTTP client construction.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] HttpClientError),

    /// Delivery to a recipient failed. Recipients earlier in the list have
    /// already received the message; later ones were not attempted.
    #[error("Notification to {channel} failed: {source}")]
    DeliveryFailed {
        /// The channel whose delivery failed.
        channel: String,
        /// The underlying failure.
        #[source]
        source: DeliveryError,
    },

    /// Every recipient received the message but the record could not be
    /// updated, so the same message may be sent again within its window.
    #[error(
        "Message was delivered to {delivered} recipient(s) but could not be recorded as \
         '{fingerprint}': {source}"
    )]
    StoreUnavailable {
        /// The fingerprint that should have been recorded.
        fingerprint: String,
        /// Number of recipients that received the message.
        delivered: usize,
        /// The underlying store failure.
        #[source]
        source: PersistenceError,
    },
}

impl NotificationError {
    /// Whether the message reached every recipient despite this error.
    pub fn was_delivered(&self) -> bool {
        matches!(self, NotificationError::StoreUnavailable { .. })
    }
}
