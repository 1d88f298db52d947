//! Webhook notification implementation.
//!
//! Posts a [`SlackMessage`] as JSON to an incoming webhook and classifies the
//! response. Slack-compatible endpoints answer a successful post with the
//! plain-text body `ok`; anything else is a failure.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use url::Url;

use super::error::DeliveryError;
use crate::{
    config::NotifierConfig,
    http_client::{HttpClientError, create_http_client},
    models::SlackMessage,
};

/// The body a webhook returns when it accepted a message.
pub const SUCCESS_RESPONSE: &str = "ok";

/// Sends one message to one channel.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Delivers `message` and returns the endpoint's response body.
    async fn deliver(&self, message: &SlackMessage) -> Result<String, DeliveryError>;
}

/// Classifies a webhook response: only the exact body `ok` is a success.
pub fn classify_response(status: StatusCode, body: String) -> Result<String, DeliveryError> {
    if body == SUCCESS_RESPONSE {
        Ok(body)
    } else {
        Err(DeliveryError::UnexpectedResponse { status, body })
    }
}

/// Delivers messages through an incoming webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    /// Webhook URL for message delivery
    url: Url,
    /// HTTP client, shared across deliveries so connections are reused
    client: Client,
}

impl WebhookNotifier {
    /// Creates a new Webhook notifier instance
    ///
    /// # Arguments
    /// * `url` - Webhook endpoint
    /// * `client` - HTTP client to post with
    pub fn new(url: Url, client: Client) -> Self {
        Self { url, client }
    }

    /// Creates a notifier for the configured webhook, with a client built from
    /// the configured transport settings.
    pub fn from_config(config: &NotifierConfig) -> Result<Self, HttpClientError> {
        let client = create_http_client(config.http())?;
        Ok(Self::new(config.webhook_url().clone(), client))
    }

    /// The endpoint messages are posted to.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DeliveryClient for WebhookNotifier {
    #[tracing::instrument(skip(self, message), fields(channel = %message.channel), level = "debug")]
    async fn deliver(&self, message: &SlackMessage) -> Result<String, DeliveryError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, body = %body, "Webhook responded.");

        classify_response(status, body)
    }
}
