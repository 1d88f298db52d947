//! Construction of the base `reqwest` client from transport settings.
//!
//! The client is built once per notifier and reused, so idle connections to
//! the webhook host are pooled across sends.

use reqwest::Client;
use thiserror::Error;

use crate::config::BaseHttpClientConfig;

/// Errors that can occur while constructing an HTTP client.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// An error occurred while building the underlying `reqwest::Client`.
    #[error("Failed to create HTTP client: {0}")]
    HttpClientBuildError(#[from] reqwest::Error),
}

/// Creates an HTTP client honoring the given transport settings.
///
/// # Parameters:
/// - `config`: idle pool size, connect, keep-alive and request timeouts
///
/// # Returns
/// A `reqwest::Client` without any retry behavior
pub fn create_http_client(config: &BaseHttpClientConfig) -> Result<Client, HttpClientError> {
    let client = Client::builder()
        .pool_max_idle_per_host(config.max_idle_per_host)
        .pool_idle_timeout(Some(config.idle_timeout))
        .connect_timeout(config.connect_timeout)
        .tcp_keepalive(Some(config.tcp_keepalive))
        .timeout(config.response_timeout)
        .build()?;
    Ok(client)
}
