//! This module builds the HTTP client used to reach the webhook endpoint.

mod client;

pub use client::{HttpClientError, create_http_client};
