use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use super::{BaseHttpClientConfig, NotifierConfig, NotifierConfigBuilder, NotifierConfigError};
use crate::models::{FrequencyPolicy, Recipient};

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "SLACKER";

/// Raw notifier settings as read from a configuration file and the
/// environment. Nothing here is validated until [`Self::into_config`].
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NotifierSettings {
    /// Webhook URL.
    pub webhook_url: Option<String>,

    /// Recipients, in delivery order.
    #[serde(default)]
    pub recipients: Vec<Recipient>,

    /// Sender icon.
    pub icon_emoji: Option<String>,

    /// Sender display name.
    pub username: Option<String>,

    /// Frequency policy.
    #[serde(default)]
    pub frequency: FrequencyPolicy,

    /// Message tag.
    pub tag: Option<String>,

    /// Record file location.
    pub record_path: Option<PathBuf>,

    /// Transport settings for the HTTP client.
    #[serde(default)]
    pub http: BaseHttpClientConfig,
}

impl NotifierSettings {
    /// Reads settings from `path` (format chosen by extension), overlaid with
    /// `SLACKER__*` environment variables.
    pub fn load(path: &Path) -> Result<Self, NotifierConfigError> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    pub(crate) fn load_with_env_prefix(
        path: &Path,
        env_prefix: &str,
    ) -> Result<Self, NotifierConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix(env_prefix).separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Converts into a builder, so callers can still override values.
    pub fn into_builder(self) -> NotifierConfigBuilder {
        let mut builder = NotifierConfig::builder()
            .recipients(self.recipients)
            .frequency(self.frequency)
            .http(self.http);

        if let Some(url) = self.webhook_url {
            builder = builder.webhook_url(url);
        }
        if let Some(icon) = self.icon_emoji {
            builder = builder.icon_emoji(icon);
        }
        if let Some(username) = self.username {
            builder = builder.username(username);
        }
        if let Some(tag) = self.tag {
            builder = builder.tag(tag);
        }
        if let Some(path) = self.record_path {
            builder = builder.record_path(path);
        }
        builder
    }

    /// Validates and resolves into a [`NotifierConfig`].
    pub fn into_config(self) -> Result<NotifierConfig, NotifierConfigError> {
        self.into_builder().build()
    }
}
