//! Configuration module for slacker.

mod helpers;
mod http_base;
mod notifier_config;
mod settings;

pub use helpers::{deserialize_duration_from_seconds, serialize_duration_to_seconds};
pub use http_base::BaseHttpClientConfig;
pub use notifier_config::{
    DEFAULT_ICON_EMOJI, DEFAULT_MESSAGE_TAG, DEFAULT_RECORD_PATH, DEFAULT_USERNAME,
    NotifierConfig, NotifierConfigBuilder, NotifierConfigError,
};
pub use settings::{ENV_PREFIX, NotifierSettings};
