use std::{path::Path, sync::Arc};

use crate::{
    config::NotifierConfig,
    fingerprint::Clock,
    models::{FrequencyPolicy, Recipient},
    notification::{Notifier, WebhookNotifier},
    persistence::JsonFileRecordStore,
};

/// Creates a config posting to `webhook_url` for `#ops` and `#oncall`, tagged
/// `disk`, with its record at `record_path`.
pub fn create_test_config(
    webhook_url: &str,
    frequency: FrequencyPolicy,
    record_path: &Path,
) -> NotifierConfig {
    NotifierConfig::builder()
        .webhook_url(webhook_url)
        .recipients([
            Recipient::new("#ops", "bot"),
            Recipient::new("#oncall", "bot"),
        ])
        .frequency(frequency)
        .tag("disk")
        .record_path(record_path)
        .build()
        .unwrap()
}

/// Creates a notifier that really posts over HTTP and persists to the
/// configured record file, but reads time from `clock`.
pub fn create_test_notifier(config: NotifierConfig, clock: Arc<dyn Clock>) -> Notifier {
    let client = WebhookNotifier::from_config(&config).unwrap();
    let store = JsonFileRecordStore::new(config.record_path());
    Notifier::with_parts(config, Arc::new(store), Arc::new(client), clock)
}
