//! Integration tests for the notification service

use std::sync::Arc;

use chrono::{TimeDelta, TimeZone, Utc};
use mockito::Matcher;
use serde_json::json;
use slacker::{
    models::FrequencyPolicy,
    notification::{NotificationError, SendOutcome},
    persistence::{JsonFileRecordStore, RecordStore},
    test_helpers::{MutableClock, create_test_config, create_test_notifier},
};

fn clock_at_hour(hour: u32) -> Arc<MutableClock> {
    Arc::new(MutableClock::new(
        Utc.with_ymd_and_hms(2024, 1, 2, hour, 10, 0).unwrap().fixed_offset(),
    ))
}

#[tokio::test]
async fn test_hourly_fan_out_and_dedup() {
    let mut server = mockito::Server::new_async().await;
    let ops = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(
            json!({"channel": "#ops", "text": "bot disk full"}),
        ))
        .with_status(200)
        .with_body("ok")
        .expect(1)
        .create_async()
        .await;
    let oncall = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(
            json!({"channel": "#oncall", "text": "bot disk full"}),
        ))
        .with_status(200)
        .with_body("ok")
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let record_path = dir.path().join("slacker.json");
    let config = create_test_config(&server.url(), FrequencyPolicy::OncePerHour, &record_path);
    let notifier = create_test_notifier(config, clock_at_hour(15));

    let first = notifier.send("disk full").await.unwrap();
    assert_eq!(first, SendOutcome::Delivered { recipients: 2 });

    let second = notifier.send("disk full").await.unwrap();
    assert!(matches!(second, SendOutcome::Skipped { .. }));

    ops.assert_async().await;
    oncall.assert_async().await;

    let raw = std::fs::read_to_string(&record_path).unwrap();
    let contents: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(contents, json!({"2024-01-02-15:disk:disk full": "disk full"}));
}

#[tokio::test]
async fn test_next_hour_sends_again() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("ok")
        .expect(4)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(
        &server.url(),
        FrequencyPolicy::OncePerHour,
        &dir.path().join("r.json"),
    );
    let clock = clock_at_hour(15);
    let notifier = create_test_notifier(config, clock.clone());

    notifier.send("disk full").await.unwrap();
    notifier.send("disk full").await.unwrap();
    clock.advance(TimeDelta::hours(1));
    notifier.send("disk full").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_record_survives_new_notifier() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("ok")
        .expect(2)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let record_path = dir.path().join("slacker.json");

    let config = create_test_config(&server.url(), FrequencyPolicy::OncePerDay, &record_path);
    create_test_notifier(config, clock_at_hour(9))
        .send("disk full")
        .await
        .unwrap();

    // A fresh notifier sees the record left by the previous one.
    let config = create_test_config(&server.url(), FrequencyPolicy::OncePerDay, &record_path);
    let outcome = create_test_notifier(config, clock_at_hour(18))
        .send("disk full")
        .await
        .unwrap();

    assert!(matches!(outcome, SendOutcome::Skipped { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_second_recipient_failure_leaves_record_untouched() {
    let mut server = mockito::Server::new_async().await;
    let ops = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"channel": "#ops"})))
        .with_status(200)
        .with_body("ok")
        .expect(1)
        .create_async()
        .await;
    let oncall = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"channel": "#oncall"})))
        .with_status(404)
        .with_body("channel_not_found")
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let record_path = dir.path().join("slacker.json");
    let config = create_test_config(&server.url(), FrequencyPolicy::OncePerHour, &record_path);
    let notifier = create_test_notifier(config, clock_at_hour(15));

    let err = notifier.send("disk full").await.unwrap_err();

    match err {
        NotificationError::DeliveryFailed { channel, source } => {
            assert_eq!(channel, "#oncall");
            assert!(source.to_string().contains("channel_not_found"));
        }
        other => panic!("Expected DeliveryFailed, got {other:?}"),
    }
    ops.assert_async().await;
    oncall.assert_async().await;

    let record = JsonFileRecordStore::new(&record_path).load().await.unwrap();
    assert!(record.is_empty());
}

#[tokio::test]
async fn test_always_policy_sends_every_time() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("ok")
        .expect(6)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let record_path = dir.path().join("r.json");
    let config = create_test_config(&server.url(), FrequencyPolicy::Always, &record_path);
    let notifier = create_test_notifier(config, clock_at_hour(15));

    for _ in 0..3 {
        assert_eq!(
            notifier.send("disk full").await.unwrap(),
            SendOutcome::Delivered { recipients: 2 }
        );
    }

    mock.assert_async().await;

    let raw = std::fs::read_to_string(&record_path).unwrap();
    let contents: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(contents, json!({"": "disk full"}));
}

#[tokio::test]
async fn test_always_policy_reports_unwritable_record() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("ok")
        .expect(2)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let record_path = dir.path().join("missing").join("r.json");
    let config = create_test_config(&server.url(), FrequencyPolicy::Always, &record_path);
    let notifier = create_test_notifier(config, clock_at_hour(15));

    let err = notifier.send("disk full").await.unwrap_err();

    assert!(err.was_delivered());
    match err {
        NotificationError::StoreUnavailable { fingerprint, delivered, .. } => {
            assert_eq!(fingerprint, "");
            assert_eq!(delivered, 2);
        }
        other => panic!("Expected StoreUnavailable, got {other:?}"),
    }
    mock.assert_async().await;
    assert!(!record_path.exists());
}

#[tokio::test]
async fn test_daily_window_reopens_next_day() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("ok")
        .expect(4)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let record_path = dir.path().join("r.json");
    let config = create_test_config(&server.url(), FrequencyPolicy::OncePerDay, &record_path);
    let clock = clock_at_hour(23);
    let notifier = create_test_notifier(config, clock.clone());

    notifier.send("disk full").await.unwrap();
    let next_day = Utc.with_ymd_and_hms(2024, 1, 3, 0, 5, 0).unwrap();
    clock.set(next_day.fixed_offset());
    let outcome = notifier.send("disk full").await.unwrap();

    assert_eq!(outcome, SendOutcome::Delivered { recipients: 2 });
    mock.assert_async().await;

    let record = JsonFileRecordStore::new(&record_path).load().await.unwrap();
    assert!(record.contains_key("2024-01-02:disk:disk full"));
    assert!(record.contains_key("2024-01-03:disk:disk full"));
}

#[tokio::test]
async fn test_corrupt_record_is_permissive_but_reported() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("ok")
        .expect(2)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let record_path = dir.path().join("slacker.json");
    std::fs::write(&record_path, "[1, 2, 3]").unwrap();
    let config = create_test_config(&server.url(), FrequencyPolicy::OncePerHour, &record_path);
    let notifier = create_test_notifier(config, clock_at_hour(15));

    let err = notifier.send("disk full").await.unwrap_err();

    assert!(err.was_delivered());
    assert!(matches!(err, NotificationError::StoreUnavailable { delivered: 2, .. }));
    mock.assert_async().await;
}
