//! End-to-end pipeline tests over the testkit fixtures.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use fundwatch::app::format::NO_NEGATIVE_FUNDING_TEXT;
use fundwatch::app::{Dispatcher, Pipeline};
use fundwatch::domain::{AlertThresholds, FundingSnapshot};
use fundwatch::testkit::{FailingSource, FailureKind, RecordingNotifier, ScriptedSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn thresholds() -> AlertThresholds {
    AlertThresholds {
        critical: dec!(-0.3),
        warning: dec!(-0.1),
    }
}

fn snapshot(symbol: &str, rate: Decimal, mark: Decimal) -> FundingSnapshot {
    FundingSnapshot::new(
        symbol,
        rate,
        mark,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    )
}

fn pipeline(
    source: impl fundwatch::port::FundingSource + 'static,
    notifier: Arc<RecordingNotifier>,
) -> Pipeline {
    Pipeline::new(Arc::new(source), thresholds(), Dispatcher::new(notifier))
}

#[tokio::test]
async fn dispatches_rendered_report() {
    let notifier = Arc::new(RecordingNotifier::new());
    let pipeline = pipeline(
        ScriptedSource::new(vec![
            snapshot("BTCUSDT", dec!(-0.0012), dec!(64250.1)),
            snapshot("ETHUSDT", dec!(-0.0003), dec!(3010.55)),
            snapshot("XYZUSDT", dec!(0.0005), dec!(1.23)),
        ]),
        notifier.clone(),
    );

    let outcome = pipeline.run_once().await;

    assert!(outcome.delivered);
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0], outcome.text);
    assert!(messages[0].contains("*BTCUSDT*"));
    assert!(messages[0].contains("*ETHUSDT*"));
    assert!(!messages[0].contains("XYZUSDT"));
}

#[tokio::test]
async fn empty_market_dispatches_fixed_sentence() {
    let notifier = Arc::new(RecordingNotifier::new());
    let pipeline = pipeline(ScriptedSource::new(vec![]), notifier.clone());

    let outcome = pipeline.run_once().await;

    assert!(outcome.delivered);
    assert_eq!(outcome.text, NO_NEGATIVE_FUNDING_TEXT);
    assert_eq!(notifier.messages(), vec![NO_NEGATIVE_FUNDING_TEXT.to_string()]);
}

#[tokio::test]
async fn fetch_failure_dispatches_error_text() {
    let notifier = Arc::new(RecordingNotifier::new());
    let pipeline = pipeline(FailingSource::new(FailureKind::Timeout), notifier.clone());

    let outcome = pipeline.run_once().await;

    // The failure is contained: it becomes the dispatched text.
    assert!(outcome.delivered);
    assert!(outcome.text.contains("Funding report unavailable"));
    assert!(outcome.text.contains("funding request timed out"));
    assert_ne!(outcome.text, NO_NEGATIVE_FUNDING_TEXT);
}

#[tokio::test]
async fn bad_status_failure_names_the_status() {
    let notifier = Arc::new(RecordingNotifier::new());
    let pipeline = pipeline(
        FailingSource::new(FailureKind::BadStatus(502)),
        notifier.clone(),
    );

    let outcome = pipeline.run_once().await;
    assert!(outcome.text.contains("502"));
}

#[tokio::test]
async fn delivery_failure_is_contained_and_next_run_unaffected() {
    let notifier = Arc::new(RecordingNotifier::failing());
    let pipeline = pipeline(
        ScriptedSource::new(vec![snapshot("BTCUSDT", dec!(-0.0012), dec!(64250.1))]),
        notifier.clone(),
    );

    let first = pipeline.run_once().await;
    assert!(!first.delivered);

    // The pipeline keeps working after a delivery failure.
    let second = pipeline.run_once().await;
    assert!(!second.delivered);
    assert_eq!(notifier.attempts(), 2);
    assert_eq!(first.text, second.text);
}

#[tokio::test]
async fn alert_entries_survive_top_ten_truncation() {
    let mut snapshots: Vec<FundingSnapshot> = (0..10)
        .map(|i| {
            snapshot(
                &format!("AAA{i}USDT"),
                dec!(-0.01) - Decimal::new(i, 3),
                dec!(10),
            )
        })
        .collect();
    snapshots.push(snapshot("ZZZUSDT", dec!(-0.0035), dec!(10)));

    let notifier = Arc::new(RecordingNotifier::new());
    let pipeline = pipeline(ScriptedSource::new(snapshots), notifier.clone());

    let outcome = pipeline.run_once().await;

    let alert_pos = outcome.text.find("Deep funding alerts").unwrap();
    assert!(!outcome.text[..alert_pos].contains("ZZZUSDT"));
    assert!(outcome.text[alert_pos..].contains("ZZZUSDT"));
}
