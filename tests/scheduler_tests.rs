//! Scheduler timing and mutual-exclusion tests.
//!
//! All tests run on a paused clock; sleeps advance virtual time only.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use fundwatch::app::{Dispatcher, Pipeline, Scheduler, SchedulerState};
use fundwatch::domain::{AlertThresholds, FundingSnapshot};
use fundwatch::testkit::{RecordingNotifier, ScriptedSource};
use rust_decimal_macros::dec;
use tokio::time::sleep;

fn snapshots() -> Vec<FundingSnapshot> {
    vec![FundingSnapshot::new(
        "BTCUSDT",
        dec!(-0.0012),
        dec!(64250.1),
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    )]
}

fn pipeline(source: ScriptedSource, notifier: Arc<RecordingNotifier>) -> Arc<Pipeline> {
    Arc::new(Pipeline::new(
        Arc::new(source),
        AlertThresholds {
            critical: dec!(-0.3),
            warning: dec!(-0.1),
        },
        Dispatcher::new(notifier),
    ))
}

#[tokio::test(start_paused = true)]
async fn overlapping_triggers_produce_exactly_one_dispatch() {
    let notifier = Arc::new(RecordingNotifier::new());
    let slow_source = ScriptedSource::new(snapshots()).with_delay(Duration::from_secs(5));
    let handle = Scheduler::new(
        pipeline(slow_source, notifier.clone()),
        Duration::from_secs(3600),
        Duration::from_secs(3600),
    )
    .spawn();

    // Two triggers while the first run's fetch is still in flight.
    assert!(handle.report_now());
    assert!(handle.report_now());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.state(), SchedulerState::Running);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.state(), SchedulerState::Idle);
    assert_eq!(notifier.attempts(), 1);
    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn timer_fires_after_initial_delay_then_every_interval() {
    let notifier = Arc::new(RecordingNotifier::new());
    let handle = Scheduler::new(
        pipeline(ScriptedSource::new(snapshots()), notifier.clone()),
        Duration::from_secs(3600),
        Duration::from_secs(10),
    )
    .spawn();

    sleep(Duration::from_secs(5)).await;
    assert_eq!(notifier.attempts(), 0);

    sleep(Duration::from_secs(6)).await;
    assert_eq!(notifier.attempts(), 1);

    sleep(Duration::from_secs(3600)).await;
    assert_eq!(notifier.attempts(), 2);

    handle.stop();
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn manual_trigger_runs_between_ticks() {
    let notifier = Arc::new(RecordingNotifier::new());
    let handle = Scheduler::new(
        pipeline(ScriptedSource::new(snapshots()), notifier.clone()),
        Duration::from_secs(3600),
        Duration::from_secs(3600),
    )
    .spawn();

    assert!(handle.report_now());
    sleep(Duration::from_secs(1)).await;

    assert_eq!(notifier.attempts(), 1);
    assert_eq!(handle.state(), SchedulerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_pending_timer() {
    let notifier = Arc::new(RecordingNotifier::new());
    let handle = Scheduler::new(
        pipeline(ScriptedSource::new(snapshots()), notifier.clone()),
        Duration::from_secs(3600),
        Duration::from_secs(10),
    )
    .spawn();

    handle.stop();
    assert_eq!(handle.state(), SchedulerState::Stopped);

    sleep(Duration::from_secs(60)).await;
    assert_eq!(notifier.attempts(), 0);

    // Triggers after stop are rejected once the loop has exited.
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn stop_during_run_lets_it_finish() {
    let notifier = Arc::new(RecordingNotifier::new());
    let slow_source = ScriptedSource::new(snapshots()).with_delay(Duration::from_secs(5));
    let handle = Scheduler::new(
        pipeline(slow_source, notifier.clone()),
        Duration::from_secs(3600),
        Duration::from_secs(3600),
    )
    .spawn();

    assert!(handle.report_now());
    sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.state(), SchedulerState::Running);

    handle.stop();
    // The in-flight run is not interrupted.
    assert_eq!(handle.state(), SchedulerState::Running);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(notifier.attempts(), 1);
    assert_eq!(handle.state(), SchedulerState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn starts_idle() {
    let notifier = Arc::new(RecordingNotifier::new());
    let handle = Scheduler::new(
        pipeline(ScriptedSource::new(snapshots()), notifier),
        Duration::from_secs(3600),
        Duration::from_secs(3600),
    )
    .spawn();

    assert_eq!(handle.state(), SchedulerState::Idle);
    handle.stop();
    handle.join().await;
}
