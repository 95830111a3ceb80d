//! Periodic and on-demand pipeline scheduling.
//!
//! Two independent event sources (the interval timer and manual triggers)
//! feed one serialized execution path. Overlap is resolved by dropping the
//! late trigger, never by queueing it and never by cancelling the run in
//! flight.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use super::pipeline::Pipeline;

/// What requested a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Timer,
    Manual,
}

/// Scheduler lifecycle states.
///
/// `Stopped` is terminal and reachable from `Idle` only; a stop requested
/// while `Running` takes effect when the run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug)]
struct Inner {
    state: SchedulerState,
    stop_requested: bool,
}

/// The mutual-exclusion cell. This is the only state shared across the
/// scheduler's concurrent domains.
struct StateCell {
    inner: Mutex<Inner>,
}

impl StateCell {
    fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: SchedulerState::Idle,
                stop_requested: false,
            }),
        }
    }

    /// Claim the run slot. Fails unless the scheduler is `Idle`.
    fn try_begin(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.state == SchedulerState::Idle {
            inner.state = SchedulerState::Running;
            true
        } else {
            false
        }
    }

    /// Release the run slot, honoring a stop requested mid-run.
    fn finish(&self) {
        let mut inner = self.inner.lock();
        if inner.state == SchedulerState::Running {
            inner.state = if inner.stop_requested {
                SchedulerState::Stopped
            } else {
                SchedulerState::Idle
            };
        }
    }

    fn request_stop(&self) {
        let mut inner = self.inner.lock();
        inner.stop_requested = true;
        if inner.state == SchedulerState::Idle {
            inner.state = SchedulerState::Stopped;
        }
    }

    fn state(&self) -> SchedulerState {
        self.inner.lock().state
    }
}

/// Drives the pipeline on a fixed interval and on manual request.
pub struct Scheduler {
    pipeline: Arc<Pipeline>,
    interval: Duration,
    initial_delay: Duration,
}

impl Scheduler {
    #[must_use]
    pub fn new(pipeline: Arc<Pipeline>, interval: Duration, initial_delay: Duration) -> Self {
        Self {
            pipeline,
            interval,
            initial_delay,
        }
    }

    /// Start the scheduler loop and return its control handle.
    #[must_use]
    pub fn spawn(self) -> SchedulerHandle {
        let (trigger_tx, mut trigger_rx) = mpsc::unbounded_channel::<()>();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let cell = Arc::new(StateCell::new());

        let loop_cell = cell.clone();
        let Self {
            pipeline,
            interval,
            initial_delay,
        } = self;

        let task = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + initial_delay, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!(
                interval_secs = interval.as_secs(),
                initial_delay_secs = initial_delay.as_secs(),
                "Scheduler started"
            );

            loop {
                tokio::select! {
                    _ = timer.tick() => try_run(&loop_cell, &pipeline, Trigger::Timer),
                    Some(()) = trigger_rx.recv() => try_run(&loop_cell, &pipeline, Trigger::Manual),
                    _ = shutdown_rx.changed() => break,
                }
            }

            info!("Scheduler loop exited, pending timer cancelled");
        });

        SchedulerHandle {
            trigger: trigger_tx,
            shutdown: shutdown_tx,
            cell,
            task,
        }
    }
}

/// Claim the run slot and execute the pipeline in its own task, or drop
/// the trigger when a run is already in flight.
fn try_run(cell: &Arc<StateCell>, pipeline: &Arc<Pipeline>, trigger: Trigger) {
    if !cell.try_begin() {
        warn!(trigger = ?trigger, "Pipeline execution in flight, dropping trigger");
        return;
    }

    info!(trigger = ?trigger, "Pipeline run starting");

    let cell = cell.clone();
    let pipeline = pipeline.clone();
    tokio::spawn(async move {
        let outcome = pipeline.run_once().await;
        info!(delivered = outcome.delivered, "Pipeline run finished");
        cell.finish();
    });
}

/// Control handle for a spawned scheduler.
pub struct SchedulerHandle {
    trigger: mpsc::UnboundedSender<()>,
    shutdown: watch::Sender<bool>,
    cell: Arc<StateCell>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Request an out-of-band run. Returns `false` once the scheduler has
    /// shut down.
    pub fn report_now(&self) -> bool {
        self.trigger.send(()).is_ok()
    }

    /// A cloneable trigger for the command listener.
    #[must_use]
    pub fn manual_trigger(&self) -> ManualTrigger {
        ManualTrigger {
            trigger: self.trigger.clone(),
        }
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.cell.state()
    }

    /// Stop the scheduler: the pending timer is cancelled and no new run
    /// starts. An in-flight run is left to finish on its own timeout.
    pub fn stop(&self) {
        self.cell.request_stop();
        let _ = self.shutdown.send(true);
    }

    /// Await the scheduler loop exit. Call after [`Self::stop`].
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Sender half of the manual trigger channel.
#[derive(Clone)]
pub struct ManualTrigger {
    trigger: mpsc::UnboundedSender<()>,
}

impl ManualTrigger {
    /// Request a run. Returns `false` once the scheduler has shut down.
    pub fn request(&self) -> bool {
        self.trigger.send(()).is_ok()
    }
}
