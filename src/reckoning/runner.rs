//! Async periodic driver for the dead-reckoning engine.
//!
//! The engine core is synchronous; this module supplies the cancellable
//! periodic-scheduling layer around it. [`spawn`] starts a tokio task that
//! ticks a shared engine at its configured interval, feeds it hard fixes
//! from an `mpsc` channel (the location-provider boundary), and returns a
//! [`RunnerHandle`] used to cancel the schedule.
//!
//! Exactly one runner should be live per engine: the loop exits when the
//! handle is cancelled, when the fix channel closes, or when the engine
//! stops itself (route exhaustion or generation limit).
//!
//! # Design Notes
//!
//! The run loop uses `tokio::select!` with biased polling:
//! 1. Cancellation check (highest priority)
//! 2. Hard-fix reception
//! 3. Tick interval
//!
//! Listener callbacks run synchronously inside the tick, under the engine
//! lock: a slow listener delays the next scheduled tick, and handlers must
//! not call back into the engine.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::geo::Location;

use super::engine::{DeadReckoningEngine, TickOutcome};

/// Handle to a running dead-reckoning schedule.
///
/// Dropping the handle does not cancel the schedule; call
/// [`RunnerHandle::cancel`] (or [`RunnerHandle::stop`] to also await the
/// task) to end it. Cancellation stops the engine, which notifies
/// `on_stopped` listeners.
pub struct RunnerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl RunnerHandle {
    /// Signal the runner to stop without waiting for it to finish.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel the schedule and wait for the runner task to finish.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.task.await;
    }

    /// Whether the runner task has exited (cancelled, fix channel closed,
    /// or the engine stopped itself).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn the periodic tick loop for `engine`.
///
/// Hard fixes received on `fix_rx` are forwarded to the engine between
/// ticks; a closed channel (the provider went away) stops the engine and
/// ends the loop. The tick interval is read from the engine configuration
/// at spawn time - reconfigure while idle, then spawn.
pub fn spawn(
    engine: Arc<Mutex<DeadReckoningEngine>>,
    mut fix_rx: mpsc::Receiver<Location>,
) -> RunnerHandle {
    let token = CancellationToken::new();
    let child_token = token.clone();

    let task = tokio::spawn(async move {
        let period = engine.lock().unwrap().config().interval;
        // First tick fires one full period after spawn; a listener that
        // overruns the period delays subsequent ticks instead of bursting.
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(period_secs = period.as_secs_f64(), "dead reckoning runner started");

        loop {
            tokio::select! {
                biased;

                _ = child_token.cancelled() => {
                    engine.lock().unwrap().stop();
                    break;
                }

                fix = fix_rx.recv() => {
                    match fix {
                        Some(fix) => engine.lock().unwrap().on_hard_fix(fix),
                        None => {
                            info!("fix channel closed; stopping dead reckoning");
                            engine.lock().unwrap().stop();
                            break;
                        }
                    }
                }

                _ = interval.tick() => {
                    let outcome = engine.lock().unwrap().tick();
                    if matches!(outcome, TickOutcome::Stopped(_)) {
                        break;
                    }
                }
            }
        }

        info!("dead reckoning runner stopped");
    });

    RunnerHandle { token, task }
}
