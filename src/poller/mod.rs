//! # Poller Module
//!
//! Generic fixed-interval polling with cooperative cancellation.
//!
//! This module handles:
//! - Driving one fetch operation on a fixed cadence per feed
//! - Serializing fetches (a new fetch is never issued while one is in flight)
//! - Routing each outcome into the feed's reducer
//! - Discarding late in-flight results after cancellation

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

/// Outcome of one poll cycle, consumed by exactly one reducer
pub type FetchOutcome<T> = crate::error::Result<T>;

/// Cancellation handle for a running poller
///
/// After [`PollerHandle::cancel`] takes effect, neither the fetch operation
/// nor the reducer runs again; a fetch already in flight is discarded without
/// touching any state.
#[derive(Debug)]
pub struct PollerHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Request cancellation without waiting for the task to exit
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Cancel and wait for the polling task to terminate
    pub async fn shutdown(self) {
        let _ = self.cancel.send(true);
        let _ = self.task.await;
    }
}

/// Spawn a polling task for one feed
///
/// The first fetch fires one full period after start (no immediate fire),
/// then on the fixed cadence. The fetch is awaited inline, so fetches within
/// a feed are serialized and outcomes are applied in issue order; missed
/// ticks delay rather than burst.
///
/// Cancellation is checked both at the tick and across the in-flight await,
/// with the cancel branch winning races.
pub fn spawn<T, F, Fut, R>(
    feed: &'static str,
    period: Duration,
    mut fetch: F,
    mut reduce: R,
) -> PollerHandle
where
    T: Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = FetchOutcome<T>> + Send + 'static,
    R: FnMut(FetchOutcome<T>) + Send + 'static,
{
    let (cancel_tx, mut cancel_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // A tokio interval yields immediately on its first tick; consume it
        // so the first fetch happens one full period after start.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = cancel_rx.changed() => {
                    break;
                }

                _ = ticker.tick() => {
                    let outcome = tokio::select! {
                        biased;

                        _ = cancel_rx.changed() => {
                            debug!(feed, "cancelled with fetch in flight, discarding");
                            break;
                        }

                        outcome = fetch() => outcome,
                    };

                    reduce(outcome);
                }
            }
        }

        debug!(feed, "poller stopped");
    });

    PollerHandle {
        cancel: cancel_tx,
        task,
    }
}
