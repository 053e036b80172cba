//! # Feed Module
//!
//! Per-feed state machines and reducers.
//!
//! This module handles:
//! - The `Loading | Ready | Error | Failed` status machine for each feed
//! - The log-feed reducer that owns the telemetry window
//! - The endpoint-feed reducer that owns the position tracker
//! - Snapshot publication to the presentation layer via `tokio::sync::watch`
//!
//! Each reducer is the sole writer of its state; readers only ever see
//! immutable snapshot copies.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::TrackerError;
use crate::geo::Position;
use crate::poller::FetchOutcome;
use crate::telemetry::{LatestFix, TelemetryRecord, TelemetryWindow};
use crate::tracking::{PositionTracker, TrackingState};

/// Presentation status of one feed
///
/// `Error` is recoverable: the next successful poll returns the feed to
/// `Ready`. `Failed` is terminal and absorbing, used for the one-shot
/// station fix: permission or sensor failures are not retried for the rest
/// of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    /// No outcome received yet
    Loading,
    /// Last outcome was successful
    Ready,
    /// Last poll failed; retried on the next tick
    Error(String),
    /// Terminal startup failure, never cleared
    Failed(String),
}

impl FeedStatus {
    fn on_success(&mut self) {
        if !matches!(self, FeedStatus::Failed(_)) {
            *self = FeedStatus::Ready;
        }
    }

    fn on_error(&mut self, message: String) {
        if !matches!(self, FeedStatus::Failed(_)) {
            *self = FeedStatus::Error(message);
        }
    }

    /// True for the terminal `Failed` state
    pub fn is_fatal(&self) -> bool {
        matches!(self, FeedStatus::Failed(_))
    }
}

/// Immutable view of the log feed for the presentation layer
#[derive(Debug, Clone)]
pub struct LogSnapshot {
    pub status: FeedStatus,
    /// Retained records, oldest first
    pub records: Vec<TelemetryRecord>,
}

/// Reducer owning the telemetry log window
pub struct LogFeed {
    window: TelemetryWindow,
    status: FeedStatus,
    tx: watch::Sender<LogSnapshot>,
}

impl LogFeed {
    /// Create the feed and the snapshot channel its readers subscribe to
    pub fn new(capacity: usize) -> (Self, watch::Receiver<LogSnapshot>) {
        let initial = LogSnapshot {
            status: FeedStatus::Loading,
            records: Vec::new(),
        };
        let (tx, rx) = watch::channel(initial);
        let feed = Self {
            window: TelemetryWindow::new(capacity),
            status: FeedStatus::Loading,
            tx,
        };
        (feed, rx)
    }

    /// Apply one poll outcome
    pub fn apply(&mut self, outcome: FetchOutcome<Vec<TelemetryRecord>>) {
        match outcome {
            Ok(batch) => {
                self.window.merge(batch);
                self.status.on_success();
            }
            Err(err) => {
                warn!(error = %err, "log feed poll failed");
                self.status.on_error("Failed to fetch data".to_string());
            }
        }
        self.publish();
    }

    fn publish(&self) {
        let _ = self.tx.send(LogSnapshot {
            status: self.status.clone(),
            records: self.window.snapshot(),
        });
    }
}

/// Immutable view of the map feed for the presentation layer
#[derive(Debug, Clone)]
pub struct MapSnapshot {
    pub status: FeedStatus,
    pub tracking: TrackingState,
}

/// Reducer owning the position tracker
pub struct EndpointFeed {
    tracker: PositionTracker,
    status: FeedStatus,
    tx: watch::Sender<MapSnapshot>,
}

impl EndpointFeed {
    /// Create the feed and the snapshot channel its readers subscribe to
    pub fn new() -> (Self, watch::Receiver<MapSnapshot>) {
        let initial = MapSnapshot {
            status: FeedStatus::Loading,
            tracking: TrackingState::default(),
        };
        let (tx, rx) = watch::channel(initial);
        let feed = Self {
            tracker: PositionTracker::new(),
            status: FeedStatus::Loading,
            tx,
        };
        (feed, rx)
    }

    /// Record the station's one-shot position and heading fix
    pub fn set_station_fix(&mut self, position: Position, heading: f64) {
        info!(
            latitude = position.latitude(),
            longitude = position.longitude(),
            heading,
            "station fix acquired"
        );
        self.tracker.set_current(position, heading);
        self.publish();
    }

    /// Record a terminal station-fix failure (permission or sensor)
    ///
    /// The map feature stays failed for the rest of the session; the
    /// endpoint poll keeps running but can no longer surface `Ready`.
    pub fn fail_station_fix(&mut self, err: &TrackerError) {
        warn!(error = %err, "station fix unavailable, map feature disabled");
        self.status = FeedStatus::Failed(err.to_string());
        self.publish();
    }

    /// Apply one poll outcome from the latest-fix feed
    ///
    /// A fix with unparseable coordinates counts as a failed poll: the
    /// previously stored endpoint position is retained.
    pub fn apply(&mut self, outcome: FetchOutcome<LatestFix>) {
        match outcome {
            Ok(fix) => match self.tracker.set_endpoint(&fix.gps1latitude, &fix.gps1longitude) {
                Ok(()) => self.status.on_success(),
                Err(err) => {
                    warn!(error = %err, "latest fix rejected");
                    self.status.on_error("Invalid GPS coordinates".to_string());
                }
            },
            Err(err) => {
                warn!(error = %err, "endpoint feed poll failed");
                self.status.on_error("Failed to fetch endpoint data".to_string());
            }
        }
        self.publish();
    }

    fn publish(&self) {
        let _ = self.tx.send(MapSnapshot {
            status: self.status.clone(),
            tracking: self.tracker.state(),
        });
    }
}
