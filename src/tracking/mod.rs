//! # Position Tracking Module
//!
//! Reconciles the ground station's own position/heading with the vehicle's
//! last known position.
//!
//! This module handles:
//! - Holding the station's one-shot position and heading fix
//! - Applying each polled vehicle fix, with coordinate validation
//! - Recomputing the great-circle distance on every position change

use crate::error::{Result, TrackerError};
use crate::geo::{self, Position};

/// Snapshot of the live tracking state
///
/// `distance_km` is present exactly when both positions are present, and is
/// recomputed synchronously whenever either of them changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackingState {
    /// Ground station's own position, set once at startup
    pub current_position: Option<Position>,
    /// Ground station's heading in degrees (0-360)
    pub current_heading: Option<f64>,
    /// Vehicle's last known position from the latest-fix feed
    pub endpoint_position: Option<Position>,
    /// Great-circle distance between the two, in kilometers
    pub distance_km: Option<f64>,
}

/// Owner of the tracking state
///
/// The tracker is the only writer; readers receive [`TrackingState`] copies.
#[derive(Debug, Default)]
pub struct PositionTracker {
    state: TrackingState,
}

impl PositionTracker {
    /// Create a tracker with no known positions
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the station's own position and heading
    ///
    /// One-shot after device fix acquisition; overwrites unconditionally and
    /// recomputes the distance.
    pub fn set_current(&mut self, position: Position, heading: f64) {
        self.state.current_position = Some(position);
        self.state.current_heading = Some(heading);
        self.recompute_distance();
    }

    /// Apply a polled vehicle fix from raw coordinate strings
    ///
    /// Both strings must parse as finite floating-point degrees. On parse
    /// failure the stored endpoint position is left unchanged (the stale fix
    /// is retained, not cleared) and `InvalidCoordinates` is returned.
    pub fn set_endpoint(&mut self, raw_lat: &str, raw_lon: &str) -> Result<()> {
        let latitude: f64 = raw_lat.trim().parse().map_err(|_| invalid(raw_lat, raw_lon))?;
        let longitude: f64 = raw_lon.trim().parse().map_err(|_| invalid(raw_lat, raw_lon))?;
        let position = Position::new(latitude, longitude).ok_or_else(|| invalid(raw_lat, raw_lon))?;

        self.state.endpoint_position = Some(position);
        self.recompute_distance();
        Ok(())
    }

    /// Immutable copy of the current state
    pub fn state(&self) -> TrackingState {
        self.state
    }

    fn recompute_distance(&mut self) {
        self.state.distance_km = match (self.state.current_position, self.state.endpoint_position) {
            (Some(current), Some(endpoint)) => Some(geo::distance_km(current, endpoint)),
            _ => None,
        };
    }
}

fn invalid(raw_lat: &str, raw_lon: &str) -> TrackerError {
    TrackerError::InvalidCoordinates {
        lat: raw_lat.to_string(),
        lon: raw_lon.to_string(),
    }
}
