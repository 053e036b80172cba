//! # Geodesy Module
//!
//! Validated geographic positions and great-circle distance.
//!
//! This module handles:
//! - `Position` construction with finite-component validation
//! - Haversine distance between the ground station and the vehicle

/// Earth's mean radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in decimal degrees.
///
/// Both components are guaranteed finite: construction rejects NaN and
/// infinities, so downstream math never sees them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Create a position from finite latitude/longitude degrees
    ///
    /// # Returns
    ///
    /// * `Some(Position)` if both components are finite
    /// * `None` if either component is NaN or infinite
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if latitude.is_finite() && longitude.is_finite() {
            Some(Self { latitude, longitude })
        } else {
            None
        }
    }

    /// Latitude in degrees north
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees east
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Great-circle distance between two positions in kilometers
///
/// Uses the haversine formula on a spherical earth (R = 6371 km). Pure and
/// total over `Position` values: the inputs are already validated finite.
///
/// # Examples
///
/// ```
/// use orion_tracker::geo::{distance_km, Position};
///
/// let london = Position::new(51.5074, -0.1278).unwrap();
/// let paris = Position::new(48.8566, 2.3522).unwrap();
/// let d = distance_km(london, paris);
/// assert!((d - 343.5).abs() < 1.0);
/// ```
pub fn distance_km(a: Position, b: Position) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
