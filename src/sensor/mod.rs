//! # Sensor Module
//!
//! One-shot acquisition of the ground station's own position and heading.
//!
//! This module handles:
//! - The `LocationProvider` trait seam over permission/position/heading
//! - The config-backed `StationLocation` provider (a surveyed, stationary
//!   mount position stands in for a live GNSS/compass read)
//! - The startup acquisition sequence feeding the map feature

use async_trait::async_trait;

use crate::config::StationConfig;
use crate::error::{Result, TrackerError};
use crate::geo::Position;

/// Trait for the device location and heading sensors
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask for permission to read the device location
    async fn request_permission(&self) -> Result<()>;

    /// Read the device's current position
    async fn current_position(&self) -> Result<Position>;

    /// Read the device's heading in degrees (0-360)
    async fn heading(&self) -> Result<f64>;
}

/// Provider backed by the surveyed station position in configuration
pub struct StationLocation {
    enabled: bool,
    position: Option<Position>,
    heading: f64,
}

impl StationLocation {
    /// Build the provider from the `[station]` configuration block
    pub fn from_config(config: &StationConfig) -> Self {
        let position = match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => Position::new(lat, lon),
            _ => None,
        };
        Self {
            enabled: config.location_enabled,
            position,
            heading: config.heading,
        }
    }
}

#[async_trait]
impl LocationProvider for StationLocation {
    async fn request_permission(&self) -> Result<()> {
        if self.enabled {
            Ok(())
        } else {
            Err(TrackerError::PermissionDenied)
        }
    }

    async fn current_position(&self) -> Result<Position> {
        self.position.ok_or_else(|| {
            TrackerError::SensorReadFailure("station coordinates not configured".to_string())
        })
    }

    async fn heading(&self) -> Result<f64> {
        Ok(self.heading)
    }
}

/// Run the one-shot startup acquisition: permission, then position, then heading
///
/// Any failure is terminal for the map feature for the rest of the session;
/// the caller routes it into the endpoint feed's `Failed` state. The log
/// feature is unaffected.
pub async fn acquire_station_fix(provider: &dyn LocationProvider) -> Result<(Position, f64)> {
    provider.request_permission().await?;
    let position = provider.current_position().await?;
    let heading = provider.heading().await?;
    Ok((position, heading))
}


#[cfg(test)]
mod tests {
    use super::mocks::MockLocationProvider;
    use super::*;
    use crate::config::StationConfig;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_acquisition_returns_position_and_heading() {
        let provider = MockLocationProvider::new(39.9255, 32.8662, 270.0);
        let (position, heading) = acquire_station_fix(&provider).await.unwrap();
        assert_eq!(position.latitude(), 39.9255);
        assert_eq!(heading, 270.0);
    }

    #[tokio::test]
    async fn test_permission_denial_short_circuits() {
        let provider = MockLocationProvider::new(39.9255, 32.8662, 0.0);
        provider.deny_permission();

        let err = acquire_station_fix(&provider).await.unwrap_err();
        assert!(matches!(err, TrackerError::PermissionDenied));
        assert_eq!(
            provider.position_reads.load(Ordering::SeqCst),
            0,
            "position must not be read after a denial"
        );
    }

    #[tokio::test]
    async fn test_sensor_failure_propagates() {
        let provider = MockLocationProvider::new(39.9255, 32.8662, 0.0);
        provider.fail_position("gps timeout");

        let err = acquire_station_fix(&provider).await.unwrap_err();
        assert!(matches!(err, TrackerError::SensorReadFailure(_)));
    }

    #[tokio::test]
    async fn test_station_location_from_config() {
        let config = StationConfig {
            location_enabled: true,
            latitude: Some(41.015),
            longitude: Some(28.979),
            heading: 45.0,
        };
        let provider = StationLocation::from_config(&config);

        let (position, heading) = acquire_station_fix(&provider).await.unwrap();
        assert_eq!(position.longitude(), 28.979);
        assert_eq!(heading, 45.0);
    }

    #[tokio::test]
    async fn test_disabled_station_denies_permission() {
        let config = StationConfig {
            location_enabled: false,
            latitude: Some(41.015),
            longitude: Some(28.979),
            heading: 0.0,
        };
        let provider = StationLocation::from_config(&config);

        let err = acquire_station_fix(&provider).await.unwrap_err();
        assert!(matches!(err, TrackerError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_missing_coordinates_fail_the_read() {
        let config = StationConfig {
            location_enabled: true,
            latitude: None,
            longitude: None,
            heading: 0.0,
        };
        let provider = StationLocation::from_config(&config);

        let err = acquire_station_fix(&provider).await.unwrap_err();
        assert!(matches!(err, TrackerError::SensorReadFailure(_)));
    }
}
