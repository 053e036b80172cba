//! # Error Types
//!
//! Custom error types for Orion Tracker using `thiserror`.

use thiserror::Error;

/// Main error type for Orion Tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Location permission was denied; terminal for the map feature
    #[error("Permission to access location was denied")]
    PermissionDenied,

    /// Device sensor (position/heading) read failed; terminal for the map feature
    #[error("Sensor read failure: {0}")]
    SensorReadFailure(String),

    /// Network or API failure for a single poll; retried on the next tick
    #[error("Network error: {0}")]
    Network(String),

    /// The latest fix carried coordinates that do not parse as finite numbers
    #[error("Invalid GPS coordinates: lat={lat:?}, lon={lon:?}")]
    InvalidCoordinates { lat: String, lon: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Orion Tracker
pub type Result<T> = std::result::Result<T, TrackerError>;
