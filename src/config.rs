//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub station: StationConfig,
}

/// Telemetry API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Log feed cadence; independent of the endpoint feed
    #[serde(default = "default_poll_interval_ms")]
    pub log_poll_interval_ms: u64,

    /// Endpoint feed cadence; equal to the log feed by default but never
    /// phase-synchronized with it
    #[serde(default = "default_poll_interval_ms")]
    pub endpoint_poll_interval_ms: u64,
}

/// Log window configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_window_capacity")]
    pub capacity: usize,
}

/// Ground-station location configuration
///
/// The surveyed mount position feeds the one-shot station fix. Setting
/// `location_enabled = false` models a denied location permission; missing
/// coordinates model a failed sensor read. Either leaves the map feature
/// disabled for the session.
#[derive(Debug, Deserialize, Clone)]
pub struct StationConfig {
    #[serde(default = "default_location_enabled")]
    pub location_enabled: bool,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default = "default_heading")]
    pub heading: f64,
}

// Default value functions
fn default_base_url() -> String { "https://orion-server-oek4.onrender.com".to_string() }
fn default_request_timeout_ms() -> u64 { 5000 }
fn default_poll_interval_ms() -> u64 { 1000 }

fn default_window_capacity() -> usize { 30 }

fn default_location_enabled() -> bool { true }
fn default_heading() -> f64 { 0.0 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            log_poll_interval_ms: default_poll_interval_ms(),
            endpoint_poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { capacity: default_window_capacity() }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            location_enabled: default_location_enabled(),
            latitude: None,
            longitude: None,
            heading: default_heading(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            window: WindowConfig::default(),
            station: StationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(crate::error::TrackerError::Config(
                toml::de::Error::custom("api base_url cannot be empty")
            ));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(crate::error::TrackerError::Config(
                toml::de::Error::custom("api base_url must start with http:// or https://")
            ));
        }

        // Validate timing fields
        if self.api.request_timeout_ms == 0 || self.api.request_timeout_ms > 30000 {
            return Err(crate::error::TrackerError::Config(
                toml::de::Error::custom("request_timeout_ms must be between 1 and 30000")
            ));
        }

        for (name, value) in [
            ("log_poll_interval_ms", self.api.log_poll_interval_ms),
            ("endpoint_poll_interval_ms", self.api.endpoint_poll_interval_ms),
        ] {
            if value == 0 || value > 60000 {
                return Err(crate::error::TrackerError::Config(
                    toml::de::Error::custom(format!("{} must be between 1 and 60000", name))
                ));
            }
        }

        if self.window.capacity == 0 {
            return Err(crate::error::TrackerError::Config(
                toml::de::Error::custom("window capacity must be greater than 0")
            ));
        }

        // Validate station coordinates when present
        if let Some(latitude) = self.station.latitude {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(crate::error::TrackerError::Config(
                    toml::de::Error::custom("station latitude must be between -90 and 90")
                ));
            }
        }

        if let Some(longitude) = self.station.longitude {
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(crate::error::TrackerError::Config(
                    toml::de::Error::custom("station longitude must be between -180 and 180")
                ));
            }
        }

        if !(0.0..=360.0).contains(&self.station.heading) {
            return Err(crate::error::TrackerError::Config(
                toml::de::Error::custom("station heading must be between 0 and 360")
            ));
        }

        Ok(())
    }
}
