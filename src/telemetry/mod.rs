//! # Telemetry Module
//!
//! Telemetry payload models and the bounded history window.
//!
//! This module handles:
//! - Deserializing telemetry records from the remote API
//! - Maintaining the bounded, ordered log window
//! - Merging each poll's batch into the window

pub mod record;
pub mod window;

pub use record::{LatestFix, TelemetryRecord};
pub use window::TelemetryWindow;
