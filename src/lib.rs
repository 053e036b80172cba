//! # Orion Tracker Library
//!
//! Ground-station client that tracks a telemetry-emitting high-altitude vehicle.
//!
//! This library provides the core functionality for polling a remote telemetry
//! service, maintaining a bounded log window, and reconciling the station's own
//! position and heading against the vehicle's last known fix.

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod geo;
pub mod poller;
pub mod sensor;
pub mod telemetry;
pub mod tracking;
