//! # Orion Tracker
//!
//! Ground-station client that tracks a telemetry-emitting high-altitude vehicle.
//!
//! Polls the remote telemetry service on a fixed cadence, keeps a bounded log
//! window and a live position reconciliation, and renders snapshots of both to
//! the structured log until interrupted.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{error, info, warn};
use tracing_subscriber;

use orion_tracker::api::{HttpTelemetryApi, TelemetryApi};
use orion_tracker::config::Config;
use orion_tracker::feed::{EndpointFeed, FeedStatus, LogFeed, LogSnapshot, MapSnapshot};
use orion_tracker::poller;
use orion_tracker::sensor::{acquire_station_fix, StationLocation};

/// Config file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// How often the current snapshots are rendered to the log
const RENDER_INTERVAL_MS: u64 = 1000;

/// Main entry point for Orion Tracker
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (defaults when no file is present)
///    - Build the HTTP telemetry client
///    - Acquire the one-shot station fix (map feature fails terminally if
///      this does not succeed; the log feature is unaffected)
///
/// 2. **Main Loop**
///    - Two independent pollers drive the log and endpoint feeds
///    - Snapshots are rendered once per second
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Cancel both pollers; in-flight fetches are discarded
///    - Await poller termination and exit cleanly
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Orion Tracker v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = if Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        Config::load(&config_path)?
    } else {
        info!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    let api: Arc<dyn TelemetryApi> = Arc::new(HttpTelemetryApi::new(
        &config.api.base_url,
        Duration::from_millis(config.api.request_timeout_ms),
    )?);
    info!("Telemetry API at {}", config.api.base_url);

    // Feeds and the snapshot channels the presentation reads from
    let (mut log_feed, log_rx) = LogFeed::new(config.window.capacity);
    let (mut endpoint_feed, map_rx) = EndpointFeed::new();

    // One-shot station fix, applied before the endpoint poller takes
    // ownership of the feed
    let provider = StationLocation::from_config(&config.station);
    match acquire_station_fix(&provider).await {
        Ok((position, heading)) => endpoint_feed.set_station_fix(position, heading),
        Err(err) => endpoint_feed.fail_station_fix(&err),
    }

    // Log feed poller
    let log_api = api.clone();
    let log_handle = poller::spawn(
        "log",
        Duration::from_millis(config.api.log_poll_interval_ms),
        move || {
            let api = log_api.clone();
            async move { api.fetch_log_batch().await }
        },
        move |outcome| log_feed.apply(outcome),
    );

    // Endpoint feed poller
    let endpoint_api = api.clone();
    let endpoint_handle = poller::spawn(
        "endpoint",
        Duration::from_millis(config.api.endpoint_poll_interval_ms),
        move || {
            let api = endpoint_api.clone();
            async move { api.fetch_latest_fix().await }
        },
        move |outcome| endpoint_feed.apply(outcome),
    );

    let mut render_interval = interval(Duration::from_millis(RENDER_INTERVAL_MS));
    info!("Polling started, press Ctrl+C to exit");

    // Main render loop
    loop {
        tokio::select! {
            _ = render_interval.tick() => {
                render(&log_rx, &map_rx);
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    log_handle.shutdown().await;
    endpoint_handle.shutdown().await;
    info!("Pollers stopped");

    Ok(())
}

/// Render the current feed snapshots to the log
fn render(log_rx: &watch::Receiver<LogSnapshot>, map_rx: &watch::Receiver<MapSnapshot>) {
    let log = log_rx.borrow();
    match &log.status {
        FeedStatus::Loading => info!("log: loading..."),
        FeedStatus::Ready => {
            if let Some(last) = log.records.last() {
                info!(
                    "log: {} records, packet #{} at {} (altitude {}, descent rate {})",
                    log.records.len(),
                    last.packetnumber,
                    last.missiontime,
                    last.altitude1,
                    last.descentrate
                );
            }
        }
        FeedStatus::Error(message) => warn!("log: {}", message),
        FeedStatus::Failed(message) => error!("log: {}", message),
    }

    let map = map_rx.borrow();
    match &map.status {
        FeedStatus::Loading => info!("map: loading..."),
        FeedStatus::Ready => {
            let tracking = &map.tracking;
            match (tracking.endpoint_position, tracking.distance_km) {
                (Some(endpoint), Some(distance)) => info!(
                    "map: vehicle at ({:.5}, {:.5}), {:.2} km from station",
                    endpoint.latitude(),
                    endpoint.longitude(),
                    distance
                ),
                (Some(endpoint), None) => info!(
                    "map: vehicle at ({:.5}, {:.5}), no station fix",
                    endpoint.latitude(),
                    endpoint.longitude()
                ),
                _ => info!("map: no vehicle fix yet"),
            }
        }
        FeedStatus::Error(message) => warn!("map: {}", message),
        FeedStatus::Failed(message) => error!("map: {}", message),
    }
}
