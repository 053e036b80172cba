//! # Telemetry Window
//!
//! Bounded, ordered history of telemetry records.

use std::collections::VecDeque;

use super::record::TelemetryRecord;

/// Default number of records retained for display
pub const DEFAULT_WINDOW_CAPACITY: usize = 30;

/// Bounded, oldest-first history of telemetry records
///
/// The window never exceeds its capacity and preserves the relative order of
/// surviving records across merges. It is created empty and mutated only
/// through [`TelemetryWindow::merge`].
#[derive(Debug, Clone)]
pub struct TelemetryWindow {
    records: VecDeque<TelemetryRecord>,
    capacity: usize,
}

impl TelemetryWindow {
    /// Create an empty window with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Merge one poll's batch into the window
    ///
    /// Positional sliding-window replace: the incoming batch is truncated to
    /// its last `capacity` records, then exactly that many records are
    /// dropped from the front of the window before the batch is appended.
    ///
    /// This assumes each batch is the newest, gap-free, order-aligned tail of
    /// history. A source that skips or re-orders records silently
    /// desynchronizes the window from true history; that limitation is part
    /// of the contract, not corrected here.
    ///
    /// # Edge cases
    ///
    /// - Empty batch: window unchanged.
    /// - Batch length >= capacity: the result is exactly the batch tail and
    ///   the entire previous window is discarded.
    pub fn merge(&mut self, incoming: Vec<TelemetryRecord>) {
        if incoming.is_empty() {
            return;
        }

        // Keep the newest `capacity` records of the batch
        let skip = incoming.len().saturating_sub(self.capacity);
        let batch = &incoming[skip..];

        // Slide: drop as many old records from the front as we append
        for _ in 0..batch.len().min(self.records.len()) {
            self.records.pop_front();
        }
        self.records.extend(batch.iter().cloned());

        debug_assert!(self.records.len() <= self.capacity);
    }

    /// Number of records currently retained
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records have been merged yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest-first iterator over the retained records
    pub fn iter(&self) -> impl Iterator<Item = &TelemetryRecord> {
        self.records.iter()
    }

    /// Most recently appended record, if any
    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.records.back()
    }

    /// Immutable copy of the retained records, oldest first
    pub fn snapshot(&self) -> Vec<TelemetryRecord> {
        self.records.iter().cloned().collect()
    }
}

impl Default for TelemetryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> TelemetryRecord {
        TelemetryRecord {
            packetid: id,
            packetnumber: id,
            satellitestatus: 4,
            errorcode: "0000".to_string(),
            missiontime: format!("00:00:{:02}", id % 60),
            pressure1: "101.2".to_string(),
            pressure2: "100.9".to_string(),
            altitude1: "410.0".to_string(),
            altitude2: "408.2".to_string(),
            altitudedifference: "1.8".to_string(),
            descentrate: "6.0".to_string(),
            temp: "21.0".to_string(),
            voltagelevel: "7.4".to_string(),
            gps1latitude: "39.92".to_string(),
            gps1longitude: "32.86".to_string(),
            gps1altitude: "412.0".to_string(),
            pitch: "0.0".to_string(),
            roll: "0.0".to_string(),
            yaw: None,
            lnln: "4a7f".to_string(),
            iotdata: "23.1".to_string(),
            teamid: 562290,
        }
    }

    fn batch(ids: std::ops::Range<u64>) -> Vec<TelemetryRecord> {
        ids.map(record).collect()
    }

    fn ids(window: &TelemetryWindow) -> Vec<u64> {
        window.iter().map(|r| r.packetid).collect()
    }

    #[test]
    fn test_empty_batch_leaves_window_unchanged() {
        let mut window = TelemetryWindow::new(30);
        window.merge(batch(0..10));
        let before = ids(&window);

        window.merge(Vec::new());
        assert_eq!(ids(&window), before);
    }

    #[test]
    fn test_merge_into_partial_window() {
        let mut window = TelemetryWindow::new(30);
        window.merge(batch(0..10));
        assert_eq!(window.len(), 10);
        assert_eq!(ids(&window), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_full_window_slides_by_batch_length() {
        let mut window = TelemetryWindow::new(30);
        window.merge(batch(0..30));
        assert_eq!(window.len(), 30);

        window.merge(batch(30..35));

        // First 5 originals dropped, batch of 5 appended at the tail
        assert_eq!(window.len(), 30);
        let expected: Vec<u64> = (5..35).collect();
        assert_eq!(ids(&window), expected);
    }

    #[test]
    fn test_order_preserved_across_merges() {
        let mut window = TelemetryWindow::new(30);
        window.merge(batch(0..20));
        window.merge(batch(20..26));

        let got = ids(&window);
        let mut sorted = got.clone();
        sorted.sort_unstable();
        assert_eq!(got, sorted, "window must stay oldest-first");
    }

    #[test]
    fn test_oversized_batch_replaces_entire_window() {
        let mut window = TelemetryWindow::new(30);
        window.merge(batch(0..30));

        // 40 incoming records: only the last 30 survive, old window discarded
        window.merge(batch(100..140));

        assert_eq!(window.len(), 30);
        let expected: Vec<u64> = (110..140).collect();
        assert_eq!(ids(&window), expected);
    }

    #[test]
    fn test_batch_exactly_at_capacity() {
        let mut window = TelemetryWindow::new(30);
        window.merge(batch(0..12));

        window.merge(batch(50..80));

        assert_eq!(window.len(), 30);
        let expected: Vec<u64> = (50..80).collect();
        assert_eq!(ids(&window), expected);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut window = TelemetryWindow::new(5);
        for start in 0..20 {
            window.merge(batch(start * 3..start * 3 + 3));
            assert!(window.len() <= 5, "len {} after merge {}", window.len(), start);
        }
    }

    #[test]
    fn test_latest_points_at_batch_tail() {
        let mut window = TelemetryWindow::new(30);
        assert!(window.latest().is_none());

        window.merge(batch(0..7));
        assert_eq!(window.latest().unwrap().packetid, 6);
    }

    #[test]
    fn test_unique_ids_under_aligned_batches() {
        let mut window = TelemetryWindow::new(30);
        window.merge(batch(0..30));
        window.merge(batch(30..40));

        let got = ids(&window);
        let mut dedup = got.clone();
        dedup.dedup();
        assert_eq!(got, dedup, "aligned batches must not duplicate ids");
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut window = TelemetryWindow::new(30);
        window.merge(batch(0..3));

        let snapshot = window.snapshot();
        window.merge(batch(3..6));

        assert_eq!(snapshot.len(), 3);
        assert_eq!(window.len(), 6);
    }
}
