//! # Telemetry Records
//!
//! Serde models for the payloads served by the telemetry API.

use serde::Deserialize;

/// One telemetry sample as reported by the vehicle
///
/// Field names mirror the wire format exactly. Every value except the GPS
/// pair is an opaque display value to the tracking core; the numeric-looking
/// fields arrive as strings and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelemetryRecord {
    /// Unique key assigned by the remote source; merge identity
    pub packetid: u64,
    /// Monotonically increasing packet number, informational only
    pub packetnumber: u64,
    pub satellitestatus: i64,
    pub errorcode: String,
    pub missiontime: String,
    pub pressure1: String,
    pub pressure2: String,
    pub altitude1: String,
    pub altitude2: String,
    pub altitudedifference: String,
    pub descentrate: String,
    pub temp: String,
    pub voltagelevel: String,
    pub gps1latitude: String,
    pub gps1longitude: String,
    pub gps1altitude: String,
    pub pitch: String,
    pub roll: String,
    /// Yaw may be absent on some packets
    pub yaw: Option<String>,
    pub lnln: String,
    pub iotdata: String,
    pub teamid: i64,
}

impl TelemetryRecord {
    /// Yaw value for display, `"N/A"` when the packet carried none
    pub fn yaw_display(&self) -> &str {
        self.yaw.as_deref().unwrap_or("N/A")
    }
}

/// Response of the latest-fix endpoint
///
/// Only the GPS pair matters to the position tracker; any other fields in
/// the response object are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LatestFix {
    pub gps1latitude: String,
    pub gps1longitude: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RECORD: &str = r#"{
        "packetid": 412,
        "packetnumber": 412,
        "satellitestatus": 4,
        "errorcode": "0000",
        "missiontime": "00:06:52",
        "pressure1": "101.2",
        "pressure2": "100.9",
        "altitude1": "412.5",
        "altitude2": "409.8",
        "altitudedifference": "2.7",
        "descentrate": "6.1",
        "temp": "21.4",
        "voltagelevel": "7.4",
        "gps1latitude": "39.9255",
        "gps1longitude": "32.8662",
        "gps1altitude": "415.0",
        "pitch": "1.2",
        "roll": "-0.4",
        "yaw": "183.0",
        "lnln": "4a7f",
        "iotdata": "23.1",
        "teamid": 562290
    }"#;

    #[test]
    fn test_deserialize_full_record() {
        let record: TelemetryRecord = serde_json::from_str(SAMPLE_RECORD).unwrap();
        assert_eq!(record.packetid, 412);
        assert_eq!(record.satellitestatus, 4);
        assert_eq!(record.gps1latitude, "39.9255");
        assert_eq!(record.yaw_display(), "183.0");
        assert_eq!(record.teamid, 562290);
    }

    #[test]
    fn test_null_yaw_displays_as_na() {
        let json = SAMPLE_RECORD.replace("\"183.0\"", "null");
        let record: TelemetryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.yaw, None);
        assert_eq!(record.yaw_display(), "N/A");
    }

    #[test]
    fn test_latest_fix_ignores_extra_fields() {
        // The latest endpoint returns a full record; only the GPS pair is kept
        let fix: LatestFix = serde_json::from_str(SAMPLE_RECORD).unwrap();
        assert_eq!(fix.gps1latitude, "39.9255");
        assert_eq!(fix.gps1longitude, "32.8662");
    }

    #[test]
    fn test_deserialize_array_of_records() {
        let json = format!("[{},{}]", SAMPLE_RECORD, SAMPLE_RECORD.replace("412", "413"));
        let records: Vec<TelemetryRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].packetid, 413);
    }
}
