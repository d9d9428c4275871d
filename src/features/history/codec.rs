//! Wire format of the persisted session list.
//!
//! The blob is a JSON array of sessions, most recent first:
//!
//! ```json
//! [{"id": "1709294400000", "date": "2024-03-01T12:00:00.000Z", "totalTime": 1500,
//!   "lapTimes": [{"id": 2, "time": 1200, "lapTime": 700},
//!                {"id": 1, "time": 500, "lapTime": 500}]}]
//! ```
//!
//! Laps inside a session are also most recent first. Decoding restores the
//! chronological order used in memory and renumbers laps from 1 with splits
//! derived from the cumulative times.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Session;
use crate::error::LapwatchError;
use crate::features::stopwatch::LapRecord;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    id: String,
    date: String,
    total_time: u64,
    lap_times: Vec<StoredLap>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLap {
    id: u32,
    time: u64,
    lap_time: u64,
}

impl From<&LapRecord> for StoredLap {
    fn from(lap: &LapRecord) -> Self {
        Self {
            id: lap.sequence,
            time: lap.cumulative_ms,
            lap_time: lap.split_ms,
        }
    }
}

impl From<StoredLap> for LapRecord {
    fn from(lap: StoredLap) -> Self {
        Self {
            sequence: lap.id,
            cumulative_ms: lap.time,
            split_ms: lap.lap_time,
        }
    }
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            date: session
                .recorded_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            total_time: session.total_elapsed_ms(),
            lap_times: session.laps_newest_first().map(StoredLap::from).collect(),
        }
    }
}

/// Parse an ISO-8601 date. Timestamps without an offset are taken as UTC.
fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(date) {
        return Some(t.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Order laps by sequence, renumber them from 1, and recompute each split.
fn normalize_laps(stored: Vec<StoredLap>) -> Vec<LapRecord> {
    let mut laps: Vec<LapRecord> = stored.into_iter().map(LapRecord::from).collect();
    laps.sort_by_key(|lap| (lap.sequence, lap.cumulative_ms));

    let mut previous_ms = 0;
    for (sequence, lap) in (1..).zip(laps.iter_mut()) {
        lap.sequence = sequence;
        lap.split_ms = lap.cumulative_ms.saturating_sub(previous_ms);
        previous_ms = previous_ms.max(lap.cumulative_ms);
    }
    laps
}

impl TryFrom<StoredSession> for Session {
    type Error = LapwatchError;

    fn try_from(stored: StoredSession) -> Result<Self, Self::Error> {
        let recorded_at = parse_date(&stored.date).ok_or_else(|| {
            LapwatchError::Parse(format!(
                "Session {} has invalid date {:?}",
                stored.id, stored.date
            ))
        })?;

        let laps = normalize_laps(stored.lap_times);
        Ok(Self::from_parts(stored.id, recorded_at, stored.total_time, laps))
    }
}

/// Serialize sessions (held oldest first) into the persisted blob.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn encode(sessions: &[Session]) -> Result<String, LapwatchError> {
    let stored: Vec<StoredSession> = sessions.iter().rev().map(StoredSession::from).collect();
    Ok(serde_json::to_string(&stored)?)
}

/// Parse a persisted blob into sessions, oldest first.
///
/// # Errors
///
/// Returns `LapwatchError::Parse` if the blob does not have the expected shape.
pub fn decode(blob: &str) -> Result<Vec<Session>, LapwatchError> {
    let stored: Vec<StoredSession> = serde_json::from_str(blob)?;
    let mut sessions = stored
        .into_iter()
        .map(Session::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    sessions.reverse();
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOB: &str = r#"[
        {"id":"1709294500000","date":"2024-03-01T12:01:40.000Z","totalTime":900,"lapTimes":[]},
        {"id":"1709294400000","date":"2024-03-01T12:00:00.000Z","totalTime":1500,
         "lapTimes":[{"id":2,"time":1200,"lapTime":700},{"id":1,"time":500,"lapTime":500}]}
    ]"#;

    #[test]
    fn test_decode_restores_chronological_order() {
        let sessions = decode(BLOB).unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id(), "1709294400000");
        assert_eq!(sessions[1].id(), "1709294500000");

        let laps = sessions[0].laps();
        assert_eq!(laps[0].sequence, 1);
        assert_eq!(laps[0].split_ms, 500);
        assert_eq!(laps[1].sequence, 2);
        assert_eq!(laps[1].cumulative_ms, 1200);
    }

    #[test]
    fn test_encode_writes_most_recent_first() {
        let sessions = decode(BLOB).unwrap();
        let blob = encode(&sessions).unwrap();

        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value[0]["id"], "1709294500000");
        assert_eq!(value[1]["totalTime"], 1500);
        assert_eq!(value[1]["lapTimes"][0]["id"], 2);
        assert_eq!(value[1]["lapTimes"][0]["lapTime"], 700);
        assert_eq!(value[1]["date"], "2024-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_decode_accepts_dates_without_offset() {
        let blob = r#"[
            {"id":"3","date":"2024-03-01T12:01:40.000","totalTime":900,"lapTimes":[]},
            {"id":"2","date":"2024-03-01","totalTime":700,"lapTimes":[]},
            {"id":"1","date":"2024-03-01T12:00:00.000Z","totalTime":1500,"lapTimes":[]}
        ]"#;
        let sessions = decode(blob).unwrap();

        assert_eq!(sessions.len(), 3);
        assert_eq!(
            sessions[2].recorded_at(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 1, 40).unwrap()
        );
        assert_eq!(
            sessions[1].recorded_at(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_renumbers_laps_and_recomputes_splits() {
        let blob = r#"[{"id":"1","date":"2024-03-01T12:00:00Z","totalTime":2000,"lapTimes":[
            {"id":2,"time":1500,"lapTime":9},
            {"id":0,"time":400,"lapTime":400},
            {"id":2,"time":900,"lapTime":1}
        ]}]"#;
        let sessions = decode(blob).unwrap();
        let laps = sessions[0].laps();

        let sequences: Vec<u32> = laps.iter().map(|l| l.sequence).collect();
        let splits: Vec<u64> = laps.iter().map(|l| l.split_ms).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(splits, vec![400, 500, 600]);
    }

    #[test]
    fn test_decode_empty_list() {
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"id":"1"}"#).is_err());
        assert!(decode(r#"[{"id":"1","date":"2024-03-01T12:00:00Z","totalTime":-5,"lapTimes":[]}]"#).is_err());
        assert!(decode(r#"[{"id":"1","date":"yesterday","totalTime":5,"lapTimes":[]}]"#).is_err());
    }
}
