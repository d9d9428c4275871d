//! JSON output formatting for lapwatch.

use serde::Serialize;
use serde_json::json;

use crate::error::LapwatchError;
use crate::features::history::Session;
use crate::features::stopwatch::{LapBadges, LapRecord};

#[derive(Serialize)]
struct LapView<'a> {
    #[serde(flatten)]
    lap: &'a LapRecord,
    #[serde(flatten)]
    badges: LapBadges,
}

/// Format sessions as JSON.
///
/// # Errors
///
/// Returns `LapwatchError::Parse` if JSON serialization fails.
pub fn format_sessions_json(sessions: &[&Session]) -> Result<String, LapwatchError> {
    let output = json!({
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single session as JSON, laps most recent first with badges.
///
/// # Errors
///
/// Returns `LapwatchError::Parse` if JSON serialization fails.
pub fn format_session_json(session: &Session) -> Result<String, LapwatchError> {
    let stats = session.lap_stats();
    let laps: Vec<LapView<'_>> = session
        .laps_newest_first()
        .map(|lap| LapView {
            lap,
            badges: stats.badges(lap),
        })
        .collect();

    let output = json!({
        "id": session.id(),
        "recorded_at": session.recorded_at(),
        "total_elapsed_ms": session.total_elapsed_ms(),
        "fastest_split_ms": stats.fastest(),
        "slowest_split_ms": stats.slowest(),
        "laps": laps,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Convert any serializable value to pretty JSON.
///
/// # Errors
///
/// Returns `LapwatchError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, LapwatchError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_session() -> Session {
        let laps = vec![
            LapRecord {
                sequence: 1,
                cumulative_ms: 400,
                split_ms: 400,
            },
            LapRecord {
                sequence: 2,
                cumulative_ms: 1_000,
                split_ms: 600,
            },
        ];
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Session::finalize(1_250, laps, at)
    }

    #[test]
    fn test_format_sessions_json() {
        let session = make_session();
        let output = format_sessions_json(&[&session]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["total_elapsed_ms"], 1_250);
        assert_eq!(value["items"][0]["laps"][1]["split_ms"], 600);
    }

    #[test]
    fn test_format_session_json_badges() {
        let output = format_session_json(&make_session()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["fastest_split_ms"], 400);
        assert_eq!(value["slowest_split_ms"], 600);
        // Most recent lap first
        assert_eq!(value["laps"][0]["sequence"], 2);
        assert_eq!(value["laps"][0]["slowest"], true);
        assert_eq!(value["laps"][1]["fastest"], true);
        assert_eq!(value["laps"][1]["slowest"], false);
    }
}
