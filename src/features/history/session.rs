//! Finished stopwatch sessions.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::features::stopwatch::{LapRecord, LapStats};

/// A finished stopwatch run and its laps.
///
/// Sessions are created once, at reset, and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    id: String,
    recorded_at: DateTime<Utc>,
    total_elapsed_ms: u64,
    laps: Vec<LapRecord>,
}

impl Session {
    /// Finalize a run. The id is the finalization time in epoch milliseconds.
    #[must_use]
    pub fn finalize(total_elapsed_ms: u64, laps: Vec<LapRecord>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: recorded_at.timestamp_millis().to_string(),
            recorded_at,
            total_elapsed_ms,
            laps,
        }
    }

    /// Rebuild a session from persisted parts.
    pub(crate) const fn from_parts(
        id: String,
        recorded_at: DateTime<Utc>,
        total_elapsed_ms: u64,
        laps: Vec<LapRecord>,
    ) -> Self {
        Self {
            id,
            recorded_at,
            total_elapsed_ms,
            laps,
        }
    }

    /// Replace the id before the session is stored.
    pub(crate) fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    /// Unique session id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the session was finalized.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Finalization time in the local timezone.
    #[must_use]
    pub fn recorded_at_local(&self) -> DateTime<Local> {
        self.recorded_at.with_timezone(&Local)
    }

    /// Timer value at finalization, in milliseconds.
    #[must_use]
    pub const fn total_elapsed_ms(&self) -> u64 {
        self.total_elapsed_ms
    }

    /// Laps in recording order.
    #[must_use]
    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    /// Laps, most recent first.
    pub fn laps_newest_first(&self) -> impl Iterator<Item = &LapRecord> {
        self.laps.iter().rev()
    }

    /// Fastest/slowest statistics over this session's laps.
    #[must_use]
    pub fn lap_stats(&self) -> LapStats {
        LapStats::of(&self.laps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_finalize_uses_millisecond_id() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let session = Session::finalize(1_500, Vec::new(), at);

        assert_eq!(session.id(), at.timestamp_millis().to_string());
        assert_eq!(session.recorded_at(), at);
        assert_eq!(session.total_elapsed_ms(), 1_500);
        assert!(session.laps().is_empty());
    }

    #[test]
    fn test_laps_newest_first() {
        let laps = vec![
            LapRecord {
                sequence: 1,
                cumulative_ms: 100,
                split_ms: 100,
            },
            LapRecord {
                sequence: 2,
                cumulative_ms: 250,
                split_ms: 150,
            },
        ];
        let session = Session::finalize(300, laps, Utc::now());

        let order: Vec<u32> = session.laps_newest_first().map(|l| l.sequence).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(session.lap_stats().fastest(), Some(100));
    }
}
