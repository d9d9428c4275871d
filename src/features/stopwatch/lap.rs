//! Lap records and split statistics.

use serde::Serialize;

/// One recorded lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LapRecord {
    /// 1-based position in recording order
    pub sequence: u32,
    /// Total elapsed time when the lap was recorded, in milliseconds
    pub cumulative_ms: u64,
    /// Time since the previous lap (or since start), in milliseconds
    pub split_ms: u64,
}

/// Smallest split among `laps`, or `None` when there are no laps.
#[must_use]
pub fn fastest_split(laps: &[LapRecord]) -> Option<u64> {
    laps.iter().map(|lap| lap.split_ms).min()
}

/// Largest split among `laps`, or `None` when there are no laps.
#[must_use]
pub fn slowest_split(laps: &[LapRecord]) -> Option<u64> {
    laps.iter().map(|lap| lap.split_ms).max()
}

/// Badges shown next to a lap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LapBadges {
    pub fastest: bool,
    pub slowest: bool,
}

/// Fastest/slowest extremes over one lap sequence.
///
/// Badges are value based: every lap whose split equals an extreme is
/// flagged. A lone lap is flagged fastest but never slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapStats {
    fastest: Option<u64>,
    slowest: Option<u64>,
    count: usize,
}

impl LapStats {
    /// Compute the extremes of `laps`.
    #[must_use]
    pub fn of(laps: &[LapRecord]) -> Self {
        Self {
            fastest: fastest_split(laps),
            slowest: slowest_split(laps),
            count: laps.len(),
        }
    }

    /// Fastest split, if any.
    #[must_use]
    pub const fn fastest(&self) -> Option<u64> {
        self.fastest
    }

    /// Slowest split, if any.
    #[must_use]
    pub const fn slowest(&self) -> Option<u64> {
        self.slowest
    }

    /// Badges for one lap of the sequence these stats were computed from.
    #[must_use]
    pub fn badges(&self, lap: &LapRecord) -> LapBadges {
        LapBadges {
            fastest: self.fastest == Some(lap.split_ms),
            slowest: self.count > 1 && self.slowest == Some(lap.split_ms),
        }
    }

    /// Offset of a lap's split from the fastest split.
    #[must_use]
    pub fn behind_fastest(&self, lap: &LapRecord) -> Option<u64> {
        self.fastest.map(|best| lap.split_ms.saturating_sub(best))
    }
}
