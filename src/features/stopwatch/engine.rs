//! The stopwatch timer engine.
//!
//! Two states, paused (initial) and running. Elapsed time advances by a fixed
//! quantum per tick, and ticks only come from the engine's own schedule, which
//! exists exactly while the engine is running.

use std::time::Duration;

use chrono::Utc;

use super::lap::LapRecord;
use super::ticker::{Clock, SystemClock, Ticker};
use crate::features::history::Session;

/// Default tick quantum in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 10;

/// Elapsed time, running status, and laps of the in-progress run.
#[derive(Debug)]
pub struct TimerEngine<C: Clock = SystemClock> {
    elapsed_ms: u64,
    laps: Vec<LapRecord>,
    last_lap_elapsed_ms: u64,
    quantum_ms: u64,
    ticker: Ticker<C>,
}

impl TimerEngine<SystemClock> {
    /// Create a paused engine on the system clock.
    #[must_use]
    pub fn new(tick_ms: u64) -> Self {
        Self::with_clock(SystemClock, tick_ms)
    }
}

impl<C: Clock> TimerEngine<C> {
    /// Create a paused engine ticking every `tick_ms` on `clock`.
    pub fn with_clock(clock: C, tick_ms: u64) -> Self {
        let quantum_ms = tick_ms.max(1);
        Self {
            elapsed_ms: 0,
            laps: Vec::new(),
            last_lap_elapsed_ms: 0,
            quantum_ms,
            ticker: Ticker::new(clock, Duration::from_millis(quantum_ms)),
        }
    }

    /// Start or pause. Returns whether the engine is now running.
    pub fn toggle_running(&mut self) -> bool {
        if self.is_running() {
            self.ticker.cancel();
            tracing::debug!(elapsed_ms = self.elapsed_ms, "stopwatch paused");
        } else {
            self.ticker.schedule();
            tracing::debug!(elapsed_ms = self.elapsed_ms, "stopwatch started");
        }
        self.is_running()
    }

    /// Advance elapsed time by one quantum.
    ///
    /// Returns false, leaving the engine untouched, when paused.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(self.quantum_ms);
        true
    }

    /// Apply every tick that has come due. Returns the number applied.
    pub fn pump(&mut self) -> u64 {
        let due = self.ticker.take_due();
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Record a lap at the current elapsed time.
    ///
    /// Ignored while paused.
    pub fn record_lap(&mut self) -> Option<LapRecord> {
        if !self.is_running() {
            return None;
        }

        let lap = LapRecord {
            sequence: u32::try_from(self.laps.len() + 1).unwrap_or(u32::MAX),
            cumulative_ms: self.elapsed_ms,
            split_ms: self.elapsed_ms - self.last_lap_elapsed_ms,
        };
        self.laps.push(lap);
        self.last_lap_elapsed_ms = self.elapsed_ms;

        tracing::debug!(
            sequence = lap.sequence,
            split_ms = lap.split_ms,
            "lap recorded"
        );
        Some(lap)
    }

    /// Finalize the current run and return to the initial state.
    ///
    /// Returns the finished session when any time had elapsed. The session is
    /// built from the run before anything is cleared.
    pub fn reset(&mut self) -> Option<Session> {
        let session = (self.elapsed_ms > 0)
            .then(|| Session::finalize(self.elapsed_ms, self.laps.clone(), Utc::now()));

        self.ticker.cancel();
        self.elapsed_ms = 0;
        self.laps.clear();
        self.last_lap_elapsed_ms = 0;

        session
    }

    /// Whether the engine is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.ticker.is_active()
    }

    /// Elapsed milliseconds of the current run.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Elapsed milliseconds at the most recent lap (0 if none).
    #[must_use]
    pub const fn last_lap_elapsed_ms(&self) -> u64 {
        self.last_lap_elapsed_ms
    }

    /// Time since the most recent lap.
    #[must_use]
    pub const fn current_split_ms(&self) -> u64 {
        self.elapsed_ms - self.last_lap_elapsed_ms
    }

    /// Laps of the current run, in recording order.
    #[must_use]
    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    /// Laps of the current run, most recent first.
    pub fn laps_newest_first(&self) -> impl Iterator<Item = &LapRecord> {
        self.laps.iter().rev()
    }

    /// Milliseconds added per tick.
    #[must_use]
    pub const fn quantum_ms(&self) -> u64 {
        self.quantum_ms
    }

    /// Time until the next tick is due, or `None` while paused.
    #[must_use]
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.ticker.until_next()
    }
}
