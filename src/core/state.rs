//! Owned application state.
//!
//! `Stopwatch` holds the one timer engine and the session history. The
//! presentation layer borrows it; nothing lives in globals.

use crate::config::Config;
use crate::error::LapwatchError;
use crate::features::history::{Session, SessionStore};
use crate::features::stopwatch::{Clock, LapRecord, SystemClock, TimerEngine};
use crate::storage::BlobStore;

/// Timer engine plus session history.
pub struct Stopwatch<B: BlobStore, C: Clock = SystemClock> {
    engine: TimerEngine<C>,
    history: SessionStore<B>,
}

impl<B: BlobStore> Stopwatch<B, SystemClock> {
    /// Restore history from `blobs` and create a paused engine.
    pub fn open(blobs: B, config: &Config) -> Self {
        Self::with_clock(blobs, config, SystemClock)
    }
}

impl<B: BlobStore, C: Clock> Stopwatch<B, C> {
    /// Like [`Stopwatch::open`], with an explicit clock.
    pub fn with_clock(blobs: B, config: &Config, clock: C) -> Self {
        Self {
            engine: TimerEngine::with_clock(clock, config.stopwatch.tick_interval_ms),
            history: SessionStore::load(blobs, config.storage.key.clone()),
        }
    }

    /// Start or pause the timer. Returns whether it is now running.
    pub fn toggle_running(&mut self) -> bool {
        self.engine.toggle_running()
    }

    /// Record a lap. Ignored while paused.
    pub fn record_lap(&mut self) -> Option<LapRecord> {
        self.engine.record_lap()
    }

    /// Save the current run to history (if any time elapsed) and clear the
    /// timer. Returns the id of the saved session.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be persisted. The timer is
    /// cleared and the session is kept in memory regardless.
    pub fn reset(&mut self) -> Result<Option<String>, LapwatchError> {
        let Some(session) = self.engine.reset() else {
            return Ok(None);
        };

        let id = session.id().to_string();
        self.history.add_session(session)?;

        // The store may have reassigned a colliding id
        let id = self
            .history
            .newest_first()
            .next()
            .map_or(id, |s| s.id().to_string());
        Ok(Some(id))
    }

    /// Delete one session. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be persisted.
    pub fn delete_session(&mut self, id: &str) -> Result<bool, LapwatchError> {
        self.history.delete_session(id)
    }

    /// Delete every session.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted history cannot be removed.
    pub fn clear_history(&mut self) -> Result<(), LapwatchError> {
        self.history.clear_all()
    }

    /// Apply ticks that have come due. Returns how many were applied.
    pub fn pump(&mut self) -> u64 {
        self.engine.pump()
    }

    /// The timer engine.
    #[must_use]
    pub const fn engine(&self) -> &TimerEngine<C> {
        &self.engine
    }

    /// The session history.
    #[must_use]
    pub const fn history(&self) -> &SessionStore<B> {
        &self.history
    }

    /// Look up a stored session.
    #[must_use]
    pub fn session(&self, id: &str) -> Option<&Session> {
        self.history.get(id)
    }

    /// Stop the timer and release the blob store.
    ///
    /// An unfinished run is discarded, not saved.
    pub fn shutdown(self) -> B {
        let Self { mut engine, history } = self;
        if engine.is_running() {
            engine.toggle_running();
        }
        tracing::debug!(elapsed_ms = engine.elapsed_ms(), "stopwatch shut down");
        history.into_inner()
    }
}
