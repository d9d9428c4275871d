//! Application state for the TUI.

use crate::core::Stopwatch;
use crate::features::history::Session;
use crate::storage::BlobStore;

/// Help line shown in the status bar.
pub const HELP: &str =
    "space:start/stop | l:lap | r:reset | j/k:select | d:delete | C:clear all | q:quit";

/// Application state.
pub struct App<B: BlobStore> {
    /// The stopwatch and its history.
    pub stopwatch: Stopwatch<B>,
    /// Selected index into the history, most recent first.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
    /// Pending first 'C' of a clear-all confirmation.
    pub pending_clear: bool,
}

impl<B: BlobStore> App<B> {
    /// Create a new app instance.
    pub fn new(stopwatch: Stopwatch<B>) -> Self {
        let status = if stopwatch.history().is_empty() {
            "Press space to start, ? for help".to_string()
        } else {
            format!("{} saved sessions, ? for help", stopwatch.history().len())
        };

        Self {
            stopwatch,
            selected: 0,
            status: Some(status),
            pending_clear: false,
        }
    }

    /// Start or pause the stopwatch.
    pub fn toggle(&mut self) {
        let running = self.stopwatch.toggle_running();
        self.status = Some(if running { "Running" } else { "Paused" }.to_string());
    }

    /// Record a lap; ignored while paused.
    pub fn lap(&mut self) {
        if let Some(lap) = self.stopwatch.record_lap() {
            self.status = Some(format!("Lap {}", lap.sequence));
        }
    }

    /// Save the current run and clear the stopwatch.
    pub fn reset(&mut self) {
        match self.stopwatch.reset() {
            Ok(Some(id)) => {
                self.selected = 0;
                self.status = Some(format!("Saved session {id}"));
            }
            Ok(None) => self.status = Some("Reset".to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "session could not be saved");
                self.status = Some(format!("Session kept but not saved: {e}"));
            }
        }
    }

    /// Delete the selected history entry.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_session().map(|s| s.id().to_string()) else {
            return;
        };

        match self.stopwatch.delete_session(&id) {
            Ok(_) => self.status = Some(format!("Deleted session {id}")),
            Err(e) => {
                tracing::warn!(error = %e, "session deletion could not be saved");
                self.status = Some(format!("Deleted, but not saved: {e}"));
            }
        }
        self.clamp_selection();
    }

    /// Clear all history on the second consecutive request.
    pub fn request_clear(&mut self) {
        if !self.pending_clear {
            self.pending_clear = true;
            self.status = Some("Press C again to delete all history".to_string());
            return;
        }

        self.pending_clear = false;
        match self.stopwatch.clear_history() {
            Ok(()) => self.status = Some("History cleared".to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "history clear could not be saved");
                self.status = Some(format!("Cleared, but not saved: {e}"));
            }
        }
        self.selected = 0;
    }

    /// Get the currently selected session.
    pub fn selected_session(&self) -> Option<&Session> {
        self.stopwatch.history().newest_first().nth(self.selected)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.stopwatch.history().len() {
            self.selected += 1;
        }
    }

    /// Cancel pending clear confirmation.
    pub fn cancel_pending(&mut self) {
        self.pending_clear = false;
    }

    fn clamp_selection(&mut self) {
        let len = self.stopwatch.history().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::MemoryBlobStore;
    use chrono::{TimeZone, Utc};

    fn app_with_history(count: i64) -> App<MemoryBlobStore> {
        let mut blobs = MemoryBlobStore::new();
        {
            use crate::features::history::SessionStore;
            let mut store = SessionStore::load(blobs, "stopwatch-sessions");
            for i in 0..count {
                let at = Utc.timestamp_opt(1_700_000_000 + i, 0).unwrap();
                store.add_session(Session::finalize(100, Vec::new(), at)).unwrap();
            }
            blobs = store.into_inner();
        }
        App::new(Stopwatch::open(blobs, &Config::default()))
    }

    #[test]
    fn test_selection_bounds() {
        let mut app = app_with_history(2);
        app.select_previous();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_delete_selected_clamps() {
        let mut app = app_with_history(2);
        app.select_next();
        app.delete_selected();

        assert_eq!(app.stopwatch.history().len(), 1);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut app = app_with_history(3);
        app.request_clear();
        assert_eq!(app.stopwatch.history().len(), 3);

        app.cancel_pending();
        app.request_clear();
        assert_eq!(app.stopwatch.history().len(), 3);
        app.request_clear();
        assert!(app.stopwatch.history().is_empty());
    }

    #[test]
    fn test_lap_while_paused_keeps_status() {
        let mut app = app_with_history(0);
        app.status = None;
        app.lap();
        assert!(app.status.is_none());
        assert!(app.stopwatch.engine().laps().is_empty());
    }
}
