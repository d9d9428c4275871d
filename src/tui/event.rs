//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::LapwatchError;
use crate::storage::BlobStore;
use crate::tui::app::{App, HELP};

/// Longest wait for input while the stopwatch is paused.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Action to take after handling an event.
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the stopwatch.
    Toggle,
    /// Record a lap.
    Lap,
    /// Save the run and reset.
    Reset,
    /// Delete the selected session.
    Delete,
    /// Clear all history (after confirmation).
    Clear,
}

/// Handle terminal events, waiting no longer than the next tick.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<B: BlobStore>(app: &mut App<B>) -> Result<Option<Action>, LapwatchError> {
    let timeout = app
        .stopwatch
        .engine()
        .until_next_tick()
        .map_or(IDLE_POLL, |next| next.min(IDLE_POLL));

    if !event::poll(timeout)
        .map_err(|e| LapwatchError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| LapwatchError::Terminal(format!("Event read failed: {e}")))?
    else {
        return Ok(None);
    };

    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    if key.code == KeyCode::Char('C') {
        return Ok(Some(Action::Clear));
    }
    app.cancel_pending();

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ' | 's') => Some(Action::Toggle),
        KeyCode::Char('l') | KeyCode::Enter => Some(Action::Lap),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::Delete),
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Char('?') => {
            app.status = Some(HELP.to_string());
            None
        }
        _ => None,
    };

    Ok(action)
}
