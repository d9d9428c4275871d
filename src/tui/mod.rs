//! Terminal User Interface (TUI) for lapwatch.
//!
//! The interactive stopwatch screen. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::core::Stopwatch;
use crate::error::LapwatchError;
use crate::storage::BlobStore;

/// Run the TUI application until the user quits.
///
/// Returns the stopwatch so the caller can shut it down.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run<B: BlobStore>(stopwatch: Stopwatch<B>) -> Result<Stopwatch<B>, LapwatchError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| LapwatchError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| LapwatchError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| LapwatchError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(stopwatch);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.stopwatch)
}

/// Run the main application loop.
fn run_app<T: Backend, B: BlobStore>(
    terminal: &mut Terminal<T>,
    app: &mut App<B>,
) -> Result<(), LapwatchError> {
    loop {
        app.stopwatch.pump();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| LapwatchError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            // Catch up first so laps and pauses land at the current time
            app.stopwatch.pump();
            match action {
                event::Action::Quit => break,
                event::Action::Toggle => app.toggle(),
                event::Action::Lap => app.lap(),
                event::Action::Reset => app.reset(),
                event::Action::Delete => app.delete_selected(),
                event::Action::Clear => app.request_clear(),
            }
        }
    }

    Ok(())
}
