//! Output formatting for lapwatch.
//!
//! Formatters for displaying session history in pretty or JSON form.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::LapwatchError;
use crate::features::history::Session;

pub use json::*;
pub use pretty::*;

/// Format sessions (given most recent first) based on output format.
///
/// # Errors
///
/// Returns `LapwatchError::Parse` if JSON serialization fails.
pub fn format_sessions(sessions: &[&Session], format: OutputFormat) -> Result<String, LapwatchError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions)),
        OutputFormat::Json => format_sessions_json(sessions),
    }
}

/// Format a single session with its laps based on output format.
///
/// # Errors
///
/// Returns `LapwatchError::Parse` if JSON serialization fails.
pub fn format_session(session: &Session, format: OutputFormat) -> Result<String, LapwatchError> {
    match format {
        OutputFormat::Pretty => Ok(format_session_pretty(session)),
        OutputFormat::Json => format_session_json(session),
    }
}
