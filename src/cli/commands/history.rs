//! Session history commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::error::LapwatchError;
use crate::features::history::{Session, SessionStore};
use crate::output::{format_session, format_sessions, to_json};
use crate::storage::BlobStore;

/// List sessions, most recent first.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn history<B: BlobStore>(
    store: &SessionStore<B>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<String, LapwatchError> {
    let sessions: Vec<&Session> = store
        .newest_first()
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    format_sessions(&sessions, format)
}

/// Show one session.
///
/// # Errors
///
/// Returns `LapwatchError::NotFound` if no session has this id.
pub fn show<B: BlobStore>(
    store: &SessionStore<B>,
    id: &str,
    format: OutputFormat,
) -> Result<String, LapwatchError> {
    let session = store
        .get(id)
        .ok_or_else(|| LapwatchError::NotFound(format!("session {id}")))?;
    format_session(session, format)
}

/// Delete one session. An unknown id is reported, not treated as a failure.
///
/// # Errors
///
/// Returns an error if the history cannot be persisted.
pub fn delete<B: BlobStore>(
    store: &mut SessionStore<B>,
    id: &str,
    format: OutputFormat,
) -> Result<String, LapwatchError> {
    let deleted = store.delete_session(id)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "deleted": deleted })),
        OutputFormat::Pretty => Ok(if deleted {
            format!("{} Deleted session {id}", "✓".green())
        } else {
            format!("No session with ID {id}; nothing deleted.")
        }),
    }
}

/// Clear all history. Without `force`, only reports what would be removed.
///
/// # Errors
///
/// Returns an error if the persisted history cannot be removed.
pub fn clear<B: BlobStore>(
    store: &mut SessionStore<B>,
    force: bool,
    format: OutputFormat,
) -> Result<String, LapwatchError> {
    let count = store.len();

    if force {
        store.clear_all()?;
    }

    match format {
        OutputFormat::Json => to_json(&json!({ "sessions": count, "cleared": force })),
        OutputFormat::Pretty => Ok(if force {
            format!("{} Cleared {count} sessions.", "✓".green())
        } else {
            format!(
                "This will delete {count} saved sessions.\n{}",
                "Run 'lapwatch clear --force' to confirm.".dimmed()
            )
        }),
    }
}
