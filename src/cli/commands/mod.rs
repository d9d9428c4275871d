//! Command implementations for lapwatch.
//!
//! Each command returns the text to print, already formatted for the
//! requested output format.

mod history;

pub use history::{clear, delete, history, show};

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::LapwatchError;
use crate::output::to_json;

/// Execute config command
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn config(config: &Config, format: OutputFormat) -> Result<String, LapwatchError> {
    match format {
        OutputFormat::Json => to_json(config),
        OutputFormat::Pretty => config.to_yaml(),
    }
}
