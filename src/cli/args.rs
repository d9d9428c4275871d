use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "lapwatch")]
#[command(about = "A terminal stopwatch with lap splits and saved session history")]
#[command(long_about = "lapwatch - a terminal stopwatch

Runs an interactive stopwatch with lap recording. Every reset saves the
finished run, with its laps, to a local history.

QUICK START:
  lapwatch                  Open the stopwatch
  lapwatch history          List saved sessions
  lapwatch show <ID>        Show one session's laps
  lapwatch delete <ID>      Delete one session
  lapwatch clear --force    Delete all history

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` config setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive stopwatch (default)
    ///
    /// Keys: space start/stop, l lap, r reset and save, j/k select a saved
    /// session, d delete it, C clear all history, q quit.
    Tui,

    /// List saved sessions, most recent first
    #[command(alias = "ls")]
    History {
        /// Show at most this many sessions
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show one session with its laps
    Show {
        /// Session ID (from `lapwatch history`)
        id: String,
    },

    /// Delete one saved session
    #[command(alias = "rm")]
    Delete {
        /// Session ID (from `lapwatch history`)
        id: String,
    },

    /// Delete all saved sessions
    Clear {
        /// Skip the confirmation notice and clear immediately
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_command_opens_tui() {
        let cli = Cli::try_parse_from(["lapwatch"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_history_limit() {
        let cli = Cli::try_parse_from(["lapwatch", "history", "-n", "5"]).unwrap();
        if let Some(Commands::History { limit }) = cli.command {
            assert_eq!(limit, Some(5));
        } else {
            panic!("Expected History command");
        }
    }

    #[test]
    fn test_cli_delete_alias() {
        let cli = Cli::try_parse_from(["lapwatch", "rm", "1700000000000"]).unwrap();
        if let Some(Commands::Delete { id }) = cli.command {
            assert_eq!(id, "1700000000000");
        } else {
            panic!("Expected Delete command");
        }
    }

    #[test]
    fn test_cli_clear_force() {
        let cli = Cli::try_parse_from(["lapwatch", "clear", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Clear { force: true })));
    }

    #[test]
    fn test_cli_global_output() {
        let cli = Cli::try_parse_from(["lapwatch", "history", "--output", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_show_requires_id() {
        assert!(Cli::try_parse_from(["lapwatch", "show"]).is_err());
    }
}
