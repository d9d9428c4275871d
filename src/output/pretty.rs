//! Human-readable output formatting for lapwatch.

use colored::Colorize;

use crate::features::history::Session;
use crate::features::stopwatch::{format_elapsed, format_offset};

/// Format a list of sessions (most recent first) as a table.
#[must_use]
pub fn format_sessions_pretty(sessions: &[&Session]) -> String {
    if sessions.is_empty() {
        return "History (0 sessions)\n  No sessions recorded".to_string();
    }

    let mut output = format!("History ({} sessions)\n", sessions.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for session in sessions {
        let laps = session.laps().len();
        let mut line = format!(
            "{}  {}  {}",
            session.id().dimmed(),
            session.recorded_at_local().format("%Y-%m-%d %H:%M:%S"),
            format_elapsed(session.total_elapsed_ms()).bold()
        );

        if laps > 0 {
            let label = if laps == 1 { "lap" } else { "laps" };
            line.push_str(&format!("  {}", format!("{laps} {label}").cyan()));
        }

        if let Some(best) = session.lap_stats().fastest() {
            line.push_str(&format!("  best {}", format_elapsed(best).green()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format one session with its laps, most recent lap first.
#[must_use]
pub fn format_session_pretty(session: &Session) -> String {
    let mut output = format!(
        "Session {}\n",
        format_elapsed(session.total_elapsed_ms()).bold()
    );
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), session.id()));
    output.push_str(&format!(
        "  {}: {}\n",
        "Recorded".dimmed(),
        session.recorded_at_local().format("%Y-%m-%d %H:%M:%S")
    ));

    if session.laps().is_empty() {
        output.push_str(&format!("  {}\n", "No laps".dimmed()));
        return output;
    }

    let stats = session.lap_stats();
    output.push_str(&format!("  {}:\n", "Laps".dimmed()));
    for lap in session.laps_newest_first() {
        let badges = stats.badges(lap);
        let mut line = format!(
            "    #{:<3} {}  {}",
            lap.sequence,
            format_elapsed(lap.split_ms),
            format_elapsed(lap.cumulative_ms).dimmed()
        );

        if badges.fastest {
            line.push_str(&format!("  {}", "fastest".green()));
        } else if let Some(behind) = stats.behind_fastest(lap) {
            line.push_str(&format!("  {}", format_offset(behind).dimmed()));
        }
        if badges.slowest {
            line.push_str(&format!("  {}", "slowest".red()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}
