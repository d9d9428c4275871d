//! Feature implementations for lapwatch.
//!
//! - Stopwatch engine, laps, and formatting
//! - Session history and its persistence

pub mod history;
pub mod stopwatch;
