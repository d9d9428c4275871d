//! Core application state for lapwatch.

pub mod state;

pub use state::Stopwatch;
