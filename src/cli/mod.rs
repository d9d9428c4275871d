//! Command-line interface for lapwatch.

pub mod args;
pub mod commands;
