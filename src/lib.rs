//! lapwatch - a terminal stopwatch with lap splits and saved session history
//!
//! The timer engine and session history live in [`features`], tied together
//! by the owned [`core::Stopwatch`] state that the TUI and CLI drive.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use crate::core::Stopwatch;
pub use error::LapwatchError;
