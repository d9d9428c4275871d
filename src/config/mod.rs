//! Configuration management for lapwatch.
//!
//! This module handles loading configuration and resolving data paths under
//! `~/.lapwatch/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, GeneralConfig, LoggingConfig, StopwatchConfig, StorageConfig};
