//! Stopwatch timing and laps.
//!
//! Provides the timer engine and its helpers:
//! - Start/pause toggling driven by a cancellable tick schedule
//! - Lap recording with split times
//! - Fastest/slowest split statistics
//! - `MM:SS.CC` formatting

pub mod engine;
pub mod format;
pub mod lap;
pub mod ticker;

pub use engine::{TimerEngine, DEFAULT_TICK_MS};
pub use format::{format_elapsed, format_offset};
pub use lap::{fastest_split, slowest_split, LapBadges, LapRecord, LapStats};
pub use ticker::{Clock, ManualClock, SystemClock, Ticker};
