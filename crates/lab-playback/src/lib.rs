//! Lab Playback - simulated test runs
//!
//! Reveals a scenario's expected output one line per tick:
//! - [`PlaybackScript`] splits the output and computes per-line progress
//! - [`PlaybackSimulator`] drives the timer and streams [`PlaybackEvent`]s
//! - [`PlaybackHandle`] owns the run and aborts it on drop
//!
//! No code is executed; `[FAIL]` lines are plain text.

#![warn(unreachable_pub)]

pub mod error;
pub mod script;
pub mod simulator;

pub use error::PlaybackError;
pub use script::{progress_percent, PlaybackCursor, PlaybackFrame, PlaybackScript};
pub use simulator::{
    Generation, PlaybackConfig, PlaybackEvent, PlaybackHandle, PlaybackSimulator,
    DEFAULT_TICK_INTERVAL,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
