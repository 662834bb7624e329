//! Error types for playback

use std::time::Duration;

/// Playback error type
///
/// A playback itself cannot fail; these only guard its setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// Tick interval must be positive
    #[error("invalid tick interval: {0:?}")]
    InvalidInterval(Duration),

    /// Playback was started outside a tokio runtime
    #[error("playback requires a tokio runtime")]
    NoRuntime,
}
