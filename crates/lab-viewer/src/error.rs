//! Error types for the viewer and its capabilities

use lab_catalog::{CatalogError, ScenarioId, TabKey};
use lab_playback::PlaybackError;
use std::path::PathBuf;

/// Viewer error type
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Scenario not in the viewer's catalog
    #[error("unknown scenario: {0}")]
    UnknownScenario(ScenarioId),

    /// Tab not declared by the viewer's catalog
    #[error("unknown tab: {0}")]
    UnknownTab(TabKey),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Playback setup error
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `LabConfig`
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Clipboard error type
///
/// Never surfaced by the viewer; copy failures are logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard on this system
    #[error("clipboard unavailable")]
    Unavailable,

    /// Clipboard command could not be started or fed
    #[error("clipboard command `{command}` failed: {source}")]
    Spawn {
        /// Program name
        command: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Clipboard command exited unsuccessfully
    #[error("clipboard command `{command}` exited with {status}")]
    Exit {
        /// Program name
        command: String,
        /// Exit status
        status: std::process::ExitStatus,
    },
}
