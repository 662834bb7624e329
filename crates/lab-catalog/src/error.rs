//! Error types for catalog loading and lookup

use crate::types::{ScenarioId, TabKey};
use std::path::PathBuf;

/// Catalog error type
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog document could not be parsed
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Catalog declares no tabs or no scenarios
    #[error("catalog {0} is empty")]
    Empty(String),

    /// Two tabs share a key
    #[error("duplicate tab: {0}")]
    DuplicateTab(TabKey),

    /// Two scenarios share an id
    #[error("duplicate scenario: {0}")]
    DuplicateScenario(ScenarioId),

    /// Scenario refers to a tab the catalog does not declare
    #[error("scenario {scenario} refers to undeclared tab {tab}")]
    UndeclaredTab {
        /// Offending scenario
        scenario: ScenarioId,
        /// Tab it names
        tab: TabKey,
    },

    /// Two catalogs share a key in the registry
    #[error("duplicate lab: {0}")]
    DuplicateLab(String),

    /// Lab key not registered
    #[error("unknown lab: {0}")]
    UnknownLab(String),

    /// Scenario id not in the catalog
    #[error("unknown scenario: {0}")]
    UnknownScenario(ScenarioId),

    /// Difficulty name not recognized
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// Status filter name not recognized
    #[error("unknown status filter: {0}")]
    UnknownStatusFilter(String),
}

impl CatalogError {
    /// Check if the error comes from a malformed catalog document
    #[inline]
    #[must_use]
    pub fn is_invalid_catalog(&self) -> bool {
        matches!(
            self,
            Self::Parse(_)
                | Self::Empty(_)
                | Self::DuplicateTab(_)
                | Self::DuplicateScenario(_)
                | Self::UndeclaredTab { .. }
        )
    }
}
