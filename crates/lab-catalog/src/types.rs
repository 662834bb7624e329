//! Core catalog types
//!
//! Defines the records a catalog is made of:
//! - Scenario identifiers and tab keys
//! - Difficulty levels and the difficulty filter
//! - The immutable scenario record itself

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Unique scenario identifier (e.g. `ML-002`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    /// Create a new scenario ID
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for ScenarioId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScenarioId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Grouping key partitioning a catalog for display (e.g. `Console`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabKey(String);

impl TabKey {
    /// Create a new tab key
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for TabKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TabKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Tab declaration: key plus display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Key scenarios refer to
    pub key: TabKey,
    /// Human-readable label
    pub label: String,
}

/// Scenario difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Entry level
    Beginner,
    /// Requires some domain knowledge
    Intermediate,
    /// Multi-step or specialist scenarios
    Advanced,
}

impl Difficulty {
    /// All difficulties in display order
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Display name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownDifficulty(s.to_string()))
    }
}

/// Difficulty criterion of the catalog filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DifficultyFilter {
    /// Every difficulty passes
    #[default]
    All,
    /// Only the given difficulty passes
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Check a difficulty against this filter
    #[inline]
    #[must_use]
    pub fn accepts(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(d) => *d == difficulty,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::All => f.write_str("All"),
            DifficultyFilter::Only(d) => d.fmt(f),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        s.parse().map(DifficultyFilter::Only)
    }
}

impl From<Difficulty> for DifficultyFilter {
    fn from(value: Difficulty) -> Self {
        DifficultyFilter::Only(value)
    }
}

/// A fixed demo record describing a hypothetical test case
///
/// Created at load time and never mutated. `expected_output` is replayed
/// verbatim by playback; its `[PASS]`/`[FAIL]` markers carry no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Unique identifier within the catalog
    pub id: ScenarioId,
    /// Display title
    pub title: String,
    /// Tab (category) the scenario is listed under
    pub tab: TabKey,
    /// Test framework shown on the card
    #[serde(default)]
    pub framework: String,
    /// Language of the code sample
    #[serde(default)]
    pub language: String,
    /// Difficulty badge
    pub difficulty: Difficulty,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// Prerequisites blurb
    #[serde(default)]
    pub prerequisites: String,
    /// Configuration snippet
    #[serde(default)]
    pub config: String,
    /// Code sample seeding the editor buffer
    #[serde(default)]
    pub code: String,
    /// Pre-baked console output
    #[serde(default)]
    pub expected_output: String,
}

impl Scenario {
    /// Case-insensitive substring match over title and id
    ///
    /// An empty needle matches every scenario.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.id.as_str().to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(id: &str, title: &str) -> Scenario {
        Scenario {
            id: id.into(),
            title: title.to_string(),
            tab: "ModelTesting".into(),
            framework: String::new(),
            language: String::new(),
            difficulty: Difficulty::Advanced,
            description: String::new(),
            prerequisites: String::new(),
            config: String::new(),
            code: String::new(),
            expected_output: String::new(),
        }
    }

    #[test]
    fn difficulty_parse_is_case_insensitive() {
        assert_eq!("beginner".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert_eq!("ADVANCED".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_filter_parse() {
        assert_eq!("All".parse::<DifficultyFilter>().unwrap(), DifficultyFilter::All);
        assert_eq!(
            "Intermediate".parse::<DifficultyFilter>().unwrap(),
            DifficultyFilter::Only(Difficulty::Intermediate)
        );
    }

    #[test]
    fn difficulty_filter_accepts() {
        assert!(DifficultyFilter::All.accepts(Difficulty::Advanced));
        assert!(DifficultyFilter::Only(Difficulty::Beginner).accepts(Difficulty::Beginner));
        assert!(!DifficultyFilter::Only(Difficulty::Beginner).accepts(Difficulty::Advanced));
    }

    #[test]
    fn search_matches_title_or_id() {
        let s = scenario("ML-002", "Fraud Detection Model Validation");
        assert!(s.matches_search("fraud"));
        assert!(s.matches_search("ml-00"));
        assert!(s.matches_search(""));
        assert!(!s.matches_search("payment"));
    }
}
