//! Catalog filter
//!
//! Pure reducer over a catalog: tab, difficulty, free-text search and
//! completion status are independent criteria. Results keep list order.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::status::StatusBook;
use crate::types::{DifficultyFilter, Scenario, TabKey};
use std::fmt;
use std::str::FromStr;

/// Completion criterion of the catalog filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// Every scenario passes
    #[default]
    All,
    /// Only scenarios whose playback completed
    Completed,
    /// Only scenarios never played to completion
    NotStarted,
}

impl StatusFilter {
    /// Check a scenario's recorded status against this filter
    #[inline]
    #[must_use]
    pub fn accepts(&self, passed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => passed,
            StatusFilter::NotStarted => !passed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::NotStarted => "Not Started",
        })
    }
}

impl FromStr for StatusFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" | "passed" => Ok(StatusFilter::Completed),
            "notstarted" => Ok(StatusFilter::NotStarted),
            _ => Err(CatalogError::UnknownStatusFilter(s.to_string())),
        }
    }
}

/// Filter criteria for the visible scenario list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Active tab
    pub tab: TabKey,
    /// Difficulty criterion
    pub difficulty: DifficultyFilter,
    /// Case-insensitive substring over title and id
    pub search: String,
    /// Completion criterion
    pub status: StatusFilter,
}

impl CatalogFilter {
    /// Filter showing everything in `tab`
    #[inline]
    #[must_use]
    pub fn new(tab: TabKey) -> Self {
        Self {
            tab,
            difficulty: DifficultyFilter::All,
            search: String::new(),
            status: StatusFilter::All,
        }
    }

    /// With difficulty criterion
    #[inline]
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<DifficultyFilter>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// With search text
    #[inline]
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// With status criterion
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Tab, difficulty and search criteria
    #[must_use]
    pub fn matches(&self, scenario: &Scenario) -> bool {
        scenario.tab == self.tab
            && self.difficulty.accepts(scenario.difficulty)
            && scenario.matches_search(&self.search)
    }

    /// All criteria, including completion status
    #[must_use]
    pub fn matches_with_status(&self, scenario: &Scenario, statuses: &StatusBook) -> bool {
        self.matches(scenario) && self.status.accepts(statuses.is_passed(scenario.id.as_str()))
    }

    /// Visible subset of `scenarios`, in original order
    ///
    /// Ignores the status criterion; see [`CatalogFilter::apply_with_status`].
    pub fn apply<'a, I>(&self, scenarios: I) -> Vec<&'a Scenario>
    where
        I: IntoIterator<Item = &'a Scenario>,
    {
        scenarios.into_iter().filter(|s| self.matches(s)).collect()
    }

    /// Visible subset of a catalog, honoring every criterion
    #[must_use]
    pub fn apply_with_status<'a>(&self, catalog: &'a Catalog, statuses: &StatusBook) -> Vec<&'a Scenario> {
        catalog
            .scenarios()
            .filter(|s| self.matches_with_status(s, statuses))
            .collect()
    }
}
