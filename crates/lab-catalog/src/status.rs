//! Execution status bookkeeping and the stats bar summary

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::types::{ScenarioId, TabKey};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Outcome recorded for a scenario
///
/// Playback can only ever end in `Passed`; there is no failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExecutionStatus {
    /// Playback ran to completion
    Passed,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStatus::Passed => f.write_str("passed"),
        }
    }
}

/// Transient status map, keyed by scenario id
///
/// Every key is guaranteed to exist in the catalog it was recorded against.
#[derive(Debug, Clone, Default)]
pub struct StatusBook {
    entries: IndexMap<ScenarioId, ExecutionStatus>,
}

impl StatusBook {
    /// Create an empty status book
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed playback
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownScenario` if `id` is not in `catalog`.
    pub fn mark_passed(&mut self, catalog: &Catalog, id: &ScenarioId) -> Result<(), CatalogError> {
        if !catalog.contains(id.as_str()) {
            return Err(CatalogError::UnknownScenario(id.clone()));
        }
        self.entries.insert(id.clone(), ExecutionStatus::Passed);
        Ok(())
    }

    /// Status of a scenario, if it ever completed
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ExecutionStatus> {
        self.entries.get(id).copied()
    }

    /// Whether the scenario has passed
    #[inline]
    #[must_use]
    pub fn is_passed(&self, id: &str) -> bool {
        self.get(id) == Some(ExecutionStatus::Passed)
    }

    /// Number of passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.entries
            .values()
            .filter(|s| **s == ExecutionStatus::Passed)
            .count()
    }

    /// Entries in completion order
    pub fn iter(&self) -> impl Iterator<Item = (&ScenarioId, ExecutionStatus)> + '_ {
        self.entries.iter().map(|(id, status)| (id, *status))
    }

    /// Number of recorded entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stats bar figures for one lab and its active tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    /// Scenarios in the lab
    pub total: usize,
    /// Passed scenarios in the lab
    pub passed: usize,
    /// Scenarios in the active tab
    pub tab_total: usize,
    /// Passed scenarios in the active tab
    pub tab_passed: usize,
}

impl CatalogSummary {
    /// Compute the summary for `tab`
    #[must_use]
    pub fn compute(catalog: &Catalog, statuses: &StatusBook, tab: &TabKey) -> Self {
        let (tab_total, tab_passed) = catalog
            .in_tab(tab)
            .fold((0, 0), |(total, passed), s| {
                (total + 1, passed + usize::from(statuses.is_passed(s.id.as_str())))
            });
        Self {
            total: catalog.len(),
            passed: statuses.passed_count(),
            tab_total,
            tab_passed,
        }
    }

    /// Lab coverage in whole percent
    #[inline]
    #[must_use]
    pub fn coverage(&self) -> u8 {
        round_percent(self.passed, self.total)
    }

    /// Active tab coverage in whole percent
    #[inline]
    #[must_use]
    pub fn tab_coverage(&self) -> u8 {
        round_percent(self.tab_passed, self.tab_total)
    }
}

/// `round(part / whole * 100)`, half-up, 0 for an empty whole
///
/// `part` is clamped to `whole`.
#[must_use]
pub fn round_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let value = (part.min(whole) * 200 + whole) / (whole * 2);
    u8::try_from(value).unwrap_or(100)
}
