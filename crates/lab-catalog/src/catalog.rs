//! Catalogs and the lab registry
//!
//! A catalog is the fixed scenario list of one lab (page). Catalogs are
//! YAML documents; the built-in ones are embedded at compile time.

use crate::error::CatalogError;
use crate::types::{Scenario, ScenarioId, Tab, TabKey};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Embedded catalog documents, in registry order
const BUILTIN_DOCUMENTS: [&str; 5] = [
    include_str!("../fixtures/system_health.yaml"),
    include_str!("../fixtures/ai_ml.yaml"),
    include_str!("../fixtures/auth_identity.yaml"),
    include_str!("../fixtures/devtools.yaml"),
    include_str!("../fixtures/banking_api.yaml"),
];

/// On-disk shape of a catalog, before validation
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    key: String,
    title: String,
    tabs: Vec<Tab>,
    scenarios: Vec<Scenario>,
}

/// Validated, immutable scenario list of one lab
#[derive(Debug, Clone)]
pub struct Catalog {
    key: String,
    title: String,
    tabs: Vec<Tab>,
    scenarios: IndexMap<ScenarioId, Scenario>,
}

impl Catalog {
    /// Build a catalog from parts, enforcing catalog invariants
    ///
    /// # Errors
    /// - `CatalogError::Empty` if there are no tabs or no scenarios
    /// - `CatalogError::DuplicateTab` / `DuplicateScenario` on repeated keys
    /// - `CatalogError::UndeclaredTab` if a scenario names an unknown tab
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        tabs: Vec<Tab>,
        scenarios: Vec<Scenario>,
    ) -> Result<Self, CatalogError> {
        let key = key.into();
        if tabs.is_empty() || scenarios.is_empty() {
            return Err(CatalogError::Empty(key));
        }

        let mut seen_tabs = HashSet::with_capacity(tabs.len());
        for tab in &tabs {
            if !seen_tabs.insert(tab.key.clone()) {
                return Err(CatalogError::DuplicateTab(tab.key.clone()));
            }
        }

        let mut by_id = IndexMap::with_capacity(scenarios.len());
        for scenario in scenarios {
            if !seen_tabs.contains(&scenario.tab) {
                return Err(CatalogError::UndeclaredTab {
                    scenario: scenario.id,
                    tab: scenario.tab,
                });
            }
            if by_id.contains_key(&scenario.id) {
                return Err(CatalogError::DuplicateScenario(scenario.id));
            }
            by_id.insert(scenario.id.clone(), scenario);
        }

        Ok(Self {
            key,
            title: title.into(),
            tabs,
            scenarios: by_id,
        })
    }

    /// Parse and validate a catalog YAML document
    ///
    /// # Errors
    /// Returns `CatalogError::Parse` on malformed YAML, or any validation
    /// error from [`Catalog::new`].
    pub fn from_yaml_str(document: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_yaml::from_str(document)?;
        Self::new(doc.key, doc.title, doc.tabs, doc.scenarios)
    }

    /// Load a catalog YAML file
    ///
    /// # Errors
    /// Returns `CatalogError::Io` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let document = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&document)?;
        tracing::debug!(
            lab = %catalog.key,
            scenarios = catalog.len(),
            path = %path.display(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Lab key (e.g. `system-health`)
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lab title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Declared tabs in display order
    #[inline]
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// First declared tab
    #[must_use]
    pub fn first_tab(&self) -> &Tab {
        // Non-empty by construction
        &self.tabs[0]
    }

    /// Look up a tab by key
    #[must_use]
    pub fn tab(&self, key: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.key.as_str() == key)
    }

    /// Scenarios in original list order
    pub fn scenarios(&self) -> impl ExactSizeIterator<Item = &Scenario> + '_ {
        self.scenarios.values()
    }

    /// First scenario of the list (the default selection)
    #[must_use]
    pub fn first(&self) -> &Scenario {
        // Non-empty by construction
        &self.scenarios[0]
    }

    /// Look up a scenario by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    /// Check whether an id is part of this catalog
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.scenarios.contains_key(id)
    }

    /// Number of scenarios
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Always false for a validated catalog
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Scenarios listed under a tab, in list order
    pub fn in_tab<'a>(&'a self, tab: &'a TabKey) -> impl Iterator<Item = &'a Scenario> + 'a {
        self.scenarios.values().filter(move |s| &s.tab == tab)
    }
}

/// Registry of every lab the viewer can open
#[derive(Debug, Clone, Default)]
pub struct LabRegistry {
    labs: IndexMap<String, Catalog>,
}

impl LabRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the embedded labs
    ///
    /// # Errors
    /// Propagates validation errors from the embedded documents.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for document in BUILTIN_DOCUMENTS {
            registry.insert(Catalog::from_yaml_str(document)?)?;
        }
        Ok(registry)
    }

    /// Register a catalog
    ///
    /// # Errors
    /// Returns `CatalogError::DuplicateLab` if the key is taken.
    pub fn insert(&mut self, catalog: Catalog) -> Result<(), CatalogError> {
        if self.labs.contains_key(catalog.key()) {
            return Err(CatalogError::DuplicateLab(catalog.key().to_string()));
        }
        self.labs.insert(catalog.key().to_string(), catalog);
        Ok(())
    }

    /// Look up a lab
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownLab` if no lab has that key.
    pub fn get(&self, key: &str) -> Result<&Catalog, CatalogError> {
        self.labs
            .get(key)
            .ok_or_else(|| CatalogError::UnknownLab(key.to_string()))
    }

    /// Labs in registration order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Catalog> + '_ {
        self.labs.values()
    }

    /// Number of registered labs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labs.len()
    }

    /// Whether no lab is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"
key: mini
title: Mini Lab
tabs:
  - { key: Console, label: Console }
  - { key: Network, label: Network }
scenarios:
  - id: F12-001
    title: JavaScript Error Detection
    tab: Console
    difficulty: Beginner
    expected_output: "line1\nline2"
  - id: F12-004
    title: API Payload Inspection
    tab: Network
    difficulty: Intermediate
"#;

    #[test]
    fn parses_document_in_order() {
        let catalog = Catalog::from_yaml_str(DOC).unwrap();
        assert_eq!(catalog.key(), "mini");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.first().id.as_str(), "F12-001");
        assert_eq!(catalog.first_tab().key.as_str(), "Console");
        assert_eq!(catalog.get("F12-004").unwrap().difficulty, Difficulty::Intermediate);
        assert_eq!(catalog.first().expected_output, "line1\nline2");
        assert_eq!(catalog.get("F12-004").unwrap().code, "");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let doc = DOC.replace("F12-004", "F12-001");
        let err = Catalog::from_yaml_str(&doc).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateScenario(id) if id.as_str() == "F12-001"));
    }

    #[test]
    fn rejects_undeclared_tab() {
        let doc = DOC.replace("tab: Network", "tab: Storage");
        let err = Catalog::from_yaml_str(&doc).unwrap_err();
        assert!(matches!(err, CatalogError::UndeclaredTab { .. }));
    }

    #[test]
    fn rejects_empty_catalog() {
        let err = Catalog::new("empty", "Empty", Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let doc = DOC.replace("difficulty: Beginner", "difficulty: Beginner\n    layer: Console");
        assert!(matches!(
            Catalog::from_yaml_str(&doc).unwrap_err(),
            CatalogError::Parse(_)
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.yaml");
        std::fs::write(&path, DOC).unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.title(), "Mini Lab");

        let missing = Catalog::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(missing, CatalogError::Io { .. }));
    }

    #[test]
    fn builtin_registry_loads() {
        let registry = LabRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 5);
        assert!(registry.get("system-health").is_ok());
        assert!(registry.get("ai-ml").unwrap().contains("ML-011"));
        assert!(matches!(
            registry.get("nope").unwrap_err(),
            CatalogError::UnknownLab(_)
        ));
    }

    #[test]
    fn registry_rejects_duplicate_lab() {
        let mut registry = LabRegistry::new();
        registry.insert(Catalog::from_yaml_str(DOC).unwrap()).unwrap();
        let err = registry.insert(Catalog::from_yaml_str(DOC).unwrap()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLab(_)));
    }
}
