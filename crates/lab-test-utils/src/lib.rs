//! Testing utilities for the scenario lab workspace
//!
//! Shared scenario builders and small catalogs.

#![allow(missing_docs)]

use lab_catalog::{Catalog, Difficulty, Scenario, ScenarioId, Tab, TabKey};

pub const LAB_KEY: &str = "mini";
pub const CONSOLE: &str = "Console";
pub const NETWORK: &str = "Network";

/// Builder for ad-hoc scenarios; defaults to a beginner Console scenario
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            scenario: Scenario {
                id: ScenarioId::new(id),
                title: format!("Scenario {id}"),
                tab: TabKey::new(CONSOLE),
                framework: "Playwright".to_string(),
                language: "TypeScript".to_string(),
                difficulty: Difficulty::Beginner,
                description: String::new(),
                prerequisites: String::new(),
                config: "{}".to_string(),
                code: format!("// {id}"),
                expected_output: "[PASS] ok".to_string(),
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.scenario.title = title.to_string();
        self
    }

    pub fn tab(mut self, tab: &str) -> Self {
        self.scenario.tab = TabKey::new(tab);
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.scenario.difficulty = difficulty;
        self
    }

    pub fn code(mut self, code: &str) -> Self {
        self.scenario.code = code.to_string();
        self
    }

    pub fn config(mut self, config: &str) -> Self {
        self.scenario.config = config.to_string();
        self
    }

    pub fn output(mut self, expected_output: &str) -> Self {
        self.scenario.expected_output = expected_output.to_string();
        self
    }

    pub fn build(self) -> Scenario {
        self.scenario
    }
}

pub fn tabs() -> Vec<Tab> {
    vec![
        Tab {
            key: TabKey::new(CONSOLE),
            label: "Console Tests".to_string(),
        },
        Tab {
            key: TabKey::new(NETWORK),
            label: "Network Tests".to_string(),
        },
    ]
}

/// Two-tab catalog:
/// - `T-001` Console, beginner, three output lines
/// - `T-002` Console, advanced, single `[FAIL]` line
/// - `T-003` Network, intermediate
pub fn sample_catalog() -> Catalog {
    let scenarios = vec![
        ScenarioBuilder::new("T-001")
            .title("Console Error Detection")
            .code("await page.goto('/');")
            .config("{ \"headless\": true }")
            .output("line1\nline2\nline3")
            .build(),
        ScenarioBuilder::new("T-002")
            .title("Payment Fraud Check")
            .difficulty(Difficulty::Advanced)
            .output("[FAIL] Warning: drift detected")
            .build(),
        ScenarioBuilder::new("T-003")
            .title("API Latency Budget")
            .tab(NETWORK)
            .difficulty(Difficulty::Intermediate)
            .output("[PASS] p95 < 200ms\n[PASS] p99 < 500ms")
            .build(),
    ];
    Catalog::new(LAB_KEY, "Mini Lab", tabs(), scenarios).unwrap()
}
