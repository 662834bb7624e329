//! Lab Catalog - scenario records, filtering and status
//!
//! The data side of the scenario lab:
//! - Immutable scenario catalogs, one per lab, loaded from YAML
//! - The pure catalog filter (tab, difficulty, search, status)
//! - The transient execution status book and the stats bar summary
//!
//! # Example
//!
//! ```rust
//! use lab_catalog::{CatalogFilter, LabRegistry};
//!
//! # fn example() -> Result<(), lab_catalog::CatalogError> {
//! let registry = LabRegistry::builtin()?;
//! let lab = registry.get("ai-ml")?;
//!
//! let filter = CatalogFilter::new(lab.first_tab().key.clone()).with_search("fraud");
//! for scenario in filter.apply(lab.scenarios()) {
//!     println!("{} {}", scenario.id, scenario.title);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod catalog;
pub mod error;
pub mod filter;
pub mod status;
pub mod types;

pub use catalog::{Catalog, LabRegistry};
pub use error::CatalogError;
pub use filter::{CatalogFilter, StatusFilter};
pub use status::{round_percent, CatalogSummary, ExecutionStatus, StatusBook};
pub use types::{Difficulty, DifficultyFilter, Scenario, ScenarioId, Tab, TabKey};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
