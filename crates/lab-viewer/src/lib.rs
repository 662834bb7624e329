//! Lab Viewer - per-lab view state for the scenario lab
//!
//! Ties the catalog and playback crates into one view:
//! - [`ScenarioViewer`]: filter, selection, buffers, playback output, status
//! - [`Clipboard`]: the copy capability and its implementations
//! - [`LabConfig`]: TOML configuration shared with the `scenario-lab` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use lab_catalog::LabRegistry;
//! use lab_viewer::{LabConfig, ScenarioViewer};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = LabRegistry::builtin()?;
//! let catalog = Arc::new(registry.get("system-health")?.clone());
//! let mut viewer = ScenarioViewer::new(catalog, LabConfig::default().playback())?;
//!
//! viewer.run_to_completion().await?;
//! println!("{}", viewer.output());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod viewer;

pub use clipboard::{Clipboard, CommandClipboard, MemoryClipboard, Unavailable};
pub use config::{LabConfig, LogConfig};
pub use error::{ClipboardError, ConfigError, ViewerError};
pub use logging::init_tracing;
pub use viewer::ScenarioViewer;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
