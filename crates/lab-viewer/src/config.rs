//! Lab configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! tick_interval_ms = 150
//! default_lab = "system-health"
//! catalog_paths = ["labs/extra.yaml"]
//! clipboard_command = ["xclip", "-selection", "clipboard"]
//!
//! [log]
//! filter = "lab_viewer=debug"
//! json = false
//! ```

use crate::error::ConfigError;
use lab_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabConfig {
    /// Playback tick interval in milliseconds
    pub tick_interval_ms: u64,
    /// Lab used when none is given
    pub default_lab: String,
    /// Extra catalog YAML files
    pub catalog_paths: Vec<PathBuf>,
    /// External clipboard command (argv)
    pub clipboard_command: Option<Vec<String>>,
    /// Logging settings
    pub log: LogConfig,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of plain text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json: false,
        }
    }
}

impl LabConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` or `ConfigError::Invalid`.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`LabConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&document)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` for a zero tick interval, an empty
    /// default lab or an empty clipboard command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.default_lab.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "default_lab",
                reason: "must not be empty".to_string(),
            });
        }
        if self.clipboard_command.as_ref().is_some_and(Vec::is_empty) {
            return Err(ConfigError::Invalid {
                field: "clipboard_command",
                reason: "must name a program".to_string(),
            });
        }
        Ok(())
    }

    /// With tick interval in milliseconds
    #[inline]
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// With default lab
    #[inline]
    #[must_use]
    pub fn with_default_lab(mut self, lab: impl Into<String>) -> Self {
        self.default_lab = lab.into();
        self
    }

    /// With an extra catalog file
    #[inline]
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_paths.push(path.into());
        self
    }

    /// With clipboard command
    #[inline]
    #[must_use]
    pub fn with_clipboard_command(mut self, argv: Vec<String>) -> Self {
        self.clipboard_command = Some(argv);
        self
    }

    /// With JSON log output
    #[inline]
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.log.json = json;
        self
    }

    /// Tick interval as a duration
    #[inline]
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Playback settings derived from this config
    #[must_use]
    pub fn playback(&self) -> PlaybackConfig {
        PlaybackConfig::new().with_tick_interval(self.tick_interval())
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 150,
            default_lab: "system-health".to_string(),
            catalog_paths: Vec::new(),
            clipboard_command: None,
            log: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(LabConfig::from_toml_str("").unwrap(), LabConfig::default());
    }

    #[test]
    fn defaults() {
        let config = LabConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(150));
        assert_eq!(config.default_lab, "system-health");
        assert_eq!(config.log.filter, "warn");
        assert!(!config.log.json);
    }

    #[test]
    fn parses_all_fields() {
        let config = LabConfig::from_toml_str(
            r#"
            tick_interval_ms = 20
            default_lab = "ai-ml"
            catalog_paths = ["a.yaml", "b.yaml"]
            clipboard_command = ["xclip", "-selection", "clipboard"]

            [log]
            filter = "debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_interval_ms, 20);
        assert_eq!(config.default_lab, "ai-ml");
        assert_eq!(config.catalog_paths.len(), 2);
        assert_eq!(config.clipboard_command.as_ref().map(Vec::len), Some(3));
        assert_eq!(config.log.filter, "debug");
        assert!(config.log.json);
    }

    #[test]
    fn zero_interval_is_invalid() {
        let err = LabConfig::from_toml_str("tick_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tick_interval_ms", .. }));
    }

    #[test]
    fn empty_clipboard_command_is_invalid() {
        let err = LabConfig::from_toml_str("clipboard_command = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "clipboard_command", .. }));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        assert!(matches!(
            LabConfig::from_toml_str("tick = 1").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_lab = \"devtools\"").unwrap();
        let config = LabConfig::load(file.path()).unwrap();
        assert_eq!(config.default_lab, "devtools");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = LabConfig::load(Path::new("/nonexistent/scenario-lab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn builders_chain() {
        let config = LabConfig::new()
            .with_tick_interval_ms(10)
            .with_default_lab("banking-api")
            .with_catalog_path("x.yaml")
            .with_json_logs(true);
        assert_eq!(config.playback().tick_interval, Duration::from_millis(10));
        assert_eq!(config.default_lab, "banking-api");
        assert_eq!(config.catalog_paths, [PathBuf::from("x.yaml")]);
        assert!(config.log.json);
        assert!(config.validate().is_ok());
    }
}
