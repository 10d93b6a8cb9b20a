//! Configuration system for fieldquill.
//!
//! This module provides the configuration structure with sensible defaults and
//! support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use fieldquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.indent_size, 2);
//! assert!(config.wrap_document);
//!
//! // Create custom configuration
//! let custom = Config {
//!     indent_size: 4,
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for a fieldquill session.
///
/// # Fields
///
/// * `indent_size` - Number of spaces per indentation level (default: 2)
/// * `wrap_document` - Wrap the rendered fields in an outer `{ }` (default: true)
/// * `lenient_updates` - Insert a field when an update targets a missing one (default: false)
/// * `log_level` - Tracing filter used when `FIELDQUILL_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Wrap the rendered top-level fields in `{` and `}`
    #[serde(default = "default_wrap_document")]
    pub wrap_document: bool,

    /// Turn updates of missing fields into inserts instead of errors
    #[serde(default)]
    pub lenient_updates: bool,

    /// Tracing filter directive, e.g. "warn" or "fieldquill=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default indentation size.
fn default_indent_size() -> usize {
    2
}

fn default_wrap_document() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            wrap_document: default_wrap_document(),
            lenient_updates: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/fieldquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("fieldquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|_| Self::default()),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_updates_off_by_default() {
        let config = Config::default();
        assert!(!config.lenient_updates);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("indent_size = 4").unwrap();
        assert_eq!(config.indent_size, 4);
        assert!(config.wrap_document);
        assert_eq!(config.log_level, "warn");
    }
}
