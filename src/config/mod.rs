//! Configuration system for vim-jumplist.
//!
//! Settings live in a TOML file and every field has a default, so a missing
//! file or a file with only some keys set is fine.
//!
//! # Example
//!
//! ```
//! use vim_jumplist::config::Config;
//!
//! let config = Config::default();
//! assert!(!config.stack_mode);
//! assert_eq!(config.preview_duration_ms, 350);
//!
//! let stacked = Config {
//!     stack_mode: true,
//!     ..Config::default()
//! };
//! assert!(stacked.stack_mode);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default length of a picker preview highlight.
pub const DEFAULT_PREVIEW_MS: u64 = 350;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Configuration for the jump list.
///
/// # Fields
///
/// * `stack_mode` - Discard forward history when registering mid-history (default: false)
/// * `preview_duration_ms` - How long a picker preview stays highlighted (default: 350)
/// * `log_level` - Log filter used when `RUST_LOG` is not set (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Discard forward history when registering mid-history
    #[serde(default)]
    pub stack_mode: bool,

    /// How long a picker preview stays highlighted, in milliseconds
    #[serde(default = "default_preview_duration_ms")]
    pub preview_duration_ms: u64,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default preview duration.
fn default_preview_duration_ms() -> u64 {
    DEFAULT_PREVIEW_MS
}

/// Returns the default log level.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stack_mode: false,
            preview_duration_ms: default_preview_duration_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/vim-jumplist/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("vim-jumplist");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_path() else {
            return Self::default();
        };

        match Self::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Loads configuration from `config_path`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })
    }

    /// Saves configuration to `config_path`.
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(config_path, toml_string)?;

        Ok(())
    }

    pub fn preview_duration(&self) -> Duration {
        Duration::from_millis(self.preview_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_mode_off_by_default() {
        let config = Config::default();
        assert!(!config.stack_mode);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("stack_mode = true").unwrap();
        assert!(config.stack_mode);
        assert_eq!(config.preview_duration(), Duration::from_millis(350));
        assert_eq!(config.log_level, "warn");
    }
}
