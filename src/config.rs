//! Configuration loading.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-query-summary.toml` in current directory
//! 4. `~/.config/sql-query-summary/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [cache]
//! max_entries = 1000
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_SUMMARY_CACHE_SIZE` | Maximum number of cached summaries |

use std::{
    env, fs,
    num::NonZeroUsize,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    cache::DEFAULT_CACHE_SIZE,
    error::{AppResult, config_error}
};

/// Environment variable overriding `cache.max_entries`
pub const CACHE_SIZE_ENV: &str = "SQL_SUMMARY_CACHE_SIZE";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig
}

/// Summary cache configuration
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: NonZeroUsize
}

fn default_max_entries() -> NonZeroUsize {
    DEFAULT_CACHE_SIZE
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_SIZE
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-query-summary.toml)
    /// 3. Config file in home directory (~/.config/sql-query-summary/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-query-summary")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(".sql-query-summary.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Ok(size) = env::var(CACHE_SIZE_ENV) {
            config.override_cache_size(&size)?;
        }

        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Apply a textual cache size, as given in the environment
    pub fn override_cache_size(&mut self, raw: &str) -> AppResult<()> {
        let size = raw.trim().parse::<NonZeroUsize>().map_err(|e| {
            config_error(format!(
                "Invalid {} '{}': expected a positive integer ({})",
                CACHE_SIZE_ENV, raw, e
            ))
        })?;
        self.cache.max_entries = size;
        Ok(())
    }
}
