//! Flecha configuration
//!
//! Loaded from a TOML file. Every key is optional and falls back to its
//! default.
//!
//! ```toml
//! [log]
//! level = "debug"
//!
//! [memory]
//! heap_limit = 65536
//!
//! [memory.sizes]
//! int = 4
//! string = 16
//! ```
//!
//! # Usage
//!
//! ```rust
//! use flecha::util::config::FlechaConfig;
//!
//! let config = FlechaConfig::from_toml_str("[memory]\nheap_limit = 1024").unwrap();
//! assert_eq!(config.memory.heap_limit, 1024);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::runtime::memory::DEFAULT_HEAP_LIMIT;
use crate::util::logger::LogLevel;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FlechaConfig {
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
    /// Runtime storage settings
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl FlechaConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Log configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// One of `debug`, `info`, `warn`, `error`
    #[serde(default = "default_level")]
    pub level: LogLevel,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Runtime storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryConfig {
    /// Maximum live heap bytes
    #[serde(default = "default_heap_limit")]
    pub heap_limit: usize,
    /// Byte size of each primitive type
    #[serde(default)]
    pub sizes: TypeSizes,
}

fn default_heap_limit() -> usize {
    DEFAULT_HEAP_LIMIT
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            heap_limit: DEFAULT_HEAP_LIMIT,
            sizes: TypeSizes::default(),
        }
    }
}

/// Byte sizes of the primitive types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TypeSizes {
    pub int: usize,
    pub char: usize,
    pub bool: usize,
    pub float: usize,
    pub string: usize,
}

impl Default for TypeSizes {
    fn default() -> Self {
        Self {
            int: 4,
            char: 1,
            bool: 1,
            float: 4,
            string: 8,
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<FlechaConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    FlechaConfig::from_toml_str(&content)
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
