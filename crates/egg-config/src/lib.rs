//! Egg Configuration System
//!
//! Configuration for the interpreter and its command-line front end:
//! - Project configuration (egg.toml)
//! - Global user configuration (~/.egg/config.toml)
//! - Environment overrides (EGG_*)
//!
//! # Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. Global config (~/.egg/config.toml)
//! 3. Project config (egg.toml, searched upward from the working directory)
//! 4. Environment variables (`EGG_MAX_DEPTH`, `EGG_NO_HISTORY`)
//! 5. CLI flags (applied by the caller)
//!
//! # Example
//!
//! ```no_run
//! use egg_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let settings = config.runtime_settings();
//! assert!(settings.max_depth > 0);
//! ```

pub mod loader;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default limit on nested evaluation depth
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Largest accepted `max_depth`
pub const MAX_ALLOWED_DEPTH: usize = 1_000_000;

/// Knobs the interpreter itself reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// Nested evaluations allowed before a run fails with StackExhausted
    pub max_depth: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// Re-export main types
pub use loader::{Config, ConfigLoader};
pub use settings::{EggConfig, ReplSection, RuntimeSection};
