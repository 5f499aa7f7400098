//! Configuration file schema
//!
//! `egg.toml` and `~/.egg/config.toml` share one layout:
//!
//! ```toml
//! [runtime]
//! max_depth = 20000
//!
//! [repl]
//! prompt = "egg> "
//! history = true
//! ```

use crate::{ConfigError, ConfigResult, MAX_ALLOWED_DEPTH};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of one configuration file
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct EggConfig {
    pub runtime: Option<RuntimeSection>,
    pub repl: Option<ReplSection>,
}

/// `[runtime]` table
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSection {
    /// Nested evaluation limit
    pub max_depth: Option<usize>,
}

/// `[repl]` table
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReplSection {
    pub prompt: Option<String>,
    /// Persist line history between sessions
    pub history: Option<bool>,
}

impl EggConfig {
    /// Load and validate a configuration file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(max_depth) = self.max_depth() {
            validate_max_depth(max_depth)?;
        }
        Ok(())
    }

    /// Get the global config file path (~/.egg/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".egg").join("config.toml"))
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.runtime.as_ref().and_then(|r| r.max_depth)
    }

    pub fn prompt(&self) -> Option<&str> {
        self.repl.as_ref().and_then(|r| r.prompt.as_deref())
    }

    pub fn history(&self) -> Option<bool> {
        self.repl.as_ref().and_then(|r| r.history)
    }

    /// Merge another config into this one.
    /// Values set in `other` win; unset values leave ours alone.
    pub fn merge(&mut self, other: &EggConfig) {
        if let Some(theirs) = &other.runtime {
            let ours = self.runtime.get_or_insert_with(Default::default);
            if theirs.max_depth.is_some() {
                ours.max_depth = theirs.max_depth;
            }
        }
        if let Some(theirs) = &other.repl {
            let ours = self.repl.get_or_insert_with(Default::default);
            if theirs.prompt.is_some() {
                ours.prompt = theirs.prompt.clone();
            }
            if theirs.history.is_some() {
                ours.history = theirs.history;
            }
        }
    }
}

/// Check that a depth limit is within `1..=MAX_ALLOWED_DEPTH`
pub fn validate_max_depth(max_depth: usize) -> ConfigResult<()> {
    if max_depth == 0 || max_depth > MAX_ALLOWED_DEPTH {
        return Err(ConfigError::InvalidValue {
            field: "runtime.max_depth".to_string(),
            reason: format!(
                "must be between 1 and {}, got {}",
                MAX_ALLOWED_DEPTH, max_depth
            ),
        });
    }
    Ok(())
}
