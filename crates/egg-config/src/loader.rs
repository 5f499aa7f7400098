//! Configuration Loader
//!
//! Loads configuration from multiple sources and merges them with proper
//! precedence.

use crate::settings::{validate_max_depth, EggConfig};
use crate::{ConfigError, ConfigResult, RuntimeSettings};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = "egg.toml";

/// Prompt used when no configuration sets one
pub const DEFAULT_PROMPT: &str = "egg> ";

/// Configuration loader
///
/// Precedence, lowest first:
/// 1. Global config (~/.egg/config.toml)
/// 2. Project config (egg.toml)
/// 3. Environment variables (EGG_*)
/// 4. CLI flags (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Effective settings after merging every source
    pub settings: EggConfig,

    /// Directory where egg.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use `path` instead of ~/.egg/config.toml for the global layer
    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find egg.toml, layers it over the
    /// global config, then applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = self.find_project_config(start_dir)?;

        let mut settings = self.load_global_config()?;
        settings.merge(&project);
        apply_env_overrides(&mut settings)?;

        Ok(Config {
            settings,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = EggConfig::load_from_file(config_path)?;

        let mut settings = self.load_global_config()?;
        settings.merge(&project);
        apply_env_overrides(&mut settings)?;

        Ok(Config {
            settings,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    fn find_project_config(&self, start_dir: &Path) -> ConfigResult<(Option<PathBuf>, EggConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);
            if config_path.exists() {
                let config = EggConfig::load_from_file(&config_path)?;
                return Ok((Some(current), config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, EggConfig::default())),
            }
        }
    }

    /// Load the global layer; a missing file or home directory means defaults
    fn load_global_config(&mut self) -> ConfigResult<EggConfig> {
        if self.global_config_path.is_none() {
            match EggConfig::global_config_path() {
                Ok(path) => self.global_config_path = Some(path),
                Err(ConfigError::HomeNotFound) => return Ok(EggConfig::default()),
                Err(e) => return Err(e),
            }
        }

        match &self.global_config_path {
            Some(path) if path.exists() => EggConfig::load_from_file(path),
            _ => Ok(EggConfig::default()),
        }
    }

    /// Get the global configuration directory (~/.egg)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".egg"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply EGG_MAX_DEPTH and EGG_NO_HISTORY on top of the file layers
fn apply_env_overrides(config: &mut EggConfig) -> ConfigResult<()> {
    if let Ok(raw) = env::var("EGG_MAX_DEPTH") {
        let max_depth = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "EGG_MAX_DEPTH".to_string(),
                reason: format!("'{}' is not a positive integer", raw),
            })?;
        validate_max_depth(max_depth)?;
        config.runtime.get_or_insert_with(Default::default).max_depth = Some(max_depth);
    }

    if let Ok(raw) = env::var("EGG_NO_HISTORY") {
        if matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes") {
            config.repl.get_or_insert_with(Default::default).history = Some(false);
        }
    }

    Ok(())
}

impl Config {
    /// Settings handed to the interpreter
    pub fn runtime_settings(&self) -> RuntimeSettings {
        let defaults = RuntimeSettings::default();
        RuntimeSettings {
            max_depth: self.settings.max_depth().unwrap_or(defaults.max_depth),
        }
    }

    pub fn prompt(&self) -> &str {
        self.settings.prompt().unwrap_or(DEFAULT_PROMPT)
    }

    /// Whether the REPL keeps history on disk (default: yes)
    pub fn history_enabled(&self) -> bool {
        self.settings.history().unwrap_or(true)
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if an egg.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
