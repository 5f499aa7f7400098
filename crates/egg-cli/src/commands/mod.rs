pub mod ast;
pub mod repl;
pub mod run;

use anyhow::Result;
use egg_config::settings::validate_max_depth;
use egg_config::{Config, RuntimeSettings};

/// Effective runtime settings: configuration, then the `--max-depth` flag
pub fn runtime_settings(config: &Config, max_depth: Option<usize>) -> Result<RuntimeSettings> {
    let mut settings = config.runtime_settings();
    if let Some(max_depth) = max_depth {
        validate_max_depth(max_depth)?;
        settings.max_depth = max_depth;
    }
    Ok(settings)
}
