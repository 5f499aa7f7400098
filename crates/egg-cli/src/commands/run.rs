//! Run and eval commands - execute Egg programs

use anyhow::{Context, Result};
use egg_runtime::{Egg, RuntimeSettings, Value};
use std::fs;
use tracing::debug;

/// Run source files as one program (files joined with newlines)
pub fn run_files(files: &[String], settings: RuntimeSettings, quiet: bool) -> Result<()> {
    let sources = files
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("Failed to read source file: {}", path))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(files = files.len(), "loaded sources");

    let value = execute(&sources, settings)?;
    report(&value, quiet);
    Ok(())
}

/// Run inline fragments as one program
pub fn run_fragments(fragments: &[String], settings: RuntimeSettings, quiet: bool) -> Result<()> {
    let value = execute(fragments, settings)?;
    report(&value, quiet);
    Ok(())
}

fn execute(fragments: &[String], settings: RuntimeSettings) -> Result<Value> {
    let egg = Egg::with_settings(settings);
    Ok(egg.run(fragments)?)
}

fn report(value: &Value, quiet: bool) {
    if !quiet {
        println!("{}", value);
    }
}
