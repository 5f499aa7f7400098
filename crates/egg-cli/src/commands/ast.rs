//! AST command - dump the syntax tree as JSON

use anyhow::{Context, Result};
use egg_runtime::{parse, EggError};
use std::fs;

pub fn run(file_path: &str) -> Result<()> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))?;
    println!("{}", render(&source)?);
    Ok(())
}

/// Parse `source` and render the tree as pretty-printed JSON
fn render(source: &str) -> Result<String> {
    let program = parse(source).map_err(EggError::from)?;
    Ok(program.to_json()?)
}
