//! `cdpgen check`

use anyhow::{Context, Result};
use cdpgen::{Generator, GeneratorConfig, Summary};
use std::path::PathBuf;

/// Load, merge and emit in memory. Nothing is written.
pub fn run(schemas: &[PathBuf]) -> Result<Summary> {
    let mut config = GeneratorConfig::default();
    if !schemas.is_empty() {
        config = config.with_schemas(schemas.iter().cloned());
    }

    let generator = Generator::new(config);
    let protocol = generator.load().context("Failed to load schemas")?;
    let output = generator
        .generate(&protocol)
        .context("Schemas do not generate")?;

    let summary = Summary::of(&protocol);
    println!("✓ Schemas are valid");
    println!("  Domains:  {}", summary.domains);
    println!("  Types:    {}", summary.types);
    println!("  Commands: {}", summary.commands);
    println!("  Events:   {}", summary.events);
    println!("  Files:    {}", output.paths().len());

    Ok(summary)
}
