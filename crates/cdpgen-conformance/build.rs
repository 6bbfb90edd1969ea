//! Runs the generator over `protocol/conformance.json` and leaves
//! `$OUT_DIR/cdp.rs` declaring the result as module `cdp`.

use anyhow::{Context, Result};
use cdpgen::{Generator, GeneratorConfig};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<()> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let schema = manifest_dir.join("protocol").join("conformance.json");
    let generated = out_dir.join("cdp");

    println!("cargo:rerun-if-changed={}", schema.display());

    let generator = Generator::new(GeneratorConfig::default().with_schemas([schema.clone()]));
    let protocol = generator
        .load()
        .with_context(|| format!("Failed to load {}", schema.display()))?;
    let output = generator
        .generate(&protocol)
        .context("Fixture schema does not generate")?;
    output
        .write(&generator.writer(&generated))
        .context("Failed to write generated client")?;

    // Modules under the generated root resolve relative to its directory.
    let root = generated.join("mod.rs").display().to_string();
    fs::write(
        out_dir.join("cdp.rs"),
        format!("#[deny(dead_code)]\n#[path = {root:?}]\npub mod cdp;\n"),
    )?;
    Ok(())
}
