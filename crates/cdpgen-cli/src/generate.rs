//! `cdpgen generate`

use anyhow::{Context, Result};
use cdpgen::{Generator, GeneratorConfig};
use std::path::PathBuf;
use tracing::info;

/// Command-line options of `cdpgen generate`
#[derive(Debug, Default)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub schemas: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub runtime_crate: Option<String>,
    pub no_format: bool,
}

/// Merge the config file (if any) with flag overrides.
pub fn resolve_config(options: &Options) -> Result<GeneratorConfig> {
    let mut config = match &options.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if !options.schemas.is_empty() {
        config = config.with_schemas(options.schemas.iter().cloned());
    }
    if let Some(output) = &options.output {
        config = config.with_output_dir(output);
    }
    if let Some(runtime_crate) = &options.runtime_crate {
        config = config.with_runtime_crate(runtime_crate);
    }
    if options.no_format {
        config = config.with_format(false);
    }

    Ok(config)
}

pub fn run(options: &Options) -> Result<()> {
    let config = resolve_config(options)?;
    let output_dir = config
        .output_dir
        .clone()
        .context("No output directory: pass --output or set output_dir in cdpgen.toml")?;

    let generator = Generator::new(config);
    let protocol = generator.load().context("Failed to load schemas")?;
    let output = generator
        .generate(&protocol)
        .context("Failed to generate client")?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let written = output
        .write(&generator.writer(&output_dir))
        .with_context(|| format!("Failed to write into {}", output_dir.display()))?;

    info!(
        files = written,
        output = %output_dir.display(),
        "Generation complete"
    );
    Ok(())
}
