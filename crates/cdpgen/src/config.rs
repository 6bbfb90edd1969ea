//! Generator configuration

use crate::error::GenResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Generator configuration, usually read from `cdpgen.toml`
///
/// ```toml
/// schemas = ["protodef/browser_protocol.json", "protodef/js_protocol.json"]
/// output_dir = "src/cdp"
/// runtime_crate = "cdpgen_runtime"
/// format = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Schema documents, merged in order
    #[serde(default = "default_schemas")]
    pub schemas: Vec<PathBuf>,

    /// Destination directory for generated files
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Path of the runtime crate as seen from generated code
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Pretty-print generated files
    #[serde(default = "default_format")]
    pub format: bool,
}

fn default_schemas() -> Vec<PathBuf> {
    vec![
        PathBuf::from("protodef/browser_protocol.json"),
        PathBuf::from("protodef/js_protocol.json"),
    ]
}

fn default_runtime_crate() -> String {
    "cdpgen_runtime".to_string()
}

fn default_format() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schemas: default_schemas(),
            output_dir: None,
            runtime_crate: default_runtime_crate(),
            format: default_format(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> GenResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Set the schema documents
    pub fn with_schemas<P: Into<PathBuf>>(mut self, schemas: impl IntoIterator<Item = P>) -> Self {
        self.schemas = schemas.into_iter().map(Into::into).collect();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the runtime crate path
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Enable or disable pretty-printing
    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }
}
