//! Formatting and persisting generated sources.
//!
//! Both steps are collaborators behind traits so generation can be tested
//! without touching the filesystem:
//!
//! - [`SourceFormatter`]: [`PrettyFormatter`] (`syn` + `prettyplease`) or
//!   [`Unformatted`].
//! - [`Persist`]: [`FsPersist`] rooted at the output directory, or
//!   [`MemoryPersist`] for tests.

use crate::buffer::SourceBuffer;
use crate::error::GenResult;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// First line of every generated file.
pub const BANNER: &str = "// Code generated by cdpgen. DO NOT EDIT.";

/// Source text rejected by a formatter.
#[derive(Debug, Error)]
#[error("format failed: {0}")]
pub struct FormatError(pub String);

/// Turns token text into readable source.
pub trait SourceFormatter: Send + Sync {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Parses the text as a Rust file and pretty-prints it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyFormatter;

impl SourceFormatter for PrettyFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let file = syn::parse_file(source).map_err(|e| FormatError(e.to_string()))?;
        Ok(prettyplease::unparse(&file))
    }
}

/// Passes text through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unformatted;

impl SourceFormatter for Unformatted {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

/// Destination for generated files.
pub trait Persist: Send + Sync {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Writes files below a root directory, creating parents as needed.
#[derive(Debug, Clone)]
pub struct FsPersist {
    root: PathBuf,
}

impl FsPersist {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Persist for FsPersist {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, bytes)
    }
}

/// Keeps written files in memory.
#[derive(Debug, Default)]
pub struct MemoryPersist {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryPersist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths written so far, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }

    /// Contents of a written file.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Persist for MemoryPersist {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files.lock().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}

/// Formats buffers and hands the result to a [`Persist`].
pub struct Writer {
    formatter: Box<dyn SourceFormatter>,
    persist: Box<dyn Persist>,
}

impl Writer {
    pub fn new(formatter: impl SourceFormatter + 'static, persist: impl Persist + 'static) -> Self {
        Self {
            formatter: Box::new(formatter),
            persist: Box::new(persist),
        }
    }

    /// Pretty-printing writer rooted at `output_dir`.
    pub fn for_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self::new(PrettyFormatter, FsPersist::new(output_dir))
    }

    /// Final text of a buffer, or `None` when it holds no declaration.
    ///
    /// Text the formatter rejects is returned unformatted.
    pub fn render(&self, buffer: &SourceBuffer) -> Option<String> {
        render_with(self.formatter.as_ref(), buffer)
    }

    /// Persist a buffer. Returns `false` when the buffer was skipped.
    pub fn flush(&self, buffer: &SourceBuffer) -> GenResult<bool> {
        let Some(text) = self.render(buffer) else {
            debug!(path = %buffer.path().display(), "Skipping empty buffer");
            return Ok(false);
        };

        self.persist.write(buffer.path(), text.as_bytes())?;
        info!(path = %buffer.path().display(), bytes = text.len(), "Wrote file");
        Ok(true)
    }
}

impl std::fmt::Debug for Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writer").finish_non_exhaustive()
    }
}

/// Render a buffer with `formatter`; see [`Writer::render`].
pub fn render_with(formatter: &dyn SourceFormatter, buffer: &SourceBuffer) -> Option<String> {
    if !buffer.has_content() {
        return None;
    }

    let raw = buffer.render();
    let body = match formatter.format(&raw) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!(
                path = %buffer.path().display(),
                error = %e,
                "Formatter rejected generated source, writing it unformatted"
            );
            raw
        }
    };

    let body = body.trim_end();
    Some(format!("{BANNER}\n\n{body}\n"))
}
