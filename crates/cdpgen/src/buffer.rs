//! Per-package output buffers.

use proc_macro2::TokenStream;
use quote::ToTokens;
use std::path::{Path, PathBuf};

/// Accumulates the declarations of one output file.
///
/// The header (module docs and `use` items) is written at most once, and a
/// buffer that never received a declaration reports no content so the writer
/// can drop it.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    path: PathBuf,
    tokens: TokenStream,
    header_written: bool,
    has_content: bool,
}

impl SourceBuffer {
    /// Create an empty buffer for `path`, relative to the output directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tokens: TokenStream::new(),
            header_written: false,
            has_content: false,
        }
    }

    /// Output path relative to the output directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the package header unless it was already written.
    ///
    /// Returns `true` when the header was written by this call.
    pub fn write_header(&mut self, header: impl ToTokens) -> bool {
        if self.header_written {
            return false;
        }
        header.to_tokens(&mut self.tokens);
        self.header_written = true;
        true
    }

    pub fn header_written(&self) -> bool {
        self.header_written
    }

    /// Append one declaration. Empty token streams are ignored.
    pub fn append(&mut self, declaration: impl ToTokens) {
        let declaration = declaration.into_token_stream();
        if declaration.is_empty() {
            return;
        }
        self.tokens.extend(declaration);
        self.has_content = true;
    }

    /// Whether at least one declaration was appended.
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Unformatted source text.
    pub fn render(&self) -> String {
        self.tokens.to_string()
    }
}
