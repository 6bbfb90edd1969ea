//! Emitters.
//!
//! Four emitters share one [`EmitContext`] and write into parallel
//! [`SourceBuffer`](crate::buffer::SourceBuffer)s:
//!
//! | Emitter | Output |
//! |---------|--------|
//! | [`types`] | `types/<domain>.rs` |
//! | [`commands`] | `commands.rs` |
//! | [`events`] | `events.rs` |
//! | [`client`] | `client.rs` |
//!
//! Code is built as `proc_macro2` token streams with `quote!`; the writer
//! pretty-prints it afterwards.

pub mod client;
pub mod commands;
pub mod docs;
pub mod events;
pub mod fields;
pub mod registry;
pub mod types;

use crate::error::{GenError, GenResult};
use crate::resolve::{Classification, Resolver};
use proc_macro2::{Ident, Span};

/// State shared by every emitter for one run.
#[derive(Debug, Clone)]
pub struct EmitContext<'a> {
    resolver: Resolver<'a>,
    runtime: syn::Path,
    runtime_name: String,
}

impl<'a> EmitContext<'a> {
    /// `runtime_crate` is the path generated code uses for the runtime crate.
    pub fn new(classification: &'a Classification, runtime_crate: &str) -> GenResult<Self> {
        let runtime = syn::parse_str::<syn::Path>(runtime_crate)
            .map_err(|_| GenError::RuntimePath(runtime_crate.to_string()))?;
        Ok(Self {
            resolver: Resolver::new(classification),
            runtime,
            runtime_name: runtime_crate.replace(' ', ""),
        })
    }

    pub fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    /// Runtime crate path for tokens.
    pub fn runtime(&self) -> &syn::Path {
        &self.runtime
    }

    /// Runtime crate path for attribute strings.
    pub fn runtime_name(&self) -> &str {
        &self.runtime_name
    }
}

/// Identifier from an already escaped name.
pub(crate) fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}
