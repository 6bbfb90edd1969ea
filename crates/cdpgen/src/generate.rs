//! Orchestration of a generation run.
//!
//! ```ignore
//! let generator = Generator::new(config);
//! let protocol = generator.load()?;
//! let output = generator.generate(&protocol)?;
//! output.write(&Writer::for_dir("src/cdp"))?;
//! ```
//!
//! [`Generator::generate`] emits everything in memory. Any classification or
//! resolution error surfaces there, before a single file is written.

use crate::buffer::SourceBuffer;
use crate::config::GeneratorConfig;
use crate::emit::{EmitContext, client, commands, docs, events, ident, types};
use crate::error::GenResult;
use crate::loader;
use crate::naming;
use crate::resolve::Classification;
use crate::schema::Protocol;
use crate::writer::{
    FsPersist, PrettyFormatter, SourceFormatter, Unformatted, Writer, render_with,
};
use quote::quote;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Root module of the generated tree.
pub const ROOT_PATH: &str = "mod.rs";

/// Index of the per-domain type modules.
pub const TYPES_PATH: &str = "types/mod.rs";

/// Drives loading, emission and writing.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Load and merge the configured schema documents.
    pub fn load(&self) -> GenResult<Protocol> {
        loader::load_files(&self.config.schemas)
    }

    /// Emit every output file for `protocol` in memory.
    pub fn generate(&self, protocol: &Protocol) -> GenResult<Output> {
        let classification = Classification::build(protocol)?;
        let ctx = EmitContext::new(&classification, &self.config.runtime_crate)?;

        let mut client_buffer = SourceBuffer::new(client::PATH);
        let mut commands_buffer = SourceBuffer::new(commands::PATH);
        let mut events_buffer = SourceBuffer::new(events::PATH);
        let mut type_buffers = Vec::new();

        client::emit(&ctx, protocol, &mut client_buffer);
        commands::emit_registry(&ctx, protocol, &mut commands_buffer);
        events::emit_registry(&ctx, protocol, &mut events_buffer);

        for domain in &protocol.domains {
            debug!(domain = %domain.domain, "Emitting domain");
            let mut buffer = SourceBuffer::new(types::path(domain));
            types::emit_domain(&ctx, domain, &mut buffer)?;
            commands::emit_domain(&ctx, domain, &mut commands_buffer)?;
            events::emit_domain(&ctx, domain, &mut events_buffer)?;
            if buffer.has_content() {
                type_buffers.push((naming::module_name(&domain.domain), buffer));
            }
        }

        let types_index = types_index(type_buffers.iter().map(|(module, _)| module.as_str()));
        let packages = [
            ("client", client_buffer.has_content()),
            ("commands", commands_buffer.has_content()),
            ("events", events_buffer.has_content()),
            ("types", types_index.has_content()),
        ];
        let root = root_index(&packages);

        let mut buffers = vec![root, client_buffer, commands_buffer, events_buffer, types_index];
        buffers.extend(type_buffers.into_iter().map(|(_, buffer)| buffer));

        let output = Output { buffers };
        info!(
            domains = protocol.domains.len(),
            files = output.paths().len(),
            "Generated protocol client"
        );
        Ok(output)
    }

    /// Writer for the configured output directory.
    pub fn writer(&self, output_dir: impl Into<PathBuf>) -> Writer {
        if self.config.format {
            Writer::new(PrettyFormatter, FsPersist::new(output_dir))
        } else {
            Writer::new(Unformatted, FsPersist::new(output_dir))
        }
    }
}

/// `types/mod.rs`: one `pub mod` per domain that declares types.
fn types_index<'a>(modules: impl Iterator<Item = &'a str>) -> SourceBuffer {
    let mut buffer = SourceBuffer::new(TYPES_PATH);
    for module in modules {
        buffer.write_header(docs::inner_attrs(&["Types, one module per domain.".to_string()]));
        let module = ident(module);
        buffer.append(quote!(pub mod #module;));
    }
    buffer
}

/// `mod.rs`: declares the packages that were written.
fn root_index(packages: &[(&str, bool)]) -> SourceBuffer {
    let mut buffer = SourceBuffer::new(ROOT_PATH);
    for (package, written) in packages {
        if !written {
            continue;
        }
        buffer.write_header(docs::inner_attrs(&["Generated protocol client.".to_string()]));
        let module = ident(package);
        buffer.append(quote!(pub mod #module;));
        if *package == "client" {
            buffer.append(quote!(pub use client::Client;));
        }
    }
    buffer
}

/// Every buffer produced by one run.
#[derive(Debug, Clone)]
pub struct Output {
    buffers: Vec<SourceBuffer>,
}

impl Output {
    /// All buffers, including empty ones.
    pub fn buffers(&self) -> &[SourceBuffer] {
        &self.buffers
    }

    /// Paths of the buffers that will be written.
    pub fn paths(&self) -> Vec<&Path> {
        self.buffers
            .iter()
            .filter(|b| b.has_content())
            .map(SourceBuffer::path)
            .collect()
    }

    /// Final text of every non-empty buffer, keyed by path.
    pub fn render(&self, formatter: &dyn SourceFormatter) -> BTreeMap<PathBuf, String> {
        self.buffers
            .iter()
            .filter_map(|b| render_with(formatter, b).map(|text| (b.path().to_path_buf(), text)))
            .collect()
    }

    /// Persist every non-empty buffer. Returns the number of files written.
    pub fn write(&self, writer: &Writer) -> GenResult<usize> {
        let mut written = 0;
        for buffer in &self.buffers {
            if writer.flush(buffer)? {
                written += 1;
            }
        }
        info!(files = written, "Wrote generated sources");
        Ok(written)
    }
}

/// Declaration counts of a protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub domains: usize,
    pub types: usize,
    pub commands: usize,
    pub events: usize,
}

impl Summary {
    pub fn of(protocol: &Protocol) -> Self {
        protocol.domains.iter().fold(
            Self {
                domains: protocol.domains.len(),
                ..Self::default()
            },
            |acc, d| Self {
                types: acc.types + d.types.len(),
                commands: acc.commands + d.commands.len(),
                events: acc.events + d.events.len(),
                ..acc
            },
        )
    }
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
