//! cdpgen - Client code generator for Chrome DevTools-style protocols
//!
//! This crate turns protocol schema documents into a typed Rust client:
//! - [`loader`] reads and merges schema documents into a [`Protocol`]
//! - [`resolve`] classifies every declared type, then resolves properties
//! - [`emit`] renders the client facade, types, commands and events
//! - [`writer`] pretty-prints and persists the non-empty outputs
//!
//! [`Generator`] ties the pipeline together. Generated code links against
//! the `cdpgen-runtime` crate.

pub mod buffer;
pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod loader;
pub mod naming;
pub mod resolve;
pub mod schema;
pub mod writer;

pub use config::GeneratorConfig;
pub use error::{GenError, GenResult};
pub use generate::{Generator, Output, Summary};
pub use schema::Protocol;
pub use writer::{FsPersist, MemoryPersist, PrettyFormatter, Writer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        GenError, GenResult, Generator, GeneratorConfig, Output, Protocol, Writer,
    };
}
