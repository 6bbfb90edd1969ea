//! Error types for generation

use thiserror::Error;

/// Result type for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort a generation run.
///
/// None of these leave partial output behind: all emission happens in memory
/// and files are only written once every domain has been processed.
#[derive(Debug, Error)]
pub enum GenError {
    /// I/O error while reading schemas or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema document does not match the expected shape
    #[error("failed to parse schema {source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two documents declare the same domain
    #[error("domain {0} is declared more than once")]
    DuplicateDomain(String),

    /// A declared or inline type kind the generator cannot represent
    #[error("unknown type {kind:?} for {domain}.{name}")]
    UnknownType {
        domain: String,
        name: String,
        kind: String,
    },

    /// A `$ref` naming a type no domain declares
    #[error("unresolved reference {reference:?} in {domain}.{name}")]
    UnknownReference {
        domain: String,
        name: String,
        reference: String,
    },

    /// An enumeration over something other than strings
    #[error("unsupported enum type {kind:?} for {domain}.{name}")]
    UnsupportedEnum {
        domain: String,
        name: String,
        kind: String,
    },

    /// An array declared without an item type
    #[error("array {domain}.{name} has no items")]
    MissingItems { domain: String, name: String },

    /// A schema name with no usable identifier, such as `_`
    #[error("name {name:?} in {domain} does not convert to an identifier")]
    InvalidName { domain: String, name: String },

    /// Configuration file could not be decoded
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configured runtime crate is not a Rust path
    #[error("invalid runtime crate path {0:?}")]
    RuntimePath(String),
}
