//! Error types for generated clients

use crate::CodecError;
use thiserror::Error;

/// Result type alias for client operations
pub type RpcResult<T> = Result<T, RpcError>;

/// Error type for command invocation and event delivery
#[derive(Error, Debug)]
pub enum RpcError {
    /// Arguments could not be encoded or a reply could not be decoded
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// An inbound message could not be decoded into its payload type
    #[error("cdp: {context} Recv: {source}")]
    Decode {
        context: String,
        #[source]
        source: CodecError,
    },

    /// The remote end answered with an error object
    #[error("remote error {code}: {message}")]
    Remote { code: i64, message: String },

    /// The connection failed or was closed
    #[error("connection error: {0}")]
    Connection(String),

    /// The event stream was closed
    #[error("stream closed")]
    StreamClosed,
}

impl RpcError {
    /// Returns the wire-name context of a decode failure, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            RpcError::Decode { context, .. } => Some(context),
            _ => None,
        }
    }
}

/// A wire string that matches none of the labels of an enumerated type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized {type_name} value: {value:?}")]
pub struct UnrecognizedEnumValue {
    /// Name of the enumerated type
    pub type_name: &'static str,
    /// The offending wire label
    pub value: String,
}
