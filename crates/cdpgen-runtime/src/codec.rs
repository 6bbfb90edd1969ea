//! Codec trait and JSON implementation

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CodecError::Deserialization(err.to_string())
        } else {
            CodecError::Serialization(err.to_string())
        }
    }
}

/// Trait for message encoding and decoding
pub trait Codec: Send + Sync {
    /// Encode a value to bytes
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes to a value
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &'static str;
}

/// JSON codec implementation using serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a new JSON codec
    pub fn new() -> Self {
        Self
    }

    /// Encode command arguments.
    ///
    /// Arguments that serialize to `null` (such as `()`) mean "no params" and
    /// yield `None`.
    pub fn encode_params<T: Serialize + ?Sized>(
        &self,
        args: &T,
    ) -> Result<Option<Vec<u8>>, CodecError> {
        let value = serde_json::to_value(args).map_err(CodecError::from)?;
        if value.is_null() {
            return Ok(None);
        }
        self.encode(&value).map(Some)
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(Into::into)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(data).map_err(Into::into)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
