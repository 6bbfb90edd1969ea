//! Codec for opaque payloads.
//!
//! Opaque payload types wrap the raw JSON text of a value the protocol leaves
//! schema-free. Generated code delegates its serde impls here:
//!
//! ```ignore
//! #[derive(Debug, Clone, PartialEq, Eq, Default)]
//! pub struct Headers(pub Vec<u8>);
//!
//! impl serde::Serialize for Headers {
//!     fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
//!         cdpgen_runtime::raw::serialize(&self.0, serializer)
//!     }
//! }
//! ```

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// Emit `bytes` verbatim as JSON; empty bytes are `null`.
pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    if bytes.is_empty() {
        return serializer.serialize_unit();
    }
    let raw: &RawValue = serde_json::from_slice(bytes).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

/// Copy the raw JSON text of the next value.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    Ok(raw.get().as_bytes().to_vec())
}
