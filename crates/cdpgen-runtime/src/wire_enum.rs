//! Codec for enumerated value sets.
//!
//! Generated enumerated types are plain Rust enums whose first variant,
//! `NotSet`, has ordinal 0 and means "no value selected". The declared labels
//! follow in schema order with ordinals `1..=N`.
//!
//! | Rust value | Wire value |
//! |------------|------------|
//! | ordinal 0 (`NotSet`) | `null` |
//! | ordinal `i` | `LABELS[i - 1]` as a JSON string |
//!
//! Decoding `null` yields ordinal 0. Ordinal 0 never encodes to a
//! `"...NotSet"` string: that label exists only for display.

use crate::UnrecognizedEnumValue;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

/// Implemented by every generated enumerated type.
pub trait WireEnum: Copy + Sized + 'static {
    /// Name of the generated type
    const TYPE_NAME: &'static str;

    /// Declared wire labels, in schema order
    const LABELS: &'static [&'static str];

    /// Position of this value; 0 is `NotSet`
    fn ordinal(self) -> usize;

    /// Value at `ordinal`, if any
    fn from_ordinal(ordinal: usize) -> Option<Self>;

    /// True for the `NotSet` value
    fn is_not_set(&self) -> bool {
        self.ordinal() == 0
    }

    /// True when the value maps to a declared label
    fn is_valid(self) -> bool {
        (1..=Self::LABELS.len()).contains(&self.ordinal())
    }

    /// The wire label, or `None` for `NotSet`
    fn wire_label(self) -> Option<&'static str> {
        self.ordinal()
            .checked_sub(1)
            .and_then(|index| Self::LABELS.get(index))
            .copied()
    }
}

/// Parse a wire label.
pub fn parse<E: WireEnum>(label: &str) -> Result<E, UnrecognizedEnumValue> {
    E::LABELS
        .iter()
        .position(|candidate| *candidate == label)
        .and_then(|index| E::from_ordinal(index + 1))
        .ok_or_else(|| UnrecognizedEnumValue {
            type_name: E::TYPE_NAME,
            value: label.to_string(),
        })
}

/// Serialize `value`; `NotSet` becomes `null`.
pub fn serialize<E, S>(value: &E, serializer: S) -> Result<S::Ok, S::Error>
where
    E: WireEnum,
    S: Serializer,
{
    match value.wire_label() {
        Some(label) => serializer.serialize_str(label),
        None => serializer.serialize_none(),
    }
}

/// Deserialize a value; `null` becomes `NotSet`.
pub fn deserialize<'de, E, D>(deserializer: D) -> Result<E, D::Error>
where
    E: WireEnum,
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(label) => parse(&label).map_err(D::Error::custom),
        None => E::from_ordinal(0)
            .ok_or_else(|| D::Error::custom(format!("{} has no NotSet value", E::TYPE_NAME))),
    }
}

/// Display helper: the wire label, `<TypeName>NotSet` for ordinal 0.
pub fn fmt<E: WireEnum>(value: E, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.wire_label() {
        Some(label) => f.write_str(label),
        None if value.is_not_set() => write!(f, "{}NotSet", E::TYPE_NAME),
        None => write!(f, "{}({})", E::TYPE_NAME, value.ordinal()),
    }
}
