//! In-memory model of a protocol schema.
//!
//! The model mirrors the JSON documents one to one and carries no generation
//! logic; classification and naming decisions live in [`crate::resolve`] and
//! [`crate::naming`].
//!
//! # Document shape
//!
//! ```json
//! {
//!   "domains": [{
//!     "domain": "Page",
//!     "description": "Actions and events related to the inspected page.",
//!     "types": [{ "id": "FrameId", "type": "string" }],
//!     "commands": [{ "name": "reload", "parameters": [
//!       { "name": "ignoreCache", "type": "boolean", "optional": true }
//!     ]}],
//!     "events": [{ "name": "loadEventFired", "parameters": [
//!       { "name": "timestamp", "$ref": "Network.MonotonicTime" }
//!     ]}]
//!   }]
//! }
//! ```
//!
//! Unknown keys (`version`, `dependencies`, `redirect`, ...) are ignored.

use serde::Deserialize;

/// A schema document, or several merged into one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Protocol {
    /// Domains, in document order until merged by the loader.
    #[serde(default)]
    pub domains: Vec<Domain>,
}

/// A named group of types, commands and events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Domain {
    /// Domain name, e.g. `Page`.
    pub domain: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub types: Vec<TypeDef>,

    #[serde(default)]
    pub commands: Vec<Command>,

    #[serde(default)]
    pub events: Vec<Event>,
}

/// A type declared by a domain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeDef {
    /// Type id, unique within the domain.
    pub id: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Schema kind: `object`, `string`, `integer`, `number`, `boolean`, `array` or `any`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Record properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,

    /// Enumerated labels, in declaration order.
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<String>,

    /// Item type of an array alias.
    #[serde(default)]
    pub items: Option<Box<TypeRef>>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,
}

/// A record property, command parameter, command return value or event parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    /// Wire name; emitted verbatim as the JSON field name.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(flatten)]
    pub ty: TypeRef,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,
}

/// Either an inline type or a `$ref` to a declared one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TypeRef {
    /// Inline kind, absent for references.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// `Type` for the same domain, `Domain.Type` for another one.
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,

    /// Item type for arrays.
    #[serde(default)]
    pub items: Option<Box<TypeRef>>,

    /// Inline string enumeration; documented, not generated as a type.
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<String>,
}

/// A request/response operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Command {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Property>,

    #[serde(default)]
    pub returns: Vec<Property>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,
}

/// An asynchronous notification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Property>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,
}

/// Description and status flags shared by every declaration.
pub trait Documented {
    fn description(&self) -> Option<&str>;
    fn experimental(&self) -> bool;
    fn deprecated(&self) -> bool;
}

macro_rules! impl_documented {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Documented for $ty {
                fn description(&self) -> Option<&str> {
                    self.description.as_deref()
                }

                fn experimental(&self) -> bool {
                    self.experimental
                }

                fn deprecated(&self) -> bool {
                    self.deprecated
                }
            }
        )*
    };
}

impl_documented!(Domain, TypeDef, Property, Command, Event);

impl Protocol {
    /// Decode one schema document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Look up a domain by name.
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.domain == name)
    }
}

impl Domain {
    /// Domain name.
    pub fn name(&self) -> &str {
        &self.domain
    }

    /// Look up a declared type by id.
    pub fn type_def(&self, id: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.id == id)
    }

    /// True when the domain declares nothing to generate.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.commands.is_empty() && self.events.is_empty()
    }
}
