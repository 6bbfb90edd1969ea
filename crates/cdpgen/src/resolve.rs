//! Type resolution.
//!
//! Resolution runs in two phases:
//!
//! 1. [`Classification::build`] walks every domain once and records, for each
//!    declared type, its [`TypeClass`]. It also computes which record
//!    properties must be boxed so that no record embeds itself by value.
//!    Cross-domain references may point forward in domain order, so this
//!    must see the whole protocol before anything is emitted.
//! 2. [`Resolver`] borrows the finished classification and turns properties
//!    into [`Field`]s: a Rust representation plus a [`Presence`] rule saying
//!    how absence is encoded.
//!
//! The classification is immutable once built and is passed explicitly to
//! every emitter.

use crate::error::{GenError, GenResult};
use crate::naming;
use crate::schema::{Domain, Property, Protocol, TypeDef, TypeRef};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Identity of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey {
    pub domain: String,
    pub id: String,
}

impl TypeKey {
    pub fn new(domain: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            id: id.into(),
        }
    }

    /// Resolve a `$ref` seen inside `domain`.
    pub fn from_reference(domain: &str, reference: &str) -> Self {
        match reference.split_once('.') {
            Some((other, id)) => Self::new(other, id),
            None => Self::new(domain, reference),
        }
    }
}

/// Representation category of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// `object` with properties; a struct.
    Record,
    /// `string` with `enum`; an enum implementing `WireEnum`.
    Enum,
    /// `object` without properties or `any`; raw JSON bytes.
    Opaque,
    /// Alias of a primitive.
    Primitive,
    /// Alias of an array.
    Array,
}

impl TypeClass {
    /// Whether an optional property of this class needs `Option` to express absence.
    ///
    /// Enums, arrays and opaque payloads already have an empty state.
    pub fn needs_indirection(self) -> bool {
        matches!(self, TypeClass::Record | TypeClass::Primitive)
    }
}

/// A record property stored behind a `Box`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct FieldKey {
    record: TypeKey,
    property: String,
}

/// Phase 1 result.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    classes: BTreeMap<TypeKey, TypeClass>,
    boxed: BTreeSet<FieldKey>,
}

impl Classification {
    /// Classify every declared type of `protocol`.
    pub fn build(protocol: &Protocol) -> GenResult<Self> {
        check_names(protocol)?;

        let mut classes = BTreeMap::new();
        for domain in &protocol.domains {
            for def in &domain.types {
                classes.insert(TypeKey::new(&domain.domain, &def.id), classify(domain, def)?);
            }
        }

        let mut classification = Self {
            classes,
            boxed: BTreeSet::new(),
        };
        classification.boxed = classification.find_cycles(protocol)?;

        debug!(
            types = classification.classes.len(),
            indirect = classification
                .classes
                .values()
                .filter(|c| c.needs_indirection())
                .count(),
            boxed = classification.boxed.len(),
            "Classified types"
        );
        Ok(classification)
    }

    /// Class of a declared type.
    pub fn class_of(&self, key: &TypeKey) -> Option<TypeClass> {
        self.classes.get(key).copied()
    }

    /// Number of classified types.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether `property` of `record` is boxed to break a by-value cycle.
    pub fn is_boxed(&self, record: &TypeKey, property: &str) -> bool {
        self.boxed.contains(&FieldKey {
            record: record.clone(),
            property: property.to_string(),
        })
    }

    fn lookup(&self, domain: &str, location: &str, reference: &str) -> GenResult<NamedType> {
        let key = TypeKey::from_reference(domain, reference);
        let class = self
            .class_of(&key)
            .ok_or_else(|| GenError::UnknownReference {
                domain: domain.to_string(),
                name: location.to_string(),
                reference: reference.to_string(),
            })?;
        Ok(NamedType { key, class })
    }

    /// Box the record properties needed to make the by-value graph acyclic.
    ///
    /// A direct self-reference is always boxed. Remaining cycles are found by
    /// depth-first search from each record in protocol order and broken one
    /// at a time: the first optional edge of the cycle is boxed, or the edge
    /// that closed it when every edge is required.
    fn find_cycles(&self, protocol: &Protocol) -> GenResult<BTreeSet<FieldKey>> {
        let mut roots = Vec::new();
        let mut graph: Graph = HashMap::new();
        let mut boxed = BTreeSet::new();

        for domain in &protocol.domains {
            for def in &domain.types {
                let key = TypeKey::new(&domain.domain, &def.id);
                if self.class_of(&key) != Some(TypeClass::Record) {
                    continue;
                }
                let mut edges = Vec::new();
                for property in &def.properties {
                    let Some(reference) = &property.ty.reference else {
                        continue;
                    };
                    let location = format!("{}.{}", def.id, property.name);
                    let target = self.lookup(&domain.domain, &location, reference)?;
                    if target.class != TypeClass::Record {
                        continue;
                    }
                    if target.key == key {
                        boxed.insert(FieldKey {
                            record: key.clone(),
                            property: property.name.clone(),
                        });
                    } else {
                        edges.push(Edge {
                            property: property.name.clone(),
                            target: target.key,
                            optional: property.optional,
                        });
                    }
                }
                graph.insert(key.clone(), edges);
                roots.push(key);
            }
        }

        while let Some(cycle) = first_cycle(&roots, &graph, &boxed) {
            let Some((record, edge)) = cycle
                .iter()
                .find(|(_, edge)| edge.optional)
                .or_else(|| cycle.last())
            else {
                break;
            };
            debug!(record = %record.id, property = %edge.property, "Breaking cycle");
            boxed.insert(FieldKey {
                record: (*record).clone(),
                property: edge.property.clone(),
            });
        }
        Ok(boxed)
    }
}

/// By-value references from each record to other records.
type Graph = HashMap<TypeKey, Vec<Edge>>;

#[derive(Debug)]
struct Edge {
    property: String,
    target: TypeKey,
    optional: bool,
}

type Cycle<'g> = Vec<(&'g TypeKey, &'g Edge)>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Active,
    Done,
}

/// First cycle reachable from `roots` over edges not yet boxed, in path order.
fn first_cycle<'g>(
    roots: &'g [TypeKey],
    graph: &'g Graph,
    boxed: &BTreeSet<FieldKey>,
) -> Option<Cycle<'g>> {
    let mut state = HashMap::new();
    let mut path = Vec::new();
    for root in roots {
        if state.contains_key(root) {
            continue;
        }
        if let Some(cycle) = walk(root, graph, boxed, &mut state, &mut path) {
            return Some(cycle);
        }
    }
    None
}

fn walk<'g>(
    key: &'g TypeKey,
    graph: &'g Graph,
    boxed: &BTreeSet<FieldKey>,
    state: &mut HashMap<&'g TypeKey, Visit>,
    path: &mut Cycle<'g>,
) -> Option<Cycle<'g>> {
    state.insert(key, Visit::Active);
    for edge in graph.get(key).into_iter().flatten() {
        let field = FieldKey {
            record: key.clone(),
            property: edge.property.clone(),
        };
        if boxed.contains(&field) {
            continue;
        }
        match state.get(&edge.target) {
            Some(Visit::Active) => {
                let start = path
                    .iter()
                    .position(|(record, _)| **record == edge.target)
                    .unwrap_or(path.len());
                let mut cycle = path[start..].to_vec();
                cycle.push((key, edge));
                return Some(cycle);
            }
            Some(Visit::Done) => {}
            None => {
                path.push((key, edge));
                let found = walk(&edge.target, graph, boxed, state, path);
                path.pop();
                if found.is_some() {
                    return found;
                }
            }
        }
    }
    state.insert(key, Visit::Done);
    None
}

/// Reject declared names whose converted identifier is unusable.
fn check_names(protocol: &Protocol) -> GenResult<()> {
    for domain in &protocol.domains {
        let d = &domain.domain;
        let fields_of = |owner: &str, properties: &[Property]| {
            properties
                .iter()
                .map(|p| (format!("{owner}.{}", p.name), naming::field_name(&p.name)))
                .collect::<Vec<_>>()
        };

        let mut names = vec![
            (d.clone(), naming::module_name(d)),
            (d.clone(), naming::type_name(d)),
        ];
        for def in &domain.types {
            names.push((def.id.clone(), naming::type_name(&def.id)));
            names.extend(fields_of(&def.id, &def.properties));
        }
        for command in &domain.commands {
            names.push((command.name.clone(), naming::type_name(&command.name)));
            names.push((command.name.clone(), naming::field_name(&command.name)));
            names.push((command.name.clone(), naming::registry_variant(d, &command.name)));
            names.extend(fields_of(&command.name, &command.parameters));
            names.extend(fields_of(&command.name, &command.returns));
        }
        for event in &domain.events {
            names.push((event.name.clone(), naming::type_name(&event.name)));
            names.push((event.name.clone(), naming::field_name(&event.name)));
            names.push((event.name.clone(), naming::registry_variant(d, &event.name)));
            names.extend(fields_of(&event.name, &event.parameters));
        }

        if let Some((name, _)) = names
            .into_iter()
            .find(|(_, ident)| !naming::is_identifier(ident))
        {
            return Err(GenError::InvalidName {
                domain: d.clone(),
                name,
            });
        }
    }
    Ok(())
}

fn classify(domain: &Domain, def: &TypeDef) -> GenResult<TypeClass> {
    if !def.enum_values.is_empty() {
        return if def.kind == "string" {
            Ok(TypeClass::Enum)
        } else {
            Err(GenError::UnsupportedEnum {
                domain: domain.domain.clone(),
                name: def.id.clone(),
                kind: def.kind.clone(),
            })
        };
    }

    match def.kind.as_str() {
        "object" if def.properties.is_empty() => Ok(TypeClass::Opaque),
        "object" => Ok(TypeClass::Record),
        "any" => Ok(TypeClass::Opaque),
        "string" | "binary" | "integer" | "number" | "boolean" => Ok(TypeClass::Primitive),
        "array" if def.items.is_some() => Ok(TypeClass::Array),
        "array" => Err(GenError::MissingItems {
            domain: domain.domain.clone(),
            name: def.id.clone(),
        }),
        other => Err(GenError::UnknownType {
            domain: domain.domain.clone(),
            name: def.id.clone(),
            kind: other.to_string(),
        }),
    }
}

/// Where generated code refers to a type from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Inside `types/<domain>.rs`.
    Types(&'a str),
    /// Inside `commands::<domain>` or `events::<domain>`.
    Payloads,
}

/// Reference to a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub key: TypeKey,
    pub class: TypeClass,
}

impl NamedType {
    fn segments(&self, scope: Scope<'_>) -> Vec<String> {
        let module = naming::module_name(&self.key.domain);
        let name = naming::type_name(&self.key.id);
        match scope {
            Scope::Types(domain) if domain == self.key.domain => vec![name],
            Scope::Types(_) => vec!["super".to_string(), module, name],
            Scope::Payloads => vec![
                "super".to_string(),
                "super".to_string(),
                "types".to_string(),
                module,
                name,
            ],
        }
    }

    /// Path as written in a serde attribute string.
    pub fn path_string(&self, scope: Scope<'_>) -> String {
        self.segments(scope).join("::")
    }

    pub fn tokens(&self, scope: Scope<'_>) -> TokenStream {
        let segments = self.segments(scope);
        let idents = segments.iter().map(|s| format_ident!("{}", s));
        quote!(#(#idents)::*)
    }
}

/// Rust representation of a schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repr {
    String,
    Integer,
    Number,
    Boolean,
    /// Inline `any`.
    Any,
    /// Inline `object` without properties.
    Map,
    Array(Box<Repr>),
    Named(NamedType),
}

impl Repr {
    pub fn tokens(&self, scope: Scope<'_>) -> TokenStream {
        match self {
            Repr::String => quote!(String),
            Repr::Integer => quote!(i64),
            Repr::Number => quote!(f64),
            Repr::Boolean => quote!(bool),
            Repr::Any => quote!(serde_json::Value),
            Repr::Map => quote!(serde_json::Map<String, serde_json::Value>),
            Repr::Array(item) => {
                let item = item.tokens(scope);
                quote!(Vec<#item>)
            }
            Repr::Named(named) => named.tokens(scope),
        }
    }

    /// Empty-state check for representations that need no `Option`.
    pub fn empty_check(&self) -> Option<EmptyCheck> {
        match self {
            Repr::Any => Some(EmptyCheck::Null),
            Repr::Map => Some(EmptyCheck::Map),
            Repr::Array(_) => Some(EmptyCheck::Vec),
            Repr::Named(named) => match named.class {
                TypeClass::Enum => Some(EmptyCheck::NotSet),
                TypeClass::Array => Some(EmptyCheck::Vec),
                TypeClass::Opaque => Some(EmptyCheck::Opaque(named.clone())),
                TypeClass::Record | TypeClass::Primitive => None,
            },
            Repr::String | Repr::Integer | Repr::Number | Repr::Boolean => None,
        }
    }
}

/// Predicate used to omit an optional non-indirect field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyCheck {
    Vec,
    Map,
    Null,
    NotSet,
    Opaque(NamedType),
}

impl EmptyCheck {
    /// Predicate path for `skip_serializing_if`.
    pub fn predicate(&self, scope: Scope<'_>, runtime: &str) -> String {
        match self {
            EmptyCheck::Vec => "Vec::is_empty".to_string(),
            EmptyCheck::Map => "serde_json::Map::is_empty".to_string(),
            EmptyCheck::Null => "serde_json::Value::is_null".to_string(),
            EmptyCheck::NotSet => format!("{runtime}::WireEnum::is_not_set"),
            EmptyCheck::Opaque(named) => format!("{}::is_empty", named.path_string(scope)),
        }
    }
}

/// How a field encodes absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// Always present; stored by value.
    Required,
    /// `Option<T>`, omitted when `None`.
    Optional,
    /// `Option<Box<T>>`, omitted when `None`.
    Boxed,
    /// `Box<T>`; a required property that closes a cycle of required properties.
    BoxedRequired,
    /// Stored by value, omitted when the check holds.
    Elided(EmptyCheck),
}

/// A property with its resolved representation.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub property: &'a Property,
    pub ident: String,
    pub repr: Repr,
    pub presence: Presence,
}

impl Field<'_> {
    /// Wire name.
    pub fn wire_name(&self) -> &str {
        &self.property.name
    }

    /// Whether the field is wrapped in `Option`.
    pub fn is_indirect(&self) -> bool {
        matches!(self.presence, Presence::Optional | Presence::Boxed)
    }

    /// Field type including any wrapping.
    pub fn ty(&self, scope: Scope<'_>) -> TokenStream {
        let inner = self.repr.tokens(scope);
        match self.presence {
            Presence::Required | Presence::Elided(_) => inner,
            Presence::Optional => quote!(Option<#inner>),
            Presence::Boxed => quote!(Option<Box<#inner>>),
            Presence::BoxedRequired => quote!(Box<#inner>),
        }
    }

    /// `#[serde(...)]` attribute, empty when none is needed.
    pub fn serde_attr(&self, scope: Scope<'_>, runtime: &str) -> TokenStream {
        let mut args = Vec::new();
        if self.ident != self.property.name {
            let wire = &self.property.name;
            args.push(quote!(rename = #wire));
        }
        let predicate = match &self.presence {
            Presence::Required | Presence::BoxedRequired => None,
            Presence::Optional | Presence::Boxed => Some("Option::is_none".to_string()),
            Presence::Elided(check) => Some(check.predicate(scope, runtime)),
        };
        if let Some(predicate) = predicate {
            args.push(quote!(default, skip_serializing_if = #predicate));
        }

        if args.is_empty() {
            TokenStream::new()
        } else {
            quote!(#[serde(#(#args),*)])
        }
    }

    /// Expression storing setter argument `value` into this field.
    pub fn store(&self, value: &syn::Ident) -> TokenStream {
        match self.presence {
            Presence::Required | Presence::Elided(_) => quote!(#value),
            Presence::Optional => quote!(Some(#value)),
            Presence::Boxed => quote!(Some(Box::new(#value))),
            Presence::BoxedRequired => quote!(Box::new(#value)),
        }
    }
}

/// Phase 2: property resolution against a finished [`Classification`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    classification: &'a Classification,
}

impl<'a> Resolver<'a> {
    pub fn new(classification: &'a Classification) -> Self {
        Self { classification }
    }

    pub fn classification(&self) -> &'a Classification {
        self.classification
    }

    /// Representation of an inline type or reference.
    pub fn resolve(&self, domain: &str, location: &str, ty: &TypeRef) -> GenResult<Repr> {
        if let Some(reference) = &ty.reference {
            return self
                .classification
                .lookup(domain, location, reference)
                .map(Repr::Named);
        }

        let kind = ty.kind.as_deref().unwrap_or_default();
        match kind {
            "string" | "binary" => Ok(Repr::String),
            "integer" => Ok(Repr::Integer),
            "number" => Ok(Repr::Number),
            "boolean" => Ok(Repr::Boolean),
            "any" => Ok(Repr::Any),
            "object" => Ok(Repr::Map),
            "array" => match &ty.items {
                Some(items) => Ok(Repr::Array(Box::new(self.resolve(domain, location, items)?))),
                None => Err(GenError::MissingItems {
                    domain: domain.to_string(),
                    name: location.to_string(),
                }),
            },
            other => Err(GenError::UnknownType {
                domain: domain.to_string(),
                name: location.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    /// Representation of the type a declared alias stands for.
    pub fn resolve_alias(&self, domain: &str, def: &TypeDef) -> GenResult<Repr> {
        let ty = TypeRef {
            kind: Some(def.kind.clone()),
            reference: None,
            items: def.items.clone(),
            enum_values: Vec::new(),
        };
        self.resolve(domain, &def.id, &ty)
    }

    /// Resolve a property.
    ///
    /// `record` is the enclosing declared record, if any; it is `None` for
    /// command and event payloads, which are never referenced by other types.
    pub fn field<'p>(
        &self,
        domain: &str,
        record: Option<&str>,
        owner: &str,
        property: &'p Property,
    ) -> GenResult<Field<'p>> {
        let location = format!("{owner}.{}", property.name);
        let repr = self.resolve(domain, &location, &property.ty)?;

        let boxed = record.is_some_and(|record| {
            self.classification
                .is_boxed(&TypeKey::new(domain, record), &property.name)
        });

        let self_reference = matches!(
            (&repr, record),
            (Repr::Named(named), Some(record)) if named.key == TypeKey::new(domain, record)
        );

        let presence = if boxed && (property.optional || self_reference) {
            Presence::Boxed
        } else if boxed {
            Presence::BoxedRequired
        } else if !property.optional {
            Presence::Required
        } else {
            match repr.empty_check() {
                Some(check) => Presence::Elided(check),
                None => Presence::Optional,
            }
        };

        Ok(Field {
            property,
            ident: naming::field_name(&property.name),
            repr,
            presence,
        })
    }

    /// Resolve every property of a list.
    ///
    /// Distinct wire names can convert to the same identifier (`nodeId` and
    /// `node_id`); later fields get a numeric suffix and keep their wire name
    /// through `rename`.
    pub fn fields<'p>(
        &self,
        domain: &str,
        record: Option<&str>,
        owner: &str,
        properties: &'p [Property],
    ) -> GenResult<Vec<Field<'p>>> {
        let mut fields: Vec<Field<'p>> = Vec::with_capacity(properties.len());
        for property in properties {
            let mut field = self.field(domain, record, owner, property)?;
            let base = field.ident.trim_end_matches('_').to_string();
            let mut suffix = 2;
            while fields.iter().any(|f| f.ident == field.ident) {
                field.ident = format!("{base}_{suffix}");
                suffix += 1;
            }
            fields.push(field);
        }
        Ok(fields)
    }
}
