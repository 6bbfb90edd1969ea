//! Type emitter: one `types/<domain>.rs` per domain.

use super::{EmitContext, docs, fields, ident};
use crate::buffer::SourceBuffer;
use crate::error::{GenError, GenResult};
use crate::naming;
use crate::resolve::{Scope, TypeClass, TypeKey};
use crate::schema::{Domain, TypeDef};
use proc_macro2::{Literal, TokenStream};
use quote::quote;

/// Output path of a domain's types.
pub fn path(domain: &Domain) -> String {
    format!("types/{}.rs", naming::module_name(&domain.domain))
}

/// Emit every type declared by `domain` into `buffer`.
pub fn emit_domain(
    ctx: &EmitContext<'_>,
    domain: &Domain,
    buffer: &mut SourceBuffer,
) -> GenResult<()> {
    if domain.types.is_empty() {
        return Ok(());
    }

    let mut header = vec![format!("Types of the `{}` domain.", domain.domain)];
    header.push(String::new());
    header.extend(docs::lines(domain));
    buffer.write_header(docs::inner_attrs(&header));

    for def in &domain.types {
        buffer.append(emit_type(ctx, domain, def)?);
    }
    Ok(())
}

/// Declaration of one type.
pub fn emit_type(ctx: &EmitContext<'_>, domain: &Domain, def: &TypeDef) -> GenResult<TokenStream> {
    let key = TypeKey::new(&domain.domain, &def.id);
    let class = ctx
        .resolver()
        .classification()
        .class_of(&key)
        .ok_or_else(|| GenError::UnknownReference {
            domain: domain.domain.clone(),
            name: def.id.clone(),
            reference: def.id.clone(),
        })?;

    let name = naming::type_name(&def.id);
    let doc = docs::doc_attrs(def);
    let scope = Scope::Types(&domain.domain);

    match class {
        TypeClass::Record => {
            let fields = ctx.resolver().fields(
                &domain.domain,
                Some(&def.id),
                &def.id,
                &def.properties,
            )?;
            Ok(fields::record(ctx, &name, doc, &fields, scope))
        }
        TypeClass::Enum => Ok(enumeration(ctx, &name, doc, &def.enum_values)),
        TypeClass::Opaque => Ok(opaque(ctx, &name, doc)),
        TypeClass::Primitive | TypeClass::Array => {
            let ty = ctx
                .resolver()
                .resolve_alias(&domain.domain, def)?
                .tokens(scope);
            let name = ident(&name);
            Ok(quote! {
                #doc
                pub type #name = #ty;
            })
        }
    }
}

/// An enumerated value set with `NotSet` at ordinal 0.
fn enumeration(
    ctx: &EmitContext<'_>,
    name: &str,
    doc: TokenStream,
    labels: &[String],
) -> TokenStream {
    let rt = ctx.runtime();
    let type_name = name;
    let name = ident(name);
    let variants: Vec<_> = naming::variant_names(labels)
        .iter()
        .map(|v| ident(v))
        .collect();
    let not_set = &variants[0];
    let labelled = &variants[1..];
    let label_docs = labels.iter().map(|l| format!(" `{l}`"));
    let ordinals = (0..variants.len()).map(Literal::usize_unsuffixed);

    quote! {
        #doc
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum #name {
            #[default]
            #not_set,
            #(
                #[doc = #label_docs]
                #labelled,
            )*
        }

        impl #rt::WireEnum for #name {
            const TYPE_NAME: &'static str = #type_name;
            const LABELS: &'static [&'static str] = &[#(#labels),*];

            fn ordinal(self) -> usize {
                self as usize
            }

            fn from_ordinal(ordinal: usize) -> Option<Self> {
                match ordinal {
                    #(#ordinals => Some(Self::#variants),)*
                    _ => None,
                }
            }
        }

        impl serde::Serialize for #name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                #rt::wire_enum::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for #name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #rt::wire_enum::deserialize(deserializer)
            }
        }

        impl std::fmt::Display for #name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                #rt::wire_enum::fmt(*self, f)
            }
        }

        impl std::str::FromStr for #name {
            type Err = #rt::UnrecognizedEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                #rt::wire_enum::parse(s)
            }
        }
    }
}

/// A raw JSON payload.
fn opaque(ctx: &EmitContext<'_>, name: &str, doc: TokenStream) -> TokenStream {
    let rt = ctx.runtime();
    let name = ident(name);

    quote! {
        #doc
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct #name(pub Vec<u8>);

        impl #name {
            /// Whether no value is held; an empty value encodes as `null`.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl serde::Serialize for #name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                #rt::raw::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for #name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #rt::raw::deserialize(deserializer).map(Self)
            }
        }
    }
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
