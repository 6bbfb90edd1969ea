//! Wire-name registries (`CmdType`, `EventType`).

use super::{EmitContext, docs, ident};
use crate::naming;
use crate::schema::Protocol;
use proc_macro2::TokenStream;
use quote::quote;

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Variant name, e.g. `PageReload`.
    pub variant: String,
    /// Wire name, e.g. `Page.reload`.
    pub wire: String,
}

/// Entries for every command, in domain order then declaration order.
pub fn commands(protocol: &Protocol) -> Vec<Entry> {
    protocol
        .domains
        .iter()
        .flat_map(|d| d.commands.iter().map(move |c| entry(&d.domain, &c.name)))
        .collect()
}

/// Entries for every event, in domain order then declaration order.
pub fn events(protocol: &Protocol) -> Vec<Entry> {
    protocol
        .domains
        .iter()
        .flat_map(|d| d.events.iter().map(move |e| entry(&d.domain, &e.name)))
        .collect()
}

fn entry(domain: &str, name: &str) -> Entry {
    Entry {
        variant: naming::registry_variant(domain, name),
        wire: naming::wire_name(domain, name),
    }
}

/// Enum `name` with one variant per entry. Empty when there are no entries.
pub fn registry(ctx: &EmitContext<'_>, name: &str, doc: &str, entries: &[Entry]) -> TokenStream {
    if entries.is_empty() {
        return TokenStream::new();
    }

    let rt = ctx.runtime();
    let type_name = name;
    let name = ident(name);
    let doc = docs::attrs(&[doc.to_string()]);
    let variants: Vec<_> = entries.iter().map(|e| ident(&e.variant)).collect();
    let wires: Vec<_> = entries.iter().map(|e| e.wire.as_str()).collect();
    let variant_docs = wires.iter().map(|w| format!(" `{w}`"));

    quote! {
        #doc
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum #name {
            #(
                #[doc = #variant_docs]
                #variants,
            )*
        }

        impl #name {
            /// Every value, in registry order.
            pub const ALL: &'static [#name] = &[#(Self::#variants),*];

            /// Wire name.
            pub fn as_str(self) -> &'static str {
                match self {
                    #(Self::#variants => #wires,)*
                }
            }
        }

        impl std::fmt::Display for #name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for #name {
            type Err = #rt::UnrecognizedEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == s)
                    .ok_or_else(|| #rt::UnrecognizedEnumValue {
                        type_name: #type_name,
                        value: s.to_string(),
                    })
            }
        }
    }
}
