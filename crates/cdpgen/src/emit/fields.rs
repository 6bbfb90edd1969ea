//! Struct rendering shared by records and payloads.

use super::{EmitContext, docs, ident};
use crate::resolve::{Field, Scope};
use proc_macro2::TokenStream;
use quote::quote;

/// One `pub` field with its docs and serde attribute.
pub fn field(ctx: &EmitContext<'_>, field: &Field<'_>, scope: Scope<'_>) -> TokenStream {
    let docs = docs::property_doc_attrs(field.property);
    let serde = field.serde_attr(scope, ctx.runtime_name());
    let name = ident(&field.ident);
    let ty = field.ty(scope);
    quote! {
        #docs
        #serde
        pub #name: #ty
    }
}

/// A serde struct named `name` holding `fields`.
pub fn record(
    ctx: &EmitContext<'_>,
    name: &str,
    docs: TokenStream,
    fields: &[Field<'_>],
    scope: Scope<'_>,
) -> TokenStream {
    let name = ident(name);
    let fields = fields.iter().map(|f| field(ctx, f, scope));
    quote! {
        #docs
        #[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
        pub struct #name {
            #(#fields,)*
        }
    }
}
