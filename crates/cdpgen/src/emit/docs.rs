//! Doc comments carried over from the schema.

use crate::schema::{Documented, Property};
use proc_macro2::TokenStream;
use quote::quote;

pub const NO_DESCRIPTION: &str = "No description.";
pub const EXPERIMENTAL: &str = "Note: This property is experimental.";
pub const DEPRECATED: &str = "Deprecated.";

/// Doc lines for a declaration.
pub fn lines(item: &dyn Documented) -> Vec<String> {
    let mut lines: Vec<String> = match item.description().map(str::trim) {
        Some(text) if !text.is_empty() => text.lines().map(|l| l.trim_end().to_string()).collect(),
        _ => vec![NO_DESCRIPTION.to_string()],
    };

    let mut notes = Vec::new();
    if item.experimental() {
        notes.push(EXPERIMENTAL.to_string());
    }
    if item.deprecated() {
        notes.push(DEPRECATED.to_string());
    }
    if !notes.is_empty() {
        lines.push(String::new());
        lines.extend(notes);
    }
    lines
}

/// Doc lines for a property, listing inline enumerated values.
pub fn property_lines(property: &Property) -> Vec<String> {
    let mut lines = lines(property);
    if !property.ty.enum_values.is_empty() {
        let values = property
            .ty
            .enum_values
            .iter()
            .map(|v| format!("{v:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(String::new());
        lines.push(format!("Values: {values}."));
    }
    lines
}

/// `#[doc]` attributes for a declaration.
pub fn doc_attrs(item: &dyn Documented) -> TokenStream {
    attrs(&lines(item))
}

/// `#[doc]` attributes for a property.
pub fn property_doc_attrs(property: &Property) -> TokenStream {
    attrs(&property_lines(property))
}

/// `#[doc]` attributes for arbitrary lines.
pub fn attrs(lines: &[String]) -> TokenStream {
    let lines = lines.iter().map(|line| {
        if line.is_empty() {
            String::new()
        } else {
            format!(" {line}")
        }
    });
    quote!(#(#[doc = #lines])*)
}

/// `#![doc]` attributes for a module header.
pub fn inner_attrs(lines: &[String]) -> TokenStream {
    let lines = lines.iter().map(|line| {
        if line.is_empty() {
            String::new()
        } else {
            format!(" {line}")
        }
    });
    quote!(#(#![doc = #lines])*)
}

#[cfg(test)]
#[path = "docs/docs_tests.rs"]
mod docs_tests;
