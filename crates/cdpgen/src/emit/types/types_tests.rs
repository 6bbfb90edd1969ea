#![allow(non_snake_case)]

use super::*;
use crate::resolve::Classification;
use crate::schema::Protocol;
use quote::quote;

const NETWORK: &str = r#"{ "domains": [
  { "domain": "Network", "description": "Network domain.", "types": [
    { "id": "LoaderId", "type": "string", "description": "Unique loader identifier." },
    { "id": "ResourceType", "type": "string", "enum": ["Document", "Script", "parser-blocking"] },
    { "id": "Headers", "type": "object" },
    { "id": "Cookies", "type": "array", "items": { "$ref": "Cookie" } },
    { "id": "Cookie", "type": "object", "properties": [
      { "name": "name", "type": "string" },
      { "name": "sameParty", "type": "boolean", "optional": true },
      { "name": "frame", "$ref": "Page.FrameId", "optional": true }
    ]}
  ]},
  { "domain": "Page", "types": [{ "id": "FrameId", "type": "string" }] }
]}"#;

fn emit(id: &str) -> syn::File {
    let protocol = Protocol::from_json(NETWORK.as_bytes()).unwrap();
    let classification = Classification::build(&protocol).unwrap();
    let ctx = EmitContext::new(&classification, "cdpgen_runtime").unwrap();
    let network = protocol.domain("Network").unwrap();
    let def = network.type_def(id).unwrap();

    syn::parse2(emit_type(&ctx, network, def).unwrap()).unwrap()
}

fn struct_named<'a>(file: &'a syn::File, name: &str) -> &'a syn::ItemStruct {
    file.items
        .iter()
        .find_map(|item| match item {
            syn::Item::Struct(s) if s.ident == name => Some(s),
            _ => None,
        })
        .unwrap()
}

fn impl_count(file: &syn::File) -> usize {
    file.items
        .iter()
        .filter(|item| matches!(item, syn::Item::Impl(_)))
        .count()
}

#[test]
fn emit_type___primitive___type_alias() {
    let file = emit("LoaderId");

    match &file.items[0] {
        syn::Item::Type(alias) => {
            assert_eq!(alias.ident, "LoaderId");
            let ty = &alias.ty;
            assert_eq!(quote!(#ty).to_string(), "String");
        }
        _ => panic!("expected alias"),
    }
}

#[test]
fn emit_type___array___vec_alias() {
    let file = emit("Cookies");

    match &file.items[0] {
        syn::Item::Type(alias) => {
            let ty = &alias.ty;
            assert_eq!(quote!(#ty).to_string(), quote!(Vec<Cookie>).to_string());
        }
        _ => panic!("expected alias"),
    }
}

#[test]
fn emit_type___enum___not_set_first() {
    let file = emit("ResourceType");

    let item = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Enum(e) => Some(e),
            _ => None,
        })
        .unwrap();
    let variants: Vec<String> = item.variants.iter().map(|v| v.ident.to_string()).collect();
    assert_eq!(variants, vec!["NotSet", "Document", "Script", "ParserBlocking"]);
    // WireEnum, Serialize, Deserialize, Display, FromStr
    assert_eq!(impl_count(&file), 5);
}

#[test]
fn emit_type___enum___labels_keep_wire_text() {
    let file = emit("ResourceType");

    let consts: Vec<&syn::ImplItemConst> = file
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Impl(i) => Some(i),
            _ => None,
        })
        .flat_map(|i| i.items.iter())
        .filter_map(|item| match item {
            syn::ImplItem::Const(c) => Some(c),
            _ => None,
        })
        .collect();

    let labels = consts.iter().find(|c| c.ident == "LABELS").unwrap();
    let syn::Expr::Reference(reference) = &labels.expr else {
        panic!("LABELS should be a slice reference");
    };
    let syn::Expr::Array(array) = reference.expr.as_ref() else {
        panic!("LABELS should reference an array");
    };
    let values: Vec<String> = array
        .elems
        .iter()
        .map(|e| match e {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s),
                ..
            }) => s.value(),
            _ => panic!("unexpected label"),
        })
        .collect();
    assert_eq!(values, vec!["Document", "Script", "parser-blocking"]);

    let type_name = consts.iter().find(|c| c.ident == "TYPE_NAME").unwrap();
    let expr = &type_name.expr;
    assert_eq!(quote!(#expr).to_string(), "\"ResourceType\"");
}

#[test]
fn emit_type___object_without_properties___opaque() {
    let file = emit("Headers");

    let item = struct_named(&file, "Headers");
    assert!(matches!(item.fields, syn::Fields::Unnamed(_)));
    // inherent is_empty, Serialize, Deserialize
    assert_eq!(impl_count(&file), 3);
}

#[test]
fn emit_type___record___cross_domain_field_qualified() {
    let file = emit("Cookie");

    let item = struct_named(&file, "Cookie");
    let frame = item
        .fields
        .iter()
        .find(|f| f.ident.as_ref().is_some_and(|i| i == "frame"))
        .unwrap();
    let ty = &frame.ty;
    assert_eq!(
        quote!(#ty).to_string(),
        quote!(Option<super::page::FrameId>).to_string()
    );
}

#[test]
fn emit_domain___writes_header_once() {
    let protocol = Protocol::from_json(NETWORK.as_bytes()).unwrap();
    let classification = Classification::build(&protocol).unwrap();
    let ctx = EmitContext::new(&classification, "cdpgen_runtime").unwrap();
    let network = protocol.domain("Network").unwrap();
    let mut buffer = SourceBuffer::new(path(network));

    emit_domain(&ctx, network, &mut buffer).unwrap();

    assert!(buffer.has_content());
    assert_eq!(buffer.path(), std::path::Path::new("types/network.rs"));
    let file = syn::parse_file(&buffer.render()).unwrap();
    assert!(!file.attrs.is_empty());
    assert!(file.attrs.iter().all(|a| a.path().is_ident("doc")));
}

#[test]
fn emit_domain___no_types___buffer_untouched() {
    let protocol = Protocol::from_json(
        br#"{ "domains": [{ "domain": "Browser", "commands": [{ "name": "close" }] }] }"#,
    )
    .unwrap();
    let classification = Classification::build(&protocol).unwrap();
    let ctx = EmitContext::new(&classification, "cdpgen_runtime").unwrap();
    let mut buffer = SourceBuffer::new(path(&protocol.domains[0]));

    emit_domain(&ctx, &protocol.domains[0], &mut buffer).unwrap();

    assert!(!buffer.has_content());
    assert!(!buffer.header_written());
}
