#![allow(non_snake_case)]

use super::*;
use crate::schema::{Command, Property};
use quote::quote;

fn property(json: &str) -> Property {
    serde_json::from_str(json).unwrap()
}

#[test]
fn lines___missing_description___placeholder() {
    let command: Command = serde_json::from_str(r#"{ "name": "enable" }"#).unwrap();

    assert_eq!(lines(&command), vec![NO_DESCRIPTION]);
}

#[test]
fn lines___blank_description___placeholder() {
    let command: Command =
        serde_json::from_str(r#"{ "name": "enable", "description": "  " }"#).unwrap();

    assert_eq!(lines(&command), vec![NO_DESCRIPTION]);
}

#[test]
fn lines___multi_line_description___split() {
    let command: Command = serde_json::from_str(
        r#"{ "name": "reload", "description": "Reloads given page.\nOptionally ignoring cache." }"#,
    )
    .unwrap();

    assert_eq!(
        lines(&command),
        vec!["Reloads given page.", "Optionally ignoring cache."]
    );
}

#[test]
fn lines___experimental_and_deprecated___notes_after_blank_line() {
    let p = property(
        r#"{ "name": "x", "type": "string", "description": "X.", "experimental": true, "deprecated": true }"#,
    );

    assert_eq!(lines(&p), vec!["X.", "", EXPERIMENTAL, DEPRECATED]);
}

#[test]
fn property_lines___inline_enum___lists_values() {
    let p = property(
        r#"{ "name": "level", "type": "string", "description": "Message severity.", "enum": ["log", "warning"] }"#,
    );

    assert_eq!(
        property_lines(&p),
        vec!["Message severity.", "", "Values: \"log\", \"warning\"."]
    );
}

#[test]
fn attrs___pads_non_empty_lines() {
    let tokens = attrs(&["First.".to_string(), String::new()]);

    assert_eq!(
        tokens.to_string(),
        quote!(#[doc = " First."] #[doc = ""]).to_string()
    );
}
