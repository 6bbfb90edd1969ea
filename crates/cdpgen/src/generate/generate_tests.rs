#![allow(non_snake_case)]

use super::*;
use crate::error::GenError;

fn protocol(json: &str) -> Protocol {
    Protocol::from_json(json.as_bytes()).unwrap()
}

const PAGE: &str = r#"{ "domains": [{ "domain": "Page",
  "types": [{ "id": "FrameId", "type": "string" }],
  "commands": [{ "name": "reload", "parameters": [{ "name": "ignoreCache", "type": "boolean", "optional": true }] }],
  "events": [{ "name": "loadEventFired", "parameters": [{ "name": "timestamp", "type": "number" }] }]
}]}"#;

#[test]
fn Generator___generate___all_packages() {
    let output = Generator::default().generate(&protocol(PAGE)).unwrap();

    assert_eq!(
        output.paths(),
        vec![
            Path::new("mod.rs"),
            Path::new("client.rs"),
            Path::new("commands.rs"),
            Path::new("events.rs"),
            Path::new("types/mod.rs"),
            Path::new("types/page.rs"),
        ]
    );
}

#[test]
fn Generator___no_events___events_package_skipped() {
    let p = protocol(
        r#"{ "domains": [{ "domain": "Browser", "commands": [{ "name": "close" }] }] }"#,
    );

    let output = Generator::default().generate(&p).unwrap();

    assert_eq!(
        output.paths(),
        vec![
            Path::new("mod.rs"),
            Path::new("client.rs"),
            Path::new("commands.rs")
        ]
    );
    let files = output.render(&PrettyFormatter);
    let root = &files[Path::new("mod.rs")];
    assert!(root.contains("pub mod commands;"));
    assert!(!root.contains("pub mod events;"));
    assert!(!root.contains("pub mod types;"));
}

#[test]
fn Generator___empty_protocol___nothing_to_write() {
    let output = Generator::default().generate(&Protocol::default()).unwrap();

    assert!(output.paths().is_empty());
    assert!(output.render(&PrettyFormatter).is_empty());
}

#[test]
fn Generator___unknown_reference___aborts() {
    let p = protocol(
        r#"{ "domains": [{ "domain": "Page", "events": [
            { "name": "frameAttached", "parameters": [{ "name": "frameId", "$ref": "FrameId" }] }
        ]}]}"#,
    );

    let result = Generator::default().generate(&p);

    assert!(matches!(result, Err(GenError::UnknownReference { .. })));
}

#[test]
fn Generator___invalid_runtime_crate___fails() {
    let generator = Generator::new(GeneratorConfig::default().with_runtime_crate("1nvalid path"));

    let result = generator.generate(&protocol(PAGE));

    assert!(matches!(result, Err(GenError::RuntimePath(_))));
}

#[test]
fn Generator___custom_runtime_crate___used_in_output() {
    let generator = Generator::new(GeneratorConfig::default().with_runtime_crate("crate::rt"));

    let files = generator
        .generate(&protocol(PAGE))
        .unwrap()
        .render(&PrettyFormatter);

    let client = &files[Path::new("client.rs")];
    assert!(client.contains("use crate::rt::{Connection, RpcResult};"));
    assert!(!client.contains("cdpgen_runtime"));
}

#[test]
fn Output___write___counts_files() {
    let persist = std::sync::Arc::new(crate::writer::MemoryPersist::new());
    struct Shared(std::sync::Arc<crate::writer::MemoryPersist>);
    impl crate::writer::Persist for Shared {
        fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
            self.0.write(path, bytes)
        }
    }
    let writer = Writer::new(PrettyFormatter, Shared(persist.clone()));

    let written = Generator::default()
        .generate(&protocol(PAGE))
        .unwrap()
        .write(&writer)
        .unwrap();

    assert_eq!(written, 6);
    assert_eq!(persist.paths().len(), 6);
}

#[test]
fn Summary___of___counts_declarations() {
    let summary = Summary::of(&protocol(PAGE));

    assert_eq!(
        summary,
        Summary {
            domains: 1,
            types: 1,
            commands: 1,
            events: 1
        }
    );
}
