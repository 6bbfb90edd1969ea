//! Generation Baseline Benchmarks
//!
//! Measures the phases of a run over synthetic protocols of increasing size.
//!
//! # Protocol Sizes
//!
//! - **Small**: 4 domains (a handful of commands, one enum each)
//! - **Medium**: 40 domains
//! - **Large**: 200 domains, roughly the size of a full browser protocol

use cdpgen::resolve::Classification;
use cdpgen::writer::Unformatted;
use cdpgen::{Generator, PrettyFormatter, Protocol};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

// ============================================================================
// Synthetic protocol
// ============================================================================

fn synthetic_domain(index: usize) -> Value {
    let name = format!("Domain{index}");
    let next = format!("Domain{}", index + 1);
    json!({
        "domain": name,
        "description": "Synthetic domain.",
        "types": [
            { "id": "NodeId", "type": "integer" },
            { "id": "Kind", "type": "string", "enum": ["alpha", "beta", "gamma-delta"] },
            { "id": "Node", "type": "object", "properties": [
                { "name": "nodeId", "$ref": "NodeId" },
                { "name": "kind", "$ref": "Kind", "optional": true },
                { "name": "parent", "$ref": "Node", "optional": true },
                { "name": "children", "type": "array", "items": { "$ref": "Node" }, "optional": true },
                { "name": "attributes", "type": "object", "optional": true },
                { "name": "label", "type": "string", "description": "Display label." }
            ]},
            { "id": "Payload", "type": "object" }
        ],
        "commands": [
            { "name": "enable" },
            { "name": "describeNode",
              "parameters": [
                  { "name": "nodeId", "$ref": "NodeId" },
                  { "name": "depth", "type": "integer", "optional": true },
                  { "name": "pierce", "type": "boolean", "optional": true }
              ],
              "returns": [{ "name": "node", "$ref": "Node" }]
            },
            { "name": "linkTo",
              "parameters": [{ "name": "target", "$ref": format!("{next}.NodeId"), "optional": true }]
            }
        ],
        "events": [
            { "name": "nodeChanged", "parameters": [{ "name": "node", "$ref": "Node" }] },
            { "name": "payloadReceived", "parameters": [{ "name": "payload", "$ref": "Payload", "optional": true }] }
        ]
    })
}

fn synthetic_protocol(domains: usize) -> Protocol {
    // The last domain links to itself so every reference resolves.
    let mut list: Vec<Value> = (0..domains).map(synthetic_domain).collect();
    if let Some(last) = list.last_mut() {
        last["commands"][2]["parameters"][0]["$ref"] = json!("NodeId");
    }
    let bytes = serde_json::to_vec(&json!({ "domains": list })).unwrap();
    Protocol::from_json(&bytes).unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for domains in [4, 40, 200] {
        let protocol = synthetic_protocol(domains);
        group.throughput(Throughput::Elements(domains as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(domains),
            &protocol,
            |b, protocol| b.iter(|| Classification::build(black_box(protocol)).unwrap()),
        );
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    let generator = Generator::default();

    for domains in [4, 40, 200] {
        let protocol = synthetic_protocol(domains);
        group.throughput(Throughput::Elements(domains as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(domains),
            &protocol,
            |b, protocol| b.iter(|| generator.generate(black_box(protocol)).unwrap()),
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let protocol = synthetic_protocol(40);
    let output = Generator::default().generate(&protocol).unwrap();

    group.bench_function("unformatted", |b| {
        b.iter(|| black_box(&output).render(&Unformatted))
    });

    group.bench_function("prettyplease", |b| {
        b.iter(|| black_box(&output).render(&PrettyFormatter))
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_emit, bench_render);
criterion_main!(benches);
