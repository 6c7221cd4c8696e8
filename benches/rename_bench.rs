//! Rename benchmark
//!
//! Measures per-message cost of payload and metadata renaming.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rename_keys_node::{EntityId, Message, Metadata, RenameKeysConfig, RenameKeysNode};
use std::hint::black_box;
use std::sync::Arc;
use uuid::Uuid;

fn build_message(fields: usize) -> Arc<Message> {
    let payload = serde_json::Value::Object(
        (0..fields)
            .map(|i| (format!("key_{i}"), serde_json::json!(i as f64 * 1.5)))
            .collect(),
    );
    let metadata: Metadata = (0..fields)
        .map(|i| (format!("key_{i}"), format!("value_{i}")))
        .collect();

    Arc::new(Message::new(
        "POST_TELEMETRY_REQUEST",
        EntityId::device(Uuid::new_v4()),
        metadata,
        payload.to_string(),
    ))
}

fn build_config(fields: usize, from_metadata: bool) -> RenameKeysConfig {
    RenameKeysConfig::new(
        (0..fields)
            .step_by(2)
            .map(|i| (format!("key_{i}"), format!("renamed_{i}"))),
        from_metadata,
    )
}

fn benchmark_rename(c: &mut Criterion) {
    let mut group = c.benchmark_group("rename_keys");

    for fields in [4usize, 32, 256] {
        let msg = build_message(fields);

        let payload_node = RenameKeysNode::with_config(build_config(fields, false));
        group.bench_with_input(BenchmarkId::new("payload", fields), &msg, |b, msg| {
            b.iter(|| payload_node.process(black_box(msg)))
        });

        let metadata_node = RenameKeysNode::with_config(build_config(fields, true));
        group.bench_with_input(BenchmarkId::new("metadata", fields), &msg, |b, msg| {
            b.iter(|| metadata_node.process(black_box(msg)))
        });
    }

    let non_object = Arc::new(Message::new(
        "POST_TELEMETRY_REQUEST",
        EntityId::device(Uuid::new_v4()),
        Metadata::new(),
        "[1, 2, 3]",
    ));
    let node = RenameKeysNode::with_config(RenameKeysConfig::default());
    group.bench_function("pass_through", |b| {
        b.iter(|| node.process(black_box(&non_object)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_rename);
criterion_main!(benches);
