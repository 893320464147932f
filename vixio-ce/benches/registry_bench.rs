//! Cue Registry Performance Benchmark
//!
//! Measures insert, claim and snapshot cost against registry depth.
//!
//! **Goal:** Insert and claim stay logarithmic in pending count
//! **Target:** Insert into a 10k-deep registry < 5µs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use tokio::runtime::Runtime;
use vixio_ce::cue::{CuePayload, CueRegistry, Priority};

fn payload() -> CuePayload {
    json!({"id": "lighting.level", "args": {"start": 1, "count": 8, "level": 0.8}})
        .as_object()
        .cloned()
        .unwrap_or_default()
}

fn filled_registry(rt: &Runtime, depth: usize) -> CueRegistry {
    let registry = CueRegistry::new();
    rt.block_on(async {
        for n in 0..depth {
            registry
                .insert(Priority::clamped((n * 37 % 101) as i64), payload())
                .await;
        }
    });
    registry
}

fn bench_registry(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("cue_registry");

    for depth in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("insert", depth), &depth, |b, &depth| {
            let registry = &filled_registry(&rt, depth);
            b.to_async(&rt).iter(|| async move {
                let receipt = registry.insert(black_box(Priority::DEFAULT), payload()).await;
                black_box(receipt);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("insert_then_claim", depth),
            &depth,
            |b, &depth| {
                let registry = &filled_registry(&rt, depth);
                // Registry depth stays constant across iterations
                b.to_async(&rt).iter(|| async move {
                    registry.insert(Priority::clamped(99), payload()).await;
                    black_box(registry.claim().await);
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("peek_10", depth), &depth, |b, &depth| {
            let registry = &filled_registry(&rt, depth);
            b.to_async(&rt).iter(|| async move {
                black_box(registry.peek(10).await);
            });
        });
    }

    group.bench_function("snapshot_1000", |b| {
        let registry = &filled_registry(&rt, 1_000);
        b.to_async(&rt).iter(|| async move {
            black_box(registry.snapshot().await);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_registry);
criterion_main!(benches);
