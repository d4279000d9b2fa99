/*!
Benchmarks for key filtering and structured comparison of fixture values.
*/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rcv_core::{compare, filter, IgnoreKeys, Value};
use serde_json::json;

// Builds a users payload with `rows` entries, each carrying volatile keys
fn generate_rows(rows: usize, tag: &str) -> Value {
    let users: Vec<serde_json::Value> = (0..rows)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("user_{i}"),
                "updated_at": format!("2024-01-01T00:00:{:02}Z", i % 60),
                "profile": {
                    "tag": tag,
                    "scores": [i, i * 2, i * 3],
                    "address": {"city": "Springfield", "zip": format!("{:05}", i)}
                }
            })
        })
        .collect();

    Value::from(json!({
        "meta": {"count": rows, "generated_at": "now"},
        "users": users
    }))
}

fn ignore_keys() -> IgnoreKeys {
    ["id", "updated_at", "generated_at"].into_iter().collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let keys = ignore_keys();

    for rows in [10, 100, 1000] {
        let value = generate_rows(rows, "a");
        group.bench_with_input(BenchmarkId::from_parameter(rows), &value, |b, value| {
            b.iter(|| filter(black_box(value), black_box(&keys)))
        });
    }

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let keys = ignore_keys();

    for rows in [10, 100, 1000] {
        let existing = generate_rows(rows, "a");
        let equal = generate_rows(rows, "a");
        let changed = generate_rows(rows, "b");

        group.bench_with_input(BenchmarkId::new("equal", rows), &rows, |b, _| {
            b.iter(|| compare(black_box(&existing), black_box(&equal), black_box(&keys)))
        });
        group.bench_with_input(BenchmarkId::new("changed", rows), &rows, |b, _| {
            b.iter(|| compare(black_box(&existing), black_box(&changed), black_box(&keys)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_compare);
criterion_main!(benches);
