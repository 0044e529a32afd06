//! Deep clone benchmarks
//!
//! Run with: `cargo bench -p carbon-clone`

use carbon_clone::deep_clone;
use carbon_value::{Array, MapData, Record, Value};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

/// Flat record with `n` number properties
fn wide_record(n: usize) -> Value {
    let record = Arc::new(Record::new());
    for i in 0..n {
        record.set(format!("key{i}").as_str(), Value::number(i as f64));
    }
    Value::object(record)
}

/// Arrays nested `depth` levels deep
fn deep_chain(depth: usize) -> Value {
    let mut value = Value::null();
    for _ in 0..depth {
        value = Value::array(Array::from_values([value]));
    }
    value
}

/// `n` records that all point at one shared record, indexed by a map
fn shared_graph(n: usize) -> Value {
    let shared = Value::object(Record::from_entries([("name", Value::string("shared"))]));
    let map = Arc::new(MapData::new());
    for i in 0..n {
        let node = Record::from_entries([
            ("id", Value::number(i as f64)),
            ("shared", shared.clone()),
        ]);
        map.set(Value::number(i as f64), Value::object(node));
    }
    Value::map(map)
}

fn clone_shape_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_clone");

    for size in [10, 100, 1000].iter() {
        let wide = wide_record(*size);
        group.bench_with_input(BenchmarkId::new("wide_record", size), &wide, |b, v| {
            b.iter(|| deep_clone(black_box(v)))
        });

        let graph = shared_graph(*size);
        group.bench_with_input(BenchmarkId::new("shared_graph", size), &graph, |b, v| {
            b.iter(|| deep_clone(black_box(v)))
        });
    }

    // Kept shallow enough that dropping the results stays off the stack limit
    for depth in [10, 100, 1000].iter() {
        let chain = deep_chain(*depth);
        group.bench_with_input(BenchmarkId::new("deep_chain", depth), &chain, |b, v| {
            b.iter(|| deep_clone(black_box(v)))
        });
    }

    group.finish();
}

fn cyclic_benchmark(c: &mut Criterion) {
    let node = Arc::new(Record::new());
    node.set("self", Value::object(node.clone()));
    node.set("payload", wide_record(50));
    let value = Value::object(node.clone());

    c.bench_function("deep_clone_cycle", |b| {
        b.iter(|| {
            let cloned = deep_clone(black_box(&value));
            if let Ok(cloned) = &cloned
                && let Some(record) = cloned.as_object()
            {
                record.clear();
            }
            cloned
        })
    });

    node.clear();
}

criterion_group!(benches, clone_shape_benchmark, cyclic_benchmark);
criterion_main!(benches);
