//! Benchmarks for encoding and decoding.
//!
//! Measures throughput for:
//! - A fixed-width schema (`bigint`, `int`), where decode can pre-size its output
//! - A mixed schema with a `varchar255` column, where row widths vary

extern crate rowpack;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rowpack::{decode, encode, Row, Schema, Value};
use std::hint::black_box;

const ROWS: i64 = 10_000;

fn counter_rows() -> (Schema, Vec<Row>) {
    let schema = Schema::parse([("id", "bigint"), ("hits", "int")]).unwrap();
    let rows = (0..ROWS)
        .map(|i| {
            Row::from([
                ("id".to_string(), Value::from(i)),
                ("hits".to_string(), Value::from(i % 1_000)),
            ])
        })
        .collect();

    (schema, rows)
}

fn person_rows() -> (Schema, Vec<Row>) {
    let schema =
        Schema::parse([("id", "bigint"), ("age", "int"), ("name", "varchar255")]).unwrap();
    let rows = (0..ROWS)
        .map(|i| {
            Row::from([
                ("id".to_string(), Value::from(i)),
                ("age".to_string(), Value::from(i % 100)),
                ("name".to_string(), Value::from(format!("person-{i}"))),
            ])
        })
        .collect();

    (schema, rows)
}

fn bench_dataset(c: &mut Criterion, name: &str, schema: &Schema, rows: &[Row]) {
    let data = encode(rows, schema).unwrap();

    let mut group = c.benchmark_group(name);
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("encode", |b| {
        b.iter(|| {
            let data = encode(black_box(rows), black_box(schema)).unwrap();
            black_box(data)
        });
    });
    group.bench_function("decode", |b| {
        b.iter(|| {
            let rows = decode(black_box(&data), black_box(schema)).unwrap();
            black_box(rows)
        });
    });
    group.finish();
}

fn bench_fixed_width(c: &mut Criterion) {
    let (schema, rows) = counter_rows();
    bench_dataset(c, "fixed_width", &schema, &rows);
}

fn bench_mixed(c: &mut Criterion) {
    let (schema, rows) = person_rows();
    bench_dataset(c, "mixed", &schema, &rows);
}

criterion_group!(benches, bench_fixed_width, bench_mixed);
criterion_main!(benches);
