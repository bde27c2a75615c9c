use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use serde_json::{json, Value};
use wire::{decode_message, encode_message, try_decode_message};

fn sample_messages() -> Vec<(&'static str, Vec<Value>)> {
    let arrays = [
        ("call", json!([48, 7814135, {"timeout": 1000}, "com.example.add", [2, 3], {"mode": "fast"}])),
        ("event", json!([36, 5512315355_u64, 4429313566_u64, {"publisher": 1}, ["hello"]])),
        ("result_kwargs_only", json!([50, 7814135, {}, [], {"sum": 5}])),
        ("published", json!([17, 239714735, 4429313566_u64])),
        ("unknown", json!([1999, 51, "test"])),
    ];
    arrays
        .into_iter()
        .map(|(name, value)| match value {
            Value::Array(items) => (name, items),
            _ => (name, Vec::new()),
        })
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1));

    for (name, raw) in sample_messages() {
        group.bench_function(name, |b| {
            b.iter_batched(
                || raw.clone(),
                |raw| black_box(decode_message(raw)),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("{name}_strict"), |b| {
            b.iter_batched(
                || raw.clone(),
                |raw| black_box(try_decode_message(raw)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(1));

    for (name, raw) in sample_messages() {
        let msg = decode_message(raw);
        group.bench_function(name, |b| {
            b.iter(|| black_box(encode_message(black_box(&msg))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
