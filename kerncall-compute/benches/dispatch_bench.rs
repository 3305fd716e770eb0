//! Gateway dispatch over the builtin kernels, single-chunk vs. fragmented input.
//!
//! Run:
//!   cargo bench --bench dispatch_bench

#![forbid(unsafe_code)]

use std::hint::black_box;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array};
use criterion::{Criterion, criterion_group, criterion_main};

use kerncall_compute::{FunctionGateway, GatewayConfig, KernelRegistry, collect_arrays};
use kerncall_types::{Datum, OptionBag};

const NUM_ROWS: i64 = 1_000_000;
const NUM_CHUNKS: i64 = 1_000;
const DISTINCT: i64 = 10_000;

fn values(range: std::ops::Range<i64>) -> ArrayRef {
    Arc::new(Int64Array::from_iter_values(range.map(|v| v % DISTINCT)))
}

fn bench_dispatch(c: &mut Criterion) {
    let gateway = FunctionGateway::with_config(
        Arc::new(KernelRegistry::builtin()),
        GatewayConfig::default(),
    );
    let options = OptionBag::new();

    let flat = Datum::Array(values(0..NUM_ROWS));
    let chunk_len = NUM_ROWS / NUM_CHUNKS;
    let chunks: Vec<Datum> = (0..NUM_CHUNKS)
        .map(|i| Datum::Array(values(i * chunk_len..(i + 1) * chunk_len)))
        .collect();
    let fragmented = collect_arrays(&chunks).unwrap();
    let table = Datum::Array(values(0..DISTINCT));

    let mut group = c.benchmark_group("dispatch_1M");
    group.sample_size(20);

    group.bench_function("unique_flat", |b| {
        b.iter(|| black_box(gateway.call_datums("unique", &[flat.clone()], &options).unwrap()))
    });
    group.bench_function("unique_fragmented", |b| {
        b.iter(|| {
            black_box(
                gateway
                    .call_datums("unique", &[fragmented.clone()], &options)
                    .unwrap(),
            )
        })
    });
    group.bench_function("index_in_flat", |b| {
        b.iter(|| {
            black_box(
                gateway
                    .call_datums("index_in_meta_binary", &[flat.clone(), table.clone()], &options)
                    .unwrap(),
            )
        })
    });
    group.bench_function("sum_fragmented", |b| {
        b.iter(|| {
            black_box(
                gateway
                    .call_datums("sum", &[fragmented.clone()], &options)
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
