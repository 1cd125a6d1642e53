//! Benchmarks for the sort engine core path.
//!
//! Run with:  `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sortview::{Column, SortConfig, SortEngine};

const N: usize = 1 << 20;

fn scrambled(n: usize, modulus: i64) -> impl Iterator<Item = i64> {
    (0..n as i64).map(move |i| (i.wrapping_mul(2_654_435_761)) % modulus)
}

fn bench_sort_kinds(c: &mut Criterion) {
    let columns = [
        Column::int1("i1", scrambled(N, 127).map(|v| Some(v as i8))).unwrap(),
        Column::int2("i2", scrambled(N, 32_000).map(|v| Some(v as i16))).unwrap(),
        Column::int4("i4", scrambled(N, 1 << 30).map(|v| Some(v as i32))).unwrap(),
        Column::int8("i8", scrambled(N, i64::MAX).map(|v| Some((v << 1) | 1))).unwrap(),
        Column::bool1("i1b", scrambled(N, 3).map(|v| (v != 2).then_some(v == 1))),
    ];
    let engine = SortEngine::default();

    let mut group = c.benchmark_group("sort_1m");
    group.sample_size(20);
    for col in &columns {
        group.bench_with_input(BenchmarkId::from_parameter(col.name()), col, |b, col| {
            b.iter(|| black_box(engine.sort(black_box(col)).unwrap()))
        });
    }
    group.finish();
}

fn bench_parallel_vs_sequential(c: &mut Criterion) {
    let col = Column::int4("k", scrambled(N, 1 << 24).map(|v| Some(v as i32))).unwrap();
    let mut group = c.benchmark_group("refine");
    group.sample_size(20);
    for parallel in [false, true] {
        let engine = SortEngine::new(SortConfig {
            parallel,
            verify: false,
            ..SortConfig::default()
        })
        .unwrap();
        group.bench_with_input(BenchmarkId::new("parallel", parallel), &col, |b, col| {
            b.iter(|| black_box(engine.sort(black_box(col)).unwrap()))
        });
    }
    group.finish();
}

fn bench_small_range(c: &mut Criterion) {
    // large absolute values, narrow span: rebased to u8 keys
    let col = Column::int8("k", scrambled(N, 200).map(|v| Some(1_000_000_000_000 + v))).unwrap();
    let engine = SortEngine::default();
    c.bench_function("sort_narrow_range_i8", |b| {
        b.iter(|| black_box(engine.sort(black_box(&col)).unwrap()))
    });
}

criterion_group!(benches, bench_sort_kinds, bench_parallel_vs_sequential, bench_small_range);
criterion_main!(benches);
