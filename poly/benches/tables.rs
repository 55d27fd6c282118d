//! Benchmarks for fold-table generation and table-driven folding.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fingerprint_poly::{generate, FingerprintTable, ModulusConfig, Poly128};

fn bench_build(c: &mut Criterion) {
    let config = ModulusConfig::default();
    let p64 = config.modulus64().unwrap();
    let p96 = config.modulus96().unwrap();
    let p128 = config.modulus128().unwrap();
    let mut group = c.benchmark_group("build");

    group.bench_function("bits64", |b| {
        b.iter(|| black_box(FingerprintTable::new(black_box(p64))));
    });
    group.bench_function("bits96", |b| {
        b.iter(|| black_box(FingerprintTable::new(black_box(p96))));
    });
    group.bench_function("bits128", |b| {
        b.iter(|| black_box(FingerprintTable::new(black_box(p128))));
    });
    group.bench_function("all_widths", |b| {
        b.iter(|| black_box(generate(black_box(&config))));
    });

    group.finish();
}

fn bench_fold(c: &mut Criterion) {
    let p = ModulusConfig::default().modulus128().unwrap();
    let table = FingerprintTable::new(p);
    let t = Poly128::new([0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210]);

    let mut group = c.benchmark_group("mul_x64_mod");
    group.throughput(Throughput::Bytes(8));

    group.bench_function("table", |b| {
        b.iter(|| black_box(table.table().mul_x64_mod(black_box(&t))));
    });
    group.bench_function("bitwise", |b| {
        b.iter(|| {
            let mut v = black_box(t);
            v.mul_xk_mod(64, &p);
            black_box(v)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_fold);
criterion_main!(benches);
