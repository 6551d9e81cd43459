use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eggwalker_core::diff::{calc_diff, calc_diff_utf16};

/// Benchmark the identity fast path on a large buffer
fn bench_identical(c: &mut Criterion) {
    let text = "lorem ipsum ".repeat(10000);
    c.bench_function("diff_identical_120k", |b| {
        b.iter(|| black_box(calc_diff(&text, &text)));
    });
}

/// Benchmark a single keystroke in the middle of documents of growing size
fn bench_single_keystroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_single_keystroke");

    for size in [100, 1000, 10000, 100000].iter() {
        let old = "a".repeat(*size);
        let mut new = old.clone();
        new.insert(size / 2, 'b');

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(calc_diff(&old, &new)));
        });
    }

    group.finish();
}

/// Benchmark replacing the whole buffer (no common prefix or suffix)
fn bench_full_replace(c: &mut Criterion) {
    let old = "x".repeat(10000);
    let new = "y".repeat(10000);
    c.bench_function("diff_full_replace_10k", |b| {
        b.iter(|| black_box(calc_diff(&old, &new)));
    });
}

/// Benchmark multi-byte text given as UTF-16 code units
fn bench_utf16(c: &mut Criterion) {
    let old: Vec<u16> = "héllo 世界 🎉 ".repeat(1000).encode_utf16().collect();
    let mut new = old.clone();
    new.extend("!".encode_utf16());
    c.bench_function("diff_utf16_append", |b| {
        b.iter(|| black_box(calc_diff_utf16(&old, &new)));
    });
}

criterion_group!(
    benches,
    bench_identical,
    bench_single_keystroke,
    bench_full_replace,
    bench_utf16
);
criterion_main!(benches);
