//! Criterion benchmarks for the multiply engine.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lexsim::{Matrix, Ordering, multiply_blocked, multiply_into, multiply_parallel};

fn pattern_matrix(rows: usize, cols: usize, modulus: usize) -> Matrix {
    let data: Vec<f32> = (0..rows * cols).map(|i| (i % modulus) as f32).collect();
    Matrix::from_vec(rows, cols, data)
}

fn bench_orderings(c: &mut Criterion) {
    let n = 128;
    let lhs = pattern_matrix(n, n, 100);
    let rhs = pattern_matrix(n, n, 100);

    let mut group = c.benchmark_group("orderings");
    for ordering in Ordering::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(ordering), &ordering, |b, &ordering| {
            b.iter(|| {
                let mut out = Matrix::zeros(n, n);
                multiply_into(&lhs, &rhs, &mut out, ordering).unwrap();
                out
            });
        });
    }
    group.finish();
}

fn bench_blocked(c: &mut Criterion) {
    let n = 128;
    let lhs = pattern_matrix(n, n, 100);
    let rhs = pattern_matrix(n, n, 100);

    let mut group = c.benchmark_group("blocked");
    for block in [16, 32, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(block), &block, |b, &block| {
            b.iter(|| {
                let mut out = Matrix::zeros(n, n);
                multiply_blocked(&lhs, &rhs, &mut out, Ordering::Ikj, block).unwrap();
                out
            });
        });
    }
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let n = 128;
    let lhs = pattern_matrix(n, n, 100);
    let rhs = pattern_matrix(n, n, 100);

    let mut group = c.benchmark_group("parallel");
    for threads in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter(|| {
                let mut out = Matrix::zeros(n, n);
                multiply_parallel(&lhs, &rhs, &mut out, Ordering::Kij, threads).unwrap();
                out
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_orderings, bench_blocked, bench_parallel);
criterion_main!(benches);
