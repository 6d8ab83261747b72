//! Benchmarks for Braid block operations
//!
//! Run with: cargo bench -p braid-ir

use braid_ir::arith::mod_add;
use braid_ir::{Block, Gate, QubitRange, Step};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Benchmark modular-adder block construction
fn bench_mod_add_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("mod_add_construction");

    for n in &[4u32, 8, 16, 32] {
        group.bench_with_input(BenchmarkId::new("build", n), n, |b, &n| {
            let x = QubitRange::new(0u32, n - 1).unwrap();
            let y = QubitRange::new(n, 2 * n - 1).unwrap();
            let modulus = 1u64 << (n - 1);
            b.iter(|| mod_add(black_box(x), black_box(y), black_box(modulus)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark flattening of nested blocks
fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for depth in &[1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::new("nested", depth), depth, |b, &depth| {
            let mut inner = Block::new("leaf", 2);
            inner.add_gate(Gate::x(0u32)).unwrap();
            inner.add_gate(Gate::cx(0u32, 1u32)).unwrap();

            for level in 0..depth {
                let mut next = Block::new(format!("level{level}"), 2);
                next.add_gate(inner.as_gate(0)).unwrap();
                inner = next;
            }

            b.iter(|| black_box(&inner).flatten().unwrap());
        });
    }

    group.finish();
}

/// Benchmark block inversion
fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");

    group.bench_function("mod_add_16", |b| {
        let x = QubitRange::new(0u32, 15u32).unwrap();
        let y = QubitRange::new(16u32, 31u32).unwrap();
        let block = mod_add(x, y, 1 << 15).unwrap();
        b.iter(|| black_box(&block).inverse().unwrap());
    });

    group.bench_function("wide_step_block", |b| {
        let mut block = Block::new("wide", 64);
        for _ in 0..32 {
            let step: Step = (0u32..64).step_by(2).map(|q| Gate::cx(q, q + 1)).collect();
            block.add_step(step).unwrap();
        }
        b.iter(|| black_box(&block).inverse().unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mod_add_construction,
    bench_flatten,
    bench_inverse
);
criterion_main!(benches);
