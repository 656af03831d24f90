//! Benchmarks for the synthesizers
//!
//! Run with: cargo bench -p alsvid-synth

use alsvid_ir::Circuit;
use alsvid_synth::{
    BitMatrix, CnotPatelParams, GraySynthParams, ParityMap, cnot_patel_alloc, gray_synth_alloc,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_PI_4;

/// A random invertible matrix built from seeded row operations.
fn random_invertible(n: usize, rng: &mut StdRng) -> BitMatrix {
    let mut matrix = BitMatrix::identity(n);
    for _ in 0..4 * n {
        let source = rng.gen_range(0..n);
        let mut target = rng.gen_range(0..n);
        while target == source {
            target = rng.gen_range(0..n);
        }
        matrix.row_xor(target, source);
    }
    matrix
}

fn bench_cnot_patel(c: &mut Criterion) {
    let mut group = c.benchmark_group("cnot_patel");
    let mut rng = StdRng::seed_from_u64(0xA15);

    for &n in &[8usize, 16, 24] {
        let matrix = random_invertible(n, &mut rng);
        group.bench_with_input(BenchmarkId::new("fixed_partition", n), &matrix, |b, m| {
            b.iter(|| {
                let mut circuit = Circuit::new("bench");
                cnot_patel_alloc(&mut circuit, black_box(m), CnotPatelParams::default()).unwrap();
                circuit
            });
        });
        group.bench_with_input(BenchmarkId::new("best_partition", n), &matrix, |b, m| {
            b.iter(|| {
                let mut circuit = Circuit::new("bench");
                cnot_patel_alloc(
                    &mut circuit,
                    black_box(m),
                    CnotPatelParams {
                        best_partition_size: true,
                        partition_size: 1,
                    },
                )
                .unwrap();
                circuit
            });
        });
    }

    group.finish();
}

fn bench_gray_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("gray_synth");
    let mut rng = StdRng::seed_from_u64(0xA15);

    for &(n, num_terms) in &[(8usize, 32usize), (12, 64)] {
        let mut parities = ParityMap::new();
        while parities.num_terms() < num_terms {
            let term = rng.gen_range(1u32..(1 << n));
            parities.add_term(term, FRAC_PI_4);
        }
        group.bench_with_input(
            BenchmarkId::new("sparse_terms", format!("{n}q_{num_terms}t")),
            &parities,
            |b, p| {
                b.iter(|| {
                    let mut circuit = Circuit::new("bench");
                    gray_synth_alloc(
                        &mut circuit,
                        n,
                        black_box(p.clone()),
                        GraySynthParams::default(),
                    )
                    .unwrap();
                    circuit
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cnot_patel, bench_gray_synth);
criterion_main!(benches);
