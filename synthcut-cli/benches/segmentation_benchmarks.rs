use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::fs;
use tempfile::TempDir;

use synthcut_core::FragmentPlanner;
use synthcut_core::algorithms::optimize_fragments;
use synthcut_core::config::{FragmentationConfig, Objective, SynthcutConfig};
use synthcut_core::risk::RiskProfile;

use criterion_config::configure_criterion;

// Deterministic bumpy profile so the solver cannot stop on ties alone
fn synthetic_profile(length: usize) -> RiskProfile {
    let values = (0..length)
        .map(|i| ((i * 7919) % 97) as f64 / 10.0)
        .collect();
    RiskProfile::new(values).unwrap()
}

// Pseudo-random sequence from a linear congruential generator
fn synthetic_sequence(length: usize, seed: u64) -> String {
    let mut state = seed;
    (0..length)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            b"ACGT"[(state >> 62) as usize] as char
        })
        .collect()
}

fn benchmark_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for objective in [Objective::Sum, Objective::Max] {
        for length in [5_000usize, 10_000, 20_000] {
            let profile = synthetic_profile(length);
            let config = FragmentationConfig {
                objective,
                max_fragments: 20,
                ..FragmentationConfig::default()
            };
            group.throughput(Throughput::Elements(length as u64));
            group.bench_with_input(
                BenchmarkId::new(objective.to_string(), length),
                &profile,
                |b, profile| {
                    b.iter(|| optimize_fragments(black_box(profile), &config, None).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn benchmark_fasta_batch(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("batch.fasta");
    let body: String = (0..8)
        .map(|i| format!(">seq{i}\n{}\n", synthetic_sequence(6_000, i)))
        .collect();
    fs::write(&path, &body).unwrap();

    let mut group = c.benchmark_group("fasta_batch");
    group.throughput(Throughput::Bytes(body.len() as u64));

    for threads in [1usize, 4] {
        let config = SynthcutConfig {
            num_threads: Some(threads),
            ..SynthcutConfig::default()
        };
        let planner = FragmentPlanner::new(config);
        group.bench_function(BenchmarkId::new("threads", threads), |b| {
            b.iter(|| planner.analyze_fasta_file(black_box(&path)).unwrap());
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = benchmark_segmentation, benchmark_fasta_batch
}
criterion_main!(benches);
