//! Criterion benchmarks for register simulation.
//!
//! Benchmarks cover:
//! - Single factor sampling across scenario counts
//! - Register aggregation with varying factor counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quant_models::{RiskFactorDefinition, RiskFactorId, SeverityModel};
use quant_simulation::{RiskFactorSampler, SimulationAggregator, SimulationConfig};

/// Synthetic register cycling through the stochastic severity kinds.
fn synthetic_register(n_factors: usize) -> Vec<RiskFactorDefinition> {
    (0..n_factors)
        .map(|i| {
            let severity = match i % 3 {
                0 => SeverityModel::Normal {
                    mean: 1_000.0,
                    std_dev: 250.0,
                },
                1 => SeverityModel::LogNormal {
                    lower_bound: 1_000.0,
                    upper_bound: 10_000.0,
                },
                _ => SeverityModel::Uniform {
                    min: 500.0,
                    max: 5_000.0,
                },
            };
            RiskFactorDefinition::new(
                RiskFactorId::new(i as u64 + 1),
                format!("Risk {}", i + 1),
                "Operational",
                0.1,
                severity,
            )
            .unwrap()
        })
        .collect()
}

fn bench_factor_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("factor_sampling");
    let factor = synthetic_register(2).pop().unwrap();

    for n_scenarios in [1_000, 10_000, 100_000] {
        let config = SimulationConfig::builder()
            .n_scenarios(n_scenarios)
            .n_periods(5)
            .build()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("lognormal", n_scenarios),
            &config,
            |b, config| {
                let sampler = RiskFactorSampler::new(config);
                b.iter(|| black_box(sampler.sample(black_box(&factor)).unwrap()))
            },
        );
    }
    group.finish();
}

fn bench_register_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_aggregation");
    group.sample_size(20);

    let config = SimulationConfig::builder()
        .n_scenarios(10_000)
        .n_periods(5)
        .build()
        .unwrap();
    let aggregator = SimulationAggregator::new(config);

    for n_factors in [10, 50, 200] {
        let register = synthetic_register(n_factors);
        group.bench_with_input(
            BenchmarkId::new("factors", n_factors),
            &register,
            |b, register| b.iter(|| black_box(aggregator.run(black_box(register)).unwrap())),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_factor_sampling, bench_register_aggregation);
criterion_main!(benches);
