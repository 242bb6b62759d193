//! Benchmarks for the performance and beta engines.
//!
//! Run with: cargo bench -p aurum-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use aurum_analytics::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_universe(assets: usize, periods: usize) -> ReturnUniverse {
    let specs: Vec<(AssetId, SimulationParams)> = (0..assets)
        .map(|i| {
            let params = SimulationParams::new(0.04 + 0.001 * i as f64, 0.08 + 0.002 * i as f64)
                .with_periods(periods);
            (AssetId::new(format!("ASSET_{i:04}")), params)
        })
        .collect();
    simulate_universe(&specs, 42).expect("valid simulation parameters")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_historical_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("historical_metrics");

    for periods in [60, 252, 2_520] {
        let universe = create_universe(2, periods);
        let portfolio = universe.get("ASSET_0000").expect("asset").as_slice().to_vec();
        let benchmark = universe.get("ASSET_0001").expect("asset").as_slice().to_vec();

        group.throughput(Throughput::Elements(periods as u64));
        group.bench_with_input(BenchmarkId::from_parameter(periods), &periods, |b, _| {
            b.iter(|| {
                calculate_historical_metrics(
                    black_box(portfolio.as_slice()),
                    Some(black_box(benchmark.as_slice())),
                    0.03,
                )
            });
        });
    }

    group.finish();
}

fn bench_beta_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("beta_matrix");
    let config = AnalyticsConfig::default();

    for assets in [10, 100, 500] {
        let universe = create_universe(assets, 120);

        group.throughput(Throughput::Elements(assets as u64));
        group.bench_with_input(BenchmarkId::from_parameter(assets), &assets, |b, _| {
            b.iter(|| compute_beta_matrix(black_box(&universe), "ASSET_0000", &config));
        });
    }

    group.finish();
}

fn bench_simulation(c: &mut Criterion) {
    let params = SimulationParams::new(0.07, 0.12).with_periods(10_000);
    c.bench_function("generate_returns_10k", |b| {
        b.iter(|| generate_returns_seeded(black_box(&params), 7));
    });
}

criterion_group!(benches, bench_historical_metrics, bench_beta_matrix, bench_simulation);
criterion_main!(benches);
