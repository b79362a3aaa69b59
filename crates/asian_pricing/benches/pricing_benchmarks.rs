//! Criterion benchmarks for path generation and Monte Carlo pricing.
//!
//! Benchmarks cover:
//! - RNG throughput (single draws and batch fills)
//! - GBM batch generation (1K, 10K, 100K paths, 252 steps)
//! - Arithmetic Asian reduction over a pre-generated batch
//! - Closed-form geometric Asian pricing

use asian_core::types::{MarketParameters, OptionType};
use asian_pricing::analytical::geometric_asian_price;
use asian_pricing::mc::AsianMonteCarloPricer;
use asian_pricing::paths::{generate_gbm_paths, SimulationConfig};
use asian_pricing::rng::PricerRng;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn market() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 0.0425, 0.43, 1.0).unwrap()
}

fn config(n_paths: usize) -> SimulationConfig {
    SimulationConfig::builder()
        .n_paths(n_paths)
        .n_steps(252)
        .seed(42)
        .build()
        .unwrap()
}

fn bench_rng(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

fn bench_path_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("gbm_paths");
    group.sample_size(20);
    let market = market();

    for n_paths in [1_000, 10_000, 100_000] {
        let config = config(n_paths);
        group.bench_with_input(BenchmarkId::new("daily_steps", n_paths), &config, |b, cfg| {
            b.iter(|| black_box(generate_gbm_paths(&market, cfg).unwrap()))
        });
    }

    group.finish();
}

fn bench_mc_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc_reduction");
    let market = market();
    let pricer = AsianMonteCarloPricer::arithmetic(market.strike, market.rate, OptionType::Call);

    for n_paths in [1_000, 10_000, 100_000] {
        let batch = generate_gbm_paths(&market, &config(n_paths)).unwrap();
        group.bench_with_input(BenchmarkId::new("arithmetic_call", n_paths), &batch, |b, batch| {
            b.iter(|| black_box(pricer.price(batch).unwrap()))
        });
    }

    group.finish();
}

fn bench_closed_form(c: &mut Criterion) {
    c.bench_function("geometric_asian_closed_form", |b| {
        b.iter(|| {
            geometric_asian_price(
                black_box(100.0),
                black_box(100.0),
                0.0425,
                0.43,
                1.0,
                OptionType::Call,
            )
            .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_rng,
    bench_path_generation,
    bench_mc_reduction,
    bench_closed_form
);
criterion_main!(benches);
