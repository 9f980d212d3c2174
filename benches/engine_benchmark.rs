use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use trade_digitisation_engine::core::params::InputParameters;
use trade_digitisation_engine::engine::calculation::CalculationEngine;
use trade_digitisation_engine::simulation::sensitivity::sensitivity_sweep;
use trade_digitisation_engine::simulation::stress_test::{
    generate_random_parameters, ParameterRanges,
};
use trade_digitisation_engine::snapshot::codec::SnapshotCodec;

fn bench_compute_defaults(c: &mut Criterion) {
    let params = InputParameters::default();

    c.bench_function("compute_defaults", |b| {
        b.iter(|| CalculationEngine::compute(black_box(&params)))
    });
}

fn bench_compute_1000_random(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sets: Vec<InputParameters> = (0..1000)
        .map(|_| generate_random_parameters(&ParameterRanges::default(), &mut rng))
        .collect();

    c.bench_function("compute_1000_random", |b| {
        b.iter(|| {
            for params in &sets {
                black_box(CalculationEngine::compute(black_box(params)));
            }
        })
    });
}

fn bench_snapshot_round_trip(c: &mut Criterion) {
    let params = InputParameters::default();
    let text = SnapshotCodec::encode_to_string(&params);

    c.bench_function("snapshot_decode_str", |b| {
        b.iter(|| SnapshotCodec::decode_str(black_box(&text), &params))
    });
}

fn bench_sweep_100_steps(c: &mut Criterion) {
    let params = InputParameters::default();

    c.bench_function("sweep_100_steps", |b| {
        b.iter(|| sensitivity_sweep(black_box(&params), "termExtension", 0.0, 120.0, 100))
    });
}

criterion_group!(
    benches,
    bench_compute_defaults,
    bench_compute_1000_random,
    bench_snapshot_round_trip,
    bench_sweep_100_steps
);
criterion_main!(benches);
