use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orbitview::kepler::{parabolic_anomaly, AnomalySolver};
use orbitview::orbit_type::{OrbitShape, Regime};
use orbitview::propagator::OrbitPropagator;

/// Uniform random in [-π, π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    (rng.random::<f64>() - 0.5) * std::f64::consts::TAU
}

/// Typical regime: e ∈ [0.0, 0.7]
fn bench_elliptic_typical(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let solver = AnomalySolver::default();
    let samples = 10_000usize;

    c.bench_function("solve_kepler_equation/elliptic_e<=0.7", |b| {
        b.iter_batched(
            || {
                // Pre-generate inputs to avoid RNG cost in the timed section
                (0..samples)
                    .map(|_| (rand_angle(&mut rng), rng.random_range(0.0..=0.7)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (m, e) in cases {
                    black_box(solver.solve(Regime::Elliptic, black_box(m), black_box(e)));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// High-eccentricity (still elliptic): e ∈ [0.9, 0.995)
fn bench_elliptic_high_e(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);
    let solver = AnomalySolver::default();
    let samples = 10_000usize;

    c.bench_function("solve_kepler_equation/elliptic_0.9..0.995", |b| {
        b.iter_batched(
            || {
                (0..samples)
                    .map(|_| (rand_angle(&mut rng), rng.random_range(0.9..0.995)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (m, e) in cases {
                    black_box(solver.solve(Regime::Elliptic, black_box(m), black_box(e)));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Hyperbolic regime: e ∈ [1.005, 3], |M| up to 50
fn bench_hyperbolic(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);
    let solver = AnomalySolver::default();
    let samples = 10_000usize;

    c.bench_function("solve_kepler_equation/hyperbolic", |b| {
        b.iter_batched(
            || {
                (0..samples)
                    .map(|_| (rng.random_range(-50.0..50.0), rng.random_range(1.005..3.0)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (m, e) in cases {
                    black_box(solver.solve(Regime::Hyperbolic, black_box(m), black_box(e)));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Closed-form Barker solution
fn bench_parabolic(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let samples = 10_000usize;

    c.bench_function("solve_kepler_equation/parabolic", |b| {
        b.iter_batched(
            || {
                (0..samples)
                    .map(|_| rng.random_range(-100.0..100.0))
                    .collect::<Vec<f64>>()
            },
            |cases| {
                for mp in cases {
                    black_box(parabolic_anomaly(black_box(mp)));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Full state evaluation over one frame worth of bodies.
fn bench_propagator(c: &mut Criterion) {
    let shapes = [
        OrbitShape::new(5.0, 0.5, 10.0).unwrap(),
        OrbitShape::new(2.0, 1.0, 10.0).unwrap(),
        OrbitShape::new(5.0, 1.3, 10.0).unwrap(),
    ];
    let propagators: Vec<_> = shapes.iter().map(OrbitPropagator::new).collect();

    c.bench_function("solve_kepler_equation/propagator_state", |b| {
        b.iter(|| {
            for p in &propagators {
                black_box(p.state(black_box(3.7)));
            }
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_elliptic_typical, bench_elliptic_high_e, bench_hyperbolic, bench_parabolic, bench_propagator
);
criterion_main!(benches);
