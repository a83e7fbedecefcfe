use criterion::{Criterion, criterion_group, criterion_main};
use exact_predicates::budget::InSphereF64;
use exact_predicates::{PredicateKind, sign};
use std::hint::black_box;

const SAMPLE_COUNT: usize = 2_000;

type Sample = [f64; 15];

fn insphere_evaluator_batch(evaluator: &mut InSphereF64, samples: &[Sample]) {
    for sample in samples {
        black_box(evaluator.sign(sample));
    }
}

fn insphere_one_shot_batch(samples: &[Sample]) {
    for sample in samples {
        black_box(sign(PredicateKind::InSphere, sample));
    }
}

fn insphere_robust_batch(samples: &[Sample]) {
    let point = |s: &Sample, i: usize| robust::Coord3D {
        x: s[3 * i],
        y: s[3 * i + 1],
        z: s[3 * i + 2],
    };
    for s in samples {
        black_box(robust::insphere(
            point(s, 0),
            point(s, 1),
            point(s, 2),
            point(s, 3),
            point(s, 4),
        ));
    }
}

fn bench_insphere(c: &mut Criterion) {
    for (name, samples) in [
        ("random", generate_samples(SAMPLE_COUNT, false)),
        ("cospherical", generate_samples(SAMPLE_COUNT, true)),
    ] {
        let mut group = c.benchmark_group(format!("insphere_{name}"));
        let mut evaluator = InSphereF64::new();

        group.bench_function("insphere_evaluator", |b| {
            b.iter(|| insphere_evaluator_batch(&mut evaluator, black_box(&samples)))
        });

        group.bench_function("insphere_one_shot", |b| {
            b.iter(|| insphere_one_shot_batch(black_box(&samples)))
        });

        group.bench_function("insphere_robust", |b| {
            b.iter(|| insphere_robust_batch(black_box(&samples)))
        });

        group.finish();
    }
}

criterion_group!(benches, bench_insphere);
criterion_main!(benches);

/// With `snap` set, every point is an integer point on a sphere of radius 5
/// around a random integer center, so each sample needs the exact tier.
fn generate_samples(count: usize, snap: bool) -> Vec<Sample> {
    const SPHERE: [[f64; 3]; 6] = [
        [3.0, 4.0, 0.0],
        [0.0, 3.0, 4.0],
        [4.0, 0.0, 3.0],
        [-5.0, 0.0, 0.0],
        [0.0, 0.0, -5.0],
        [0.0, -4.0, -3.0],
    ];
    let mut state = 0x1234_5678_9abc_def0u64;
    (0..count)
        .map(|_| {
            let center = [lcg(&mut state), lcg(&mut state), lcg(&mut state)].map(f64::round);
            let mut sample = [0.0; 15];
            for (point, coords) in sample.chunks_mut(3).enumerate() {
                let which = (lcg(&mut state).abs() as usize + point) % SPHERE.len();
                for (axis, coord) in coords.iter_mut().enumerate() {
                    *coord = if snap {
                        center[axis] + SPHERE[which][axis]
                    } else {
                        lcg(&mut state)
                    };
                }
            }
            sample
        })
        .collect()
}

fn lcg(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    let val = ((*state >> 32) as f64) / (u32::MAX as f64);
    (val * 2000.0) - 1000.0
}
