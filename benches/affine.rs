//! Benchmarks for affine application and decomposition.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use affinum::{apply, apply_points, decompose, AffineSpec, Mat2, Matrix, Point2, Vec2};

/// Generates points along a spiral.
fn generate_spiral(num_points: usize) -> Vec<Point2<f64>> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64 * 8.0 * std::f64::consts::PI;
            Point2::new(t * t.cos(), t * t.sin())
        })
        .collect()
}

fn sample_spec() -> AffineSpec<f64> {
    AffineSpec::new(
        Mat2::rotation(0.7) * Mat2::shear_x(0.4) * Mat2::scale(1.5, 0.8),
        Some(Vec2::new(12.0, -3.0)),
    )
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    let spec = sample_spec();

    for size in [100, 1000, 10000, 100000] {
        let points = generate_spiral(size);
        let coords = Matrix::from_points(&points);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("forward", size), &coords, |b, m| {
            b.iter(|| apply(black_box(m), black_box(&spec), false))
        });

        group.bench_with_input(BenchmarkId::new("inverse", size), &coords, |b, m| {
            b.iter(|| apply(black_box(m), black_box(&spec), true))
        });

        group.bench_with_input(BenchmarkId::new("points", size), &points, |b, pts| {
            b.iter(|| apply_points(black_box(pts), black_box(&spec), false))
        });
    }

    group.finish();
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");

    let general = sample_spec().to_matrix();
    group.bench_function("general", |b| b.iter(|| decompose(black_box(&general))));

    let identity = Matrix::<f64>::identity(3);
    group.bench_function("identity", |b| b.iter(|| decompose(black_box(&identity))));

    group.finish();
}

criterion_group!(benches, bench_apply, bench_decompose);
criterion_main!(benches);
