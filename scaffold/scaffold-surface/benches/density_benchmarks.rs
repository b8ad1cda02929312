//! Benchmarks for density field construction and extraction.
//!
//! Run with: cargo bench -p scaffold-surface

#![allow(missing_docs, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nalgebra::Point3;
use scaffold_surface::{DensityField, GridSpec, IsosurfaceExtractor, MarchingCubes};
use scaffold_types::Strut;

/// A small cubic frame: 12 edges of a cube of side 2.
fn cube_frame() -> Vec<Strut> {
    let c = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
    let corners = [
        c(-1.0, -1.0, -1.0),
        c(1.0, -1.0, -1.0),
        c(1.0, 1.0, -1.0),
        c(-1.0, 1.0, -1.0),
        c(-1.0, -1.0, 1.0),
        c(1.0, -1.0, 1.0),
        c(1.0, 1.0, 1.0),
        c(-1.0, 1.0, 1.0),
    ];
    let edges = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    edges
        .iter()
        .map(|&(i, j)| Strut::new(corners[i], corners[j], 0.25))
        .collect()
}

fn bench_sampling(c: &mut Criterion) {
    let struts = cube_frame();
    let mut group = c.benchmark_group("density_sampling");
    for half_extent in [8usize, 16, 24] {
        #[allow(clippy::cast_precision_loss)]
        let spec = GridSpec::new(Point3::origin(), 1.5 / half_extent as f64, half_extent);
        group.bench_with_input(
            BenchmarkId::new("sequential", half_extent),
            &spec,
            |b, spec| b.iter(|| DensityField::sample(black_box(spec), &struts, 0.5, false)),
        );
        group.bench_with_input(
            BenchmarkId::new("parallel", half_extent),
            &spec,
            |b, spec| b.iter(|| DensityField::sample(black_box(spec), &struts, 0.5, true)),
        );
    }
    group.finish();
}

fn bench_blur(c: &mut Criterion) {
    let spec = GridSpec::new(Point3::origin(), 0.1, 24);
    let field = DensityField::sample(&spec, &cube_frame(), 0.5, true);
    c.bench_function("blur_49", |b| {
        b.iter(|| {
            let mut f = field.clone();
            f.blur(true);
            black_box(f)
        });
    });
}

fn bench_extraction(c: &mut Criterion) {
    let spec = GridSpec::new(Point3::origin(), 0.1, 24);
    let mut field = DensityField::sample(&spec, &cube_frame(), 0.5, true);
    field.blur(true);
    let extractor = MarchingCubes::new();
    c.bench_function("marching_cubes_49", |b| {
        b.iter(|| {
            extractor
                .extract(black_box(field.values()), field.dims(), 0.0, field.spacing())
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_sampling, bench_blur, bench_extraction);
criterion_main!(benches);
