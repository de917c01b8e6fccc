//! Benchmark grid operations performance.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use marga_map::{
    Cell, CellGrid, CoordinateRange, ExportGrid, InputPoint, LocalMap, MapKind, MargaConfig,
    Pose,
};

/// Ground sweep ahead of the vehicle plus one post, like a single LIDAR frame.
fn synthetic_frame(pose: &Pose, num_points: usize) -> Vec<InputPoint> {
    let side = (num_points as f64).sqrt().ceil() as usize;
    let step = 10.0 / side as f64;
    let mut points = Vec::with_capacity(num_points + 20);
    for i in 0..side {
        for j in 0..side {
            let p = pose.transform_point(1.0 + i as f64 * step, -5.0 + j as f64 * step);
            points.push(InputPoint::new(p.x, p.y, -1700));
        }
    }
    let post = pose.transform_point(6.0, 1.0);
    for k in 0..18 {
        points.push(InputPoint::new(post.x, post.y, -1700 + k * 100));
    }
    points
}

fn bench_to_local(c: &mut Criterion) {
    let params = MargaConfig::default();
    let range = CoordinateRange::around_pose(&params, &Pose::default()).unwrap();

    c.bench_function("to_local_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let x = -14.0 + (i % 100) as f64 * 0.28;
                let y = -14.0 + (i / 100) as f64 * 2.8;
                black_box(range.to_local(black_box(x), black_box(y)).ok());
            }
        })
    });
}

fn bench_integrate_frame(c: &mut Criterion) {
    let params = MargaConfig::default();
    let pose = Pose::default();

    let mut group = c.benchmark_group("integrate_frame");
    for num_points in [1_000, 10_000, 50_000] {
        let frame = synthetic_frame(&pose, num_points);
        group.bench_with_input(BenchmarkId::from_parameter(num_points), &frame, |b, frame| {
            let mut map = LocalMap::new(&params, &pose).unwrap();
            b.iter(|| black_box(map.integrate_frame(&pose, frame).unwrap()))
        });
    }
    group.finish();
}

fn bench_reanchor(c: &mut Criterion) {
    let params = MargaConfig::default();
    let range = CoordinateRange::around_pose(&params, &Pose::default()).unwrap();
    let mut grid = CellGrid::new(MapKind::Accumulated, range.clone());
    for coord in range.coords().step_by(3) {
        grid.fuse_at(coord, &Cell::from_point(-1600));
    }
    let mut shifted = range.clone();
    shifted.shift(5.0, 2.0).unwrap();

    c.bench_function("reanchor_375x375", |b| {
        b.iter(|| {
            let mut g = grid.clone();
            black_box(g.reanchor(shifted.clone()))
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let params = MargaConfig::default();
    let pose = Pose::default();
    let mut map = LocalMap::new(&params, &pose).unwrap();
    let frame = synthetic_frame(&pose, 10_000);
    for _ in 0..5 {
        map.integrate_frame(&pose, &frame).unwrap();
    }

    c.bench_function("export_to_bytes", |b| {
        b.iter(|| {
            let export = ExportGrid::from_grid(map.accumulated(), &params.export);
            black_box(export.to_bytes())
        })
    });
}

criterion_group!(
    benches,
    bench_to_local,
    bench_integrate_frame,
    bench_reanchor,
    bench_export
);
criterion_main!(benches);
