// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use easel_geom::{
    Shape, StrokePoint, catmull_rom_spline, douglas_peucker, shape_intersects_polygon,
    smooth_and_simplify,
};
use kurbo::{Point, Rect};

fn wavy_stroke(n: usize) -> Vec<StrokePoint> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            StrokePoint::new(t * 6.0, (t * 0.2).sin() * 40.0, t * 8.0).with_pressure(0.5)
        })
        .collect()
}

fn lasso(n: usize, r: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * core::f64::consts::TAU;
            Point::new(500.0 + r * a.cos(), 500.0 + r * a.sin())
        })
        .collect()
}

fn bench_strokes(c: &mut Criterion) {
    let mut group = c.benchmark_group("stroke");
    for &n in &[32usize, 256, 1024] {
        let stroke = wavy_stroke(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("catmull_rom_n{n}"), |b| {
            b.iter(|| black_box(catmull_rom_spline(black_box(&stroke), 0.5).len()))
        });
        let dense = catmull_rom_spline(&stroke, 0.5);
        group.bench_function(format!("douglas_peucker_n{n}"), |b| {
            b.iter(|| black_box(douglas_peucker(black_box(&dense), 1.0).len()))
        });
        group.bench_function(format!("smooth_and_simplify_n{n}"), |b| {
            b.iter(|| black_box(smooth_and_simplify(black_box(&stroke), 0.5, 1.0).len()))
        });
    }
    group.finish();
}

fn bench_lasso(c: &mut Criterion) {
    let mut group = c.benchmark_group("lasso");
    let shapes: Vec<Shape> = (0..400)
        .map(|i| {
            let x = (i % 20) as f64 * 50.0;
            let y = (i / 20) as f64 * 50.0;
            match i % 3 {
                0 => Shape::Rectangle(Rect::new(x, y, x + 30.0, y + 30.0)),
                1 => Shape::Circle {
                    center: Point::new(x + 15.0, y + 15.0),
                    radius: 15.0,
                },
                _ => Shape::Star {
                    center: Point::new(x + 15.0, y + 15.0),
                    outer_radius: 15.0,
                    inner_radius: 6.0,
                    points: 5,
                },
            }
        })
        .collect();
    let polygon = lasso(128, 300.0);
    group.throughput(Throughput::Elements(shapes.len() as u64));
    group.bench_function("select_400_shapes", |b| {
        b.iter(|| {
            let hits = shapes
                .iter()
                .filter(|s| shape_intersects_polygon(s, black_box(&polygon)))
                .count();
            black_box(hits)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_strokes, bench_lasso);
criterion_main!(benches);
