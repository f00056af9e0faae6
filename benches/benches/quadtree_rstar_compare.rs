// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use easel_index::{BoundingBox, QuadTreeConfig, SpatialIndex};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

const WORLD: f64 = 2048.0;

fn gen_grid_boxes(n: usize, cell: f64) -> Vec<BoundingBox> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(BoundingBox::new(x as f64 * cell, y as f64 * cell, cell, cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[BoundingBox]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|b| Rectangle::from_corners([b.min_x(), b.min_y()], [b.max_x(), b.max_y()]))
        .collect()
}

fn bench_quadtree_vs_rstar(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_vs_rstar");
    for &n in &[64usize, 128] {
        let boxes = gen_grid_boxes(n, WORLD / n as f64);
        let viewport = BoundingBox::new(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("quadtree_build_query_n{n}"), |b| {
            b.iter_batched(
                || {
                    SpatialIndex::<u32>::with_quadtree(
                        BoundingBox::new(0.0, 0.0, WORLD, WORLD),
                        QuadTreeConfig::default(),
                    )
                    .expect("valid bounds")
                },
                |mut idx| {
                    for (i, bb) in boxes.iter().copied().enumerate() {
                        idx.insert(i as u32, bb);
                    }
                    black_box(idx.query(viewport).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&boxes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [viewport.min_x(), viewport.min_y()],
                        [viewport.max_x(), viewport.max_y()],
                    );
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quadtree_vs_rstar);
criterion_main!(benches);
