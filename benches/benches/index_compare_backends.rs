// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use easel_index::{BoundingBox, BoundingBoxIndex, Index, QuadTreeConfig, SpatialIndex};

const WORLD: f64 = 4096.0;

fn gen_grid_boxes(n: usize, cell: f64) -> Vec<BoundingBox> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(BoundingBox::new(x as f64 * cell, y as f64 * cell, cell, cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_boxes(count: usize, size: f64) -> Vec<BoundingBox> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            BoundingBox::new(
                rng.next_f64() * (WORLD - size),
                rng.next_f64() * (WORLD - size),
                size,
                size,
            )
        })
        .collect()
}

fn quadtree() -> SpatialIndex<u32> {
    SpatialIndex::with_quadtree(
        BoundingBox::new(0.0, 0.0, WORLD, WORLD),
        QuadTreeConfig::default(),
    )
    .expect("valid bounds")
}

fn bench_build_and_cull(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_cull");
    let viewport = BoundingBox::new(1000.0, 1000.0, 800.0, 600.0);
    for &n in &[32usize, 64, 128] {
        let boxes = gen_grid_boxes(n, WORLD / n as f64);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("quadtree_n{n}"), |b| {
            b.iter_batched(
                quadtree,
                |mut idx| {
                    for (i, bb) in boxes.iter().copied().enumerate() {
                        idx.insert(i as u32, bb);
                    }
                    black_box(idx.query(viewport).len());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("flatvec_n{n}"), |b| {
            b.iter_batched(
                Index::<u32>::new,
                |mut idx| {
                    for (i, bb) in boxes.iter().copied().enumerate() {
                        idx.insert(i as u32, bb);
                    }
                    black_box(idx.query(viewport).len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("cull_query");
    let boxes = gen_random_boxes(10_000, 24.0);
    let mut tree = quadtree();
    let mut flat = Index::<u32>::new();
    for (i, bb) in boxes.iter().copied().enumerate() {
        tree.insert(i as u32, bb);
        flat.insert(i as u32, bb);
    }
    let viewport = BoundingBox::new(2000.0, 2000.0, 1280.0, 800.0);
    group.bench_function("quadtree_random_10k", |b| {
        b.iter(|| black_box(tree.query(black_box(viewport)).len()))
    });
    group.bench_function("flatvec_random_10k", |b| {
        b.iter(|| black_box(flat.query(black_box(viewport)).len()))
    });
    group.bench_function("quadtree_point_10k", |b| {
        b.iter(|| black_box(tree.query_point(black_box(2048.0), black_box(2048.0)).len()))
    });
    group.finish();
}

fn bench_drag_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_updates");
    let boxes = gen_random_boxes(5_000, 24.0);
    group.bench_function("quadtree_move_100", |b| {
        b.iter_batched(
            || {
                let mut idx = quadtree();
                for (i, bb) in boxes.iter().copied().enumerate() {
                    idx.insert(i as u32, bb);
                }
                idx
            },
            |mut idx| {
                for step in 0..100_u32 {
                    let bb = boxes[step as usize];
                    idx.update(step, BoundingBox::new(bb.x + 3.0, bb.y + 3.0, bb.width, bb.height));
                }
                black_box(idx.len());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_eraser(c: &mut Criterion) {
    let mut group = c.benchmark_group("eraser");
    let mut eraser = BoundingBoxIndex::new();
    for (i, bb) in gen_random_boxes(2_000, 24.0).into_iter().enumerate() {
        eraser.insert(i as u32, bb);
    }
    let path: Vec<(f64, f64)> = (0..64).map(|i| (i as f64 * 40.0, 1000.0 + (i % 3) as f64 * 10.0)).collect();
    group.bench_function("path_64_samples", |b| {
        b.iter(|| black_box(eraser.find_path_intersections(black_box(&path), 12.0).len()))
    });
    group.bench_function("point", |b| {
        b.iter(|| black_box(eraser.find_intersections(black_box(1500.0), 1000.0, 12.0).len()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build_and_cull,
    bench_query_only,
    bench_drag_updates,
    bench_eraser
);
criterion_main!(benches);
