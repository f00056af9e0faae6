// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eraser: smooth a fast pointer path, then sweep a round brush along it.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p easel_demos --example eraser_sweep`

use easel_geom::{StrokePoint, catmull_rom_spline, douglas_peucker};
use easel_index::{BoundingBox, BoundingBoxIndex};
use tracing_subscriber::EnvFilter;

const BRUSH_RADIUS: f64 = 10.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut eraser = BoundingBoxIndex::new();
    for i in 0..12_u32 {
        let x = f64::from(i % 4) * 120.0;
        let y = f64::from(i / 4) * 120.0;
        eraser.insert(i, BoundingBox::new(x, y, 60.0, 30.0));
    }

    // Sparse samples, as a quick flick of the pointer would produce.
    let samples = [
        StrokePoint::new(-20.0, 10.0, 0.0),
        StrokePoint::new(150.0, 60.0, 16.0),
        StrokePoint::new(300.0, 130.0, 32.0),
        StrokePoint::new(420.0, 250.0, 48.0),
    ];
    let smooth = catmull_rom_spline(&samples, 0.5);
    let path: Vec<(f64, f64)> = douglas_peucker(&smooth, 1.0)
        .iter()
        .map(|p| (p.x, p.y))
        .collect();
    println!("{} samples -> {} smoothed -> {} swept", samples.len(), smooth.len(), path.len());

    let hits = eraser.find_path_intersections(&path, BRUSH_RADIUS);
    println!("erasing {hits:?}");
    for id in hits {
        eraser.remove(id);
    }

    let tap = eraser.find_intersections(365.0, 255.0, BRUSH_RADIUS);
    println!("tap at (365, 255) hits {tap:?}; {} elements left", eraser.len());
}
