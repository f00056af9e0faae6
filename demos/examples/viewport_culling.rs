// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport culling with the quadtree index, fed by absolute positions.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p easel_demos --example viewport_culling`

use std::collections::BTreeMap;

use easel_coords::{CoordinateService, Element, ElementId};
use easel_index::{BoundingBox, QuadTreeConfig, SpatialIndex};
use kurbo::{Point, Size};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn to_bbox(r: kurbo::Rect) -> BoundingBox {
    BoundingBox::from_corners(r.x0, r.y0, r.x1, r.y1)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // One frame at (1000, 1000) holding a column of notes; loose notes scattered on the canvas.
    let frame = ElementId(1);
    let mut containers = BTreeMap::new();
    containers.insert(
        frame,
        Element::new(frame, Point::new(1000.0, 1000.0), Size::new(400.0, 2000.0)),
    );

    let mut elements = vec![containers[&frame].clone()];
    for i in 0..40_u32 {
        elements.push(
            Element::new(
                ElementId(100 + u64::from(i)),
                Point::new(20.0, 20.0 + f64::from(i) * 48.0),
                Size::new(120.0, 40.0),
            )
            .with_owner(frame),
        );
    }
    for i in 0..200_u32 {
        let x = f64::from(i % 20) * 250.0;
        let y = f64::from(i / 20) * 250.0;
        elements.push(Element::new(
            ElementId(1000 + u64::from(i)),
            Point::new(x, y),
            Size::new(80.0, 80.0),
        ));
    }

    let mut coords = CoordinateService::default();
    let mut index = SpatialIndex::with_quadtree(
        BoundingBox::new(0.0, 0.0, 8192.0, 8192.0),
        QuadTreeConfig::default(),
    )
    .expect("canvas bounds are valid");

    for e in &elements {
        match coords.absolute_bounds(e, &containers) {
            Ok(r) => index.insert(e.id, to_bbox(r)),
            Err(err) => eprintln!("skipping {}: {err}", e.id),
        }
    }
    info!(
        elements = index.len(),
        nodes = index.backend().node_count(),
        depth = index.backend().depth(),
        "index built"
    );

    for (x, y) in [(0.0, 0.0), (900.0, 900.0), (1000.0, 2400.0)] {
        let viewport = BoundingBox::new(x, y, 1280.0, 800.0);
        let visible = index.query(viewport);
        let in_frame = visible.iter().filter(|id| (100..1000).contains(&id.0)).count();
        println!(
            "viewport at ({x}, {y}): {} visible, {in_frame} inside the frame",
            visible.len()
        );
    }

    // Drag the frame; its notes follow once the container is invalidated.
    containers.get_mut(&frame).expect("frame exists").position = Point::new(4000.0, 4000.0);
    coords.invalidate_container(frame);
    for e in &elements {
        if e.id != frame && e.owner != Some(frame) {
            continue;
        }
        // The container map holds the frame's current record.
        let record = containers.get(&e.id).unwrap_or(e);
        if let Ok(r) = coords.absolute_bounds(record, &containers) {
            index.update(e.id, to_bbox(r));
        }
    }
    let visible = index.query(BoundingBox::new(900.0, 900.0, 1280.0, 800.0));
    println!("after moving the frame: {} visible at (900, 900)", visible.len());
}
