// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lasso selection: quadtree broad phase, then sample points against the lasso polygon.
//!
//! Run:
//! - `cargo run -p easel_demos --example lasso_select`

use easel_geom::{
    Shape, path_to_polygon, polygon_area, polygon_centroid, shape_intersects_polygon,
    simplify_polygon,
};
use easel_index::{BoundingBox, QuadTreeConfig, SpatialIndex};
use kurbo::{Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let shapes = [
        ("note", Shape::Rectangle(Rect::new(40.0, 40.0, 160.0, 160.0))),
        (
            "ball",
            Shape::Circle {
                center: Point::new(300.0, 100.0),
                radius: 50.0,
            },
        ),
        (
            "badge",
            Shape::Star {
                center: Point::new(120.0, 320.0),
                outer_radius: 60.0,
                inner_radius: 25.0,
                points: 5,
            },
        ),
        (
            "lens",
            Shape::Ellipse {
                center: Point::new(420.0, 320.0),
                radii: Vec2::new(80.0, 20.0),
                rotation: 0.6,
            },
        ),
        ("warning", Shape::Triangle(Rect::new(500.0, 40.0, 600.0, 140.0))),
        (
            "arrow",
            Shape::Connector(vec![Point::new(160.0, 100.0), Point::new(250.0, 100.0)]),
        ),
    ];

    let mut index = SpatialIndex::with_quadtree(
        BoundingBox::new(0.0, 0.0, 1024.0, 1024.0),
        QuadTreeConfig::default(),
    )
    .expect("canvas bounds are valid");
    for (i, (_, shape)) in shapes.iter().enumerate() {
        let r = shape.bounds();
        index.insert(i, BoundingBox::from_corners(r.x0, r.y0, r.x1, r.y1));
    }

    // A hand-drawn loop around the upper-left area, as raw pointer samples.
    let raw: Vec<f64> = (0..=72_i32)
        .flat_map(|k| {
            let a = f64::from(k) * 5.0_f64.to_radians();
            let wobble = if k % 2 == 0 { 3.0 } else { -3.0 };
            [200.0 + (190.0 + wobble) * a.cos(), 170.0 + (150.0 + wobble) * a.sin()]
        })
        .collect();
    let lasso = path_to_polygon(&raw);
    let lasso = simplify_polygon(&lasso, 4.0);
    println!(
        "lasso: {} points, area {:.0}, centroid {:?}",
        lasso.len(),
        polygon_area(&lasso),
        polygon_centroid(&lasso)
    );

    let bounds = lasso
        .iter()
        .fold(Rect::from_points(lasso[0], lasso[0]), |acc, p| acc.union_pt(*p));
    let candidates = index.query(BoundingBox::from_corners(
        bounds.x0, bounds.y0, bounds.x1, bounds.y1,
    ));
    for i in candidates {
        let (name, shape) = &shapes[i];
        let selected = shape_intersects_polygon(shape, &lasso);
        println!("{name:>8}: {}", if selected { "selected" } else { "missed" });
    }
}
