// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-in-shape predicates.
//!
//! Circle, rectangle and ellipse tests count the boundary as inside. Polygon tests
//! are half-open: a point exactly on an edge may report either way depending on
//! which side of the polygon the edge bounds. Degenerate input (polygons with fewer
//! than three points, non-positive radii) is never inside.

use kurbo::{Point, Rect, Vec2};

/// Even-odd point-in-polygon test by horizontal ray casting.
///
/// The polygon is implicitly closed. Regions covered an even number of times
/// (for example the core of a self-intersecting star) count as outside.
pub fn point_in_polygon(pt: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > pt.y) != (b.y > pt.y) {
            let x_cross = (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x;
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Nonzero-winding point-in-polygon test.
///
/// Counts signed edge crossings around the point; any nonzero total is inside.
/// Regions a lasso loops around twice stay selected, which is why
/// [`shape_intersects_polygon`](crate::shape_intersects_polygon) uses this variant.
pub fn point_in_polygon_winding(pt: Point, polygon: &[Point]) -> bool {
    winding_number(pt, polygon) != 0
}

/// Signed winding number of `polygon` around `pt`.
pub fn winding_number(pt: Point, polygon: &[Point]) -> i32 {
    let n = polygon.len();
    if n < 3 {
        return 0;
    }
    let mut winding = 0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let side = (b - a).cross(pt - a);
        if a.y <= pt.y {
            if b.y > pt.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= pt.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Whether `pt` lies in the closed disc around `center`.
pub fn point_in_circle(pt: Point, center: Point, radius: f64) -> bool {
    if radius.is_nan() || radius < 0.0 {
        return false;
    }
    (pt - center).hypot2() <= radius * radius
}

/// Whether `pt` lies in `rect`, edges included. The rect may have negative size.
pub fn point_in_rectangle(pt: Point, rect: Rect) -> bool {
    let r = rect.abs();
    r.x0 <= pt.x && pt.x <= r.x1 && r.y0 <= pt.y && pt.y <= r.y1
}

/// Whether `pt` lies in the ellipse with the given semi-axes, rotated by
/// `rotation` radians (clockwise in y-down canvas space) about its center.
pub fn point_in_ellipse(pt: Point, center: Point, radii: Vec2, rotation: f64) -> bool {
    if radii.x <= 0.0 || radii.y <= 0.0 || radii.x.is_nan() || radii.y.is_nan() {
        return false;
    }
    let d = pt - center;
    let (sin, cos) = (-rotation).sin_cos();
    let local = Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
    let nx = local.x / radii.x;
    let ny = local.y / radii.y;
    nx * nx + ny * ny <= 1.0
}
