// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygon utilities: conversion, area, centroid, and Douglas-Peucker simplification.

use kurbo::Point;

/// Areas at or below this magnitude are treated as zero.
const AREA_EPSILON: f64 = 1e-9;

/// Convert a flat `[x0, y0, x1, y1, ...]` array into points.
///
/// A trailing unpaired value is dropped. Non-finite values become `0.0`.
pub fn path_to_polygon(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|xy| Point::new(finite_or_zero(xy[0]), finite_or_zero(xy[1])))
        .collect()
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Signed shoelace area. Positive for clockwise order in y-down canvas space.
pub fn polygon_signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

/// Unsigned shoelace area.
pub fn polygon_area(polygon: &[Point]) -> f64 {
    polygon_signed_area(polygon).abs()
}

/// Area-weighted centroid.
///
/// Zero-area input (collinear points, fewer than three points) falls back to
/// the arithmetic mean of the vertices. An empty slice yields the origin.
pub fn polygon_centroid(polygon: &[Point]) -> Point {
    if polygon.is_empty() {
        return Point::ZERO;
    }
    let n = polygon.len();
    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        twice_area += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    if n >= 3 && twice_area.abs() > AREA_EPSILON {
        let k = 1.0 / (3.0 * twice_area);
        return Point::new(cx * k, cy * k);
    }
    mean(polygon)
}

fn mean(points: &[Point]) -> Point {
    #[allow(
        clippy::cast_precision_loss,
        reason = "Point counts stay far below 2^52."
    )]
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(kurbo::Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / n).to_point()
}

/// Distance from `p` to the closed segment `a`–`b`.
///
/// When the projection of `p` falls inside the segment this is the perpendicular
/// distance; otherwise it is the distance to the nearer endpoint. A degenerate
/// segment reduces to the distance to `a`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq <= f64::EPSILON {
        return (p - a).hypot();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).hypot()
}

/// Douglas-Peucker simplification of an open point sequence.
///
/// Keeps the first and last points and every point whose distance from the
/// chord between its retained neighbours exceeds `tolerance`.
pub fn simplify_polygon(points: &[Point], tolerance: f64) -> Vec<Point> {
    simplify_indices(points.len(), |i| points[i], tolerance)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Indices kept by Douglas-Peucker over `len` points located by `pos`.
///
/// Uses an explicit stack so long freehand strokes cannot overflow the call stack.
/// Output is in ascending order.
pub(crate) fn simplify_indices(
    len: usize,
    pos: impl Fn(usize) -> Point,
    tolerance: f64,
) -> Vec<usize> {
    if len <= 2 {
        return (0..len).collect();
    }
    let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        0.0
    };
    let mut keep = vec![false; len];
    keep[0] = true;
    keep[len - 1] = true;
    let mut stack = vec![(0, len - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let (a, b) = (pos(first), pos(last));
        let mut max_dist = 0.0;
        let mut max_idx = first;
        for i in first + 1..last {
            let d = distance_to_segment(pos(i), a, b);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }
        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((first, max_idx));
            stack.push((max_idx, last));
        }
    }
    keep.iter()
        .enumerate()
        .filter_map(|(i, k)| k.then_some(i))
        .collect()
}
