// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape sampling for lasso selection.
//!
//! Exact shape/polygon intersection is expensive and rarely needed for a lasso.
//! Each [`Shape`] is reduced to a handful of representative points instead, and a
//! shape counts as selected when any of those points falls inside the lasso.
//! Thin slivers a lasso clips without covering a sample are missed; tools accept that.

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Point, Rect, Vec2};

use crate::predicates::point_in_polygon_winding;

/// Samples closer than this are merged.
pub const DEDUPE_DISTANCE: f64 = 0.1;

/// Upper bound on vertices taken from a stroke or connector path.
pub const MAX_PATH_SAMPLES: usize = 24;

/// Angular step between circumference samples, in degrees.
const RING_STEP_DEGREES: u32 = 30;

/// Inner ring radius as a fraction of the outer radius.
const INNER_RING: f64 = 0.7;

/// Geometry of a canvas element, as far as hit-testing is concerned.
///
/// Coordinates are absolute canvas units. Resolve container-relative positions
/// before building a shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Axis-aligned rectangle (also used for sticky notes, text, images).
    Rectangle(Rect),
    /// Circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius. Negative or NaN radii collapse to the center.
        radius: f64,
    },
    /// Ellipse rotated about its center.
    Ellipse {
        /// Center point.
        center: Point,
        /// Semi-axes along the unrotated x and y directions.
        radii: Vec2,
        /// Rotation in radians.
        rotation: f64,
    },
    /// Isosceles triangle inscribed in a rectangle, apex at the top-center.
    Triangle(Rect),
    /// Star polygon.
    Star {
        /// Center point.
        center: Point,
        /// Radius of the tips.
        outer_radius: f64,
        /// Radius of the notches between tips.
        inner_radius: f64,
        /// Number of tips. Values below 3 are raised to 3.
        points: u32,
    },
    /// Freehand stroke, as its sampled path.
    Stroke(Vec<Point>),
    /// Connector or arrow, as its routed path.
    Connector(Vec<Point>),
}

impl Shape {
    /// Axis-aligned bounds, suitable for inserting into a spatial index.
    ///
    /// Empty paths report [`Rect::ZERO`].
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rectangle(r) | Self::Triangle(r) => r.abs(),
            Self::Circle { center, radius } => {
                let r = radius.max(0.0);
                Rect::from_center_size(*center, (2.0 * r, 2.0 * r))
            }
            Self::Ellipse {
                center,
                radii,
                rotation,
            } => {
                let (sin, cos) = rotation.sin_cos();
                let (rx, ry) = (radii.x.max(0.0), radii.y.max(0.0));
                let half_w = ((rx * cos).powi(2) + (ry * sin).powi(2)).sqrt();
                let half_h = ((rx * sin).powi(2) + (ry * cos).powi(2)).sqrt();
                Rect::from_center_size(*center, (2.0 * half_w, 2.0 * half_h))
            }
            Self::Star {
                center,
                outer_radius,
                inner_radius,
                ..
            } => {
                let r = outer_radius.max(*inner_radius).max(0.0);
                Rect::from_center_size(*center, (2.0 * r, 2.0 * r))
            }
            Self::Stroke(path) | Self::Connector(path) => {
                let mut iter = path.iter();
                let Some(first) = iter.next() else {
                    return Rect::ZERO;
                };
                iter.fold(Rect::from_points(*first, *first), |acc, p| {
                    acc.union_pt(*p)
                })
            }
        }
    }
}

/// Representative points for `shape`.
///
/// - Rectangles: 4 corners, 4 edge midpoints, 4 interior quarter points and the center.
/// - Circles and ellipses: the rim every 30°, an inner ring at 70% radius, and the center.
/// - Triangles and stars: vertices plus edge midpoints.
/// - Strokes: the path thinned to at most [`MAX_PATH_SAMPLES`] vertices, first and last kept.
/// - Connectors: the thinned path plus the midpoint of each remaining segment.
///
/// Samples within [`DEDUPE_DISTANCE`] of an earlier sample and non-finite samples are dropped.
pub fn shape_check_points(shape: &Shape) -> Vec<Point> {
    let raw = match shape {
        Shape::Rectangle(r) => rectangle_points(r.abs()),
        Shape::Circle { center, radius } => {
            let r = radius.max(0.0);
            ellipse_points(*center, Vec2::new(r, r), 0.0)
        }
        Shape::Ellipse {
            center,
            radii,
            rotation,
        } => ellipse_points(*center, *radii, *rotation),
        Shape::Triangle(r) => {
            let r = r.abs();
            with_edge_midpoints(&[
                Point::new(r.center().x, r.y0),
                Point::new(r.x1, r.y1),
                Point::new(r.x0, r.y1),
            ])
        }
        Shape::Star {
            center,
            outer_radius,
            inner_radius,
            points,
        } => with_edge_midpoints(&star_vertices(
            *center,
            *outer_radius,
            *inner_radius,
            *points,
        )),
        Shape::Stroke(path) => downsample(path),
        Shape::Connector(path) => {
            let thinned = downsample(path);
            let mut out = thinned.clone();
            out.extend(thinned.windows(2).map(|s| s[0].midpoint(s[1])));
            out
        }
    };
    dedupe(raw)
}

/// Whether any sample point of `shape` lies inside the lasso `polygon`.
///
/// Uses the nonzero winding rule, so areas a lasso loops over twice still select.
/// Lassos with fewer than three points select nothing.
pub fn shape_intersects_polygon(shape: &Shape, polygon: &[Point]) -> bool {
    let Some((first, rest)) = polygon.split_first() else {
        return false;
    };
    if rest.len() < 2 {
        return false;
    }
    let lasso_bounds = rest
        .iter()
        .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p));
    if !rects_touch(lasso_bounds, shape.bounds()) {
        return false;
    }
    shape_check_points(shape)
        .into_iter()
        .any(|p| point_in_polygon_winding(p, polygon))
}

fn rects_touch(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

fn rectangle_points(r: Rect) -> Vec<Point> {
    let xs = [r.x0, r.x0 + r.width() * 0.25, r.center().x, r.x0 + r.width() * 0.75, r.x1];
    let ys = [r.y0, r.y0 + r.height() * 0.25, r.center().y, r.y0 + r.height() * 0.75, r.y1];
    let mut out = Vec::with_capacity(13);
    // Corners and edge midpoints.
    for (xi, yi) in [(0, 0), (4, 0), (4, 4), (0, 4), (2, 0), (4, 2), (2, 4), (0, 2)] {
        out.push(Point::new(xs[xi], ys[yi]));
    }
    // Quarter points and center.
    for (xi, yi) in [(1, 1), (3, 1), (3, 3), (1, 3), (2, 2)] {
        out.push(Point::new(xs[xi], ys[yi]));
    }
    out
}

fn ellipse_points(center: Point, radii: Vec2, rotation: f64) -> Vec<Point> {
    let (rot_sin, rot_cos) = rotation.sin_cos();
    let (rx, ry) = (radii.x.max(0.0), radii.y.max(0.0));
    let place = |scale: f64, angle: f64| {
        let (sin, cos) = angle.sin_cos();
        let (lx, ly) = (rx * scale * cos, ry * scale * sin);
        center + Vec2::new(lx * rot_cos - ly * rot_sin, lx * rot_sin + ly * rot_cos)
    };
    let steps = 360 / RING_STEP_DEGREES;
    let mut out = Vec::with_capacity(2 * steps as usize + 1);
    for scale in [1.0, INNER_RING] {
        for k in 0..steps {
            out.push(place(scale, f64::from(k * RING_STEP_DEGREES).to_radians()));
        }
    }
    out.push(center);
    out
}

fn star_vertices(center: Point, outer: f64, inner: f64, tips: u32) -> Vec<Point> {
    let tips = tips.max(3);
    let step = PI / f64::from(tips);
    (0..2 * tips)
        .map(|k| {
            let r = if k % 2 == 0 { outer } else { inner };
            let angle = -FRAC_PI_2 + f64::from(k) * step;
            center + Vec2::from_angle(angle) * r
        })
        .collect()
}

fn with_edge_midpoints(vertices: &[Point]) -> Vec<Point> {
    let n = vertices.len();
    let mut out = Vec::with_capacity(2 * n);
    out.extend_from_slice(vertices);
    for i in 0..n {
        out.push(vertices[i].midpoint(vertices[(i + 1) % n]));
    }
    out
}

fn downsample(path: &[Point]) -> Vec<Point> {
    if path.len() <= MAX_PATH_SAMPLES {
        return path.to_vec();
    }
    let step = path.len().div_ceil(MAX_PATH_SAMPLES);
    let mut out: Vec<Point> = path.iter().copied().step_by(step).collect();
    if (path.len() - 1) % step != 0
        && let Some(last) = path.last()
    {
        out.push(*last);
    }
    out
}

fn dedupe(raw: Vec<Point>) -> Vec<Point> {
    let min_sq = DEDUPE_DISTANCE * DEDUPE_DISTANCE;
    let mut out: Vec<Point> = Vec::with_capacity(raw.len());
    for p in raw {
        if !p.is_finite() {
            continue;
        }
        if out.iter().all(|q| (p - *q).hypot2() >= min_sq) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lasso(r: Rect) -> Vec<Point> {
        vec![
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    #[test]
    fn rectangle_has_thirteen_samples() {
        let pts = shape_check_points(&Shape::Rectangle(Rect::new(0.0, 0.0, 100.0, 40.0)));
        assert_eq!(pts.len(), 13);
        assert!(pts.contains(&Point::new(50.0, 20.0)));
        assert!(pts.contains(&Point::new(25.0, 10.0)));
        assert!(pts.contains(&Point::new(100.0, 40.0)));
    }

    #[test]
    fn degenerate_rectangle_collapses() {
        let pts = shape_check_points(&Shape::Rectangle(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(pts, vec![Point::new(5.0, 5.0)]);
    }

    #[test]
    fn circle_has_two_rings_and_center() {
        let pts = shape_check_points(&Shape::Circle {
            center: Point::new(10.0, 10.0),
            radius: 20.0,
        });
        assert_eq!(pts.len(), 25);
        assert!(pts.iter().any(|p| (p.x - 30.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9));
        assert!(pts.iter().any(|p| (p.x - 24.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9));
    }

    #[test]
    fn rotated_ellipse_samples_follow_rotation() {
        let shape = Shape::Ellipse {
            center: Point::ZERO,
            radii: Vec2::new(40.0, 10.0),
            rotation: FRAC_PI_2,
        };
        let pts = shape_check_points(&shape);
        // The major axis now runs vertically.
        assert!(pts.iter().any(|p| p.x.abs() < 1e-9 && (p.y - 40.0).abs() < 1e-9));
        let b = shape.bounds();
        assert!((b.height() - 80.0).abs() < 1e-9);
        assert!((b.width() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn triangle_and_star_include_midpoints() {
        let tri = shape_check_points(&Shape::Triangle(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(tri.len(), 6);
        assert!(tri.contains(&Point::new(5.0, 0.0)));
        assert!(tri.contains(&Point::new(5.0, 10.0)));

        let star = shape_check_points(&Shape::Star {
            center: Point::ZERO,
            outer_radius: 50.0,
            inner_radius: 20.0,
            points: 5,
        });
        assert_eq!(star.len(), 20);
        assert!(star.iter().any(|p| p.x.abs() < 1e-9 && (p.y + 50.0).abs() < 1e-9));
    }

    #[test]
    fn long_stroke_is_thinned_but_keeps_ends() {
        let path: Vec<Point> = (0..100_i32).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let pts = shape_check_points(&Shape::Stroke(path));
        assert!(pts.len() <= MAX_PATH_SAMPLES + 1);
        assert_eq!(pts.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(pts.last(), Some(&Point::new(99.0, 0.0)));
    }

    #[test]
    fn connector_adds_segment_midpoints() {
        let pts = shape_check_points(&Shape::Connector(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
        ]));
        assert_eq!(pts.len(), 5);
        assert!(pts.contains(&Point::new(50.0, 0.0)));
        assert!(pts.contains(&Point::new(100.0, 25.0)));
    }

    #[test]
    fn near_duplicates_are_merged() {
        let pts = shape_check_points(&Shape::Stroke(vec![
            Point::new(0.0, 0.0),
            Point::new(0.05, 0.0),
            Point::new(1.0, 0.0),
            Point::new(f64::NAN, 0.0),
        ]));
        assert_eq!(pts, vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
    }

    #[test]
    fn lasso_over_part_of_a_rectangle_selects_it() {
        let note = Shape::Rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(shape_intersects_polygon(
            &note,
            &lasso(Rect::new(-10.0, -10.0, 30.0, 30.0))
        ));
        assert!(!shape_intersects_polygon(
            &note,
            &lasso(Rect::new(200.0, 200.0, 300.0, 300.0))
        ));
    }

    #[test]
    fn small_lasso_between_samples_is_a_known_miss() {
        let note = Shape::Rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!shape_intersects_polygon(
            &note,
            &lasso(Rect::new(5.0, 5.0, 15.0, 15.0))
        ));
    }

    #[test]
    fn degenerate_lasso_selects_nothing() {
        let note = Shape::Rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!shape_intersects_polygon(
            &note,
            &[Point::new(-5.0, -5.0), Point::new(200.0, 200.0)]
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn shapes_survive_serde() {
        let shapes = vec![
            Shape::Rectangle(Rect::new(0.0, 0.0, 40.0, 20.0)),
            Shape::Ellipse {
                center: Point::new(10.0, 10.0),
                radii: Vec2::new(8.0, 3.0),
                rotation: 0.5,
            },
            Shape::Connector(vec![Point::ZERO, Point::new(30.0, 5.0)]),
        ];
        let json = serde_json::to_string(&shapes).expect("shapes serialize");
        let back: Vec<Shape> = serde_json::from_str(&json).expect("shapes deserialize");
        assert_eq!(back, shapes);
    }
}
