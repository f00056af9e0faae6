// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Geom: hit-testing and stroke geometry for canvas tools, built on [`kurbo`].
//!
//! - Predicates: point in polygon (even-odd and nonzero winding), circle, rectangle, rotated ellipse.
//! - Polygons: flat-array conversion, shoelace area, area-weighted centroid, Douglas-Peucker.
//! - Sampling: reduce a [`Shape`] to a few representative points for lasso selection.
//! - Curves: Catmull-Rom smoothing and point reduction for freehand [`StrokePoint`] sequences.
//!
//! Everything here is a pure function over caller-owned data. Malformed input never panics:
//! polygons with fewer than three points contain nothing and zero-area centroids fall back
//! to the vertex mean.
//!
//! # Example
//!
//! A lasso drawn around the top-left corner of a sticky note selects it:
//!
//! ```rust
//! use easel_geom::{Shape, path_to_polygon, shape_intersects_polygon};
//! use kurbo::Rect;
//!
//! let note = Shape::Rectangle(Rect::new(0.0, 0.0, 120.0, 120.0));
//! let lasso = path_to_polygon(&[-20.0, -20.0, 40.0, -20.0, 40.0, 40.0, -20.0, 40.0]);
//! assert!(shape_intersects_polygon(&note, &lasso));
//! ```
//!
//! Finalizing a pen stroke:
//!
//! ```rust
//! use easel_geom::{StrokePoint, smooth_and_simplify};
//!
//! let raw: Vec<StrokePoint> = (0..20_i32)
//!     .map(|i| StrokePoint::new(f64::from(i) * 10.0, f64::from(i % 2) * 8.0, f64::from(i) * 16.0))
//!     .collect();
//! let finished = smooth_and_simplify(&raw, 0.5, 0.5);
//! assert_eq!(finished.first(), raw.first());
//! assert_eq!(finished.last(), raw.last());
//! ```

pub mod curve;
pub mod polygon;
pub mod predicates;
pub mod sampling;

pub use curve::{StrokePoint, catmull_rom_spline, douglas_peucker, smooth_and_simplify};
pub use polygon::{
    distance_to_segment, path_to_polygon, polygon_area, polygon_centroid, polygon_signed_area,
    simplify_polygon,
};
pub use predicates::{
    point_in_circle, point_in_ellipse, point_in_polygon, point_in_polygon_winding,
    point_in_rectangle, winding_number,
};
pub use sampling::{Shape, shape_check_points, shape_intersects_polygon};
