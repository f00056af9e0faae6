// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Freehand stroke processing: spline smoothing and point reduction.

use kurbo::Point;
use tracing::trace;

use crate::polygon::simplify_indices;

/// Target spacing between interpolated samples, in canvas units.
const SAMPLE_SPACING: f64 = 5.0;

/// Upper bound on samples generated for a single segment.
const MAX_SEGMENT_SAMPLES: usize = 64;

const MIN_TENSION: f64 = 0.1;
const MAX_TENSION: f64 = 0.9;
const DEFAULT_TENSION: f64 = 0.5;

/// One pointer sample of a freehand stroke.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokePoint {
    /// Canvas x.
    pub x: f64,
    /// Canvas y.
    pub y: f64,
    /// Stylus pressure in `0..=1`, when the device reports it.
    pub pressure: Option<f64>,
    /// Capture time in milliseconds.
    pub timestamp: f64,
    /// Pointer speed, when the input layer computed it.
    pub velocity: Option<f64>,
}

impl StrokePoint {
    /// A sample with position and time only.
    pub const fn new(x: f64, y: f64, timestamp: f64) -> Self {
        Self {
            x,
            y,
            pressure: None,
            timestamp,
            velocity: None,
        }
    }

    /// Builder-style pressure setter.
    #[must_use]
    pub const fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Builder-style velocity setter.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Position as a point.
    pub const fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Smooth a stroke with a cardinal (Catmull-Rom family) spline through its samples.
///
/// `smoothness` is the spline tension, clamped to `0.1..=0.9`; non-finite values use `0.5`,
/// the classic Catmull-Rom curve. Each segment is subdivided at roughly one sample per five
/// canvas units. Every input sample is kept, so the output is never shorter than the input.
/// Pressure, timestamp and velocity are linearly interpolated along each segment.
///
/// Inputs with fewer than three samples are returned unchanged.
pub fn catmull_rom_spline(points: &[StrokePoint], smoothness: f64) -> Vec<StrokePoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let tension = if smoothness.is_finite() {
        smoothness.clamp(MIN_TENSION, MAX_TENSION)
    } else {
        DEFAULT_TENSION
    };

    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)].pos();
        let a = &points[i];
        let b = &points[i + 1];
        let p3 = points[(i + 2).min(n - 1)].pos();
        let (p1, p2) = (a.pos(), b.pos());
        let m1 = (p2 - p0) * tension;
        let m2 = (p3 - p1) * tension;

        let samples = segment_samples((p2 - p1).hypot());
        #[allow(
            clippy::cast_precision_loss,
            reason = "Sample counts are capped far below 2^52."
        )]
        let denom = samples as f64;
        for s in 0..samples {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Sample counts are capped far below 2^52."
            )]
            let t = s as f64 / denom;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            let pos = (p1.to_vec2() * h00 + m1 * h10 + p2.to_vec2() * h01 + m2 * h11).to_point();
            out.push(StrokePoint {
                x: pos.x,
                y: pos.y,
                pressure: lerp_opt(a.pressure, b.pressure, t),
                timestamp: lerp(a.timestamp, b.timestamp, t),
                velocity: lerp_opt(a.velocity, b.velocity, t),
            });
        }
    }
    out.push(points[n - 1]);
    trace!(input = n, output = out.len(), tension, "smoothed stroke");
    out
}

/// Douglas-Peucker reduction of a stroke.
///
/// Keeps the first and last samples and every sample farther than `tolerance` from the
/// chord between its retained neighbours. Kept samples are returned unchanged, so the
/// result is a fixed point: simplifying it again with the same tolerance returns it as is.
pub fn douglas_peucker(points: &[StrokePoint], tolerance: f64) -> Vec<StrokePoint> {
    let out: Vec<StrokePoint> = simplify_indices(points.len(), |i| points[i].pos(), tolerance)
        .into_iter()
        .map(|i| points[i])
        .collect();
    trace!(input = points.len(), output = out.len(), tolerance, "simplified stroke");
    out
}

/// Smooth then simplify, the order a freehand pen tool finalizes a stroke in.
pub fn smooth_and_simplify(
    points: &[StrokePoint],
    smoothness: f64,
    tolerance: f64,
) -> Vec<StrokePoint> {
    douglas_peucker(&catmull_rom_spline(points, smoothness), tolerance)
}

fn segment_samples(length: f64) -> usize {
    if !length.is_finite() {
        return 1;
    }
    let wanted = (length / SAMPLE_SPACING).ceil();
    if wanted >= MAX_SEGMENT_SAMPLES as f64 {
        return MAX_SEGMENT_SAMPLES;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Value is a non-negative integer below MAX_SEGMENT_SAMPLES."
    )]
    let n = wanted as usize;
    n.max(1)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_opt(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(lerp(a, b, t)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}
