// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding-box type and the comparisons shared by every backend.

/// Axis-aligned bounding box in canvas units.
///
/// Stored as origin plus extent. `width` and `height` are never negative: the
/// constructors clamp negative extents to zero.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent (>= 0).
    pub width: f64,
    /// Vertical extent (>= 0).
    pub height: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::ZERO
    }
}

impl BoundingBox {
    /// The empty box at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a bounding box from origin and size. Negative sizes clamp to zero.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: if width > 0.0 { width } else { 0.0 },
            height: if height > 0.0 { height } else { 0.0 },
        }
    }

    /// Create a bounding box from two corners, in any order.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Square box of half-extent `radius` centered on a point.
    pub fn around_point(x: f64, y: f64, radius: f64) -> Self {
        Self::new(x - radius, y - radius, 2.0 * radius, 2.0 * radius)
    }

    /// Minimum x (left).
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    /// Minimum y (top).
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Maximum x (right).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Maximum y (bottom).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Center point as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }

    /// True if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Whether this box contains the point. Edges are inclusive.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x() <= x && x <= self.max_x() && self.min_y() <= y && y <= self.max_y()
    }

    /// Whether this box fully contains `other`. Edges are inclusive.
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x() <= other.min_x()
            && other.max_x() <= self.max_x()
            && self.min_y() <= other.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Whether two boxes overlap. Touching edges count as overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }

    /// Smallest box containing both inputs.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_corners(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Squared distance from a point to the nearest point of the box (zero inside).
    pub fn distance_sq_to_point(&self, x: f64, y: f64) -> f64 {
        let dx = if x < self.min_x() {
            self.min_x() - x
        } else if x > self.max_x() {
            x - self.max_x()
        } else {
            0.0
        };
        let dy = if y < self.min_y() {
            self.min_y() - y
        } else if y > self.max_y() {
            y - self.max_y()
        } else {
            0.0
        };
        dx * dx + dy * dy
    }

    /// The four equal quadrants, ordered NW, NE, SW, SE.
    pub fn quadrants(&self) -> [Self; 4] {
        let hw = 0.5 * self.width;
        let hh = 0.5 * self.height;
        [
            Self::new(self.x, self.y, hw, hh),
            Self::new(self.x + hw, self.y, hw, hh),
            Self::new(self.x, self.y + hh, hw, hh),
            Self::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }

    /// Whether the segment `(x0, y0) -> (x1, y1)` touches the box.
    ///
    /// Liang-Barsky clipping against the box edges.
    pub fn intersects_segment(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        let checks = [
            (-dx, x0 - self.min_x()),
            (dx, self.max_x() - x0),
            (-dy, y0 - self.min_y()),
            (dy, self.max_y() - y0),
        ];
        for (p, q) in checks {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return false;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
        true
    }
}
