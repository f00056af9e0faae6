// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat bounding-box index for the eraser.
//!
//! The eraser works on a small, hot working set and asks "which boxes does this
//! circular brush touch", either at one point or swept along a path. A linear
//! scan over a [`FlatVec`](crate::FlatVec) is fast enough for that and avoids
//! keeping a second tree in sync.

use alloc::collections::BTreeSet;
use core::fmt::Debug;

use crate::index::Index;
use crate::types::BoundingBox;

/// Id → bounding-box map with brush-shaped queries.
#[derive(Debug)]
pub struct BoundingBoxIndex<I: Copy + Ord + Debug> {
    index: Index<I>,
}

impl<I: Copy + Ord + Debug> Default for BoundingBoxIndex<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Copy + Ord + Debug> BoundingBoxIndex<I> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            index: Index::new(),
        }
    }

    /// Insert or replace an element's box.
    pub fn insert(&mut self, id: I, bbox: BoundingBox) {
        self.index.insert(id, bbox);
    }

    /// Replace an element's box.
    pub fn update(&mut self, id: I, bbox: BoundingBox) {
        self.index.update(id, bbox);
    }

    /// Remove an element. Returns its last box if present.
    pub fn remove(&mut self, id: I) -> Option<BoundingBox> {
        self.index.remove(id)
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Last box recorded for `id`.
    pub fn get(&self, id: I) -> Option<BoundingBox> {
        self.index.get(id)
    }

    /// Ids whose box lies within `radius` of the point.
    pub fn find_intersections(&self, x: f64, y: f64, radius: f64) -> BTreeSet<I> {
        let r = radius.max(0.0);
        let r_sq = r * r;
        self.index
            .query(BoundingBox::around_point(x, y, r))
            .into_iter()
            .filter(|id| {
                self.index
                    .get(*id)
                    .is_some_and(|b| b.distance_sq_to_point(x, y) <= r_sq)
            })
            .collect()
    }

    /// Ids whose box is touched by a brush of `radius` swept along `path`.
    ///
    /// Each consecutive pair of points is treated as a segment, so fast strokes
    /// with widely spaced samples still erase what lies between them. The brush
    /// is approximated by growing each box by `radius`, which slightly over-reports
    /// near box corners.
    pub fn find_path_intersections(&self, path: &[(f64, f64)], radius: f64) -> BTreeSet<I> {
        let r = radius.max(0.0);
        match path {
            [] => BTreeSet::new(),
            [(x, y)] => self.find_intersections(*x, *y, r),
            _ => {
                let mut hits = BTreeSet::new();
                for seg in path.windows(2) {
                    let (x0, y0) = seg[0];
                    let (x1, y1) = seg[1];
                    let sweep = BoundingBox::from_corners(x0, y0, x1, y1).inflate(r);
                    for id in self.index.query(sweep) {
                        if hits.contains(&id) {
                            continue;
                        }
                        if let Some(b) = self.index.get(id)
                            && b.inflate(r).intersects_segment(x0, y0, x1, y1)
                        {
                            hits.insert(id);
                        }
                    }
                }
                hits
            }
        }
    }
}
