// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::BoundingBox;

/// Spatial backend abstraction used by [`IndexGeneric`](crate::IndexGeneric).
///
/// Backends work on dense slot numbers; mapping element ids to slots is the
/// facade's job. Results may contain a slot at most once.
pub trait Backend {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, bbox: BoundingBox);

    /// Update an existing slot's bounding box.
    fn update(&mut self, slot: usize, bbox: BoundingBox);

    /// Remove a slot from the spatial structure.
    fn remove(&mut self, slot: usize);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Query slots whose bounding box contains the point.
    fn query_point<'a>(&'a self, x: f64, y: f64) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Query slots whose bounding box intersects the rectangle.
    fn query_rect<'a>(&'a self, rect: BoundingBox) -> Box<dyn Iterator<Item = usize> + 'a>;
}
