// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public id-keyed index API and generic implementation over a pluggable backend.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::quadtree::QuadTree;
use crate::config::QuadTreeConfig;
use crate::error::ConfigError;
use crate::types::BoundingBox;

#[derive(Clone, Debug)]
struct Entry<I> {
    id: I,
    bbox: BoundingBox,
}

/// An index of element bounding boxes keyed by element id, parameterized by a spatial backend.
///
/// `I` is the caller's element id. Each id is present at most once; inserting an id
/// that is already present behaves like [`update`](Self::update).
#[derive(Debug)]
pub struct IndexGeneric<I: Copy + Ord + Debug, B: Backend> {
    entries: Vec<Option<Entry<I>>>,
    free_list: Vec<usize>,
    slots: BTreeMap<I, usize>,
    backend: B,
}

impl<I, B> IndexGeneric<I, B>
where
    I: Copy + Ord + Debug,
    B: Backend + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<I, B> IndexGeneric<I, B>
where
    I: Copy + Ord + Debug,
    B: Backend,
{
    /// Create an empty index over an already configured backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            slots: BTreeMap::new(),
            backend,
        }
    }

    /// Reserve space for at least `n` additional entries.
    pub fn reserve(&mut self, n: usize) {
        self.entries.reserve(n);
    }

    /// Insert an element's bounding box.
    ///
    /// Boxes with non-finite coordinates are not stored. If `id` was already present,
    /// its previous box is removed so it no longer answers queries at the old position.
    pub fn insert(&mut self, id: I, bbox: BoundingBox) {
        if !bbox.is_finite() {
            tracing::warn!(?id, "ignoring non-finite bounding box");
            self.remove(id);
            return;
        }
        if let Some(&slot) = self.slots.get(&id) {
            self.set_bbox(slot, bbox);
            return;
        }
        let entry = Some(Entry { id, bbox });
        let slot = if let Some(slot) = self.free_list.pop() {
            self.entries[slot] = entry;
            slot
        } else {
            self.entries.push(entry);
            self.entries.len() - 1
        };
        self.slots.insert(id, slot);
        self.backend.insert(slot, bbox);
    }

    /// Move an element to a new bounding box (remove, then insert).
    ///
    /// Unknown ids are inserted.
    pub fn update(&mut self, id: I, bbox: BoundingBox) {
        self.insert(id, bbox);
    }

    /// Remove an element. Returns its last bounding box if it was present.
    pub fn remove(&mut self, id: I) -> Option<BoundingBox> {
        let slot = self.slots.remove(&id)?;
        self.backend.remove(slot);
        let entry = self.entries.get_mut(slot)?.take()?;
        self.free_list.push(slot);
        Some(entry.bbox)
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_list.clear();
        self.slots.clear();
        self.backend.clear();
    }

    /// Last bounding box recorded for `id`.
    pub fn get(&self, id: I) -> Option<BoundingBox> {
        let slot = *self.slots.get(&id)?;
        self.entry(slot).map(|e| e.bbox)
    }

    /// Whether `id` is present.
    pub fn contains(&self, id: I) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of elements in the index.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the index holds no elements.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ids of elements whose bounding box intersects `rect`.
    pub fn query(&self, rect: BoundingBox) -> BTreeSet<I> {
        self.backend
            .query_rect(rect)
            .filter_map(|slot| self.entry(slot).map(|e| e.id))
            .collect()
    }

    /// Ids of elements whose bounding box contains the point.
    pub fn query_point(&self, x: f64, y: f64) -> BTreeSet<I> {
        self.backend
            .query_point(x, y)
            .filter_map(|slot| self.entry(slot).map(|e| e.id))
            .collect()
    }

    /// Iterate `(id, bbox)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (I, BoundingBox)> + '_ {
        self.entries.iter().flatten().map(|e| (e.id, e.bbox))
    }

    /// The spatial backend, for statistics.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn entry(&self, slot: usize) -> Option<&Entry<I>> {
        self.entries.get(slot)?.as_ref()
    }

    fn set_bbox(&mut self, slot: usize, bbox: BoundingBox) {
        if let Some(Some(e)) = self.entries.get_mut(slot) {
            e.bbox = bbox;
            self.backend.update(slot, bbox);
        }
    }
}

/// Default index using a flat vector backend.
pub type Index<I> = IndexGeneric<I, FlatVec>;

impl<I: Copy + Ord + Debug> Default for Index<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Quadtree-backed index used for viewport culling and broad-phase hit queries.
pub type SpatialIndex<I> = IndexGeneric<I, QuadTree>;

impl<I: Copy + Ord + Debug> SpatialIndex<I> {
    /// Create a quadtree-backed index over `bounds` with the given tuning.
    pub fn with_quadtree(bounds: BoundingBox, config: QuadTreeConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_backend(QuadTree::new(bounds, config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    fn canvas() -> SpatialIndex<u32> {
        SpatialIndex::with_quadtree(
            BoundingBox::new(0.0, 0.0, 200.0, 200.0),
            QuadTreeConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn viewport_culls_far_element() {
        let mut idx = canvas();
        idx.insert(1, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        idx.insert(2, BoundingBox::new(100.0, 100.0, 10.0, 10.0));
        idx.insert(3, BoundingBox::new(5.0, 5.0, 10.0, 10.0));
        let hits = idx.query(BoundingBox::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn update_moves_element() {
        let mut idx = canvas();
        idx.update(7, BoundingBox::new(10.0, 10.0, 10.0, 10.0));
        idx.update(7, BoundingBox::new(150.0, 150.0, 10.0, 10.0));
        assert!(idx.query(BoundingBox::new(0.0, 0.0, 50.0, 50.0)).is_empty());
        let hits = idx.query(BoundingBox::new(140.0, 140.0, 30.0, 30.0));
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![7]);
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn remove_then_reuse_slot() {
        let mut idx = canvas();
        idx.insert(1, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(idx.remove(1), Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(idx.remove(1), None);
        idx.insert(2, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(idx.query_point(5.0, 5.0).into_iter().collect::<Vec<_>>(), vec![2]);
        assert!(!idx.contains(1));
    }

    #[test]
    fn non_finite_is_ignored() {
        let mut idx: Index<u32> = Index::new();
        idx.insert(1, BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0));
        assert!(idx.is_empty());
    }

    #[test]
    fn non_finite_update_drops_old_position() {
        let mut idx = canvas();
        idx.insert(7, BoundingBox::new(10.0, 10.0, 10.0, 10.0));
        idx.update(7, BoundingBox::new(f64::NAN, 150.0, 10.0, 10.0));
        assert!(
            idx.query(BoundingBox::new(0.0, 0.0, 30.0, 30.0)).is_empty(),
            "stale box must not be returned"
        );
        assert_eq!(idx.get(7), None);
        assert!(idx.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut idx = canvas();
        for i in 0..50 {
            idx.insert(i, BoundingBox::new(f64::from(i) * 3.0, 10.0, 2.0, 2.0));
        }
        idx.clear();
        assert!(idx.is_empty());
        assert!(idx.query(BoundingBox::new(0.0, 0.0, 200.0, 200.0)).is_empty());
    }

    fn arb_box() -> impl Strategy<Value = BoundingBox> {
        (0.0..500.0_f64, 0.0..500.0_f64, 0.0..80.0_f64, 0.0..80.0_f64)
            .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn query_matches_brute_force(
            boxes in proptest::collection::vec(arb_box(), 0..120),
            view in arb_box(),
        ) {
            let mut idx = SpatialIndex::with_quadtree(
                BoundingBox::new(0.0, 0.0, 600.0, 600.0),
                QuadTreeConfig { max_elements_per_node: 4, ..Default::default() },
            ).unwrap();
            for (i, b) in boxes.iter().enumerate() {
                idx.insert(i, *b);
            }
            let expected: BTreeSet<usize> = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.intersects(&view))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(idx.query(view), expected);
        }

        #[test]
        fn update_never_reports_old_position(
            boxes in proptest::collection::vec(arb_box(), 1..60),
            moved in arb_box(),
        ) {
            let mut idx = SpatialIndex::with_quadtree(
                BoundingBox::new(0.0, 0.0, 600.0, 600.0),
                QuadTreeConfig { max_elements_per_node: 2, ..Default::default() },
            ).unwrap();
            for (i, b) in boxes.iter().enumerate() {
                idx.insert(i, *b);
            }
            idx.update(0, moved);
            for b in &boxes {
                let hits = idx.query(*b);
                prop_assert_eq!(hits.contains(&0), moved.intersects(b));
            }
        }
    }
}
