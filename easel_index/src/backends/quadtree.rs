// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree backend stored as a node arena.
//!
//! Every slot lives in exactly one node: the deepest node whose region fully
//! contains its bounding box. Boxes that straddle a quadrant boundary stay at
//! the ancestor instead of being duplicated into several children. Nodes
//! subdivide at most once and are never merged back; [`Backend::clear`]
//! resets the arena to a single root.

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::backend::Backend;
use crate::config::QuadTreeConfig;
use crate::error::ConfigError;
use crate::types::BoundingBox;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct QuadNode {
    region: BoundingBox,
    depth: u32,
    items: SmallVec<[usize; 8]>,
    children: Option<[NodeIdx; 4]>,
}

impl QuadNode {
    fn new(region: BoundingBox, depth: u32) -> Self {
        Self {
            region,
            depth,
            items: SmallVec::new(),
            children: None,
        }
    }
}

/// Quadtree backend over a fixed root region.
pub struct QuadTree {
    config: QuadTreeConfig,
    bounds: BoundingBox,
    arena: Vec<QuadNode>,
    slots: Vec<Option<BoundingBox>>,
}

impl QuadTree {
    /// Create a quadtree covering `bounds`.
    pub fn new(bounds: BoundingBox, config: QuadTreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if !bounds.is_finite() || bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Err(ConfigError::InvalidBounds);
        }
        Ok(Self {
            config,
            bounds,
            arena: vec![QuadNode::new(bounds, 0)],
            slots: Vec::new(),
        })
    }

    /// Root region.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Configuration this tree was built with.
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Number of nodes currently allocated, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Depth of the deepest allocated node. A lone root has depth 0.
    pub fn depth(&self) -> u32 {
        self.arena.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    fn node(&self, idx: NodeIdx) -> &QuadNode {
        &self.arena[idx.get()]
    }

    fn node_mut(&mut self, idx: NodeIdx) -> &mut QuadNode {
        &mut self.arena[idx.get()]
    }

    fn can_subdivide(&self, node: &QuadNode) -> bool {
        node.children.is_none()
            && node.items.len() > self.config.max_elements_per_node
            && node.depth < self.config.max_depth
            && node.region.width > self.config.min_node_size
            && node.region.height > self.config.min_node_size
    }

    fn insert_at(&mut self, idx: NodeIdx, slot: usize, bbox: BoundingBox) {
        let node = self.node(idx);
        if !node.region.intersects(&bbox) {
            return;
        }
        if let Some(children) = node.children {
            let target = children
                .into_iter()
                .find(|c| self.node(*c).region.contains(&bbox));
            match target {
                Some(child) => self.insert_at(child, slot, bbox),
                None => self.node_mut(idx).items.push(slot),
            }
            return;
        }
        self.node_mut(idx).items.push(slot);
        if self.can_subdivide(self.node(idx)) {
            self.subdivide(idx);
        }
    }

    fn subdivide(&mut self, idx: NodeIdx) {
        let (region, depth) = {
            let n = self.node(idx);
            (n.region, n.depth)
        };
        let first = self.arena.len();
        for quadrant in region.quadrants() {
            self.arena.push(QuadNode::new(quadrant, depth + 1));
        }
        let children = [
            NodeIdx(first),
            NodeIdx(first + 1),
            NodeIdx(first + 2),
            NodeIdx(first + 3),
        ];
        let held = core::mem::take(&mut self.node_mut(idx).items);
        self.node_mut(idx).children = Some(children);
        tracing::debug!(
            node = idx.get(),
            depth,
            items = held.len(),
            "quadtree node subdivided"
        );
        for slot in held {
            let Some(bbox) = self.slots.get(slot).copied().flatten() else {
                continue;
            };
            // Re-enter at this node: it now has children, so the slot either
            // moves into the single containing quadrant or stays here.
            self.insert_at(idx, slot, bbox);
        }
    }

    fn remove_at(&mut self, idx: NodeIdx, slot: usize, bbox: &BoundingBox) {
        let node = self.node_mut(idx);
        if !node.region.intersects(bbox) {
            return;
        }
        if let Some(pos) = node.items.iter().position(|&s| s == slot) {
            node.items.swap_remove(pos);
        }
        if let Some(children) = node.children {
            for child in children {
                self.remove_at(child, slot, bbox);
            }
        }
    }

    fn collect(&self, idx: NodeIdx, rect: &BoundingBox, out: &mut BTreeSet<usize>) {
        let node = self.node(idx);
        // Root items may poke outside the root region, so the root is always scanned.
        if idx != NodeIdx::ROOT && !node.region.intersects(rect) {
            return;
        }
        for &slot in &node.items {
            if let Some(Some(b)) = self.slots.get(slot)
                && b.intersects(rect)
            {
                out.insert(slot);
            }
        }
        if let Some(children) = node.children {
            for child in children {
                self.collect(child, rect, out);
            }
        }
    }

    /// Slots stored directly at each node, for structural assertions in tests.
    #[cfg(test)]
    fn placements(&self, slot: usize) -> usize {
        self.arena
            .iter()
            .map(|n| n.items.iter().filter(|&&s| s == slot).count())
            .sum()
    }
}

impl Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|e| e.is_some()).count();
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds)
            .field("nodes", &self.arena.len())
            .field("depth", &self.depth())
            .field("alive", &alive)
            .finish_non_exhaustive()
    }
}

impl Backend for QuadTree {
    fn insert(&mut self, slot: usize, bbox: BoundingBox) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        self.slots[slot] = Some(bbox);
        if !self.bounds.intersects(&bbox) {
            tracing::trace!(slot, "bbox outside quadtree root; not indexed");
            return;
        }
        self.insert_at(NodeIdx::ROOT, slot, bbox);
    }

    fn update(&mut self, slot: usize, bbox: BoundingBox) {
        self.remove(slot);
        self.insert(slot, bbox);
    }

    fn remove(&mut self, slot: usize) {
        let Some(bbox) = self.slots.get_mut(slot).and_then(Option::take) else {
            return;
        };
        self.remove_at(NodeIdx::ROOT, slot, &bbox);
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.arena.push(QuadNode::new(self.bounds, 0));
        self.slots.clear();
    }

    fn query_point<'a>(&'a self, x: f64, y: f64) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = BTreeSet::new();
        self.collect(
            NodeIdx::ROOT,
            &BoundingBox::new(x, y, 0.0, 0.0),
            &mut out,
        );
        Box::new(out.into_iter())
    }

    fn query_rect<'a>(&'a self, rect: BoundingBox) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = BTreeSet::new();
        self.collect(NodeIdx::ROOT, &rect, &mut out);
        Box::new(out.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn tree(size: f64) -> QuadTree {
        QuadTree::new(
            BoundingBox::new(0.0, 0.0, size, size),
            QuadTreeConfig::default(),
        )
        .unwrap()
    }

    fn small_boxes(tree: &mut QuadTree, n: usize) {
        for i in 0..n {
            let x = (i % 10) as f64 * 15.0;
            tree.insert(i, BoundingBox::new(x, 10.0, 5.0, 5.0));
        }
    }

    #[test]
    fn rejects_bad_bounds() {
        let err = QuadTree::new(
            BoundingBox::new(0.0, 0.0, 0.0, 10.0),
            QuadTreeConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBounds);
    }

    #[test]
    fn subdivides_once_past_threshold() {
        let mut t = tree(400.0);
        small_boxes(&mut t, 10);
        assert_eq!(t.node_count(), 1, "ten items fit in the root");
        t.insert(10, BoundingBox::new(30.0, 40.0, 5.0, 5.0));
        assert!(t.node_count() > 1, "eleventh item should split the root");
        let nodes = t.node_count();
        // Further inserts at the root level never allocate a second set of root children.
        t.insert(100, BoundingBox::new(190.0, 190.0, 20.0, 20.0));
        t.insert(101, BoundingBox::new(195.0, 0.0, 10.0, 400.0));
        assert_eq!(t.node_count(), nodes);
    }

    #[test]
    fn straddling_box_stays_at_parent_once() {
        let mut t = tree(400.0);
        small_boxes(&mut t, 11);
        // Crosses the vertical midline at x = 200.
        t.insert(50, BoundingBox::new(190.0, 20.0, 20.0, 20.0));
        assert_eq!(t.placements(50), 1);
        assert!(t.node(NodeIdx::ROOT).items.contains(&50));
        for slot in 0..11 {
            assert_eq!(t.placements(slot), 1, "slot {slot} stored exactly once");
        }
    }

    #[test]
    fn min_node_size_blocks_split() {
        let mut t = tree(40.0);
        for i in 0..30 {
            t.insert(i, BoundingBox::new(1.0, 1.0, 1.0, 1.0));
        }
        assert_eq!(t.node_count(), 1);
        assert_eq!(t.query_rect(BoundingBox::new(0.0, 0.0, 5.0, 5.0)).count(), 30);
    }

    #[test]
    fn depth_is_capped() {
        let cfg = QuadTreeConfig {
            max_depth: 2,
            max_elements_per_node: 1,
            min_node_size: 1.0,
        };
        let mut t = QuadTree::new(BoundingBox::new(0.0, 0.0, 1024.0, 1024.0), cfg).unwrap();
        for i in 0..20 {
            t.insert(i, BoundingBox::new(1.0 + i as f64 * 0.1, 1.0, 0.05, 0.05));
        }
        assert_eq!(t.depth(), 2);
    }

    #[test]
    fn remove_finds_ancestor_placement() {
        let mut t = tree(400.0);
        small_boxes(&mut t, 11);
        t.insert(50, BoundingBox::new(190.0, 20.0, 20.0, 20.0));
        t.remove(50);
        assert_eq!(t.placements(50), 0);
        let hits: Vec<_> = t.query_rect(BoundingBox::new(180.0, 0.0, 40.0, 60.0)).collect();
        assert!(!hits.contains(&50));
    }

    #[test]
    fn out_of_root_is_silent() {
        let mut t = tree(100.0);
        t.insert(0, BoundingBox::new(500.0, 500.0, 10.0, 10.0));
        assert_eq!(t.query_rect(BoundingBox::new(0.0, 0.0, 1000.0, 1000.0)).count(), 0);
        t.remove(0);
    }

    #[test]
    fn clear_resets_to_single_root() {
        let mut t = tree(400.0);
        small_boxes(&mut t, 40);
        t.clear();
        assert_eq!(t.node_count(), 1);
        assert_eq!(t.query_rect(t.bounds()).count(), 0);
    }
}
