// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for the eraser's working set.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::BoundingBox;

/// Flat vector backend with linear scans.
#[derive(Default)]
pub struct FlatVec {
    entries: Vec<Option<BoundingBox>>,
}

impl FlatVec {
    /// Iterate live `(slot, bbox)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, BoundingBox)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|b| (i, b)))
    }
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.entries.len();
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("FlatVec")
            .field("total_slots", &total)
            .field("alive", &alive)
            .finish_non_exhaustive()
    }
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, bbox: BoundingBox) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some(bbox);
    }
    fn update(&mut self, slot: usize, bbox: BoundingBox) {
        if let Some(e) = self.entries.get_mut(slot) {
            *e = Some(bbox);
        }
    }
    fn remove(&mut self, slot: usize) {
        if let Some(e) = self.entries.get_mut(slot) {
            *e = None;
        }
    }
    fn clear(&mut self) {
        self.entries.clear();
    }
    fn query_point<'a>(&'a self, x: f64, y: f64) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.iter()
                .filter(move |(_, b)| b.contains_point(x, y))
                .map(|(i, _)| i),
        )
    }
    fn query_rect<'a>(&'a self, rect: BoundingBox) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.iter()
                .filter(move |(_, b)| b.intersects(&rect))
                .map(|(i, _)| i),
        )
    }
}
