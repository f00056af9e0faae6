// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Easel Index: insert, update, and query a quadtree.

use easel_index::{BoundingBox, QuadTreeConfig, SpatialIndex};

fn main() {
    let mut idx: SpatialIndex<u32> = SpatialIndex::with_quadtree(
        BoundingBox::new(0.0, 0.0, 1000.0, 1000.0),
        QuadTreeConfig::default(),
    )
    .expect("root bounds are valid");
    idx.insert(1, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
    idx.insert(2, BoundingBox::new(5.0, 5.0, 10.0, 10.0));

    // Move box 1
    idx.update(1, BoundingBox::new(20.0, 0.0, 10.0, 10.0));

    // Query a point
    let hits: Vec<_> = idx.query_point(6.0, 6.0).into_iter().collect();
    println!("hits at (6,6): {:?}", hits);

    let visible: Vec<_> = idx
        .query(BoundingBox::new(0.0, 0.0, 30.0, 5.0))
        .into_iter()
        .collect();
    println!("visible in strip: {:?}", visible);
}
