// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Index: id-keyed 2D bounding-box indices for a large drawing canvas.
//!
//! - Insert, update, and remove element bounding boxes keyed by your own element id.
//! - Query by point or intersecting rectangle; results are deduplicated id sets.
//! - Pick a mutable region quadtree for viewport culling, or a flat scan for small working sets.
//!
//! It works in `f64` canvas units and does not depend on any geometry crate.
//! Higher layers resolve absolute element positions and feed the resulting boxes here.
//! The index is an acceleration structure, never a source of truth for which elements exist:
//! boxes that miss the quadtree root are accepted and simply never reported.
//!
//! # Example
//!
//! ```rust
//! use easel_index::{BoundingBox, QuadTreeConfig, SpatialIndex};
//!
//! let mut idx: SpatialIndex<u32> = SpatialIndex::with_quadtree(
//!     BoundingBox::new(0.0, 0.0, 200.0, 200.0),
//!     QuadTreeConfig::default(),
//! )
//! .unwrap();
//!
//! idx.insert(1, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
//! idx.insert(2, BoundingBox::new(100.0, 100.0, 10.0, 10.0));
//! idx.insert(3, BoundingBox::new(5.0, 5.0, 10.0, 10.0));
//!
//! let visible: Vec<u32> = idx.query(BoundingBox::new(0.0, 0.0, 20.0, 20.0)).into_iter().collect();
//! assert_eq!(visible, vec![1, 3]);
//! ```
//!
//! The eraser keeps its own flat index and asks for everything a round brush touches:
//!
//! ```rust
//! use easel_index::{BoundingBox, BoundingBoxIndex};
//!
//! let mut eraser = BoundingBoxIndex::new();
//! eraser.insert("note", BoundingBox::new(0.0, 0.0, 40.0, 40.0));
//! eraser.insert("arrow", BoundingBox::new(200.0, 0.0, 80.0, 4.0));
//!
//! let hits = eraser.find_path_intersections(&[(-10.0, 20.0), (300.0, 20.0)], 8.0);
//! assert!(hits.contains("note"));
//! assert!(!hits.contains("arrow"));
//! ```
//!
//! ## Choosing a backend
//!
//! - `QuadTree` (via [`SpatialIndex`]): region quadtree over fixed root bounds. Each box is stored
//!   once, at the deepest node that fully contains it. Tune with [`QuadTreeConfig`].
//! - `FlatVec` (via [`Index`] and [`BoundingBoxIndex`]): linear scans, no tuning, cheapest updates.
//!
//! ### Float semantics
//!
//! Boxes with NaN or infinite coordinates are ignored on insert. Box edges are inclusive:
//! touching boxes intersect.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod backends;
pub mod config;
pub mod eraser;
pub mod error;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::QuadTree;
pub use config::QuadTreeConfig;
pub use eraser::BoundingBoxIndex;
pub use error::ConfigError;
pub use index::{Index, IndexGeneric, SpatialIndex};
pub use types::BoundingBox;
