// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple). Backs the eraser index.
//! - `quadtree`: region quadtree over a fixed root, stored as a node arena. Backs viewport culling.
//!
//! Quadtree note
//! -------------
//! Each slot is stored once, at the deepest node that fully contains its box.
//! A query therefore visits every node whose region intersects the query rectangle
//! (not just the leaves), and removal walks the same set using the slot's last-known box.

pub mod flatvec;
pub mod quadtree;
