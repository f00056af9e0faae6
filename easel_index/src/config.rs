// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree tuning knobs.

use crate::error::ConfigError;

/// Tuning for [`QuadTree`](crate::QuadTree) subdivision.
///
/// A node subdivides the first time its own id list grows past
/// `max_elements_per_node`, provided its depth is below `max_depth` and both of
/// its sides are longer than `min_node_size`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadTreeConfig {
    /// Deepest level a node may live at. The root is depth 0.
    pub max_depth: u32,
    /// Ids a node may hold before it tries to subdivide.
    pub max_elements_per_node: usize,
    /// Nodes whose region is not larger than this (in canvas units) stay leaves.
    pub min_node_size: f64,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_elements_per_node: 10,
            min_node_size: 50.0,
        }
    }
}

impl QuadTreeConfig {
    /// Reject zero or non-positive values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if self.max_elements_per_node == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.min_node_size <= 0.0 || !self.min_node_size.is_finite() {
            return Err(ConfigError::NonPositiveMinNodeSize(self.min_node_size));
        }
        Ok(())
    }
}
