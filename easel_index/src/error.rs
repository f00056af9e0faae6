// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

/// Rejected index configuration.
///
/// Only construction can fail; once built, every index operation is total.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `max_depth` was zero.
    #[error("quadtree max_depth must be at least 1")]
    ZeroMaxDepth,
    /// `max_elements_per_node` was zero.
    #[error("quadtree max_elements_per_node must be at least 1")]
    ZeroCapacity,
    /// `min_node_size` was zero, negative or not finite.
    #[error("quadtree min_node_size must be positive and finite, got {0}")]
    NonPositiveMinNodeSize(f64),
    /// Root bounds were empty or not finite.
    #[error("index bounds must be finite with positive width and height")]
    InvalidBounds,
}
