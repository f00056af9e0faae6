// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate resolution errors.

use crate::types::ElementId;

/// Failure to resolve an element's absolute position.
///
/// These indicate corrupt document data or a misconfigured service. Malformed
/// numbers never error; they are sanitized to zero.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The element names an owner the container lookup does not know, and this
    /// was already reported once without being fixed.
    #[error("element {element} is owned by missing container {owner}")]
    DanglingOwner {
        /// Element being resolved.
        element: ElementId,
        /// Owner id that could not be found.
        owner: ElementId,
    },
    /// The owner chain is longer than the configured limit, or loops.
    #[error("owner chain of element {element} exceeds {limit} levels")]
    NestingTooDeep {
        /// Element being resolved.
        element: ElementId,
        /// Configured `max_nesting_depth`.
        limit: usize,
    },
    /// A [`TransformConfig`](crate::TransformConfig) field was out of range.
    #[error("invalid transform config: {0}")]
    InvalidConfig(&'static str),
}
