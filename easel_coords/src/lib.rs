// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Coords: local/absolute coordinate conversion for nested canvas elements.
//!
//! Elements on a whiteboard store their position relative to the container that owns
//! them (a frame, a section, a sticky-note group), and containers nest. Rendering,
//! indexing and hit-testing need absolute canvas positions instead. This crate owns that
//! conversion and caches the results.
//!
//! - [`CoordinateService::to_absolute`] / [`to_relative`](CoordinateService::to_relative):
//!   compose or strip the owner chain.
//! - [`invalidate_element`](CoordinateService::invalidate_element),
//!   [`invalidate_container`](CoordinateService::invalidate_container) and
//!   [`invalidate_all`](CoordinateService::invalidate_all): drop stale positions.
//!   Cache entries also expire after [`TransformConfig::ttl`].
//! - [`convert_drag_coordinates`](CoordinateService::convert_drag_coordinates): decide
//!   which container a dragged element lands in and what its new local position is.
//! - [`constrain_to_section`](CoordinateService::constrain_to_section) and
//!   [`batch_apply_delta`](CoordinateService::batch_apply_delta) for move tools.
//!
//! The service never owns document data: element records are passed in, and containers
//! are read through the [`ContainerLookup`] trait.
//!
//! ## Cache validity
//!
//! Each container has a `u64` version counter. A cache entry records the version of every
//! container in the element's owner chain and is valid only while all of them still match
//! and the entry is younger than the TTL. Invalidating a container therefore invalidates
//! every descendant lazily, at any depth, without walking them.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use easel_coords::{CoordinateService, Element, ElementId};
//! use kurbo::{Point, Size};
//!
//! let frame_id = ElementId(100);
//! let mut containers = BTreeMap::new();
//! containers.insert(
//!     frame_id,
//!     Element::new(frame_id, Point::new(100.0, 100.0), Size::new(300.0, 300.0)),
//! );
//! let note = Element::new(ElementId(1), Point::new(10.0, 10.0), Size::new(40.0, 40.0))
//!     .with_owner(frame_id);
//!
//! let mut coords = CoordinateService::default();
//! assert_eq!(coords.to_absolute(&note, &containers).unwrap(), Point::new(110.0, 110.0));
//!
//! // Move the frame, then tell the service about it.
//! containers.get_mut(&frame_id).unwrap().position = Point::new(200.0, 50.0);
//! coords.invalidate_container(frame_id);
//! assert_eq!(coords.to_absolute(&note, &containers).unwrap(), Point::new(210.0, 60.0));
//! ```

mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod service;
pub mod types;

pub use cache::CoordinateCacheEntry;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TransformConfig;
pub use error::TransformError;
pub use service::{CoordinateService, DragConversion, DragOutcome};
pub use types::{ContainerLookup, Element, ElementId, NoContainers};
