// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element records and the container lookup seam.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use kurbo::{Point, Rect, Size};

/// Identifier of a canvas element.
///
/// Ids are assigned by the document store; this crate only compares them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The geometry-relevant part of a document element.
///
/// `position` is local: relative to the owning container's top-left corner when
/// `owner` is set, and absolute canvas coordinates otherwise. Containers are
/// elements too; whatever a [`ContainerLookup`] returns for an id is treated as
/// that container's record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Element id.
    pub id: ElementId,
    /// Local top-left position.
    pub position: Point,
    /// Extent of the element.
    pub size: Size,
    /// Owning container, if any.
    pub owner: Option<ElementId>,
    /// Stacking order. Higher is on top.
    pub z_index: i32,
}

impl Element {
    /// An un-owned element at z-index 0.
    pub fn new(id: ElementId, position: Point, size: Size) -> Self {
        Self {
            id,
            position,
            size,
            owner: None,
            z_index: 0,
        }
    }

    /// Builder-style owner setter.
    #[must_use]
    pub fn with_owner(mut self, owner: ElementId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Builder-style z-index setter.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Bounds in the owner's coordinate space.
    pub fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// Read access to container records, keyed by id.
///
/// The coordinate service never owns document data. Implement this for whatever
/// store the host keeps; maps and slices of [`Element`] work out of the box.
pub trait ContainerLookup {
    /// The container with `id`, if it exists.
    fn container(&self, id: ElementId) -> Option<&Element>;

    /// Every container, in any order.
    fn containers(&self) -> Box<dyn Iterator<Item = &Element> + '_>;
}

impl<S: BuildHasher> ContainerLookup for HashMap<ElementId, Element, S> {
    fn container(&self, id: ElementId) -> Option<&Element> {
        self.get(&id)
    }

    fn containers(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        Box::new(self.values())
    }
}

impl ContainerLookup for BTreeMap<ElementId, Element> {
    fn container(&self, id: ElementId) -> Option<&Element> {
        self.get(&id)
    }

    fn containers(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        Box::new(self.values())
    }
}

impl ContainerLookup for [Element] {
    fn container(&self, id: ElementId) -> Option<&Element> {
        self.iter().find(|e| e.id == id)
    }

    fn containers(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        Box::new(self.iter())
    }
}

impl ContainerLookup for Vec<Element> {
    fn container(&self, id: ElementId) -> Option<&Element> {
        self.as_slice().container(id)
    }

    fn containers(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        self.as_slice().containers()
    }
}

/// A lookup with no containers; every element sits directly on the canvas.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoContainers;

impl ContainerLookup for NoContainers {
    fn container(&self, _id: ElementId) -> Option<&Element> {
        None
    }

    fn containers(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        Box::new(std::iter::empty())
    }
}
