// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time- and version-stamped cache of absolute positions.

use std::collections::HashMap;
use std::time::Duration;

use kurbo::Point;
use smallvec::SmallVec;

use crate::types::ElementId;

/// Container versions an entry was computed against, nearest owner first.
pub(crate) type OwnerVersions = SmallVec<[(ElementId, u64); 4]>;

/// A cached absolute position.
///
/// Valid while it is younger than the TTL and every container in its owner chain
/// still has the version recorded here.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateCacheEntry {
    absolute: Point,
    timestamp: Duration,
    owner_versions: OwnerVersions,
}

impl CoordinateCacheEntry {
    /// Cached absolute position.
    pub fn absolute(&self) -> Point {
        self.absolute
    }

    /// Clock reading when the entry was stored.
    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    /// `(container, version)` for each ancestor, nearest first. Empty for un-owned elements.
    pub fn owner_versions(&self) -> &[(ElementId, u64)] {
        &self.owner_versions
    }
}

#[derive(Debug, Default)]
pub(crate) struct CoordinateCache {
    entries: HashMap<ElementId, CoordinateCacheEntry>,
    versions: HashMap<ElementId, u64>,
}

impl CoordinateCache {
    pub(crate) fn version(&self, container: ElementId) -> u64 {
        self.versions.get(&container).copied().unwrap_or(0)
    }

    /// Increment `container`'s version, returning the new value.
    pub(crate) fn bump(&mut self, container: ElementId) -> u64 {
        let v = self.versions.entry(container).or_insert(0);
        *v = v.wrapping_add(1);
        *v
    }

    pub(crate) fn get(&self, id: ElementId) -> Option<&CoordinateCacheEntry> {
        self.entries.get(&id)
    }

    pub(crate) fn valid(
        &self,
        id: ElementId,
        now: Duration,
        ttl: Duration,
    ) -> Option<&CoordinateCacheEntry> {
        let entry = self.entries.get(&id)?;
        if now.saturating_sub(entry.timestamp) >= ttl {
            return None;
        }
        entry
            .owner_versions
            .iter()
            .all(|(c, v)| self.version(*c) == *v)
            .then_some(entry)
    }

    pub(crate) fn store(
        &mut self,
        id: ElementId,
        absolute: Point,
        timestamp: Duration,
        owner_versions: OwnerVersions,
    ) {
        self.entries.insert(
            id,
            CoordinateCacheEntry {
                absolute,
                timestamp,
                owner_versions,
            },
        );
    }

    pub(crate) fn remove(&mut self, id: ElementId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Drop every entry. Versions are kept so they never repeat.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
