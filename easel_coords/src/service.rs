// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinate service: local/absolute conversion, invalidation, and drag re-parenting.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use tracing::{debug, trace, warn};

use crate::cache::{CoordinateCache, CoordinateCacheEntry, OwnerVersions};
use crate::clock::{Clock, SystemClock};
use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::types::{ContainerLookup, Element, ElementId};

/// How a drag changed an element's containment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// The drop point lies in a container other than the current owner.
    Entered {
        /// The new owner.
        container: ElementId,
    },
    /// The element had an owner and the drop point lies outside every container.
    Left {
        /// The previous owner.
        container: ElementId,
    },
    /// The owner stays the same.
    Unchanged,
}

/// Result of [`CoordinateService::convert_drag_coordinates`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragConversion {
    /// Position to store on the element: relative to `owner` if set, absolute otherwise.
    pub position: Point,
    /// Owner after the drop.
    pub owner: Option<ElementId>,
    /// What changed.
    pub outcome: DragOutcome,
}

impl DragConversion {
    /// True if the element must be re-parented.
    pub fn containment_changed(&self) -> bool {
        self.outcome != DragOutcome::Unchanged
    }
}

#[derive(Debug)]
struct Resolved {
    absolute: Point,
    owner_versions: OwnerVersions,
    cacheable: bool,
}

/// Converts between local and absolute canvas coordinates for nested elements.
///
/// Absolute positions are cached per element. An entry is reused until it is older
/// than the configured TTL or any container in the element's owner chain has been
/// invalidated with [`invalidate_container`](Self::invalidate_container). Callers
/// must invalidate after mutating a container; until they do, stale positions may
/// be returned for up to one TTL.
///
/// All coordinates are sanitized on the way in and out: NaN and infinities become
/// zero and values are rounded to [`TransformConfig::decimal_places`].
#[derive(Debug)]
pub struct CoordinateService<C: Clock = SystemClock> {
    config: TransformConfig,
    clock: C,
    cache: CoordinateCache,
    dangling: HashSet<ElementId>,
}

impl Default for CoordinateService {
    fn default() -> Self {
        Self {
            config: TransformConfig::default(),
            clock: SystemClock::default(),
            cache: CoordinateCache::default(),
            dangling: HashSet::new(),
        }
    }
}

impl CoordinateService {
    /// Create a service timed by the system clock.
    pub fn new(config: TransformConfig) -> Result<Self, TransformError> {
        Self::with_clock(config, SystemClock::default())
    }
}

impl<C: Clock> CoordinateService<C> {
    /// Create a service timed by `clock`.
    pub fn with_clock(config: TransformConfig, clock: C) -> Result<Self, TransformError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            cache: CoordinateCache::default(),
            dangling: HashSet::new(),
        })
    }

    /// Active settings.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// The time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current version counter of `container`. Starts at 0.
    pub fn version(&self, container: ElementId) -> u64 {
        self.cache.version(container)
    }

    /// The cache entry for `id`, valid or not.
    pub fn cached(&self, id: ElementId) -> Option<&CoordinateCacheEntry> {
        self.cache.get(id)
    }

    /// Number of cache entries, including expired ones not yet replaced.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Absolute canvas position of `element`'s top-left corner.
    ///
    /// Un-owned elements resolve to their sanitized local position. Owned elements add
    /// their owner's absolute position, recursively.
    ///
    /// A missing owner is tolerated once per element: the first attempt logs a warning and
    /// returns the local position uncached; a second attempt before the owner reappears
    /// fails with [`TransformError::DanglingOwner`].
    pub fn to_absolute<L: ContainerLookup + ?Sized>(
        &mut self,
        element: &Element,
        containers: &L,
    ) -> Result<Point, TransformError> {
        let now = self.clock.now();
        self.resolve(element.id, element, containers, now, 0)
            .map(|r| r.absolute)
    }

    /// Position of `absolute` relative to `container`'s top-left corner.
    pub fn to_relative<L: ContainerLookup + ?Sized>(
        &mut self,
        absolute: Point,
        container: &Element,
        containers: &L,
    ) -> Result<Point, TransformError> {
        let origin = self.to_absolute(container, containers)?;
        Ok(self.sanitize(self.sanitize(absolute) - origin.to_vec2()))
    }

    /// Absolute bounds of `element`.
    pub fn absolute_bounds<L: ContainerLookup + ?Sized>(
        &mut self,
        element: &Element,
        containers: &L,
    ) -> Result<Rect, TransformError> {
        let origin = self.to_absolute(element, containers)?;
        Ok(Rect::from_origin_size(origin, element.size).abs())
    }

    /// Forget `id`'s cached position.
    pub fn invalidate_element(&mut self, id: ElementId) {
        if self.cache.remove(id) {
            trace!(element = %id, "invalidated cached coordinates");
        }
    }

    /// Mark `container` as mutated.
    ///
    /// Drops the container's own entry and bumps its version, which lazily invalidates
    /// every cached descendant at any depth.
    pub fn invalidate_container(&mut self, container: ElementId) {
        self.cache.remove(container);
        let version = self.cache.bump(container);
        debug!(container = %container, version, "invalidated container");
    }

    /// Drop every cached position, for example after reloading a document.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
        self.dangling.clear();
        debug!("invalidated all cached coordinates");
    }

    /// Decide where a dragged element lands.
    ///
    /// `proposed` is the element's new absolute top-left position. The target container is
    /// the one whose absolute bounds contain `proposed`, edges included, skipping the element
    /// itself and anything it owns. Among overlapping candidates the highest `z_index` wins,
    /// then the smallest area, then the lowest id.
    pub fn convert_drag_coordinates<L: ContainerLookup + ?Sized>(
        &mut self,
        element: &Element,
        proposed: Point,
        containers: &L,
    ) -> Result<DragConversion, TransformError> {
        let proposed = self.sanitize(proposed);
        let mut best: Option<(&Element, Rect)> = None;
        for candidate in containers.containers() {
            if candidate.id == element.id
                || self.has_ancestor(containers, candidate.owner, |id| id == element.id)
            {
                continue;
            }
            let bounds = self.absolute_bounds(candidate, containers)?;
            if !contains_inclusive(bounds, proposed) {
                continue;
            }
            if best.is_none_or(|(b, b_bounds)| outranks(candidate, bounds, b, b_bounds)) {
                best = Some((candidate, bounds));
            }
        }

        let target = best.map(|(c, _)| c);
        let conversion = match (element.owner, target) {
            (current, Some(t)) if current != Some(t.id) => DragConversion {
                position: self.to_relative(proposed, t, containers)?,
                owner: Some(t.id),
                outcome: DragOutcome::Entered { container: t.id },
            },
            (Some(current), None) => DragConversion {
                position: proposed,
                owner: None,
                outcome: DragOutcome::Left { container: current },
            },
            (_, Some(t)) => DragConversion {
                position: self.to_relative(proposed, t, containers)?,
                owner: Some(t.id),
                outcome: DragOutcome::Unchanged,
            },
            (None, None) => DragConversion {
                position: proposed,
                owner: None,
                outcome: DragOutcome::Unchanged,
            },
        };
        trace!(element = %element.id, outcome = ?conversion.outcome, "converted drag");
        Ok(conversion)
    }

    /// Clamp a local position so `element` stays inside `container` with `padding` on every side.
    ///
    /// When the element is too large to fit on an axis it is pinned at `padding` on that axis.
    pub fn constrain_to_section(
        &self,
        coords: Point,
        element: &Element,
        container: &Element,
        padding: f64,
    ) -> Point {
        let pad = if padding.is_finite() {
            padding.max(0.0)
        } else {
            0.0
        };
        let coords = self.sanitize(coords);
        let inner = abs_size(element.size);
        let outer = abs_size(container.size);
        let axis = |v: f64, inner: f64, outer: f64| {
            let hi = outer - inner - pad;
            if hi.is_nan() || hi < pad {
                pad
            } else {
                v.clamp(pad, hi)
            }
        };
        self.sanitize(Point::new(
            axis(coords.x, inner.width, outer.width),
            axis(coords.y, inner.height, outer.height),
        ))
    }

    /// Move many elements by one absolute-space `delta`.
    ///
    /// Returns the new local position of each moved element, relative to its owner or
    /// absolute when un-owned. Elements whose owner chain includes another element of the
    /// batch are skipped: they travel with that container and keep their local position.
    /// Every moved element's cache entry is dropped, and moved containers are invalidated.
    pub fn batch_apply_delta<L: ContainerLookup + ?Sized>(
        &mut self,
        elements: &[Element],
        delta: Vec2,
        containers: &L,
    ) -> Result<HashMap<ElementId, Point>, TransformError> {
        let batch: HashSet<ElementId> = elements.iter().map(|e| e.id).collect();
        let delta = self.sanitize(delta.to_point()).to_vec2();
        let mut moved = HashMap::with_capacity(elements.len());
        for element in elements {
            if self.has_ancestor(containers, element.owner, |id| batch.contains(&id)) {
                trace!(element = %element.id, "moves with its container");
                continue;
            }
            let absolute = self.to_absolute(element, containers)?;
            let target = absolute + delta;
            let local = match element.owner.and_then(|o| containers.container(o)) {
                Some(owner) => self.to_relative(target, owner, containers)?,
                None => self.sanitize(target),
            };
            self.invalidate_element(element.id);
            if containers.container(element.id).is_some() {
                self.invalidate_container(element.id);
            }
            moved.insert(element.id, local);
        }
        debug!(
            moved = moved.len(),
            skipped = elements.len() - moved.len(),
            "applied batch delta"
        );
        Ok(moved)
    }

    fn resolve<L: ContainerLookup + ?Sized>(
        &mut self,
        origin: ElementId,
        element: &Element,
        containers: &L,
        now: Duration,
        depth: usize,
    ) -> Result<Resolved, TransformError> {
        if let Some(entry) = self.cache.valid(element.id, now, self.config.ttl) {
            trace!(element = %element.id, "coordinate cache hit");
            return Ok(Resolved {
                absolute: entry.absolute(),
                owner_versions: OwnerVersions::from_slice(entry.owner_versions()),
                cacheable: true,
            });
        }
        trace!(element = %element.id, "coordinate cache miss");

        let local = self.sanitize(element.position);
        let resolved = match element.owner {
            None => Resolved {
                absolute: local,
                owner_versions: OwnerVersions::new(),
                cacheable: true,
            },
            Some(owner) => {
                if depth >= self.config.max_nesting_depth {
                    return Err(TransformError::NestingTooDeep {
                        element: origin,
                        limit: self.config.max_nesting_depth,
                    });
                }
                if let Some(container) = containers.container(owner) {
                    self.dangling.remove(&element.id);
                    let parent = self.resolve(origin, container, containers, now, depth + 1)?;
                    let mut owner_versions = OwnerVersions::new();
                    owner_versions.push((owner, self.cache.version(owner)));
                    owner_versions.extend_from_slice(&parent.owner_versions);
                    Resolved {
                        absolute: self.sanitize(local + parent.absolute.to_vec2()),
                        owner_versions,
                        cacheable: parent.cacheable,
                    }
                } else {
                    if !self.dangling.insert(element.id) {
                        return Err(TransformError::DanglingOwner {
                            element: element.id,
                            owner,
                        });
                    }
                    warn!(
                        element = %element.id,
                        owner = %owner,
                        "owner container not found, using local coordinates"
                    );
                    Resolved {
                        absolute: local,
                        owner_versions: OwnerVersions::new(),
                        cacheable: false,
                    }
                }
            }
        };

        if resolved.cacheable && !self.config.ttl.is_zero() {
            self.cache.store(
                element.id,
                resolved.absolute,
                now,
                resolved.owner_versions.clone(),
            );
        }
        Ok(resolved)
    }

    /// Whether any container in the chain starting at `owner` satisfies `pred`.
    fn has_ancestor<L: ContainerLookup + ?Sized>(
        &self,
        containers: &L,
        mut owner: Option<ElementId>,
        pred: impl Fn(ElementId) -> bool,
    ) -> bool {
        for _ in 0..self.config.max_nesting_depth {
            let Some(id) = owner else {
                return false;
            };
            if pred(id) {
                return true;
            }
            owner = containers.container(id).and_then(|c| c.owner);
        }
        false
    }

    fn sanitize(&self, p: Point) -> Point {
        Point::new(self.round(p.x), self.round(p.y))
    }

    fn round(&self, v: f64) -> f64 {
        if !v.is_finite() {
            return 0.0;
        }
        let factor = 10_f64.powi(i32::from(self.config.decimal_places));
        let scaled = (v * factor).round();
        if scaled.is_finite() { scaled / factor } else { v }
    }
}

fn abs_size(s: Size) -> Size {
    Size::new(s.width.abs(), s.height.abs())
}

fn contains_inclusive(r: Rect, p: Point) -> bool {
    r.x0 <= p.x && p.x <= r.x1 && r.y0 <= p.y && p.y <= r.y1
}

/// Whether container `a` beats `b` as a drop target.
fn outranks(a: &Element, a_bounds: Rect, b: &Element, b_bounds: Rect) -> bool {
    a.z_index
        .cmp(&b.z_index)
        .then_with(|| b_bounds.area().total_cmp(&a_bounds.area()))
        .then_with(|| b.id.cmp(&a.id))
        .is_gt()
}
