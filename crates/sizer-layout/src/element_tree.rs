#![forbid(unsafe_code)]

//! Retained element tree implementing [`LayoutHost`].
//!
//! A minimal host: elements have a parent, last rendered bounds, and a
//! per-axis sizing mode. Applying an explicit size updates the rendered
//! extent immediately, standing in for the host's next layout pass. An axis
//! can be marked *managed* to model a constraint system that forbids
//! overrides.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use sizer_core::geometry::{Orientation, Rect};

use crate::target::{ApplyRejection, Extent, LayoutHost};

/// Stable identifier for an element in an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// Smallest valid id.
    pub const MIN: Self = Self(1);

    /// Create an id from a raw value. Zero is reserved.
    pub fn new(raw: u64) -> Result<Self, ElementTreeError> {
        if raw == 0 {
            return Err(ElementTreeError::ZeroElementId);
        }
        Ok(Self(raw))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sizing mode of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum SizeMode {
    /// Sized by the layout; reads as the rendered extent.
    #[default]
    Auto,
    /// Explicit size set by a handle or the host.
    Explicit(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
struct AxisState {
    mode: SizeMode,
    managed: bool,
}

/// Serializable record of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: ElementId,
    pub parent: Option<ElementId>,
    pub bounds: Rect,
    width: AxisState,
    height: AxisState,
}

impl ElementRecord {
    fn new(id: ElementId, parent: Option<ElementId>, bounds: Rect) -> Self {
        Self {
            id,
            parent,
            bounds,
            width: AxisState::default(),
            height: AxisState::default(),
        }
    }

    fn axis(&self, orientation: Orientation) -> &AxisState {
        match orientation {
            Orientation::Horizontal => &self.width,
            Orientation::Vertical => &self.height,
        }
    }

    fn axis_mut(&mut self, orientation: Orientation) -> &mut AxisState {
        match orientation {
            Orientation::Horizontal => &mut self.width,
            Orientation::Vertical => &mut self.height,
        }
    }
}

/// Canonical snapshot of an [`ElementTree`], ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTreeSnapshot {
    pub next_id: ElementId,
    pub elements: Vec<ElementRecord>,
}

/// Retained element arena.
#[derive(Debug, Clone)]
pub struct ElementTree {
    elements: FxHashMap<ElementId, ElementRecord>,
    next_id: u64,
}

impl ElementTree {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: FxHashMap::default(),
            next_id: ElementId::MIN.get(),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Insert a parentless element.
    pub fn insert_root(&mut self, bounds: Rect) -> ElementId {
        let id = self.allocate();
        self.elements.insert(id, ElementRecord::new(id, None, bounds));
        id
    }

    /// Insert an element under `parent`.
    pub fn insert_child(
        &mut self,
        parent: ElementId,
        bounds: Rect,
    ) -> Result<ElementId, ElementTreeError> {
        if !self.contains(parent) {
            return Err(ElementTreeError::UnknownElement(parent));
        }
        let id = self.allocate();
        self.elements
            .insert(id, ElementRecord::new(id, Some(parent), bounds));
        Ok(id)
    }

    /// Remove `id` and every descendant.
    pub fn remove(&mut self, id: ElementId) -> Result<(), ElementTreeError> {
        if !self.contains(id) {
            return Err(ElementTreeError::UnknownElement(id));
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            self.elements.remove(&next);
            pending.extend(
                self.elements
                    .values()
                    .filter(|record| record.parent == Some(next))
                    .map(|record| record.id),
            );
        }
        Ok(())
    }

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|record| record.parent)
    }

    #[must_use]
    pub fn rendered_bounds(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(&id).map(|record| record.bounds)
    }

    /// Record a layout pass result for `id`.
    pub fn set_rendered_bounds(
        &mut self,
        id: ElementId,
        bounds: Rect,
    ) -> Result<(), ElementTreeError> {
        let record = self.record_mut(id)?;
        record.bounds = bounds;
        Ok(())
    }

    #[must_use]
    pub fn size_mode(&self, id: ElementId, orientation: Orientation) -> Option<SizeMode> {
        self.elements
            .get(&id)
            .map(|record| record.axis(orientation).mode)
    }

    /// Set an axis back to automatic sizing.
    pub fn reset_to_auto(
        &mut self,
        id: ElementId,
        orientation: Orientation,
    ) -> Result<(), ElementTreeError> {
        self.record_mut(id)?.axis_mut(orientation).mode = SizeMode::Auto;
        Ok(())
    }

    /// Mark an axis as owned by the host's constraint system.
    pub fn set_managed(
        &mut self,
        id: ElementId,
        orientation: Orientation,
        managed: bool,
    ) -> Result<(), ElementTreeError> {
        self.record_mut(id)?.axis_mut(orientation).managed = managed;
        Ok(())
    }

    /// Canonical snapshot ordered by id.
    #[must_use]
    pub fn to_snapshot(&self) -> ElementTreeSnapshot {
        let mut elements: Vec<ElementRecord> = self.elements.values().cloned().collect();
        elements.sort_by_key(|record| record.id);
        ElementTreeSnapshot {
            next_id: ElementId(self.next_id),
            elements,
        }
    }

    /// Rebuild a tree from a snapshot, validating ids and parent links.
    pub fn from_snapshot(snapshot: ElementTreeSnapshot) -> Result<Self, ElementTreeError> {
        if snapshot.next_id.get() == 0 {
            return Err(ElementTreeError::ZeroElementId);
        }
        let mut elements = FxHashMap::default();
        for record in snapshot.elements {
            if record.id.get() == 0 || record.parent.is_some_and(|parent| parent.get() == 0) {
                return Err(ElementTreeError::ZeroElementId);
            }
            if record.id >= snapshot.next_id {
                return Err(ElementTreeError::IdBeyondAllocator {
                    id: record.id,
                    next_id: snapshot.next_id,
                });
            }
            let id = record.id;
            if elements.insert(id, record).is_some() {
                return Err(ElementTreeError::DuplicateElement(id));
            }
        }
        for record in elements.values() {
            if let Some(parent) = record.parent
                && !elements.contains_key(&parent)
            {
                return Err(ElementTreeError::MissingParent {
                    element: record.id,
                    parent,
                });
            }
        }
        Ok(Self {
            elements,
            next_id: snapshot.next_id.get(),
        })
    }

    fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn record_mut(&mut self, id: ElementId) -> Result<&mut ElementRecord, ElementTreeError> {
        self.elements
            .get_mut(&id)
            .ok_or(ElementTreeError::UnknownElement(id))
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutHost for ElementTree {
    type Handle = ElementId;

    fn logical_parent(&self, element: ElementId) -> Option<ElementId> {
        self.parent(element)
    }

    fn is_attached(&self, element: ElementId) -> bool {
        self.contains(element)
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.rendered_bounds(element)
    }

    fn extent(&self, element: ElementId, orientation: Orientation) -> Option<Extent> {
        let record = self.elements.get(&element)?;
        Some(match record.axis(orientation).mode {
            SizeMode::Explicit(size) => Extent::Explicit(size),
            SizeMode::Auto => Extent::Auto {
                rendered: orientation.extent(record.bounds),
            },
        })
    }

    fn apply_explicit_extent(
        &mut self,
        element: ElementId,
        orientation: Orientation,
        size: f64,
    ) -> Result<(), ApplyRejection> {
        let record = self
            .elements
            .get_mut(&element)
            .ok_or(ApplyRejection::TargetDetached)?;
        if record.axis(orientation).managed {
            return Err(ApplyRejection::AxisManaged);
        }
        record.axis_mut(orientation).mode = SizeMode::Explicit(size);
        record.bounds = record.bounds.with_extent(orientation, size);
        Ok(())
    }
}

/// Element tree errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTreeError {
    ZeroElementId,
    UnknownElement(ElementId),
    DuplicateElement(ElementId),
    MissingParent {
        element: ElementId,
        parent: ElementId,
    },
    IdBeyondAllocator {
        id: ElementId,
        next_id: ElementId,
    },
}

impl fmt::Display for ElementTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroElementId => write!(f, "element id 0 is reserved"),
            Self::UnknownElement(id) => write!(f, "unknown element {id}"),
            Self::DuplicateElement(id) => write!(f, "duplicate element {id}"),
            Self::MissingParent { element, parent } => {
                write!(f, "element {element} references missing parent {parent}")
            }
            Self::IdBeyondAllocator { id, next_id } => {
                write!(f, "element {id} is not below allocator cursor {next_id}")
            }
        }
    }
}

impl std::error::Error for ElementTreeError {}
