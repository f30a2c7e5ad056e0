#![forbid(unsafe_code)]

//! Target adapter: which element a handle resizes, and how its size is
//! read and written.
//!
//! The host layout system stays in charge of its elements. A handle only
//! holds a copyable [`LayoutHost::Handle`] and goes through the host for
//! every read and write, so sizes changed by other code between gestures
//! are always observed.

use std::fmt;

use serde::{Deserialize, Serialize};
use sizer_core::geometry::{Orientation, Rect};

/// The seam between a resize handle and the host's layout system.
pub trait LayoutHost {
    /// Reference to a host-owned element. Never implies ownership.
    type Handle: Copy + Eq + fmt::Debug;

    /// Logical parent of `element` in the visual hierarchy.
    fn logical_parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Whether `element` is still part of the host's tree.
    fn is_attached(&self, element: Self::Handle) -> bool;

    /// Last rendered bounds of `element`.
    fn bounds(&self, element: Self::Handle) -> Option<Rect>;

    /// Current sizing of `element` along `orientation`.
    fn extent(&self, element: Self::Handle, orientation: Orientation) -> Option<Extent>;

    /// Give `element` an explicit size along `orientation`, switching it
    /// out of automatic sizing if needed.
    ///
    /// On rejection the element must be left exactly as it was.
    fn apply_explicit_extent(
        &mut self,
        element: Self::Handle,
        orientation: Orientation,
        size: f64,
    ) -> Result<(), ApplyRejection>;
}

/// How an element is currently sized along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Extent {
    /// The element carries an explicit size.
    Explicit(f64),
    /// The element is sized by its layout; `rendered` is the last laid-out
    /// extent.
    Auto { rendered: f64 },
}

impl Extent {
    /// The size a handle should treat as current.
    #[inline]
    #[must_use]
    pub const fn resolved(self) -> f64 {
        match self {
            Self::Explicit(size) => size,
            Self::Auto { rendered } => rendered,
        }
    }
}

/// Where a handle finds the element it resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource<H> {
    /// The handle's logical parent.
    LogicalParent,
    /// A host-supplied element.
    Explicit(H),
}

impl<H> Default for TargetSource<H> {
    fn default() -> Self {
        Self::LogicalParent
    }
}

/// No element could be resolved (or read) when an interaction began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoTargetError {
    /// The handle itself is not in the host tree, so it has no parent.
    ControlDetached,
    /// The handle has no logical parent.
    NoLogicalParent,
    /// The explicitly configured target is no longer in the host tree.
    ExplicitTargetDetached,
    /// The target resolved but the host could not report its size.
    ExtentUnavailable,
}

impl fmt::Display for NoTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControlDetached => write!(f, "no target: handle is not attached"),
            Self::NoLogicalParent => write!(f, "no target: handle has no logical parent"),
            Self::ExplicitTargetDetached => {
                write!(f, "no target: explicit target is not attached")
            }
            Self::ExtentUnavailable => write!(f, "no target: target size is unavailable"),
        }
    }
}

impl std::error::Error for NoTargetError {}

/// Why a host refused an explicit size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyRejection {
    /// The axis is owned by a constraint system that forbids overrides.
    AxisManaged,
    /// The target left the host tree.
    TargetDetached,
    /// The requested size is NaN or infinite.
    NonFiniteSize,
}

impl fmt::Display for ApplyRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AxisManaged => write!(f, "axis is managed by the host layout"),
            Self::TargetDetached => write!(f, "target is not attached"),
            Self::NonFiniteSize => write!(f, "size is not finite"),
        }
    }
}

/// A target rejected an explicit size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplyError {
    pub orientation: Orientation,
    pub requested: f64,
    pub rejection: ApplyRejection,
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot apply {} size {}: {}",
            self.orientation, self.requested, self.rejection
        )
    }
}

impl std::error::Error for ApplyError {}

/// Resolve the element a handle resizes.
///
/// An explicit target wins when it is still attached; otherwise the
/// handle's logical parent is used.
pub fn resolve_target<L: LayoutHost>(
    host: &L,
    control: Option<L::Handle>,
    source: TargetSource<L::Handle>,
) -> Result<L::Handle, NoTargetError> {
    match source {
        TargetSource::Explicit(target) => {
            if host.is_attached(target) {
                Ok(target)
            } else {
                Err(NoTargetError::ExplicitTargetDetached)
            }
        }
        TargetSource::LogicalParent => {
            let control = control
                .filter(|&control| host.is_attached(control))
                .ok_or(NoTargetError::ControlDetached)?;
            host.logical_parent(control)
                .ok_or(NoTargetError::NoLogicalParent)
        }
    }
}

/// Read the target's current size along `orientation`.
///
/// Automatic sizing reads as the last rendered extent.
pub fn read_size<L: LayoutHost>(
    host: &L,
    target: L::Handle,
    orientation: Orientation,
) -> Result<f64, NoTargetError> {
    host.extent(target, orientation)
        .map(Extent::resolved)
        .ok_or(NoTargetError::ExtentUnavailable)
}

/// Write an explicit size along `orientation`.
///
/// Non-finite sizes are rejected before the host is touched.
pub fn apply_size<L: LayoutHost>(
    host: &mut L,
    target: L::Handle,
    orientation: Orientation,
    size: f64,
) -> Result<(), ApplyError> {
    let fail = |rejection| ApplyError {
        orientation,
        requested: size,
        rejection,
    };
    if !size.is_finite() {
        return Err(fail(ApplyRejection::NonFiniteSize));
    }
    if !host.is_attached(target) {
        return Err(fail(ApplyRejection::TargetDetached));
    }
    host.apply_explicit_extent(target, orientation, size)
        .map_err(fail)
}
