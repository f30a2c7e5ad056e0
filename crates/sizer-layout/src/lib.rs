#![forbid(unsafe_code)]

//! Sizing math and the seam to the host layout system.
//!
//! # Role in sizer
//! `sizer-layout` turns raw input deltas into bounded sizes
//! ([`policy`]) and reads/writes those sizes on an externally owned
//! element ([`target`]). It never owns the element being resized; hosts
//! implement [`LayoutHost`] over their own layout tree. [`ElementTree`] is
//! a small retained implementation used by tests and simple hosts.

pub mod element_tree;
pub mod policy;
pub mod target;

pub use element_tree::{ElementId, ElementTree, ElementTreeError, ElementTreeSnapshot, SizeMode};
pub use policy::{DEFAULT_KEYBOARD_STEP, DragDirection};
pub use target::{
    ApplyError, ApplyRejection, Extent, LayoutHost, NoTargetError, TargetSource, apply_size,
    read_size, resolve_target,
};

pub use sizer_core::geometry::{Orientation, Point, Rect, SizeConstraint};
