#![forbid(unsafe_code)]

//! Core: input events, geometry, and glyph policy for resize handles.
//!
//! # Role in sizer
//! `sizer-core` is the input layer. It owns the normalized event types that
//! the interaction controller consumes, the one-dimensional sizing
//! primitives (`Orientation`, `SizeConstraint`) shared by every other crate,
//! and the logging facade.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, pointers, focus).
//! - **Geometry**: points, rectangles, orientation, and size constraints.
//! - **Glyph policy**: Unicode vs ASCII selection for handle glyphs.
//! - **Logging**: `tracing` macros when enabled, no-ops otherwise.
//!
//! # How it fits in the system
//! `sizer-layout` builds the geometry policy and target adapter on top of
//! these types, and `sizer-widgets` drives them from input events.

pub mod event;
pub mod geometry;
pub mod glyph_policy;
pub mod logging;

// Without `tracing` the no-op macros are already at the crate root.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
