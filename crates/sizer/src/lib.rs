#![forbid(unsafe_code)]

//! Sizer public facade crate.
//!
//! Interactive resize handles: drag or arrow-key a small control to change
//! the size of an adjacent element, with accessibility exposure. This crate
//! re-exports the common types from the internal crates and offers a
//! prelude for day-to-day usage.
//!
//! ```
//! use sizer::prelude::*;
//!
//! let mut tree = ElementTree::new();
//! let panel = tree.insert_root(Rect::from_size(100.0, 300.0));
//! let handle = tree
//!     .insert_child(panel, Rect::new(96.0, 0.0, 4.0, 300.0))
//!     .expect("panel exists");
//!
//! let mut sizer = SizerController::new(SizerConfig::new().with_bounds(0.0, 200.0))
//!     .expect("valid config");
//! sizer.attach(&tree, handle);
//! sizer.pointer_down(&mut tree, 1, PointerButton::Primary, Point::new(98.0, 10.0));
//! let dispatch = sizer.pointer_move(&mut tree, 1, Point::new(148.0, 10.0));
//! assert_eq!(dispatch.change.map(|change| change.new_size), Some(150.0));
//! ```

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use sizer_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
pub use sizer_core::geometry::{ConstraintError, Orientation, Point, Rect, SizeConstraint};
pub use sizer_core::glyph_policy::GlyphMode;

// --- Layout re-exports -----------------------------------------------------

pub use sizer_layout::{
    ApplyError, ApplyRejection, DragDirection, ElementId, ElementTree, ElementTreeError,
    ElementTreeSnapshot, Extent, LayoutHost, NoTargetError, SizeMode, TargetSource,
};

// --- Widget re-exports -----------------------------------------------------

pub use sizer_widgets::{
    AccessibilityAction, AccessibilitySnapshot, Appearance, CancelPolicy, CaptureCommand,
    ChangeSource, ConfigError, ContentSizer, DefaultStyle, DispatchOutcome, IgnoredReason,
    SizeChangeEvent, SizerConfig, SizerController, SizerDispatch, SizerError, StyleResolver,
    VisualState,
};

// --- Errors ---------------------------------------------------------------

pub use error::{Error, RecoveryAction, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AccessibilityAction, CaptureCommand, ChangeSource, ContentSizer, ElementTree, Error,
        Event, KeyCode, KeyEvent, LayoutHost, Orientation, Point, PointerButton, Rect, Result,
        SizeChangeEvent, SizerConfig, SizerController, SizerDispatch,
    };
}

pub use sizer_core as core;
pub use sizer_layout as layout;
pub use sizer_widgets as widgets;
