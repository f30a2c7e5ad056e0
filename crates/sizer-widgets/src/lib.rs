#![forbid(unsafe_code)]

//! Widgets: the interactive half of a sizer resize handle.
//!
//! # Role in sizer
//! `sizer-widgets` turns input events into size changes. It owns the
//! interaction state machine, exclusive pointer capture, the accessibility
//! bridge, and the default visual shell.
//!
//! # Primary responsibilities
//! - **SizerController**: drag and keyboard lifecycle, change notification.
//! - **PointerCapture**: one captured pointer, acquire/release commands.
//! - **AccessibilityBridge**: current/min/max exposure and value requests.
//! - **ContentSizer**: glyph, cursor, and template lifecycle wiring.
//!
//! # How it fits in the system
//! Hosts implement [`sizer_layout::LayoutHost`] for their element tree,
//! deliver [`sizer_core::event::Event`]s to a controller, and apply the
//! [`CaptureCommand`]s it returns.

pub mod accessibility;
pub mod capture;
pub mod config;
pub mod content_sizer;
pub mod controller;
pub mod dispatch;
pub mod error;

pub use accessibility::{AccessibilityAction, AccessibilityBridge, AccessibilitySnapshot};
pub use capture::{CaptureCommand, PointerCapture};
pub use config::{CancelPolicy, ConfigError, SizerConfig};
pub use content_sizer::{
    Appearance, ContentSizer, DefaultStyle, Emphasis, ResizeCursor, StyleResolver,
};
pub use controller::{DragSession, InteractionState, ListenerId, SizerController, VisualState};
pub use dispatch::{
    ChangeSource, DispatchOutcome, IgnoredReason, LifecyclePhase, SizeChangeEvent, SizerDispatch,
};
pub use error::SizerError;
