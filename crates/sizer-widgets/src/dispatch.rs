#![forbid(unsafe_code)]

//! Records returned by every controller entry point.

use serde::{Deserialize, Serialize};
use sizer_core::geometry::Orientation;

use crate::capture::CaptureCommand;
use crate::error::SizerError;

/// What produced a size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    Pointer,
    Keyboard,
    Programmatic,
}

/// One committed size change, delivered synchronously to the accessibility
/// bridge and then to every listener.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeChangeEvent {
    pub previous_size: f64,
    pub new_size: f64,
    pub orientation: Orientation,
    pub source: ChangeSource,
}

/// Entry point that produced a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    Attach,
    Detach,
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    PointerEnter,
    PointerLeave,
    CaptureAcquired,
    LostPointerCapture,
    KeyDown,
    Focus,
    SetValue,
    AccessibilityAction,
}

/// Why an entry point did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredReason {
    /// The control is not attached to a host tree.
    Detached,
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    /// Leave after the host confirmed capture keeps the drag alive.
    LeaveWhileCaptured,
    NotFocused,
    KeyRelease,
    /// Not a key on the resize axis.
    KeyNotHandled,
    DragInProgress,
    NonFiniteValue,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// A size change was committed.
    Applied,
    /// State changed without a size change.
    Transitioned,
    /// Handled, but the clamped size equals the current size.
    Unchanged,
    /// See [`SizerDispatch::error`].
    Failed,
    Ignored(IgnoredReason),
}

/// Result of one controller entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizerDispatch {
    pub phase: LifecyclePhase,
    /// Whether the host should stop routing the input event.
    pub consumed: bool,
    pub change: Option<SizeChangeEvent>,
    pub capture_command: Option<CaptureCommand>,
    pub error: Option<SizerError>,
    pub outcome: DispatchOutcome,
}

impl SizerDispatch {
    pub(crate) const fn ignored(phase: LifecyclePhase, reason: IgnoredReason) -> Self {
        Self {
            phase,
            consumed: false,
            change: None,
            capture_command: None,
            error: None,
            outcome: DispatchOutcome::Ignored(reason),
        }
    }

    pub(crate) const fn transitioned(phase: LifecyclePhase, consumed: bool) -> Self {
        Self {
            phase,
            consumed,
            change: None,
            capture_command: None,
            error: None,
            outcome: DispatchOutcome::Transitioned,
        }
    }

    pub(crate) const fn unchanged(phase: LifecyclePhase, consumed: bool) -> Self {
        Self {
            phase,
            consumed,
            change: None,
            capture_command: None,
            error: None,
            outcome: DispatchOutcome::Unchanged,
        }
    }

    pub(crate) const fn applied(phase: LifecyclePhase, change: SizeChangeEvent) -> Self {
        Self {
            phase,
            consumed: true,
            change: Some(change),
            capture_command: None,
            error: None,
            outcome: DispatchOutcome::Applied,
        }
    }

    pub(crate) const fn failed(phase: LifecyclePhase, consumed: bool, error: SizerError) -> Self {
        Self {
            phase,
            consumed,
            change: None,
            capture_command: None,
            error: Some(error),
            outcome: DispatchOutcome::Failed,
        }
    }

    #[must_use]
    pub(crate) const fn with_capture_command(mut self, command: Option<CaptureCommand>) -> Self {
        self.capture_command = command;
        self
    }

    /// The reason this dispatch was ignored, if it was.
    #[must_use]
    pub const fn ignored_reason(&self) -> Option<IgnoredReason> {
        match self.outcome {
            DispatchOutcome::Ignored(reason) => Some(reason),
            _ => None,
        }
    }
}
