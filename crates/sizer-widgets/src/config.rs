#![forbid(unsafe_code)]

//! Host configuration for a resize handle.
//!
//! Built once with `with_*` builders and validated when the controller is
//! constructed. Every interaction reads the validated values at its start.

use std::fmt;

use serde::{Deserialize, Serialize};
use sizer_core::event::PointerButton;
use sizer_core::geometry::{ConstraintError, Orientation, SizeConstraint};
use sizer_layout::{DEFAULT_KEYBOARD_STEP, DragDirection, TargetSource};

/// What happens to the target when a drag is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Live resize: the target keeps the size from the last successful move.
    #[default]
    KeepLastSize,
    /// Restore the size the target had when the drag started.
    RestoreStartSize,
}

/// Configuration for a [`SizerController`](crate::SizerController).
#[derive(Debug, Clone, PartialEq)]
pub struct SizerConfig<H> {
    /// Resize axis. `None` infers it from the handle's bounds.
    pub orientation: Option<Orientation>,
    pub minimum: f64,
    /// `f64::INFINITY` means unbounded.
    pub maximum: f64,
    pub keyboard_step: f64,
    pub target: TargetSource<H>,
    pub drag_direction: DragDirection,
    pub cancel_policy: CancelPolicy,
    /// Button required to begin a drag.
    pub activation_button: PointerButton,
    /// Cancel the drag if the pointer leaves before the host confirms capture.
    pub cancel_on_leave_without_capture: bool,
    /// Accessible name.
    pub label: Option<String>,
}

impl<H> Default for SizerConfig<H> {
    fn default() -> Self {
        Self {
            orientation: None,
            minimum: 0.0,
            maximum: f64::INFINITY,
            keyboard_step: DEFAULT_KEYBOARD_STEP,
            target: TargetSource::LogicalParent,
            drag_direction: DragDirection::Standard,
            cancel_policy: CancelPolicy::KeepLastSize,
            activation_button: PointerButton::Primary,
            cancel_on_leave_without_capture: true,
            label: None,
        }
    }
}

impl<H> SizerConfig<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    #[must_use]
    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = minimum;
        self
    }

    #[must_use]
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = maximum;
        self
    }

    #[must_use]
    pub fn with_keyboard_step(mut self, step: f64) -> Self {
        self.keyboard_step = step;
        self
    }

    /// Resize `target` instead of the handle's logical parent.
    #[must_use]
    pub fn with_target(mut self, target: H) -> Self {
        self.target = TargetSource::Explicit(target);
        self
    }

    #[must_use]
    pub fn with_drag_direction(mut self, direction: DragDirection) -> Self {
        self.drag_direction = direction;
        self
    }

    #[must_use]
    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    #[must_use]
    pub fn with_activation_button(mut self, button: PointerButton) -> Self {
        self.activation_button = button;
        self
    }

    #[must_use]
    pub fn with_cancel_on_leave_without_capture(mut self, cancel: bool) -> Self {
        self.cancel_on_leave_without_capture = cancel;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Validate the configuration, returning the size constraint it
    /// describes.
    pub fn validate(&self) -> Result<SizeConstraint, ConfigError> {
        if !self.keyboard_step.is_finite() || self.keyboard_step <= 0.0 {
            return Err(ConfigError::InvalidKeyboardStep {
                step: self.keyboard_step,
            });
        }
        SizeConstraint::new(self.minimum, self.maximum).map_err(ConfigError::Constraint)
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    Constraint(ConstraintError),
    InvalidKeyboardStep { step: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constraint(err) => write!(f, "invalid size bounds: {err}"),
            Self::InvalidKeyboardStep { step } => {
                write!(f, "keyboard step must be finite and > 0 (got {step})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Constraint(err) => Some(err),
            Self::InvalidKeyboardStep { .. } => None,
        }
    }
}
