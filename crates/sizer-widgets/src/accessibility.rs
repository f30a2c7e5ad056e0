#![forbid(unsafe_code)]

//! Accessibility bridge: the value assistive technology sees.
//!
//! The bridge is the first subscriber of the controller's size-change
//! stream, so its reported value is updated before any host listener runs
//! and never lags a user-driven resize. Actions coming back from assistive
//! technology go through the same clamp-and-apply path as the keyboard.

use sizer_core::geometry::{Orientation, SizeConstraint};

use crate::dispatch::SizeChangeEvent;

/// Values exposed to assistive technology.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilitySnapshot {
    pub label: Option<String>,
    /// `None` while detached or before the target was first read.
    pub current: Option<f64>,
    pub minimum: f64,
    /// `f64::INFINITY` when unbounded.
    pub maximum: f64,
    pub orientation: Orientation,
    pub step: f64,
}

impl AccessibilitySnapshot {
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.maximum.is_finite()
    }
}

/// A request from assistive technology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccessibilityAction {
    SetValue(f64),
    /// Grow by one keyboard step.
    Increment,
    /// Shrink by one keyboard step.
    Decrement,
}

impl AccessibilityAction {
    /// Unclamped size this action asks for.
    #[must_use]
    pub fn requested_size(self, current: f64, step: f64) -> f64 {
        match self {
            Self::SetValue(value) => value,
            Self::Increment => current + step,
            Self::Decrement => current - step,
        }
    }
}

/// Keeps the exposed snapshot in step with committed changes.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilityBridge {
    snapshot: AccessibilitySnapshot,
}

impl AccessibilityBridge {
    #[must_use]
    pub fn new(
        label: Option<String>,
        constraint: SizeConstraint,
        orientation: Orientation,
        step: f64,
    ) -> Self {
        Self {
            snapshot: AccessibilitySnapshot {
                label,
                current: None,
                minimum: constraint.minimum(),
                maximum: constraint.maximum(),
                orientation,
                step,
            },
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &AccessibilitySnapshot {
        &self.snapshot
    }

    /// Current size as last reported.
    #[must_use]
    pub fn current(&self) -> Option<f64> {
        self.snapshot.current
    }

    pub(crate) fn observe(&mut self, event: &SizeChangeEvent) {
        self.snapshot.current = Some(event.new_size);
        self.snapshot.orientation = event.orientation;
    }

    pub(crate) fn sync(&mut self, current: Option<f64>, orientation: Orientation) {
        self.snapshot.current = current;
        self.snapshot.orientation = orientation;
    }
}

#[cfg(feature = "accesskit")]
mod accesskit_mapping {
    use accesskit::{Action, ActionData, Node, Role};
    use sizer_core::geometry::Orientation;

    use super::{AccessibilityAction, AccessibilitySnapshot};

    impl AccessibilitySnapshot {
        /// Build the AccessKit node for this handle.
        ///
        /// A handle that resizes horizontally is drawn as a vertical bar,
        /// so the node's orientation is the orthogonal axis.
        #[must_use]
        pub fn to_accesskit_node(&self) -> Node {
            let mut node = Node::new(Role::Splitter);
            if let Some(label) = &self.label {
                node.set_label(label.as_str());
            }
            if let Some(current) = self.current {
                node.set_numeric_value(current);
            }
            node.set_min_numeric_value(self.minimum);
            if self.is_bounded() {
                node.set_max_numeric_value(self.maximum);
            }
            node.set_numeric_value_step(self.step);
            node.set_orientation(match self.orientation {
                Orientation::Horizontal => accesskit::Orientation::Vertical,
                Orientation::Vertical => accesskit::Orientation::Horizontal,
            });
            node.add_action(Action::Focus);
            node.add_action(Action::SetValue);
            node.add_action(Action::Increment);
            node.add_action(Action::Decrement);
            node
        }
    }

    impl AccessibilityAction {
        /// Map an AccessKit action request onto a handle action.
        ///
        /// Returns `None` for actions a handle does not support and for
        /// `SetValue` without a numeric payload.
        #[must_use]
        pub fn from_accesskit(action: Action, data: Option<&ActionData>) -> Option<Self> {
            match action {
                Action::Increment => Some(Self::Increment),
                Action::Decrement => Some(Self::Decrement),
                Action::SetValue => match data {
                    Some(ActionData::NumericValue(value)) => Some(Self::SetValue(*value)),
                    _ => None,
                },
                _ => None,
            }
        }
    }
}
