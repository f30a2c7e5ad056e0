#![forbid(unsafe_code)]

//! Geometry policy: pure mapping from input to one-dimensional size changes.
//!
//! Every function here is deterministic and side-effect free. Pointer
//! deltas are always measured from the gesture origin, never accumulated
//! from the previous move, so rounding never drifts.
//!
//! Sign convention: with [`DragDirection::Standard`], moving right
//! (`Horizontal`) or down (`Vertical`) grows the target, as do the Right and
//! Down arrow keys.

use serde::{Deserialize, Serialize};
use sizer_core::event::KeyCode;
use sizer_core::geometry::{Orientation, Point, SizeConstraint};

/// Default keyboard step in host units.
pub const DEFAULT_KEYBOARD_STEP: f64 = 8.0;

/// Which direction of travel grows the target.
///
/// A handle on the trailing edge of its target (the usual layout) uses
/// `Standard`. A handle on the leading edge, e.g. the left edge of a
/// right-docked panel, uses `Inverted` so that moving away from the panel
/// still grows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragDirection {
    #[default]
    Standard,
    Inverted,
}

impl DragDirection {
    /// Apply this direction to a standard-signed delta.
    #[inline]
    #[must_use]
    pub fn apply(self, delta: f64) -> f64 {
        match self {
            Self::Standard => delta,
            Self::Inverted => -delta,
        }
    }
}

/// Project the pointer displacement from `start` to `current` onto the
/// resize axis.
#[inline]
#[must_use]
pub fn pointer_delta(orientation: Orientation, start: Point, current: Point) -> f64 {
    orientation.along(current) - orientation.along(start)
}

/// Map an arrow key to a signed step along the resize axis.
///
/// Returns `None` for keys on the orthogonal axis and for non-arrow keys;
/// callers must leave those events unconsumed.
#[must_use]
pub fn keyboard_delta(orientation: Orientation, key: KeyCode, step: f64) -> Option<f64> {
    match (orientation, key) {
        (Orientation::Horizontal, KeyCode::Right) | (Orientation::Vertical, KeyCode::Down) => {
            Some(step)
        }
        (Orientation::Horizontal, KeyCode::Left) | (Orientation::Vertical, KeyCode::Up) => {
            Some(-step)
        }
        _ => None,
    }
}

/// Clamp a candidate size into `constraint`.
#[inline]
#[must_use]
pub fn clamp(candidate: f64, constraint: SizeConstraint) -> f64 {
    constraint.clamp(candidate)
}
