#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Sizes and positions are `f64` in host units. A resize handle only ever
//! reasons about one axis at a time; [`Orientation`] selects it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D position in host coordinates (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self`.
    #[inline]
    pub fn offset_from(self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// A rectangle for element bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Copy of this rectangle with the extent along `orientation` replaced.
    #[must_use]
    pub fn with_extent(mut self, orientation: Orientation, extent: f64) -> Self {
        match orientation {
            Orientation::Horizontal => self.width = extent,
            Orientation::Vertical => self.height = extent,
        }
        self
    }
}

/// The axis along which a handle changes its target's size.
///
/// `Horizontal` resizes width (left/right movement, Left/Right keys);
/// `Vertical` resizes height (up/down movement, Up/Down keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The orthogonal orientation.
    #[must_use]
    pub const fn orthogonal(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Project a point onto this axis.
    #[inline]
    #[must_use]
    pub const fn along(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Extent of a rectangle along this axis (width or height).
    #[inline]
    #[must_use]
    pub const fn extent(self, rect: Rect) -> f64 {
        match self {
            Self::Horizontal => rect.width,
            Self::Vertical => rect.height,
        }
    }

    /// Infer the resize axis from the handle's own bounds.
    ///
    /// A handle taller than it is wide is a vertical bar sitting beside its
    /// target, so it resizes horizontally. A wider handle resizes
    /// vertically. Square or empty bounds resolve to `Horizontal`.
    #[must_use]
    pub fn infer_from_bounds(bounds: Rect) -> Self {
        if bounds.width < bounds.height {
            Self::Horizontal
        } else if bounds.width > bounds.height {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive size bounds applied to every requested size.
///
/// Invariant: `0 <= minimum <= maximum`. `maximum` may be `f64::INFINITY`
/// (unbounded).
///
/// Serialized as `{ "minimum": f64, "maximum": f64 | null }` with `null`
/// meaning unbounded. Deserialization goes through [`SizeConstraint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SizeConstraintRepr", into = "SizeConstraintRepr")]
pub struct SizeConstraint {
    minimum: f64,
    maximum: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SizeConstraintRepr {
    minimum: f64,
    #[serde(default)]
    maximum: Option<f64>,
}

impl TryFrom<SizeConstraintRepr> for SizeConstraint {
    type Error = ConstraintError;

    fn try_from(repr: SizeConstraintRepr) -> Result<Self, Self::Error> {
        Self::new(repr.minimum, repr.maximum.unwrap_or(f64::INFINITY))
    }
}

impl From<SizeConstraint> for SizeConstraintRepr {
    fn from(constraint: SizeConstraint) -> Self {
        Self {
            minimum: constraint.minimum,
            maximum: constraint.is_bounded().then_some(constraint.maximum),
        }
    }
}

impl SizeConstraint {
    /// Unbounded constraint: minimum 0, no maximum.
    pub const UNBOUNDED: Self = Self {
        minimum: 0.0,
        maximum: f64::INFINITY,
    };

    /// Build a validated constraint.
    pub fn new(minimum: f64, maximum: f64) -> Result<Self, ConstraintError> {
        if !minimum.is_finite() {
            return Err(ConstraintError::NonFiniteMinimum { minimum });
        }
        if minimum < 0.0 {
            return Err(ConstraintError::NegativeMinimum { minimum });
        }
        if maximum.is_nan() {
            return Err(ConstraintError::NanMaximum);
        }
        if minimum > maximum {
            return Err(ConstraintError::MinimumExceedsMaximum { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// Constraint with the given minimum and no maximum.
    pub fn at_least(minimum: f64) -> Result<Self, ConstraintError> {
        Self::new(minimum, f64::INFINITY)
    }

    #[inline]
    #[must_use]
    pub const fn minimum(&self) -> f64 {
        self.minimum
    }

    #[inline]
    #[must_use]
    pub const fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Whether the maximum is finite.
    #[inline]
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.maximum.is_finite()
    }

    /// Whether `size` already lies inside the bounds.
    #[inline]
    #[must_use]
    pub fn contains(&self, size: f64) -> bool {
        size >= self.minimum && size <= self.maximum
    }

    /// Clamp `size` into the bounds. NaN clamps to the minimum.
    #[must_use]
    pub fn clamp(&self, size: f64) -> f64 {
        if size.is_nan() || size < self.minimum {
            self.minimum
        } else if size > self.maximum {
            self.maximum
        } else {
            size
        }
    }
}

impl Default for SizeConstraint {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Rejected [`SizeConstraint`] construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintError {
    NonFiniteMinimum { minimum: f64 },
    NegativeMinimum { minimum: f64 },
    NanMaximum,
    MinimumExceedsMaximum { minimum: f64, maximum: f64 },
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteMinimum { minimum } => {
                write!(f, "minimum size must be finite (got {minimum})")
            }
            Self::NegativeMinimum { minimum } => {
                write!(f, "minimum size must be >= 0 (got {minimum})")
            }
            Self::NanMaximum => write!(f, "maximum size must not be NaN"),
            Self::MinimumExceedsMaximum { minimum, maximum } => {
                write!(f, "minimum size {minimum} exceeds maximum {maximum}")
            }
        }
    }
}

impl std::error::Error for ConstraintError {}
