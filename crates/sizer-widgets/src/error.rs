#![forbid(unsafe_code)]

//! Interaction errors reported through [`SizerDispatch`](crate::SizerDispatch).
//!
//! Both kinds are recovered locally: the controller returns to idle and the
//! next gesture starts fresh. Clamping is never an error.

use std::fmt;

use sizer_layout::{ApplyError, NoTargetError};

/// A gesture could not start, or was aborted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizerError {
    /// No target could be resolved or read when the interaction began.
    NoTarget(NoTargetError),
    /// The target rejected an explicit size.
    Apply(ApplyError),
}

impl SizerError {
    /// Whether the failure aborted a gesture that had already started.
    #[must_use]
    pub const fn aborts_gesture(&self) -> bool {
        matches!(self, Self::Apply(_))
    }
}

impl fmt::Display for SizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTarget(err) => write!(f, "{err}"),
            Self::Apply(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SizerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoTarget(err) => Some(err),
            Self::Apply(err) => Some(err),
        }
    }
}

impl From<NoTargetError> for SizerError {
    fn from(err: NoTargetError) -> Self {
        Self::NoTarget(err)
    }
}

impl From<ApplyError> for SizerError {
    fn from(err: ApplyError) -> Self {
        Self::Apply(err)
    }
}
