#![forbid(unsafe_code)]

//! Sizer error model and local recovery.
//!
//! Each subsystem keeps its own typed error. [`Error`] unifies them so a
//! host can handle every failure in one place, and [`Error::recovery`] says
//! what the control did (or the host should do) about it. No interaction
//! error is fatal: the control always returns to idle.

use std::fmt;

use sizer_core::geometry::ConstraintError;
use sizer_layout::{ApplyError, ElementTreeError, NoTargetError};
use sizer_widgets::{ConfigError, SizerError};

/// Top-level error type for sizer hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Configuration rejected at construction.
    Config(ConfigError),
    /// A gesture could not start or was aborted.
    Interaction(SizerError),
    /// The reference element tree rejected an operation.
    ElementTree(ElementTreeError),
}

/// Standard result type for sizer APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What happens after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// The gesture never started; nothing changed.
    IgnoreGesture,
    /// The gesture was cancelled; the target keeps its last accepted size.
    CancelGesture,
    /// The control cannot be built with this configuration.
    RejectConfiguration,
}

impl Error {
    #[must_use]
    pub fn recovery(&self) -> RecoveryAction {
        match self {
            Self::Config(_) => RecoveryAction::RejectConfiguration,
            Self::Interaction(SizerError::NoTarget(_)) => RecoveryAction::IgnoreGesture,
            Self::Interaction(SizerError::Apply(_)) => RecoveryAction::CancelGesture,
            Self::ElementTree(_) => RecoveryAction::IgnoreGesture,
        }
    }

    /// Error type label for logs.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Interaction(SizerError::NoTarget(_)) => "no_target",
            Self::Interaction(SizerError::Apply(_)) => "apply",
            Self::ElementTree(_) => "element_tree",
        }
    }

    /// Whether the control stays usable after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.recovery(), RecoveryAction::RejectConfiguration)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Interaction(err) => write!(f, "{err}"),
            Self::ElementTree(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Interaction(err) => Some(err),
            Self::ElementTree(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ConstraintError> for Error {
    fn from(err: ConstraintError) -> Self {
        Self::Config(ConfigError::Constraint(err))
    }
}

impl From<SizerError> for Error {
    fn from(err: SizerError) -> Self {
        Self::Interaction(err)
    }
}

impl From<NoTargetError> for Error {
    fn from(err: NoTargetError) -> Self {
        Self::Interaction(SizerError::NoTarget(err))
    }
}

impl From<ApplyError> for Error {
    fn from(err: ApplyError) -> Self {
        Self::Interaction(SizerError::Apply(err))
    }
}

impl From<ElementTreeError> for Error {
    fn from(err: ElementTreeError) -> Self {
        Self::ElementTree(err)
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IgnoreGesture => write!(f, "ignore_gesture"),
            Self::CancelGesture => write!(f, "cancel_gesture"),
            Self::RejectConfiguration => write!(f, "reject_configuration"),
        }
    }
}
