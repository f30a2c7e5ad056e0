#![forbid(unsafe_code)]

//! Logging facade for the sizer crates.
//!
//! With the `tracing` feature the level macros used by the controller are
//! re-exported from `tracing`. Without it, same-named macros expand to
//! nothing, so `sizer_core::debug!(..)` call sites compile either way and
//! field expressions are never evaluated.
//!
//! Levels in use:
//! - `debug`: gesture start/end, attach/detach, target resolution
//! - `trace`: every committed size
//! - `warn`: a missing target or a size the host rejected

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing without `tracing`.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without `tracing`.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without `tracing`.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Whether log output is compiled in.
#[must_use]
pub const fn enabled() -> bool {
    cfg!(feature = "tracing")
}
