#![forbid(unsafe_code)]

//! Exclusive pointer-capture tracking for one resize handle.
//!
//! Enforces:
//! - one active pointer at a time,
//! - an explicit `Acquire` command when a drag begins,
//! - a `Release` command on every exit path except a capture the host
//!   already reported as lost.
//!
//! Hosts wire the commands to their native capture calls (e.g. DOM
//! `setPointerCapture()` / `releasePointerCapture()`).

use sizer_core::event::PointerButton;

use crate::dispatch::IgnoredReason;

/// Host command for pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePointer {
    pointer_id: u32,
    button: PointerButton,
    state: CaptureState,
}

/// Tracks the pointer a handle has captured, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerCapture {
    active: Option<ActivePointer>,
}

impl PointerCapture {
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|active| active.pointer_id)
    }

    /// Whether the host confirmed capture for the active pointer.
    #[must_use]
    pub fn is_acquired(&self) -> bool {
        self.active
            .is_some_and(|active| active.state == CaptureState::Acquired)
    }

    /// Start tracking `pointer_id` and request capture for it.
    pub fn begin(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
    ) -> Result<CaptureCommand, IgnoredReason> {
        if pointer_id == 0 {
            return Err(IgnoredReason::InvalidPointerId);
        }
        if self.active.is_some() {
            return Err(IgnoredReason::ActivePointerAlreadyInProgress);
        }
        self.active = Some(ActivePointer {
            pointer_id,
            button,
            state: CaptureState::Requested,
        });
        Ok(CaptureCommand::Acquire { pointer_id })
    }

    /// The host confirmed capture.
    pub fn acknowledge(&mut self, pointer_id: u32) -> Result<(), IgnoredReason> {
        let active = self.active_mut(pointer_id)?;
        active.state = CaptureState::Acquired;
        Ok(())
    }

    /// Check that `pointer_id` is the captured pointer.
    pub fn check(&self, pointer_id: u32) -> Result<(), IgnoredReason> {
        match self.active {
            None => Err(IgnoredReason::NoActivePointer),
            Some(active) if active.pointer_id != pointer_id => Err(IgnoredReason::PointerMismatch),
            Some(_) => Ok(()),
        }
    }

    /// Check that a release matches the captured pointer and button.
    pub fn check_release(&self, pointer_id: u32, button: PointerButton) -> Result<(), IgnoredReason> {
        self.check(pointer_id)?;
        match self.active {
            Some(active) if active.button != button => Err(IgnoredReason::ButtonMismatch),
            _ => Ok(()),
        }
    }

    /// Decide whether leaving the control ends the gesture.
    ///
    /// `Ok(())` means cancel. Once capture is confirmed, the pointer keeps
    /// driving the drag from outside the control.
    pub fn check_leave(
        &self,
        pointer_id: u32,
        cancel_without_capture: bool,
    ) -> Result<(), IgnoredReason> {
        self.check(pointer_id)?;
        if cancel_without_capture && !self.is_acquired() {
            Ok(())
        } else {
            Err(IgnoredReason::LeaveWhileCaptured)
        }
    }

    /// Stop tracking and release capture.
    pub fn finish(&mut self) -> Option<CaptureCommand> {
        self.active
            .take()
            .map(|active| CaptureCommand::Release {
                pointer_id: active.pointer_id,
            })
    }

    /// Stop tracking after the host lost capture; nothing to release.
    pub fn forfeit(&mut self) -> Option<u32> {
        self.active.take().map(|active| active.pointer_id)
    }

    fn active_mut(&mut self, pointer_id: u32) -> Result<&mut ActivePointer, IgnoredReason> {
        match self.active.as_mut() {
            None => Err(IgnoredReason::NoActivePointer),
            Some(active) if active.pointer_id != pointer_id => Err(IgnoredReason::PointerMismatch),
            Some(active) => Ok(active),
        }
    }
}
