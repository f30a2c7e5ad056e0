#![forbid(unsafe_code)]

//! Interaction controller: the drag and keyboard lifecycle of one handle.
//!
//! ```text
//! Idle --pointer down--> Dragging --pointer up / cancel / Escape--> Idle
//! Idle --arrow key / set value--> Idle   (single shot)
//! ```
//!
//! The controller never owns the target. Every entry point that reads or
//! writes a size takes the host by reference and goes through the target
//! adapter, so sizes changed by other code between gestures are observed.
//!
//! Every entry point returns a [`SizerDispatch`] describing what happened:
//! whether the input was consumed, the committed change, a capture command
//! for the host, and any error. Errors never leave the controller in a
//! dragging state.

use std::fmt;

use sizer_core::event::{Event, KeyCode, KeyEvent, PointerButton, PointerEvent, PointerEventKind};
use sizer_core::geometry::{Orientation, Point, SizeConstraint};
use sizer_layout::policy::{keyboard_delta, pointer_delta};
use sizer_layout::{LayoutHost, apply_size, read_size, resolve_target};

use crate::accessibility::{AccessibilityAction, AccessibilityBridge, AccessibilitySnapshot};
use crate::capture::{CaptureCommand, PointerCapture};
use crate::config::{CancelPolicy, ConfigError, SizerConfig};
use crate::dispatch::{
    ChangeSource, IgnoredReason, LifecyclePhase, SizeChangeEvent, SizerDispatch,
};
use crate::error::SizerError;

/// An in-flight pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession<H> {
    pub pointer_id: u32,
    pub start_position: Point,
    pub start_size: f64,
    /// Last size this gesture wrote (or read at start).
    pub last_size: f64,
    pub target: H,
    pub orientation: Orientation,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState<H> {
    #[default]
    Idle,
    Dragging(DragSession<H>),
}

impl<H> InteractionState<H> {
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}

/// Visual state derived from the machine, for the visual shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    #[default]
    Normal,
    PointerOver,
    Pressed,
}

/// Handle returned by [`SizerController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&SizeChangeEvent)>;

/// Drives one resize handle.
pub struct SizerController<H> {
    config: SizerConfig<H>,
    constraint: SizeConstraint,
    control: Option<H>,
    state: InteractionState<H>,
    capture: PointerCapture,
    focused: bool,
    pointer_over: bool,
    accessibility: AccessibilityBridge,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl<H: fmt::Debug> fmt::Debug for SizerController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizerController")
            .field("config", &self.config)
            .field("constraint", &self.constraint)
            .field("control", &self.control)
            .field("state", &self.state)
            .field("capture", &self.capture)
            .field("focused", &self.focused)
            .field("pointer_over", &self.pointer_over)
            .field("accessibility", &self.accessibility)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<H: Copy + Eq + fmt::Debug> SizerController<H> {
    /// Validate `config` and build a detached, idle controller.
    pub fn new(config: SizerConfig<H>) -> Result<Self, ConfigError> {
        let constraint = config.validate()?;
        let accessibility = AccessibilityBridge::new(
            config.label.clone(),
            constraint,
            config.orientation.unwrap_or_default(),
            config.keyboard_step,
        );
        Ok(Self {
            config,
            constraint,
            control: None,
            state: InteractionState::Idle,
            capture: PointerCapture::new(),
            focused: false,
            pointer_over: false,
            accessibility,
            listeners: Vec::new(),
            next_listener_id: 1,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SizerConfig<H> {
        &self.config
    }

    #[must_use]
    pub const fn constraint(&self) -> SizeConstraint {
        self.constraint
    }

    #[must_use]
    pub const fn state(&self) -> &InteractionState<H> {
        &self.state
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession<H>> {
        match &self.state {
            InteractionState::Dragging(session) => Some(session),
            InteractionState::Idle => None,
        }
    }

    #[must_use]
    pub const fn control(&self) -> Option<H> {
        self.control
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.control.is_some()
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    #[must_use]
    pub fn visual_state(&self) -> VisualState {
        if self.state.is_dragging() {
            VisualState::Pressed
        } else if self.pointer_over {
            VisualState::PointerOver
        } else {
            VisualState::Normal
        }
    }

    #[must_use]
    pub fn accessibility(&self) -> &AccessibilitySnapshot {
        self.accessibility.snapshot()
    }

    /// Register a listener for committed size changes.
    ///
    /// Listeners run synchronously, in subscription order, after the
    /// accessibility bridge has been updated.
    pub fn subscribe(&mut self, listener: impl FnMut(&SizeChangeEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Attach the handle to `control` in `host`'s tree.
    ///
    /// Idempotent for the same control. Attaching to a different control
    /// ends any drag in flight first and releases its capture.
    pub fn attach<L>(&mut self, host: &L, control: H) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let phase = LifecyclePhase::Attach;
        if self.control == Some(control) {
            self.refresh_accessibility(host);
            return SizerDispatch::unchanged(phase, false);
        }
        let release = self.end_drag();
        if release.is_some() {
            sizer_core::debug!(?control, "sizer re-attached mid-drag; drag ended");
        }
        self.control = Some(control);
        self.pointer_over = false;
        self.refresh_accessibility(host);
        sizer_core::debug!(?control, "sizer attached");
        SizerDispatch::transitioned(phase, false).with_capture_command(release)
    }

    /// Detach from the host tree. Idempotent.
    ///
    /// A drag in flight ends without touching the target.
    pub fn detach(&mut self) -> SizerDispatch {
        let phase = LifecyclePhase::Detach;
        if self.control.is_none() {
            return SizerDispatch::ignored(phase, IgnoredReason::Detached);
        }
        sizer_core::debug!(control = ?self.control, "sizer detached");
        let release = self.end_drag();
        self.control = None;
        self.focused = false;
        self.pointer_over = false;
        let orientation = self.accessibility.snapshot().orientation;
        self.accessibility.sync(None, orientation);
        SizerDispatch::transitioned(phase, false).with_capture_command(release)
    }

    /// Route one input event to the matching entry point.
    pub fn handle_event<L>(&mut self, host: &mut L, event: &Event) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        match *event {
            Event::Key(key) => self.key_down(host, key),
            Event::Focus(focused) => self.set_focused(focused),
            Event::Pointer(pointer) => self.handle_pointer(host, pointer),
        }
    }

    fn handle_pointer<L>(&mut self, host: &mut L, event: PointerEvent) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let PointerEvent {
            kind,
            pointer_id,
            position,
            ..
        } = event;
        match kind {
            PointerEventKind::Down(button) => self.pointer_down(host, pointer_id, button, position),
            PointerEventKind::Move => self.pointer_move(host, pointer_id, position),
            PointerEventKind::Up(button) => self.pointer_up(pointer_id, button),
            PointerEventKind::Cancel => self.pointer_cancel(host, Some(pointer_id)),
            PointerEventKind::Enter => self.pointer_enter(pointer_id),
            PointerEventKind::Leave => self.pointer_leave(host, pointer_id),
            PointerEventKind::CaptureLost => self.lost_pointer_capture(host, pointer_id),
        }
    }

    /// Pointer pressed on the handle: resolve the target and start a drag.
    pub fn pointer_down<L>(
        &mut self,
        host: &mut L,
        pointer_id: u32,
        button: PointerButton,
        position: Point,
    ) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let phase = LifecyclePhase::PointerDown;
        if !self.is_attached() {
            return SizerDispatch::ignored(phase, IgnoredReason::Detached);
        }
        if pointer_id == 0 {
            return SizerDispatch::ignored(phase, IgnoredReason::InvalidPointerId);
        }
        if button != self.config.activation_button {
            return SizerDispatch::ignored(phase, IgnoredReason::ButtonNotAllowed);
        }
        if self.state.is_dragging() {
            return SizerDispatch::ignored(phase, IgnoredReason::ActivePointerAlreadyInProgress);
        }

        let orientation = self.resolve_orientation(host);
        let (target, start_size) = match self.resolve_and_read(host, orientation) {
            Ok(resolved) => resolved,
            Err(err) => {
                sizer_core::warn!(pointer_id, error = %err, "sizer drag did not start");
                return SizerDispatch::failed(phase, false, err);
            }
        };
        let acquire = match self.capture.begin(pointer_id, button) {
            Ok(command) => command,
            Err(reason) => return SizerDispatch::ignored(phase, reason),
        };

        self.state = InteractionState::Dragging(DragSession {
            pointer_id,
            start_position: position,
            start_size,
            last_size: start_size,
            target,
            orientation,
        });
        self.accessibility.sync(Some(start_size), orientation);
        sizer_core::debug!(
            pointer_id,
            ?target,
            start_size,
            orientation = orientation.as_str(),
            "sizer drag started"
        );
        SizerDispatch::transitioned(phase, true).with_capture_command(Some(acquire))
    }

    /// Host confirmed exclusive capture for the dragging pointer.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> SizerDispatch {
        let phase = LifecyclePhase::CaptureAcquired;
        match self.capture.acknowledge(pointer_id) {
            Ok(()) => SizerDispatch::transitioned(phase, false),
            Err(reason) => SizerDispatch::ignored(phase, reason),
        }
    }

    /// Pointer moved while dragging: size = start size + delta from the
    /// gesture origin, clamped.
    pub fn pointer_move<L>(&mut self, host: &mut L, pointer_id: u32, position: Point) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let phase = LifecyclePhase::PointerMove;
        let InteractionState::Dragging(session) = self.state else {
            return SizerDispatch::ignored(phase, IgnoredReason::NoActivePointer);
        };
        if let Err(reason) = self.capture.check(pointer_id) {
            return SizerDispatch::ignored(phase, reason);
        }

        let delta = self.config.drag_direction.apply(pointer_delta(
            session.orientation,
            session.start_position,
            position,
        ));
        let new_size = self.constraint.clamp(session.start_size + delta);
        let current = read_size(host, session.target, session.orientation).ok();
        if current == Some(new_size) {
            return SizerDispatch::unchanged(phase, true);
        }
        if let Err(err) = apply_size(host, session.target, session.orientation, new_size) {
            return self.abort_drag(phase, err.into());
        }

        if let InteractionState::Dragging(active) = &mut self.state {
            active.last_size = new_size;
        }
        let change = self.commit(SizeChangeEvent {
            previous_size: current.unwrap_or(session.last_size),
            new_size,
            orientation: session.orientation,
            source: ChangeSource::Pointer,
        });
        SizerDispatch::applied(phase, change)
    }

    /// Pointer released: the drag ends at the last move's size.
    pub fn pointer_up(&mut self, pointer_id: u32, button: PointerButton) -> SizerDispatch {
        let phase = LifecyclePhase::PointerUp;
        if !self.state.is_dragging() {
            return SizerDispatch::ignored(phase, IgnoredReason::NoActivePointer);
        }
        if let Err(reason) = self.capture.check_release(pointer_id, button) {
            return SizerDispatch::ignored(phase, reason);
        }
        let release = self.end_drag();
        sizer_core::debug!(pointer_id, "sizer drag finished");
        SizerDispatch::transitioned(phase, true).with_capture_command(release)
    }

    /// The system interrupted the gesture.
    pub fn pointer_cancel<L>(&mut self, host: &mut L, pointer_id: Option<u32>) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        self.cancel_drag(host, LifecyclePhase::PointerCancel, pointer_id, true)
    }

    /// Pointer entered the handle's bounds.
    pub fn pointer_enter(&mut self, pointer_id: u32) -> SizerDispatch {
        let phase = LifecyclePhase::PointerEnter;
        if !self.is_attached() {
            return SizerDispatch::ignored(phase, IgnoredReason::Detached);
        }
        if pointer_id == 0 {
            return SizerDispatch::ignored(phase, IgnoredReason::InvalidPointerId);
        }
        if self.pointer_over {
            return SizerDispatch::unchanged(phase, false);
        }
        self.pointer_over = true;
        SizerDispatch::transitioned(phase, false)
    }

    /// Pointer left the handle's bounds.
    ///
    /// Cancels a drag whose capture was never confirmed when
    /// `cancel_on_leave_without_capture` is set.
    pub fn pointer_leave<L>(&mut self, host: &mut L, pointer_id: u32) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let phase = LifecyclePhase::PointerLeave;
        let was_over = std::mem::replace(&mut self.pointer_over, false);
        if !self.state.is_dragging() {
            return if was_over {
                SizerDispatch::transitioned(phase, false)
            } else {
                SizerDispatch::ignored(phase, IgnoredReason::NoActivePointer)
            };
        }
        match self
            .capture
            .check_leave(pointer_id, self.config.cancel_on_leave_without_capture)
        {
            Ok(()) => self.cancel_drag(host, phase, Some(pointer_id), true),
            Err(reason) => SizerDispatch::ignored(phase, reason),
        }
    }

    /// Host lost capture; the drag is cancelled and nothing is released.
    pub fn lost_pointer_capture<L>(&mut self, host: &mut L, pointer_id: u32) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        self.cancel_drag(host, LifecyclePhase::LostPointerCapture, Some(pointer_id), false)
    }

    /// Focus gained or lost. Losing focus does not end a drag.
    pub fn set_focused(&mut self, focused: bool) -> SizerDispatch {
        let phase = LifecyclePhase::Focus;
        if !self.is_attached() {
            return SizerDispatch::ignored(phase, IgnoredReason::Detached);
        }
        if self.focused == focused {
            return SizerDispatch::unchanged(phase, false);
        }
        self.focused = focused;
        SizerDispatch::transitioned(phase, false)
    }

    /// Key pressed while the handle has focus.
    ///
    /// Arrow keys on the resize axis step the target by the keyboard step.
    /// Keys on the orthogonal axis are left unconsumed for focus navigation.
    /// Escape cancels a drag in flight.
    pub fn key_down<L>(&mut self, host: &mut L, key: KeyEvent) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let phase = LifecyclePhase::KeyDown;
        if !self.is_attached() {
            return SizerDispatch::ignored(phase, IgnoredReason::Detached);
        }
        if !key.is_down() {
            return SizerDispatch::ignored(phase, IgnoredReason::KeyRelease);
        }
        if self.state.is_dragging() {
            return if key.code == KeyCode::Escape {
                self.cancel_drag(host, phase, None, true)
            } else {
                SizerDispatch::ignored(phase, IgnoredReason::DragInProgress)
            };
        }
        if !self.focused {
            return SizerDispatch::ignored(phase, IgnoredReason::NotFocused);
        }

        let orientation = self.resolve_orientation(host);
        let Some(delta) = keyboard_delta(orientation, key.code, self.config.keyboard_step) else {
            return SizerDispatch::ignored(phase, IgnoredReason::KeyNotHandled);
        };
        let delta = self.config.drag_direction.apply(delta);
        self.step_target(host, phase, ChangeSource::Keyboard, |current| current + delta)
    }

    /// Programmatic size request, clamped like keyboard input.
    pub fn set_value<L>(&mut self, host: &mut L, value: f64) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        self.programmatic(host, LifecyclePhase::SetValue, AccessibilityAction::SetValue(value))
    }

    /// Perform a request from assistive technology.
    pub fn perform_accessibility_action<L>(
        &mut self,
        host: &mut L,
        action: AccessibilityAction,
    ) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        self.programmatic(host, LifecyclePhase::AccessibilityAction, action)
    }

    /// Re-read the target and update the exposed accessibility values.
    ///
    /// Hosts call this after resizing the target themselves.
    pub fn refresh_accessibility<L>(&mut self, host: &L) -> &AccessibilitySnapshot
    where
        L: LayoutHost<Handle = H>,
    {
        let orientation = self.resolve_orientation(host);
        let current = self
            .resolve_and_read(host, orientation)
            .ok()
            .map(|(_, size)| size);
        self.accessibility.sync(current, orientation);
        self.accessibility.snapshot()
    }

    fn programmatic<L>(
        &mut self,
        host: &mut L,
        phase: LifecyclePhase,
        action: AccessibilityAction,
    ) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        if !self.is_attached() {
            return SizerDispatch::ignored(phase, IgnoredReason::Detached);
        }
        if self.state.is_dragging() {
            return SizerDispatch::ignored(phase, IgnoredReason::DragInProgress);
        }
        if let AccessibilityAction::SetValue(value) = action
            && value.is_nan()
        {
            return SizerDispatch::ignored(phase, IgnoredReason::NonFiniteValue);
        }
        let step = self.config.keyboard_step;
        self.step_target(host, phase, ChangeSource::Programmatic, |current| {
            action.requested_size(current, step)
        })
    }

    /// Single-shot resize shared by keyboard and programmatic input.
    fn step_target<L>(
        &mut self,
        host: &mut L,
        phase: LifecyclePhase,
        source: ChangeSource,
        request: impl FnOnce(f64) -> f64,
    ) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let orientation = self.resolve_orientation(host);
        let (target, current) = match self.resolve_and_read(host, orientation) {
            Ok(resolved) => resolved,
            Err(err) => {
                sizer_core::warn!(?source, error = %err, "sizer step skipped");
                return SizerDispatch::failed(phase, false, err);
            }
        };
        let new_size = self.constraint.clamp(request(current));
        if new_size == current {
            self.accessibility.sync(Some(current), orientation);
            return SizerDispatch::unchanged(phase, true);
        }
        if let Err(err) = apply_size(host, target, orientation, new_size) {
            sizer_core::warn!(?source, error = %err, "sizer step rejected by target");
            self.accessibility.sync(Some(current), orientation);
            return SizerDispatch::failed(phase, true, err.into());
        }
        let change = self.commit(SizeChangeEvent {
            previous_size: current,
            new_size,
            orientation,
            source,
        });
        SizerDispatch::applied(phase, change)
    }

    fn cancel_drag<L>(
        &mut self,
        host: &mut L,
        phase: LifecyclePhase,
        pointer_id: Option<u32>,
        release_capture: bool,
    ) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let InteractionState::Dragging(session) = self.state else {
            return SizerDispatch::ignored(phase, IgnoredReason::NoActivePointer);
        };
        if let Some(id) = pointer_id
            && let Err(reason) = self.capture.check(id)
        {
            return SizerDispatch::ignored(phase, reason);
        }

        self.state = InteractionState::Idle;
        let release = if release_capture {
            self.capture.finish()
        } else {
            self.capture.forfeit();
            None
        };
        sizer_core::debug!(
            pointer_id = session.pointer_id,
            phase = ?phase,
            "sizer drag cancelled"
        );

        let dispatch = match self.config.cancel_policy {
            CancelPolicy::KeepLastSize => SizerDispatch::transitioned(phase, true),
            CancelPolicy::RestoreStartSize => self.restore_start_size(host, phase, &session),
        };
        dispatch.with_capture_command(release)
    }

    fn restore_start_size<L>(
        &mut self,
        host: &mut L,
        phase: LifecyclePhase,
        session: &DragSession<H>,
    ) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        let current = read_size(host, session.target, session.orientation)
            .unwrap_or(session.last_size);
        if current == session.start_size {
            return SizerDispatch::transitioned(phase, true);
        }
        if let Err(err) = apply_size(host, session.target, session.orientation, session.start_size)
        {
            sizer_core::warn!(error = %err, "sizer could not restore start size");
            return SizerDispatch::failed(phase, true, err.into());
        }
        let change = self.commit(SizeChangeEvent {
            previous_size: current,
            new_size: session.start_size,
            orientation: session.orientation,
            source: ChangeSource::Pointer,
        });
        SizerDispatch::applied(phase, change)
    }

    /// End a drag because the target rejected a size. The target keeps the
    /// last size it accepted.
    fn abort_drag(&mut self, phase: LifecyclePhase, err: SizerError) -> SizerDispatch {
        sizer_core::warn!(error = %err, "sizer drag aborted");
        let release = self.end_drag();
        SizerDispatch::failed(phase, true, err).with_capture_command(release)
    }

    fn end_drag(&mut self) -> Option<CaptureCommand> {
        if !self.state.is_dragging() {
            return None;
        }
        self.state = InteractionState::Idle;
        self.capture.finish()
    }

    fn commit(&mut self, event: SizeChangeEvent) -> SizeChangeEvent {
        sizer_core::trace!(
            previous = event.previous_size,
            new = event.new_size,
            source = ?event.source,
            "sizer size committed"
        );
        self.accessibility.observe(&event);
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        event
    }

    fn resolve_orientation<L>(&self, host: &L) -> Orientation
    where
        L: LayoutHost<Handle = H>,
    {
        if let Some(orientation) = self.config.orientation {
            return orientation;
        }
        self.control
            .and_then(|control| host.bounds(control))
            .map(Orientation::infer_from_bounds)
            .unwrap_or_default()
    }

    fn resolve_and_read<L>(&self, host: &L, orientation: Orientation) -> Result<(H, f64), SizerError>
    where
        L: LayoutHost<Handle = H>,
    {
        let target = resolve_target(host, self.control, self.config.target)?;
        let size = read_size(host, target, orientation)?;
        sizer_core::debug!(?target, size, "sizer target resolved");
        Ok((target, size))
    }
}
