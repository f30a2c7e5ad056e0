#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the event types a resize handle receives from its
//! host: keys, pointer lifecycle signals, and focus changes.
//!
//! # Design Notes
//!
//! - Pointer positions are `f64` in host units so sub-cell hosts keep their
//!   precision; terminal hosts map cell coordinates directly.
//! - `KeyEventKind` defaults to `Press` when not available from the host
//! - `Modifiers` use bitflags for easy combination
//! - Pointer ids are host-assigned; `0` is reserved as "no pointer"

use bitflags::bitflags;
#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
use crossterm::event as cte;

use crate::geometry::Point;

/// Pointer id used for terminal mice, which only ever report one pointer.
pub const MOUSE_POINTER_ID: u32 = 1;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer lifecycle event.
    Pointer(PointerEvent),

    /// Focus gained or lost by the control.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
impl Event {
    /// Convert a Crossterm event into a sizer [`Event`].
    ///
    /// Returns `None` for events a resize handle has no use for
    /// (scroll wheel, paste, terminal resize).
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event_internal(event)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this event represents the key going down (press or repeat).
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    Enter,
    Escape,
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl KeyCode {
    /// Whether this is one of the four arrow keys.
    #[must_use]
    pub const fn is_arrow(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The lifecycle phase this event reports.
    pub kind: PointerEventKind,

    /// Host-assigned pointer id (`0` is never a valid id).
    pub pointer_id: u32,

    /// Pointer position in host coordinates.
    pub position: Point,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, pointer_id: u32, position: Point) -> Self {
        Self {
            kind,
            pointer_id,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Pointer lifecycle phases delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed over the control.
    Down(PointerButton),
    /// Pointer moved (captured or hovering).
    Move,
    /// Button released.
    Up(PointerButton),
    /// The system interrupted the gesture.
    Cancel,
    /// Pointer entered the control's bounds.
    Enter,
    /// Pointer left the control's bounds.
    Leave,
    /// The host lost exclusive capture of this pointer.
    CaptureLost,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Left mouse button, pen tip, or touch contact.
    #[default]
    Primary,
    /// Right mouse button or pen barrel button.
    Secondary,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_crossterm_event_internal(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::Key(key) => map_key_event(key).map(Event::Key),
        cte::Event::Mouse(mouse) => map_mouse_event(mouse).map(Event::Pointer),
        cte::Event::FocusGained => Some(Event::Focus(true)),
        cte::Event::FocusLost => Some(Event::Focus(false)),
        _ => None,
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    let kind = match event.kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
        kind,
    })
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::PageUp => Some(KeyCode::PageUp),
        cte::KeyCode::PageDown => Some(KeyCode::PageDown),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_mouse_event(event: cte::MouseEvent) -> Option<PointerEvent> {
    let kind = match event.kind {
        cte::MouseEventKind::Down(button) => PointerEventKind::Down(map_mouse_button(button)),
        cte::MouseEventKind::Up(button) => PointerEventKind::Up(map_mouse_button(button)),
        cte::MouseEventKind::Drag(_) | cte::MouseEventKind::Moved => PointerEventKind::Move,
        _ => return None,
    };
    let position = Point::new(f64::from(event.column), f64::from(event.row));
    Some(
        PointerEvent::new(kind, MOUSE_POINTER_ID, position)
            .with_modifiers(map_modifiers(event.modifiers)),
    )
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_mouse_button(button: cte::MouseButton) -> PointerButton {
    match button {
        cte::MouseButton::Left => PointerButton::Primary,
        cte::MouseButton::Right => PointerButton::Secondary,
        cte::MouseButton::Middle => PointerButton::Middle,
    }
}
