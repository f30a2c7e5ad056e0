#![forbid(unsafe_code)]

//! Content sizer: a resize handle with a default look.
//!
//! A thin shell over [`SizerController`]. It picks a gripper glyph and a
//! resize cursor from the resolved orientation, and maps the template
//! lifecycle onto the controller's idempotent attach/detach.

use sizer_core::event::Event;
use sizer_core::geometry::Orientation;
use sizer_core::glyph_policy::GlyphMode;
use sizer_layout::LayoutHost;

use crate::config::{ConfigError, SizerConfig};
use crate::controller::{SizerController, VisualState};
use crate::dispatch::SizerDispatch;

/// Pointer cursor shown over the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeCursor {
    /// Left/right arrows; used when resizing width.
    ColumnResize,
    /// Up/down arrows; used when resizing height.
    RowResize,
}

/// How strongly the gripper is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    #[default]
    Rest,
    Hover,
    Active,
}

/// Resolved look of the handle for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub glyph: char,
    pub cursor: ResizeCursor,
    pub emphasis: Emphasis,
    pub focus_ring: bool,
}

/// Supplies the handle's appearance.
pub trait StyleResolver {
    fn appearance(&self, orientation: Orientation, state: VisualState, focused: bool) -> Appearance;
}

/// Gripper bars: a vertical bar when resizing width, a horizontal bar
/// when resizing height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultStyle {
    glyph_mode: GlyphMode,
}

impl DefaultStyle {
    #[must_use]
    pub const fn new(glyph_mode: GlyphMode) -> Self {
        Self { glyph_mode }
    }

    /// Glyph mode from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(GlyphMode::detect())
    }

    #[must_use]
    pub const fn glyph_mode(&self) -> GlyphMode {
        self.glyph_mode
    }

    #[must_use]
    pub const fn gripper(&self, orientation: Orientation) -> char {
        match (self.glyph_mode, orientation) {
            (GlyphMode::Unicode, Orientation::Horizontal) => '┃',
            (GlyphMode::Unicode, Orientation::Vertical) => '━',
            (GlyphMode::Ascii, Orientation::Horizontal) => '|',
            (GlyphMode::Ascii, Orientation::Vertical) => '-',
        }
    }
}

impl StyleResolver for DefaultStyle {
    fn appearance(&self, orientation: Orientation, state: VisualState, focused: bool) -> Appearance {
        Appearance {
            glyph: self.gripper(orientation),
            cursor: match orientation {
                Orientation::Horizontal => ResizeCursor::ColumnResize,
                Orientation::Vertical => ResizeCursor::RowResize,
            },
            emphasis: match state {
                VisualState::Normal => Emphasis::Rest,
                VisualState::PointerOver => Emphasis::Hover,
                VisualState::Pressed => Emphasis::Active,
            },
            focus_ring: focused,
        }
    }
}

/// Resize handle with a style.
#[derive(Debug)]
pub struct ContentSizer<H, S = DefaultStyle> {
    controller: SizerController<H>,
    style: S,
}

impl<H: Copy + Eq + std::fmt::Debug> ContentSizer<H, DefaultStyle> {
    /// Build with [`DefaultStyle::detect`].
    pub fn new(config: SizerConfig<H>) -> Result<Self, ConfigError> {
        Self::with_style(config, DefaultStyle::detect())
    }
}

impl<H: Copy + Eq + std::fmt::Debug, S: StyleResolver> ContentSizer<H, S> {
    pub fn with_style(config: SizerConfig<H>, style: S) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: SizerController::new(config)?,
            style,
        })
    }

    #[must_use]
    pub fn controller(&self) -> &SizerController<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SizerController<H> {
        &mut self.controller
    }

    #[must_use]
    pub fn style(&self) -> &S {
        &self.style
    }

    /// The template is ready and the handle sits at `control` in `host`.
    ///
    /// Safe to call on every template application.
    pub fn on_template_applied<L>(&mut self, host: &L, control: H) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        self.controller.attach(host, control)
    }

    /// The handle left the host tree. Safe to call repeatedly.
    pub fn on_detached(&mut self) -> SizerDispatch {
        self.controller.detach()
    }

    pub fn handle_event<L>(&mut self, host: &mut L, event: &Event) -> SizerDispatch
    where
        L: LayoutHost<Handle = H>,
    {
        self.controller.handle_event(host, event)
    }

    /// Appearance for the current orientation and visual state.
    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.style.appearance(
            self.controller.accessibility().orientation,
            self.controller.visual_state(),
            self.controller.is_focused(),
        )
    }
}
