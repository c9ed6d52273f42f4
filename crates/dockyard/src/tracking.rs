#![forbid(unsafe_code)]

//! Positional bookkeeping for a dockable.

use dockyard_core::{Point, Rect};

/// Last known bounds of a dockable as reported by the presentation layer.
///
/// A plain value store: setters overwrite unconditionally, nothing is
/// validated and nobody is notified. [`crate::Dockable`] fires the hooks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundsTracker {
    visible: Rect,
    pinned: Rect,
    tab: Rect,
    pointer: Point,
    pointer_screen: Point,
}

impl BoundsTracker {
    #[must_use]
    pub const fn visible_bounds(&self) -> Rect {
        self.visible
    }

    pub fn set_visible_bounds(&mut self, bounds: Rect) {
        self.visible = bounds;
    }

    /// Bounds while pinned to a side bar.
    #[must_use]
    pub const fn pinned_bounds(&self) -> Rect {
        self.pinned
    }

    pub fn set_pinned_bounds(&mut self, bounds: Rect) {
        self.pinned = bounds;
    }

    /// Bounds of the tab header in its strip.
    #[must_use]
    pub const fn tab_bounds(&self) -> Rect {
        self.tab
    }

    pub fn set_tab_bounds(&mut self, bounds: Rect) {
        self.tab = bounds;
    }

    /// Pointer position relative to the dockable.
    #[must_use]
    pub const fn pointer_position(&self) -> Point {
        self.pointer
    }

    pub fn set_pointer_position(&mut self, position: Point) {
        self.pointer = position;
    }

    /// Pointer position in screen coordinates.
    #[must_use]
    pub const fn pointer_screen_position(&self) -> Point {
        self.pointer_screen
    }

    pub fn set_pointer_screen_position(&mut self, position: Point) {
        self.pointer_screen = position;
    }
}
