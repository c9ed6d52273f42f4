#![forbid(unsafe_code)]

//! Handles and small value enums shared by the tree model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arena handle for a dock node.
///
/// `0` is never handed out, so a handle is always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const MIN: Self = Self(1);

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Arena handle for a floating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) const MIN: Self = Self(1);

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Identifier and title given to windows created by the factory.
pub const WINDOW_NAME: &str = "DockWindow";

/// Node variants of the dock tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockKind {
    /// Generic container.
    Layout,
    /// Top-level container of a window.
    Root,
    /// Resizable divider between siblings; never holds content.
    Splitter,
    /// Tab group: several views, one active.
    Strip,
    /// Leaf content holder.
    View,
}

/// Which fields a conversion carries over besides the always-copied ones
/// (id, dock side, width, height, title).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionFields {
    /// `views`, `current_view` and `default_view`.
    pub views: bool,
    pub windows: bool,
}

impl DockKind {
    pub const ALL: [Self; 5] = [
        Self::Layout,
        Self::Root,
        Self::Splitter,
        Self::Strip,
        Self::View,
    ];

    /// Kind name, used as id and title of nodes the factory creates.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Layout => "DockLayout",
            Self::Root => "DockRoot",
            Self::Splitter => "DockSplitter",
            Self::Strip => "DockStrip",
            Self::View => "DockView",
        }
    }

    /// Field subset copied when converting a node into this kind.
    #[must_use]
    pub const fn conversion_fields(self) -> ConversionFields {
        match self {
            Self::Layout | Self::Root => ConversionFields {
                views: true,
                windows: true,
            },
            Self::Strip => ConversionFields {
                views: true,
                windows: false,
            },
            Self::Splitter | Self::View => ConversionFields {
                views: false,
                windows: false,
            },
        }
    }
}

impl fmt::Display for DockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side of its container a node prefers to dock to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockSide {
    Left,
    Top,
    Right,
    Bottom,
    #[default]
    Center,
}

/// Arrangement of a container's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Requested docking operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockOperation {
    Fill,
    Left,
    Right,
    Top,
    Bottom,
    Window,
}

impl DockOperation {
    /// Directions accepted by [`crate::DockFactory::split`].
    #[must_use]
    pub const fn is_split_direction(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Top | Self::Bottom)
    }

    /// Side a new pane lands on for a split direction.
    #[must_use]
    pub const fn side(self) -> DockSide {
        match self {
            Self::Left => DockSide::Left,
            Self::Right => DockSide::Right,
            Self::Top => DockSide::Top,
            Self::Bottom => DockSide::Bottom,
            Self::Fill | Self::Window => DockSide::Center,
        }
    }
}

impl fmt::Display for DockOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fill => "fill",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Window => "window",
        };
        f.write_str(name)
    }
}
