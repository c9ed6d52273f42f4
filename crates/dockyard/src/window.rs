#![forbid(unsafe_code)]

//! Floating windows and the host surfaces that display them.

use std::fmt;
use std::sync::Arc;

use dockyard_core::{Point, Size};

use crate::dockable::Context;
use crate::factory::FactoryId;
use crate::kind::{NodeId, WINDOW_NAME};

/// Native surface a floating window is shown on.
///
/// Implemented by the presentation layer; methods take `&self` because a
/// host is shared between the window and whoever created it.
pub trait DockHost: fmt::Debug + Send + Sync {
    fn present(&self, is_dialog: bool);

    fn exit(&self);

    fn set_position(&self, position: Point);

    fn position(&self) -> Point;

    fn set_size(&self, size: Size);

    fn size(&self) -> Size;

    fn set_title(&self, title: &str);

    fn set_topmost(&self, _topmost: bool) {}

    /// Root node the host should display.
    fn set_layout(&self, _layout: Option<NodeId>) {}
}

/// Shared handle to a host surface.
pub type Host = Arc<dyn DockHost>;

/// A floating top-level window owning one root layout.
#[derive(Debug, Clone)]
pub struct DockWindow {
    pub id: String,
    pub title: String,
    pub x: f64,
    pub y: f64,
    /// NaN means auto.
    pub width: f64,
    /// NaN means auto.
    pub height: f64,
    pub topmost: bool,
    pub(crate) layout: Option<NodeId>,
    pub(crate) host: Option<Host>,
    pub(crate) owner: Option<NodeId>,
    pub(crate) context: Option<Context>,
    pub(crate) factory: Option<FactoryId>,
}

impl Default for DockWindow {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            x: 0.0,
            y: 0.0,
            width: f64::NAN,
            height: f64::NAN,
            topmost: false,
            layout: None,
            host: None,
            owner: None,
            context: None,
            factory: None,
        }
    }
}

impl DockWindow {
    /// Window with the factory's default id and title.
    #[must_use]
    pub fn named() -> Self {
        Self {
            id: WINDOW_NAME.to_string(),
            title: WINDOW_NAME.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: NodeId) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub const fn layout(&self) -> Option<NodeId> {
        self.layout
    }

    #[must_use]
    pub fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Node this window is anchored to.
    #[must_use]
    pub const fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    #[must_use]
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    #[must_use]
    pub const fn factory(&self) -> Option<FactoryId> {
        self.factory
    }

    /// Push geometry, title and layout to the host, then show it.
    ///
    /// Does nothing until the factory has resolved a host.
    pub fn present(&self, is_dialog: bool) {
        let Some(host) = &self.host else {
            return;
        };
        host.set_position(Point::new(self.x, self.y));
        host.set_size(Size::new(self.width, self.height));
        host.set_title(&self.title);
        host.set_topmost(self.topmost);
        host.set_layout(self.layout);
        host.present(is_dialog);
    }

    /// Read position and size back from the host.
    pub fn save(&mut self) {
        let Some(host) = &self.host else {
            return;
        };
        let position = host.position();
        let size = host.size();
        self.x = position.x;
        self.y = position.y;
        self.width = size.width;
        self.height = size.height;
    }

    /// Save geometry and close the host.
    pub fn exit(&mut self) {
        self.save();
        if let Some(host) = &self.host {
            host.exit();
        }
    }
}
