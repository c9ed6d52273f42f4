#![forbid(unsafe_code)]

//! Dock tree nodes.

use std::sync::Arc;

use crate::dockable::{Context, Dockable};
use crate::factory::FactoryId;
use crate::kind::{DockKind, DockSide, NodeId, Orientation, WindowId};
use crate::split::SplitLayout;

/// One node of the dock tree.
///
/// `views` and `windows` are owned by the node. `parent` is a cache that
/// only the factory's update pass writes; containment in a parent's `views`
/// is what actually makes a node attached.
#[derive(Debug, Clone)]
pub struct DockNode {
    pub(crate) dockable: Dockable,
    pub(crate) kind: DockKind,
    /// Preferred side within the container.
    pub dock: DockSide,
    pub orientation: Orientation,
    /// NaN means auto.
    pub width: f64,
    /// NaN means auto.
    pub height: f64,
    pub(crate) views: Vec<NodeId>,
    pub(crate) current_view: Option<NodeId>,
    pub(crate) default_view: Option<NodeId>,
    pub(crate) windows: Vec<WindowId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) split_layout: Option<Arc<dyn SplitLayout>>,
}

impl DockNode {
    /// Fresh default node of `kind`: empty id and title, auto size.
    #[must_use]
    pub fn new(kind: DockKind) -> Self {
        Self {
            dockable: Dockable::default(),
            kind,
            dock: DockSide::default(),
            orientation: Orientation::default(),
            width: f64::NAN,
            height: f64::NAN,
            views: Vec::new(),
            current_view: None,
            default_view: None,
            windows: Vec::new(),
            parent: None,
            split_layout: None,
        }
    }

    /// Node whose id and title are the kind name, as the factory creates them.
    #[must_use]
    pub fn named(kind: DockKind) -> Self {
        Self::new(kind).with_dockable(Dockable::new(kind.name(), kind.name()))
    }

    #[must_use]
    pub fn with_dockable(mut self, dockable: Dockable) -> Self {
        self.dockable = dockable;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.dockable.set_id(id);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.dockable.set_title(title);
        self
    }

    #[must_use]
    pub fn with_split_layout(mut self, split_layout: Arc<dyn SplitLayout>) -> Self {
        self.split_layout = Some(split_layout);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> DockKind {
        self.kind
    }

    #[must_use]
    pub const fn dockable(&self) -> &Dockable {
        &self.dockable
    }

    pub fn dockable_mut(&mut self) -> &mut Dockable {
        &mut self.dockable
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.dockable.id()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.dockable.title()
    }

    #[must_use]
    pub fn context(&self) -> Option<&Context> {
        self.dockable.context()
    }

    #[must_use]
    pub const fn factory(&self) -> Option<FactoryId> {
        self.dockable.factory()
    }

    /// Cached parent, as of the last update pass.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn views(&self) -> &[NodeId] {
        &self.views
    }

    #[must_use]
    pub const fn current_view(&self) -> Option<NodeId> {
        self.current_view
    }

    #[must_use]
    pub const fn default_view(&self) -> Option<NodeId> {
        self.default_view
    }

    #[must_use]
    pub fn windows(&self) -> &[WindowId] {
        &self.windows
    }

    #[must_use]
    pub fn split_layout(&self) -> Option<&Arc<dyn SplitLayout>> {
        self.split_layout.as_ref()
    }

    pub fn set_split_layout(&mut self, split_layout: Option<Arc<dyn SplitLayout>>) {
        self.split_layout = split_layout;
    }

    /// Drop `current_view`/`default_view` if they point at `child`.
    pub(crate) fn clear_selection_of(&mut self, child: NodeId) {
        if self.current_view == Some(child) {
            self.current_view = None;
        }
        if self.default_view == Some(child) {
            self.default_view = None;
        }
    }

    /// Point `current_view`/`default_view` at `new` where they pointed at `old`.
    pub(crate) fn retarget_selection(&mut self, old: NodeId, new: NodeId) {
        if self.current_view == Some(old) {
            self.current_view = Some(new);
        }
        if self.default_view == Some(old) {
            self.default_view = Some(new);
        }
    }
}
