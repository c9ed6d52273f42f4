#![forbid(unsafe_code)]

//! The dockable entity: identity, ownership links, capabilities and bounds.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dockyard_core::{DockCapabilities, Point, Rect};

use crate::factory::FactoryId;
use crate::kind::NodeId;
use crate::tracking::BoundsTracker;

/// Opaque view-model payload attached to nodes and windows.
///
/// Shared, never owned by the tree.
pub type Context = Arc<dyn Any + Send + Sync>;

/// Hooks the presentation layer implements to react to a dockable.
///
/// Every method defaults to a no-op (or to allowing the close).
pub trait DockableObserver: fmt::Debug + Send + Sync {
    fn on_visible_bounds_changed(&self, _bounds: Rect) {}

    fn on_pinned_bounds_changed(&self, _bounds: Rect) {}

    fn on_tab_bounds_changed(&self, _bounds: Rect) {}

    fn on_pointer_position_changed(&self, _position: Point) {}

    fn on_pointer_screen_position_changed(&self, _position: Point) {}

    /// Return `false` to veto closing.
    fn on_close(&self) -> bool {
        true
    }

    fn on_selected(&self) {}
}

/// State shared by every node of the dock tree.
#[derive(Debug, Clone)]
pub struct Dockable {
    id: String,
    title: String,
    context: Option<Context>,
    owner: Option<NodeId>,
    original_owner: Option<NodeId>,
    factory: Option<FactoryId>,
    is_empty: bool,
    is_collapsable: bool,
    capabilities: DockCapabilities,
    proportion: f64,
    tracker: BoundsTracker,
    observer: Option<Arc<dyn DockableObserver>>,
}

impl Default for Dockable {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            context: None,
            owner: None,
            original_owner: None,
            factory: None,
            is_empty: false,
            is_collapsable: true,
            capabilities: DockCapabilities::default(),
            proportion: f64::NAN,
            tracker: BoundsTracker::default(),
            observer: None,
        }
    }
}

impl Dockable {
    /// A dockable with the given id and title and default everything else.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Key the presentation layer uses to decide whether a visual can be
    /// reused: same id, reusable.
    #[must_use]
    pub fn control_recycling_id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Current parent-equivalent owner, as last stamped by the factory.
    #[must_use]
    pub const fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Owner before the last temporary relocation (floating).
    #[must_use]
    pub const fn original_owner(&self) -> Option<NodeId> {
        self.original_owner
    }

    #[must_use]
    pub const fn factory(&self) -> Option<FactoryId> {
        self.factory
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn set_is_empty(&mut self, is_empty: bool) {
        self.is_empty = is_empty;
    }

    #[must_use]
    pub const fn is_collapsable(&self) -> bool {
        self.is_collapsable
    }

    pub fn set_is_collapsable(&mut self, is_collapsable: bool) {
        self.is_collapsable = is_collapsable;
    }

    #[must_use]
    pub const fn capabilities(&self) -> DockCapabilities {
        self.capabilities
    }

    pub fn set_capabilities(&mut self, capabilities: DockCapabilities) {
        self.capabilities = capabilities;
    }

    #[must_use]
    pub const fn can_close(&self) -> bool {
        self.capabilities.contains(DockCapabilities::CLOSE)
    }

    #[must_use]
    pub const fn can_pin(&self) -> bool {
        self.capabilities.contains(DockCapabilities::PIN)
    }

    #[must_use]
    pub const fn can_float(&self) -> bool {
        self.capabilities.contains(DockCapabilities::FLOAT)
    }

    /// Proportional size weight; NaN lets the container pick.
    #[must_use]
    pub const fn proportion(&self) -> f64 {
        self.proportion
    }

    pub fn set_proportion(&mut self, proportion: f64) {
        self.proportion = proportion;
    }

    #[must_use]
    pub const fn bounds(&self) -> &BoundsTracker {
        &self.tracker
    }

    pub fn set_observer(&mut self, observer: Arc<dyn DockableObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // Bounds: write through, then notify. No change detection.

    #[must_use]
    pub const fn visible_bounds(&self) -> Rect {
        self.tracker.visible_bounds()
    }

    pub fn set_visible_bounds(&mut self, bounds: Rect) {
        self.tracker.set_visible_bounds(bounds);
        if let Some(observer) = &self.observer {
            observer.on_visible_bounds_changed(bounds);
        }
    }

    #[must_use]
    pub const fn pinned_bounds(&self) -> Rect {
        self.tracker.pinned_bounds()
    }

    pub fn set_pinned_bounds(&mut self, bounds: Rect) {
        self.tracker.set_pinned_bounds(bounds);
        if let Some(observer) = &self.observer {
            observer.on_pinned_bounds_changed(bounds);
        }
    }

    #[must_use]
    pub const fn tab_bounds(&self) -> Rect {
        self.tracker.tab_bounds()
    }

    pub fn set_tab_bounds(&mut self, bounds: Rect) {
        self.tracker.set_tab_bounds(bounds);
        if let Some(observer) = &self.observer {
            observer.on_tab_bounds_changed(bounds);
        }
    }

    #[must_use]
    pub const fn pointer_position(&self) -> Point {
        self.tracker.pointer_position()
    }

    pub fn set_pointer_position(&mut self, position: Point) {
        self.tracker.set_pointer_position(position);
        if let Some(observer) = &self.observer {
            observer.on_pointer_position_changed(position);
        }
    }

    #[must_use]
    pub const fn pointer_screen_position(&self) -> Point {
        self.tracker.pointer_screen_position()
    }

    pub fn set_pointer_screen_position(&mut self, position: Point) {
        self.tracker.set_pointer_screen_position(position);
        if let Some(observer) = &self.observer {
            observer.on_pointer_screen_position_changed(position);
        }
    }

    /// Ask whether the dockable may close. Allowed when nobody observes it.
    #[must_use]
    pub fn on_close(&self) -> bool {
        self.observer
            .as_ref()
            .is_none_or(|observer| observer.on_close())
    }

    pub fn on_selected(&self) {
        if let Some(observer) = &self.observer {
            observer.on_selected();
        }
    }

    /// Back-reference stamping; only the factory's update pass calls this.
    pub(crate) fn stamp(
        &mut self,
        context: Option<Context>,
        owner: Option<NodeId>,
        factory: FactoryId,
    ) {
        self.context = context;
        self.owner = owner;
        self.factory = Some(factory);
    }

    pub(crate) fn set_original_owner(&mut self, owner: Option<NodeId>) {
        self.original_owner = owner;
    }
}
