#![forbid(unsafe_code)]

//! The dock-tree mutation engine.
//!
//! [`DockFactory`] creates nodes, resolves contexts and hosts through the
//! locators in its [`FactoryConfig`], and restructures a [`DockTree`]:
//! remove, move, replace, split, insert, add, convert and float.
//!
//! # Back-references
//!
//! `parent`, `owner`, `factory` and `context` on nodes and windows are only
//! ever written by [`DockFactory::update`] and
//! [`DockFactory::update_window`]. Every structural operation edits the
//! `views`/`windows` sequences and then re-runs the update pass over the
//! part of the tree it touched.
//!
//! # Failure model
//!
//! Operations on a node without a parent return `Ok` without touching the
//! tree. Fatal errors (missing host, unsupported split direction, unknown
//! handle) propagate immediately; steps already applied are kept.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::{FactoryConfig, SplitDispatch};
use crate::dockable::Context;
use crate::error::DockError;
use crate::kind::{DockKind, DockOperation, NodeId, WindowId};
use crate::node::DockNode;
use crate::tree::DockTree;
use crate::window::{DockWindow, Host};

const TARGET: &str = "dockyard.factory";

static NEXT_FACTORY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a factory, stamped on every node and window it updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactoryId(u64);

impl FactoryId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Application hook that builds the initial layout.
pub trait LayoutBuilder {
    /// Create the layout's root node in `tree` and return it.
    fn create_layout(&self, factory: &DockFactory, tree: &mut DockTree)
    -> Result<NodeId, DockError>;
}

/// Creates and restructures dock nodes.
#[derive(Debug)]
pub struct DockFactory {
    id: FactoryId,
    config: FactoryConfig,
}

impl Default for DockFactory {
    fn default() -> Self {
        Self::new(FactoryConfig::default())
    }
}

impl DockFactory {
    #[must_use]
    pub fn new(config: FactoryConfig) -> Self {
        Self {
            id: FactoryId(NEXT_FACTORY_ID.fetch_add(1, Ordering::Relaxed)),
            config,
        }
    }

    #[must_use]
    pub const fn id(&self) -> FactoryId {
        self.id
    }

    #[must_use]
    pub const fn config(&self) -> &FactoryConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Locators
    // ---------------------------------------------------------------------

    /// Context registered for `id`, or `fallback` when there is none.
    ///
    /// A registered locator wins even when it produces `None`.
    #[must_use]
    pub fn get_context(&self, id: &str, fallback: Option<Context>) -> Option<Context> {
        if !id.is_empty()
            && let Some(locator) = self.config.context_locators.get(id)
        {
            return locator();
        }
        fallback
    }

    /// Host registered for window `id`.
    ///
    /// An empty id has no host. A non-empty id without a locator is a
    /// configuration error.
    pub fn get_host(&self, id: &str) -> Result<Option<Host>, DockError> {
        if id.is_empty() {
            return Ok(None);
        }
        match self.config.host_locators.get(id) {
            Some(locator) => Ok(Some(locator())),
            None => {
                warn!(target: "dockyard.locator", id = %id, "dock host is not registered");
                Err(DockError::HostNotRegistered { id: id.to_string() })
            }
        }
    }

    // ---------------------------------------------------------------------
    // Update propagation
    // ---------------------------------------------------------------------

    /// Stamp a window: host, context, owner and factory, then its layout
    /// as a parentless root.
    pub fn update_window(
        &self,
        tree: &mut DockTree,
        window: WindowId,
        context: Option<Context>,
        owner: Option<NodeId>,
    ) -> Result<(), DockError> {
        let id = tree.require_window(window)?.id.clone();
        let host = self.get_host(&id)?;
        let resolved = self.get_context(&id, context.clone());

        let record = tree.require_window_mut(window)?;
        record.host = host;
        record.context = resolved;
        record.owner = owner;
        record.factory = Some(self.id);
        let layout = record.layout;
        trace!(target: TARGET, window = window.get(), id = %id, "window updated");

        if let Some(layout) = layout {
            self.update(tree, layout, context, None)?;
        }
        Ok(())
    }

    /// [`Self::update_window`] for each window, in order.
    pub fn update_windows(
        &self,
        tree: &mut DockTree,
        windows: &[WindowId],
        context: Option<Context>,
        owner: Option<NodeId>,
    ) -> Result<(), DockError> {
        for window in windows {
            self.update_window(tree, *window, context.clone(), owner)?;
        }
        Ok(())
    }

    /// Stamp `node` and its whole subtree.
    ///
    /// The node gets its locator-resolved context, `parent` and this
    /// factory; its windows are updated before its views, both in order,
    /// with the incoming `context`.
    pub fn update(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        context: Option<Context>,
        parent: Option<NodeId>,
    ) -> Result<(), DockError> {
        let record = tree.require_mut(node)?;
        let resolved = self.get_context(record.id(), context.clone());
        record.dockable.stamp(resolved, parent, self.id);
        record.parent = parent;
        let windows = record.windows.clone();
        let views = record.views.clone();
        trace!(
            target: TARGET,
            node = node.get(),
            parent = parent.map(NodeId::get),
            "node updated"
        );

        self.update_windows(tree, &windows, context.clone(), Some(node))?;
        self.update_views(tree, &views, context, Some(node))
    }

    /// [`Self::update`] for each view, in order.
    pub fn update_views(
        &self,
        tree: &mut DockTree,
        views: &[NodeId],
        context: Option<Context>,
        parent: Option<NodeId>,
    ) -> Result<(), DockError> {
        for view in views {
            self.update(tree, *view, context.clone(), parent)?;
        }
        Ok(())
    }

    /// Stamp a freshly built layout as a root and settle its selections:
    /// containers with a default view but no current view select the
    /// default.
    pub fn init_layout(
        &self,
        tree: &mut DockTree,
        layout: NodeId,
        context: Option<Context>,
    ) -> Result<(), DockError> {
        let _span = tracing::debug_span!("dock.init_layout", layout = layout.get()).entered();
        self.update(tree, layout, context, None)?;

        let mut stack = vec![layout];
        while let Some(id) = stack.pop() {
            let node = tree.require_mut(id)?;
            if node.current_view.is_none() {
                node.current_view = node.default_view;
            }
            stack.extend_from_slice(&node.views);
            let windows = node.windows.clone();
            for window in windows {
                if let Some(root) = tree.require_window(window)?.layout {
                    stack.push(root);
                }
            }
        }
        debug!(target: TARGET, layout = layout.get(), nodes = tree.len(), "layout initialized");
        Ok(())
    }

    /// Build the application layout through `builder` and initialize it.
    pub fn build_layout(
        &self,
        builder: &dyn LayoutBuilder,
        tree: &mut DockTree,
        context: Option<Context>,
    ) -> Result<NodeId, DockError> {
        let layout = builder.create_layout(self, tree)?;
        self.init_layout(tree, layout, context)?;
        Ok(layout)
    }

    // ---------------------------------------------------------------------
    // Structural mutation
    // ---------------------------------------------------------------------

    /// Detach `node` from its parent. Its own subtree stays intact.
    pub fn remove(&self, tree: &mut DockTree, node: NodeId) -> Result<(), DockError> {
        let Some(parent) = tree.require(node)?.parent else {
            debug!(target: TARGET, node = node.get(), "remove skipped: no parent");
            return Ok(());
        };
        let index = tree.detach_child(parent, node)?;
        debug!(
            target: TARGET,
            node = node.get(),
            parent = parent.get(),
            index = index,
            "node removed"
        );
        Ok(())
    }

    /// Move `node` to the end of `new_parent.views` and select it there.
    ///
    /// The old parent selects the sibling that preceded the node, or its
    /// first view when the node was first, or nothing when it is now empty.
    pub fn move_node(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        new_parent: NodeId,
    ) -> Result<(), DockError> {
        let _span = tracing::debug_span!(
            "dock.move",
            node = node.get(),
            new_parent = new_parent.get()
        )
        .entered();
        let Some(original_parent) = tree.require(node)?.parent else {
            debug!(target: TARGET, node = node.get(), "move skipped: no parent");
            return Ok(());
        };
        let _ = tree.require(new_parent)?;
        if node == new_parent || tree.is_ancestor(node, new_parent) {
            return Err(DockError::AncestorConflict {
                ancestor: node,
                descendant: new_parent,
            });
        }

        let index = tree.detach_child(original_parent, node)?.unwrap_or(0);
        tree.require_mut(new_parent)?.views.push(node);

        let context = tree.require(node)?.context().cloned();
        self.update(tree, node, context, Some(new_parent))?;

        let original = tree.require_mut(original_parent)?;
        original.current_view = original
            .views
            .get(index.saturating_sub(1))
            .or_else(|| original.views.first())
            .copied();
        tree.require_mut(new_parent)?.current_view = Some(node);

        debug!(
            target: TARGET,
            node = node.get(),
            from = original_parent.get(),
            to = new_parent.get(),
            index = index,
            "node moved"
        );
        Ok(())
    }

    /// Put `destination` into the slot `source` holds in its parent.
    ///
    /// `destination` is first detached from wherever it currently sits, and
    /// selections of `source` carry over to it. `destination` may contain
    /// `source` (that is how a split wraps a node), but it may not be or
    /// contain the parent.
    pub fn replace(
        &self,
        tree: &mut DockTree,
        source: NodeId,
        destination: NodeId,
    ) -> Result<(), DockError> {
        let Some(parent) = tree.require(source)?.parent else {
            debug!(target: TARGET, node = source.get(), "replace skipped: no parent");
            return Ok(());
        };
        let destination_parent = tree.require(destination)?.parent;
        if source == destination {
            return Ok(());
        }
        if tree.index_of(parent, source).is_none() {
            debug!(
                target: TARGET,
                node = source.get(),
                parent = parent.get(),
                "replace skipped: node not in parent views"
            );
            return Ok(());
        }
        if destination == parent || tree.is_ancestor(destination, parent) {
            return Err(DockError::AncestorConflict {
                ancestor: destination,
                descendant: parent,
            });
        }

        if let Some(destination_parent) = destination_parent
            && tree.contains(destination_parent)
        {
            let _ = tree.detach_child(destination_parent, destination)?;
        }
        // Detaching a sibling may have shifted the slot.
        let Some(index) = tree.index_of(parent, source) else {
            return Ok(());
        };
        let record = tree.require_mut(parent)?;
        record.views[index] = destination;
        record.retarget_selection(source, destination);

        debug!(
            target: TARGET,
            source = source.get(),
            destination = destination.get(),
            parent = parent.get(),
            index = index,
            "node replaced"
        );
        Ok(())
    }

    /// Replace `node` with the layout its split capability builds for
    /// `operation`.
    ///
    /// Only left, right, top and bottom are accepted. A node without a
    /// split capability, or one that produces nothing, is left alone.
    pub fn split(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        operation: DockOperation,
    ) -> Result<(), DockError> {
        if !operation.is_split_direction() {
            return Err(DockError::UnsupportedOperation { operation });
        }
        let _span = tracing::debug_span!(
            "dock.split",
            node = node.get(),
            operation = %operation
        )
        .entered();

        let record = tree.require(node)?;
        let Some(split_layout) = record.split_layout.clone() else {
            debug!(target: TARGET, node = node.get(), "split skipped: node cannot split");
            return Ok(());
        };
        let context = record.context().cloned();

        let Some(layout) = split_layout.split_layout(tree, node, context.as_ref(), operation)?
        else {
            debug!(target: TARGET, node = node.get(), "split aborted by node");
            return Ok(());
        };
        let parent = tree.require(node)?.parent;
        self.replace(tree, node, layout)?;
        self.update(tree, layout, context, parent)?;

        debug!(
            target: TARGET,
            node = node.get(),
            layout = layout.get(),
            operation = %operation,
            "node split"
        );
        Ok(())
    }

    /// Direction a `split_to_*` wrapper actually uses under the configured
    /// dispatch policy.
    #[must_use]
    pub const fn wrapper_direction(&self, requested: DockOperation) -> DockOperation {
        match self.config.split_dispatch {
            SplitDispatch::Directional => requested,
            SplitDispatch::LegacyLeft => DockOperation::Left,
        }
    }

    pub fn split_to_left(&self, tree: &mut DockTree, node: NodeId) -> Result<(), DockError> {
        self.split(tree, node, self.wrapper_direction(DockOperation::Left))
    }

    pub fn split_to_right(&self, tree: &mut DockTree, node: NodeId) -> Result<(), DockError> {
        self.split(tree, node, self.wrapper_direction(DockOperation::Right))
    }

    pub fn split_to_top(&self, tree: &mut DockTree, node: NodeId) -> Result<(), DockError> {
        self.split(tree, node, self.wrapper_direction(DockOperation::Top))
    }

    pub fn split_to_bottom(&self, tree: &mut DockTree, node: NodeId) -> Result<(), DockError> {
        self.split(tree, node, self.wrapper_direction(DockOperation::Bottom))
    }

    // ---------------------------------------------------------------------
    // Creation
    // ---------------------------------------------------------------------

    /// Create a `kind` node, stamp it under `parent` and put it at `index`
    /// in `parent.views`.
    fn insert_at(
        &self,
        tree: &mut DockTree,
        parent: NodeId,
        index: usize,
        kind: DockKind,
    ) -> Result<NodeId, DockError> {
        let context = tree.require(parent)?.context().cloned();
        let created = tree.insert(DockNode::named(kind));
        self.update(tree, created, context, Some(parent))?;

        let views = &mut tree.require_mut(parent)?.views;
        let index = index.min(views.len());
        views.insert(index, created);
        debug!(
            target: TARGET,
            node = created.get(),
            kind = %kind,
            parent = parent.get(),
            index = index,
            "node inserted"
        );
        Ok(created)
    }

    /// Append a new `kind` node to `node.views`.
    pub fn add(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        kind: DockKind,
    ) -> Result<NodeId, DockError> {
        let end = tree.require(node)?.views.len();
        self.insert_at(tree, node, end, kind)
    }

    /// Insert a new `kind` node right before `node` in its parent.
    ///
    /// `Ok(None)` when `node` is detached.
    pub fn insert_before(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        kind: DockKind,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_beside(tree, node, kind, 0)
    }

    /// Insert a new `kind` node right after `node` in its parent.
    ///
    /// `Ok(None)` when `node` is detached.
    pub fn insert_after(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        kind: DockKind,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_beside(tree, node, kind, 1)
    }

    fn insert_beside(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        kind: DockKind,
        offset: usize,
    ) -> Result<Option<NodeId>, DockError> {
        let Some(parent) = tree.require(node)?.parent else {
            debug!(target: TARGET, node = node.get(), kind = %kind, "insert skipped: no parent");
            return Ok(None);
        };
        let Some(index) = tree.index_of(parent, node) else {
            debug!(
                target: TARGET,
                node = node.get(),
                parent = parent.get(),
                "insert skipped: node not in parent views"
            );
            return Ok(None);
        };
        self.insert_at(tree, parent, index + offset, kind).map(Some)
    }

    pub fn add_layout(&self, tree: &mut DockTree, node: NodeId) -> Result<NodeId, DockError> {
        self.add(tree, node, DockKind::Layout)
    }

    pub fn add_root(&self, tree: &mut DockTree, node: NodeId) -> Result<NodeId, DockError> {
        self.add(tree, node, DockKind::Root)
    }

    pub fn add_splitter(&self, tree: &mut DockTree, node: NodeId) -> Result<NodeId, DockError> {
        self.add(tree, node, DockKind::Splitter)
    }

    pub fn add_strip(&self, tree: &mut DockTree, node: NodeId) -> Result<NodeId, DockError> {
        self.add(tree, node, DockKind::Strip)
    }

    pub fn add_view(&self, tree: &mut DockTree, node: NodeId) -> Result<NodeId, DockError> {
        self.add(tree, node, DockKind::View)
    }

    pub fn insert_layout_before(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_before(tree, node, DockKind::Layout)
    }

    pub fn insert_root_before(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_before(tree, node, DockKind::Root)
    }

    pub fn insert_splitter_before(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_before(tree, node, DockKind::Splitter)
    }

    pub fn insert_strip_before(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_before(tree, node, DockKind::Strip)
    }

    pub fn insert_view_before(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_before(tree, node, DockKind::View)
    }

    pub fn insert_layout_after(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_after(tree, node, DockKind::Layout)
    }

    pub fn insert_root_after(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_after(tree, node, DockKind::Root)
    }

    pub fn insert_splitter_after(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_after(tree, node, DockKind::Splitter)
    }

    pub fn insert_strip_after(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_after(tree, node, DockKind::Strip)
    }

    pub fn insert_view_after(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.insert_after(tree, node, DockKind::View)
    }

    // ---------------------------------------------------------------------
    // Conversion
    // ---------------------------------------------------------------------

    /// Replace `node` with a new node of `kind` carrying its fields.
    ///
    /// Id, dock side, width, height and title always carry over; views and
    /// windows follow [`DockKind::conversion_fields`]. Carried sequences are
    /// moved, so the old node is left without them. `Ok(None)` when `node`
    /// is detached, which leaves the tree untouched.
    pub fn convert(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        kind: DockKind,
    ) -> Result<Option<NodeId>, DockError> {
        let fields = kind.conversion_fields();
        let source = tree.require_mut(node)?;
        let Some(parent) = source.parent else {
            debug!(target: TARGET, node = node.get(), kind = %kind, "convert skipped: no parent");
            return Ok(None);
        };

        let mut converted = DockNode::new(kind)
            .with_id(source.id())
            .with_title(source.title());
        converted.dock = source.dock;
        converted.width = source.width;
        converted.height = source.height;
        if fields.views {
            converted.views = std::mem::take(&mut source.views);
            converted.current_view = source.current_view.take();
            converted.default_view = source.default_view.take();
        }
        if fields.windows {
            converted.windows = std::mem::take(&mut source.windows);
        }
        let context = source.context().cloned();
        let from = source.kind;

        let converted = tree.insert(converted);
        self.update(tree, converted, context, Some(parent))?;
        self.replace(tree, node, converted)?;

        debug!(
            target: TARGET,
            node = node.get(),
            converted = converted.get(),
            from = %from,
            to = %kind,
            "node converted"
        );
        Ok(Some(converted))
    }

    pub fn convert_to_layout(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.convert(tree, node, DockKind::Layout)
    }

    pub fn convert_to_root(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.convert(tree, node, DockKind::Root)
    }

    pub fn convert_to_splitter(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.convert(tree, node, DockKind::Splitter)
    }

    pub fn convert_to_strip(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.convert(tree, node, DockKind::Strip)
    }

    pub fn convert_to_view(
        &self,
        tree: &mut DockTree,
        node: NodeId,
    ) -> Result<Option<NodeId>, DockError> {
        self.convert(tree, node, DockKind::View)
    }

    // ---------------------------------------------------------------------
    // Floating windows
    // ---------------------------------------------------------------------

    /// Wrap `content` as Window → Root → Strip → content and anchor the
    /// window on `target`.
    ///
    /// `content` is detached from its current parent first. Anchoring the
    /// window inside `content` itself is an [`DockError::AncestorConflict`].
    pub fn create_window(
        &self,
        tree: &mut DockTree,
        target: NodeId,
        content: NodeId,
        context: Option<Context>,
    ) -> Result<WindowId, DockError> {
        let _ = tree.require(target)?;
        if content == target || tree.is_ancestor(content, target) {
            return Err(DockError::AncestorConflict {
                ancestor: content,
                descendant: target,
            });
        }
        let previous_parent = tree.require(content)?.parent;
        if let Some(previous_parent) = previous_parent
            && tree.contains(previous_parent)
        {
            let _ = tree.detach_child(previous_parent, content)?;
        }

        let mut strip = DockNode::named(DockKind::Strip);
        strip.views = vec![content];
        strip.current_view = Some(content);
        let strip = tree.insert(strip);

        let mut root = DockNode::named(DockKind::Root);
        root.views = vec![strip];
        root.current_view = Some(strip);
        root.default_view = Some(strip);
        let root = tree.insert(root);

        let window = tree.insert_window(DockWindow::named().with_layout(root));
        tree.require_mut(target)?.windows.push(window);
        self.update_window(tree, window, context, Some(target))?;

        debug!(
            target: TARGET,
            window = window.get(),
            anchor = target.get(),
            content = content.get(),
            "window created"
        );
        Ok(window)
    }

    /// Tear `node` out of the docked tree into a new window on `anchor`,
    /// remembering where it came from.
    ///
    /// `Ok(None)` when the node does not allow floating.
    pub fn float_node(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        anchor: NodeId,
        context: Option<Context>,
    ) -> Result<Option<WindowId>, DockError> {
        let record = tree.require_mut(node)?;
        if !record.dockable.can_float() {
            debug!(target: TARGET, node = node.get(), "float skipped: not floatable");
            return Ok(None);
        }
        let parent = record.parent;
        record.dockable.set_original_owner(parent);
        self.remove(tree, node)?;
        self.create_window(tree, anchor, node, context).map(Some)
    }

    /// Take `window` off its owner's window list and clear its owner.
    ///
    /// The window and its layout stay in the arena so they can be anchored
    /// again; free the layout with [`DockTree::destroy`] once it is no
    /// longer needed.
    pub fn remove_window(&self, tree: &mut DockTree, window: WindowId) -> Result<(), DockError> {
        let record = tree.require_window_mut(window)?;
        let Some(owner) = record.owner.take() else {
            debug!(target: TARGET, window = window.get(), "remove window skipped: no owner");
            return Ok(());
        };
        if let Some(record) = tree.node_mut(owner) {
            record.windows.retain(|candidate| *candidate != window);
        }
        debug!(
            target: TARGET,
            window = window.get(),
            owner = owner.get(),
            "window removed"
        );
        Ok(())
    }
}
