#![forbid(unsafe_code)]

//! Arena owning every node and window of a dock layout.
//!
//! Handles stay valid until [`DockTree::destroy`] frees them. Detaching a
//! node from its parent keeps it (and its subtree) in the arena so it can be
//! reattached elsewhere.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::DockError;
use crate::kind::{NodeId, WindowId};
use crate::node::DockNode;
use crate::window::DockWindow;

/// Node and window storage for one docking layout.
#[derive(Debug, Clone)]
pub struct DockTree {
    next_node: NodeId,
    next_window: WindowId,
    nodes: BTreeMap<NodeId, DockNode>,
    windows: BTreeMap<WindowId, DockWindow>,
}

impl Default for DockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DockTree {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_node: NodeId::MIN,
            next_window: WindowId::MIN,
            nodes: BTreeMap::new(),
            windows: BTreeMap::new(),
        }
    }

    /// Store a node, unattached.
    pub fn insert(&mut self, node: DockNode) -> NodeId {
        let id = self.next_node;
        self.next_node = id.next();
        let _ = self.nodes.insert(id, node);
        id
    }

    /// Store a window, not yet anchored to any node.
    pub fn insert_window(&mut self, window: DockWindow) -> WindowId {
        let id = self.next_window;
        self.next_window = id.next();
        let _ = self.windows.insert(id, window);
        id
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&DockNode> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut DockNode> {
        self.nodes.get_mut(&id)
    }

    #[must_use]
    pub fn window(&self, id: WindowId) -> Option<&DockWindow> {
        self.windows.get(&id)
    }

    #[must_use]
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut DockWindow> {
        self.windows.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of stored nodes, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Iterate nodes in handle order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &DockNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &DockWindow)> {
        self.windows.iter().map(|(id, window)| (*id, window))
    }

    pub(crate) fn require(&self, id: NodeId) -> Result<&DockNode, DockError> {
        self.nodes.get(&id).ok_or(DockError::MissingNode { node: id })
    }

    pub(crate) fn require_mut(&mut self, id: NodeId) -> Result<&mut DockNode, DockError> {
        self.nodes
            .get_mut(&id)
            .ok_or(DockError::MissingNode { node: id })
    }

    pub(crate) fn require_window(&self, id: WindowId) -> Result<&DockWindow, DockError> {
        self.windows
            .get(&id)
            .ok_or(DockError::MissingWindow { window: id })
    }

    pub(crate) fn require_window_mut(
        &mut self,
        id: WindowId,
    ) -> Result<&mut DockWindow, DockError> {
        self.windows
            .get_mut(&id)
            .ok_or(DockError::MissingWindow { window: id })
    }

    /// Position of `child` in `parent.views`.
    #[must_use]
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes
            .get(&parent)?
            .views
            .iter()
            .position(|view| *view == child)
    }

    /// Children of `id`, empty for unknown handles.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |node| node.views.as_slice())
    }

    /// Cached parent chain, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::from([id]);
        let mut cursor = self.nodes.get(&id).and_then(|node| node.parent);
        while let Some(parent) = cursor {
            if !seen.insert(parent) {
                break;
            }
            chain.push(parent);
            cursor = self.nodes.get(&parent).and_then(|node| node.parent);
        }
        chain
    }

    /// Topmost cached ancestor, or `id` itself for a root.
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }

    /// Whether `descendant` is reachable from `ancestor` through `views` or
    /// the layouts of anchored windows.
    ///
    /// Walks containment rather than the parent cache.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut stack = self.contained(ancestor);
        let mut seen = BTreeSet::new();
        while let Some(id) = stack.pop() {
            if id == descendant {
                return true;
            }
            if seen.insert(id) {
                stack.extend(self.contained(id));
            }
        }
        false
    }

    fn contained(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let layouts = node
            .windows
            .iter()
            .filter_map(|window| self.windows.get(window).and_then(|window| window.layout));
        node.views.iter().copied().chain(layouts).collect()
    }

    /// Append `child` to `parent.views` without touching back-references.
    ///
    /// For building an initial layout; run the factory's update pass
    /// afterwards to stamp parents and contexts.
    pub fn push_view(&mut self, parent: NodeId, child: NodeId) -> Result<(), DockError> {
        let _ = self.require(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DockError::AncestorConflict {
                ancestor: child,
                descendant: parent,
            });
        }
        self.require_mut(parent)?.views.push(child);
        Ok(())
    }

    /// Select the active view of a container. `child` must be one of its views.
    pub fn set_current_view(
        &mut self,
        parent: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), DockError> {
        if let Some(child) = child {
            self.expect_child(parent, child)?;
        }
        self.require_mut(parent)?.current_view = child;
        Ok(())
    }

    /// Set the view a container falls back to. `child` must be one of its views.
    pub fn set_default_view(
        &mut self,
        parent: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), DockError> {
        if let Some(child) = child {
            self.expect_child(parent, child)?;
        }
        self.require_mut(parent)?.default_view = child;
        Ok(())
    }

    fn expect_child(&self, parent: NodeId, child: NodeId) -> Result<usize, DockError> {
        let _ = self.require(parent)?;
        self.index_of(parent, child)
            .ok_or(DockError::NotAChild { parent, child })
    }

    /// Take `child` out of `parent.views`, dropping any selection of it.
    ///
    /// Returns the index it held, or `None` if it was not there.
    pub(crate) fn detach_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<Option<usize>, DockError> {
        let parent = self.require_mut(parent)?;
        let Some(index) = parent.views.iter().position(|view| *view == child) else {
            return Ok(None);
        };
        let _ = parent.views.remove(index);
        parent.clear_selection_of(child);
        Ok(Some(index))
    }

    /// Detach `id` and free it, its descendants, their windows and the
    /// windows' layouts.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), DockError> {
        let parent = self.require(id)?.parent;
        if let Some(parent) = parent
            && self.nodes.contains_key(&parent)
        {
            let _ = self.detach_child(parent, id)?;
        }

        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.remove(&node_id) else {
                continue;
            };
            stack.extend(node.views);
            for window_id in node.windows {
                if let Some(window) = self.windows.remove(&window_id) {
                    stack.extend(window.layout);
                }
            }
        }
        Ok(())
    }

    /// Check containment and selection invariants.
    ///
    /// Every listed view and window must exist, no node may be listed by two
    /// containers, no node may contain itself, and selections must point
    /// into `views`.
    pub fn validate(&self) -> Result<(), DockError> {
        let mut owners: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        for (id, node) in &self.nodes {
            for child in &node.views {
                if !self.nodes.contains_key(child) {
                    return Err(DockError::MissingNode { node: *child });
                }
                if let Some(first_parent) = owners.insert(*child, *id) {
                    return Err(DockError::DuplicateChild {
                        node: *child,
                        first_parent,
                        second_parent: *id,
                    });
                }
            }
            for selected in [node.current_view, node.default_view].into_iter().flatten() {
                if !node.views.contains(&selected) {
                    return Err(DockError::NotAChild {
                        parent: *id,
                        child: selected,
                    });
                }
            }
            for window in &node.windows {
                let window = self.require_window(*window)?;
                if let Some(layout) = window.layout {
                    let _ = self.require(layout)?;
                }
            }
        }
        for id in self.nodes.keys() {
            if self.is_ancestor(*id, *id) {
                return Err(DockError::ContainmentCycle { node: *id });
            }
        }
        Ok(())
    }
}
