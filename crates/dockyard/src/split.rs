#![forbid(unsafe_code)]

//! Node-supplied split capability.

use std::fmt;

use crate::dockable::Context;
use crate::error::DockError;
use crate::kind::{DockKind, DockOperation, NodeId, Orientation};
use crate::node::DockNode;
use crate::tree::DockTree;

/// Builds the layout that takes a node's place when it is split.
///
/// Implementations may add nodes to the arena but must not attach the new
/// layout anywhere: the factory swaps it into the node's slot and runs the
/// update pass. Returning `Ok(None)` aborts the split.
pub trait SplitLayout: fmt::Debug + Send + Sync {
    fn split_layout(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        context: Option<&Context>,
        operation: DockOperation,
    ) -> Result<Option<NodeId>, DockError>;
}

/// Wraps the node in a new layout next to an empty strip.
///
/// Left and top put the new strip first; right and bottom put it last. A
/// splitter always sits between the two.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapSplitLayout;

impl SplitLayout for WrapSplitLayout {
    fn split_layout(
        &self,
        tree: &mut DockTree,
        node: NodeId,
        _context: Option<&Context>,
        operation: DockOperation,
    ) -> Result<Option<NodeId>, DockError> {
        let orientation = match operation {
            DockOperation::Left | DockOperation::Right => Orientation::Horizontal,
            DockOperation::Top | DockOperation::Bottom => Orientation::Vertical,
            DockOperation::Fill | DockOperation::Window => return Ok(None),
        };
        let source = tree.require(node)?;
        let (dock, width, height) = (source.dock, source.width, source.height);

        let mut strip = DockNode::named(DockKind::Strip);
        strip.dock = operation.side();
        let strip = tree.insert(strip);
        let splitter = tree.insert(DockNode::named(DockKind::Splitter));

        let mut layout = DockNode::named(DockKind::Layout);
        layout.dock = dock;
        layout.orientation = orientation;
        layout.width = width;
        layout.height = height;
        layout.views = match operation {
            DockOperation::Left | DockOperation::Top => vec![strip, splitter, node],
            _ => vec![node, splitter, strip],
        };
        layout.current_view = Some(node);
        Ok(Some(tree.insert(layout)))
    }
}
