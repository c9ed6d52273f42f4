#![forbid(unsafe_code)]

//! Errors surfaced by the dock tree and factory.

use std::fmt;

use crate::kind::{DockOperation, NodeId, WindowId};

/// Fatal failures of a factory or tree operation.
///
/// Operations on detached nodes are not errors; they return without
/// touching the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    /// A host was requested for an id with no registered host locator.
    HostNotRegistered { id: String },
    /// `split` was asked for something other than left/right/top/bottom.
    UnsupportedOperation { operation: DockOperation },
    MissingNode { node: NodeId },
    MissingWindow { window: WindowId },
    /// `child` is not in `parent.views`.
    NotAChild { parent: NodeId, child: NodeId },
    /// The operation would make a node its own descendant.
    AncestorConflict { ancestor: NodeId, descendant: NodeId },
    /// A node is listed in the views of two containers.
    DuplicateChild {
        node: NodeId,
        first_parent: NodeId,
        second_parent: NodeId,
    },
    /// `node` reaches itself through views or window layouts.
    ContainmentCycle { node: NodeId },
}

impl fmt::Display for DockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostNotRegistered { id } => {
                write!(f, "dock host with id {id:?} is not registered")
            }
            Self::UnsupportedOperation { operation } => {
                write!(f, "unsupported dock operation: {operation}")
            }
            Self::MissingNode { node } => write!(f, "{node} not found"),
            Self::MissingWindow { window } => write!(f, "{window} not found"),
            Self::NotAChild { parent, child } => {
                write!(f, "{child} is not a view of {parent}")
            }
            Self::AncestorConflict {
                ancestor,
                descendant,
            } => write!(
                f,
                "operation would create cycle: {ancestor} is an ancestor of {descendant}"
            ),
            Self::DuplicateChild {
                node,
                first_parent,
                second_parent,
            } => write!(
                f,
                "{node} is a view of both {first_parent} and {second_parent}"
            ),
            Self::ContainmentCycle { node } => write!(f, "{node} contains itself"),
        }
    }
}

impl std::error::Error for DockError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_names_the_id() {
        let err = DockError::HostNotRegistered {
            id: "Tools".to_string(),
        };
        assert_eq!(err.to_string(), "dock host with id \"Tools\" is not registered");
    }

    #[test]
    fn unsupported_operation_names_the_operation() {
        let err = DockError::UnsupportedOperation {
            operation: DockOperation::Fill,
        };
        assert_eq!(err.to_string(), "unsupported dock operation: fill");
    }

    #[test]
    fn cycle_names_the_node() {
        let node = NodeId::MIN;
        assert_eq!(
            DockError::ContainmentCycle { node }.to_string(),
            "node#1 contains itself"
        );
    }
}
