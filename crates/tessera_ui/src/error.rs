//! # UI Error Types
//!
//! Configuration errors raised while composing the tree. None of these are
//! fatal: the failing operation leaves the tree untouched and the frame
//! pump keeps running.

use thiserror::Error;

use crate::widget::NodeId;

/// Errors that can occur while composing the component tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The node id does not refer to a live node.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// The target node does not lay out children.
    #[error("node {0} is not a layout container")]
    NotAContainer(NodeId),

    /// An auto-growing container was configured without a flow axis.
    #[error("auto-growing container {0} has no flow axis")]
    MissingFlowAxis(NodeId),

    /// The node was registered as a pointer listener but handles no pointer events.
    #[error("node {0} does not handle pointer events")]
    NotPointerCapable(NodeId),

    /// The node is already owned by another parent.
    #[error("node {node} is already owned by {parent}")]
    AlreadyAttached {
        /// The node being attached.
        node: NodeId,
        /// Its current owner.
        parent: NodeId,
    },

    /// Attaching the node would make it its own ancestor.
    #[error("attaching {node} under {parent} would create a cycle")]
    WouldCycle {
        /// The node being attached.
        node: NodeId,
        /// The requested owner.
        parent: NodeId,
    },
}

/// Result type for tree composition.
pub type UiResult<T> = Result<T, UiError>;
