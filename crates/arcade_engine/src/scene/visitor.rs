//! Depth-first traversal hooks

use super::{Node, NodeId};

/// Callbacks for [`SceneGraph::walk`](super::SceneGraph::walk)
///
/// The visitor receives callbacks when entering and exiting nodes.
pub trait SceneVisitor {
    /// Called before the children of `node`
    ///
    /// Returns true to continue into the children, false to skip the subtree.
    fn enter_node(&mut self, id: NodeId, node: &Node) -> bool;

    /// Called after the children of `node`
    fn exit_node(&mut self, _id: NodeId, _node: &Node) {}
}

/// Counts reachable nodes, optionally only the active ones
#[derive(Debug, Default)]
pub struct NodeCounter {
    /// Skip inactive subtrees
    pub active_only: bool,
    /// Nodes entered so far
    pub count: usize,
}

impl NodeCounter {
    /// Counter that skips inactive subtrees
    pub fn active() -> Self {
        Self { active_only: true, count: 0 }
    }
}

impl SceneVisitor for NodeCounter {
    fn enter_node(&mut self, _id: NodeId, node: &Node) -> bool {
        if self.active_only && !node.is_active() {
            return false;
        }
        self.count += 1;
        true
    }
}
