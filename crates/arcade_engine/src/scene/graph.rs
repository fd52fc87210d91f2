//! Arena-backed scene graph
//!
//! Every node lives in a [`SlotMap`] and is addressed by a [`NodeId`]. Parent
//! and child links are plain ids, and both sides of a link are updated in
//! the same call, so detaching is a relation update and a removed node can
//! never be reached through a stale pointer.

use std::ops::{Index, IndexMut};

use slotmap::SlotMap;

use super::{Node, NodeId, SceneVisitor};
use crate::foundation::math::{Mat4, Mat4Ext, Quat, Vec3};
use crate::physics::BoundingSphere;
use crate::render::Renderer;

/// Owner of all nodes and of the parent/child relation between them
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl SceneGraph {
    /// Create a graph holding only the scene root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::default().with_name("scene_root"));
        Self { nodes, root }
    }

    /// The permanent scene root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Insert an unparented node
    pub fn create_node(&mut self, node: Node) -> NodeId {
        debug_assert!(node.parent.is_none() && node.children.is_empty());
        self.nodes.insert(node)
    }

    /// Insert a node as a child of `parent`, keeping its local pose
    pub fn create_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.create_node(node);
        self.set_parent(id, Some(parent), false);
        id
    }

    /// Check if `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of `id`
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(Node::parent)
    }

    /// Children of `id` (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[] as &[NodeId], Node::children)
    }

    /// Check if `ancestor` appears on the parent chain of `id` (or is `id`)
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Re-parent `id`
    ///
    /// - Same parent as now: no-op.
    /// - `Some(parent)`: the node leaves its old parent's child list and
    ///   joins the new one. With `preserve_world_pose` the local matrix is
    ///   rewritten to `inverse(parent.world) * old_world` so the node does
    ///   not visually move; otherwise the local matrix is kept as-is.
    /// - `None`: the current world transform is baked into the local matrix
    ///   and the node becomes a root of its own.
    ///
    /// In all cases the node ends in local mode. Self-parenting, cycles and
    /// unknown ids are rejected without touching the graph.
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>, preserve_world_pose: bool) {
        let Some(current_parent) = self.nodes.get(id).map(Node::parent) else {
            log::warn!("set_parent on unknown node {id:?}");
            return;
        };
        if current_parent == new_parent {
            return;
        }
        if let Some(parent) = new_parent {
            if !self.contains(parent) {
                log::warn!("set_parent({id:?}) to unknown parent {parent:?}");
                return;
            }
            if self.is_ancestor_or_self(id, parent) {
                log::warn!("Refusing to parent {id:?} under {parent:?}: would create a cycle");
                return;
            }
        }

        let old_world = self.world_transform(id);

        if let Some(old_parent) = current_parent {
            self.nodes[old_parent].children.retain(|&child| child != id);
        }

        match new_parent {
            Some(parent) => {
                let local = if preserve_world_pose {
                    let parent_world = self.world_transform(parent);
                    match parent_world.try_inverse() {
                        Some(inverse) => Some(inverse * old_world),
                        None => {
                            log::warn!("Parent {parent:?} has a singular world transform, keeping local pose");
                            None
                        }
                    }
                } else {
                    None
                };

                let node = &mut self.nodes[id];
                if let Some(local) = local {
                    node.set_local_matrix(local);
                }
                node.parent = Some(parent);
                node.force_local_mode();

                let siblings = &mut self.nodes[parent].children;
                if !siblings.contains(&id) {
                    siblings.push(id);
                }
            }
            None => {
                let node = &mut self.nodes[id];
                node.set_local_matrix(old_world);
                node.parent = None;
                node.force_local_mode();
            }
        }
    }

    /// Detach every child of `id`, each keeping its world pose
    pub fn clear_children(&mut self, id: NodeId) {
        let children = self.nodes.get_mut(id).map(|node| std::mem::take(&mut node.children));
        for child in children.into_iter().flatten() {
            // Link already cut on the parent side; finish on the child side
            let world = self.world_transform(child);
            let node = &mut self.nodes[child];
            node.parent = None;
            node.set_local_matrix(world);
            node.force_local_mode();
        }
    }

    /// Remove a single node
    ///
    /// The node is detached from its parent and its children are disowned
    /// (they keep their world pose and become roots). The scene root cannot
    /// be destroyed.
    pub fn destroy_node(&mut self, id: NodeId) -> Option<Node> {
        if id == self.root {
            log::warn!("Refusing to destroy the scene root");
            return None;
        }
        if !self.contains(id) {
            return None;
        }
        self.clear_children(id);
        self.set_parent(id, None, false);
        self.nodes.remove(id)
    }

    /// Remove a node and all of its descendants, returning how many were removed
    pub fn destroy_subtree(&mut self, id: NodeId) -> usize {
        if id == self.root {
            log::warn!("Refusing to destroy the scene root");
            return 0;
        }
        if !self.contains(id) {
            return 0;
        }

        if let Some(parent) = self.parent(id) {
            self.nodes[parent].children.retain(|&child| child != id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// World transform: parent's world composed with the local matrix
    ///
    /// Recomputed on every call. Unknown ids yield identity.
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let Some(node) = self.nodes.get(id) else {
            return Mat4::identity();
        };

        let mut world = *node.local_matrix();
        let mut current = node.parent();
        while let Some(parent_id) = current {
            let parent = &self.nodes[parent_id];
            world = parent.local_matrix() * world;
            current = parent.parent();
        }
        world
    }

    /// World-space position
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_transform(id).position()
    }

    /// World-space per-axis scale
    pub fn world_scale(&self, id: NodeId) -> Vec3 {
        self.world_transform(id).axis_scale()
    }

    /// World-space rotation
    pub fn world_rotation(&self, id: NodeId) -> Quat {
        self.world_transform(id).rotation()
    }

    /// World-space collision sphere of a node
    pub fn bounding_sphere(&self, id: NodeId) -> BoundingSphere {
        let radius = self.nodes.get(id).map_or(0.0, Node::hitbox_radius);
        BoundingSphere::new(self.world_position(id), radius)
    }

    /// True iff the world-space distance between the nodes is at most the
    /// sum of their hitbox radii
    pub fn check_collision(&self, a: NodeId, b: NodeId) -> bool {
        self.bounding_sphere(a).intersects(&self.bounding_sphere(b))
    }

    /// Set the active flag on a node and every descendant
    pub fn set_active_recursive(&mut self, id: NodeId, active: bool) {
        self.for_each_in_subtree(id, |node| node.set_active(active));
    }

    /// Set the visible flag on a node and every descendant
    pub fn set_visible_recursive(&mut self, id: NodeId, visible: bool) {
        self.for_each_in_subtree(id, |node| node.set_visible(visible));
    }

    fn for_each_in_subtree(&mut self, id: NodeId, mut f: impl FnMut(&mut Node)) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                f(node);
                stack.extend_from_slice(&node.children);
            }
        }
    }

    /// Depth-first walk starting at `id`
    pub fn walk<V: SceneVisitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };

        if visitor.enter_node(id, node) {
            for &child in node.children() {
                self.walk(child, visitor);
            }
        }

        visitor.exit_node(id, node);
    }

    /// Draw `id` and its descendants
    ///
    /// A node that is not both active and visible is skipped together with
    /// its subtree. Nodes without an appearance draw nothing themselves but
    /// still draw their children.
    pub fn draw(&self, id: NodeId, renderer: &mut dyn Renderer) {
        let parent_world = self
            .parent(id)
            .map_or_else(Mat4::identity, |parent| self.world_transform(parent));
        self.draw_recursive(id, &parent_world, renderer);
    }

    fn draw_recursive(&self, id: NodeId, parent_world: &Mat4, renderer: &mut dyn Renderer) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.is_drawable() {
            return;
        }

        let world = parent_world * node.local_matrix();
        if let Some(appearance) = node.appearance() {
            renderer.draw_mesh(appearance.mesh, &(world * appearance.mesh_transform), &appearance.tint);
        }

        for &child in node.children() {
            self.draw_recursive(child, &world, renderer);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics if the node has been removed
impl Index<NodeId> for SceneGraph {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

/// Panics if the node has been removed
impl IndexMut<NodeId> for SceneGraph {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
}
