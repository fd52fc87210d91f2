//! Fixed-capacity object pool
//!
//! Every transient gameplay entity (bullets, projectiles) is pre-allocated
//! once and recycled through a free stack instead of being created and
//! destroyed at runtime.
//!
//! # Architecture
//!
//! ```text
//! ObjectPool<T>
//!     ├── pool node (scene graph grouping node, child of the owner)
//!     │       └── N instance nodes, parked until acquired
//!     ├── storage: [T; N]      (never grows or shrinks)
//!     └── available: stack of free slot indices
//!                 ↓
//!        O(1) acquire / release
//! ```
//!
//! An instance is in exactly one of two states. Available instances are
//! inactive and invisible; in-use instances are active and visible as soon
//! as they are handed out, so the caller re-poses them before the next
//! update or draw pass.

use std::ops::{Index, IndexMut};

use crate::config::{PoolConfig, WorldBounds};
use crate::render::Renderer;
use crate::scene::{GameObject, Node, NodeId, SceneGraph};

/// Handle to one slot of an [`ObjectPool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolSlot(usize);

impl PoolSlot {
    /// Index into the pool's storage
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed set of pre-constructed entities with O(1) acquire/release
#[derive(Debug)]
pub struct ObjectPool<T: GameObject> {
    node: NodeId,
    storage: Vec<T>,
    available: Vec<usize>,
    in_use: Vec<bool>,
    bounds: WorldBounds,
}

impl<T: GameObject> ObjectPool<T> {
    /// Build a pool of `capacity` instances under `parent`
    ///
    /// `factory` is called exactly `capacity` times. Each instance's node is
    /// re-parented under the pool's own grouping node (keeping its local
    /// pose) and parked.
    pub fn new<F>(graph: &mut SceneGraph, parent: NodeId, capacity: usize, bounds: WorldBounds, mut factory: F) -> Self
    where
        F: FnMut(&mut SceneGraph) -> T,
    {
        let node = graph.create_child(parent, Node::default().with_name("object_pool"));

        let storage: Vec<T> = (0..capacity)
            .map(|_| {
                let instance = factory(graph);
                let instance_node = instance.node();
                graph.set_parent(instance_node, Some(node), false);
                park(graph, instance_node);
                instance
            })
            .collect();

        log::debug!("Created object pool {node:?} with {capacity} instances");

        Self {
            node,
            storage,
            // Reversed so the first acquire hands out slot 0
            available: (0..capacity).rev().collect(),
            in_use: vec![false; capacity],
            bounds,
        }
    }

    /// Build a pool sized by `config`
    pub fn from_config<F>(graph: &mut SceneGraph, parent: NodeId, config: &PoolConfig, bounds: WorldBounds, factory: F) -> Self
    where
        F: FnMut(&mut SceneGraph) -> T,
    {
        Self::new(graph, parent, config.capacity, bounds, factory)
    }

    /// The pool's grouping node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Total number of instances
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of instances currently handed out
    pub fn active_count(&self) -> usize {
        self.storage.len() - self.available.len()
    }

    /// Number of instances ready to be acquired
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Volume outside of which instances expire
    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Replace the expiry volume
    pub fn set_bounds(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
    }

    /// Check if `slot` is currently handed out
    pub fn is_active(&self, slot: PoolSlot) -> bool {
        self.in_use.get(slot.0).copied().unwrap_or(false)
    }

    /// Hand out a free instance, marking it active and visible
    ///
    /// Returns `None` when every instance is in use. That is the normal
    /// admission-control outcome; callers skip the spawn.
    pub fn acquire(&mut self, graph: &mut SceneGraph) -> Option<PoolSlot> {
        let index = self.available.pop()?;
        self.in_use[index] = true;

        let node = &mut graph[self.storage[index].node()];
        node.set_active(true);
        node.set_visible(true);

        Some(PoolSlot(index))
    }

    /// Return an instance to the free set
    ///
    /// The instance keeps its last pose until it is acquired again. Releasing
    /// a slot that is already free is ignored. Returns whether the slot was
    /// actually released.
    pub fn release(&mut self, graph: &mut SceneGraph, slot: PoolSlot) -> bool {
        match self.in_use.get(slot.0) {
            Some(true) => {}
            Some(false) => {
                log::warn!("Double release of pool slot {} in pool {:?}", slot.0, self.node);
                return false;
            }
            None => {
                log::warn!("Release of out-of-range slot {} in pool {:?}", slot.0, self.node);
                return false;
            }
        }

        self.in_use[slot.0] = false;
        self.available.push(slot.0);
        park(graph, self.storage[slot.0].node());
        true
    }

    /// Release every instance currently in use
    pub fn release_all(&mut self, graph: &mut SceneGraph) {
        for index in 0..self.storage.len() {
            if self.in_use[index] {
                self.release(graph, PoolSlot(index));
            }
        }
    }

    /// Per-frame pass over the in-use instances
    ///
    /// An instance whose world position is outside the bounds is released;
    /// every other in-use instance whose node is active gets its `update`.
    /// Returns how many instances expired.
    pub fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) -> usize {
        let mut expired = 0;

        for index in 0..self.storage.len() {
            if !self.in_use[index] {
                continue;
            }

            let node = self.storage[index].node();
            if self.bounds.is_outside(&graph.world_position(node)) {
                log::trace!("Pool {:?} slot {index} left the world bounds", self.node);
                self.release(graph, PoolSlot(index));
                expired += 1;
            } else if graph.get(node).is_some_and(Node::is_active) {
                self.storage[index].update(graph, delta_time);
            }
        }

        expired
    }

    /// Draw every instance; parked ones draw nothing
    pub fn draw(&self, graph: &SceneGraph, renderer: &mut dyn Renderer) {
        for instance in &self.storage {
            instance.draw(graph, renderer);
        }
    }

    /// Instance in `slot`
    pub fn get(&self, slot: PoolSlot) -> Option<&T> {
        self.storage.get(slot.0)
    }

    /// Mutable instance in `slot`
    pub fn get_mut(&mut self, slot: PoolSlot) -> Option<&mut T> {
        self.storage.get_mut(slot.0)
    }

    /// Every instance, in use or not
    pub fn iter(&self) -> impl Iterator<Item = (PoolSlot, &T)> {
        self.storage.iter().enumerate().map(|(index, instance)| (PoolSlot(index), instance))
    }

    /// Instances currently in use
    pub fn iter_active(&self) -> impl Iterator<Item = (PoolSlot, &T)> {
        self.iter().filter(|(slot, _)| self.in_use[slot.0])
    }

    /// Slots currently in use, collected so the caller may release while iterating
    pub fn active_slots(&self) -> Vec<PoolSlot> {
        self.iter_active().map(|(slot, _)| slot).collect()
    }

    /// Remove every instance subtree and the pool node from the graph
    pub fn destroy(self, graph: &mut SceneGraph) {
        let removed = graph.destroy_subtree(self.node);
        log::debug!("Destroyed object pool {:?} ({removed} nodes)", self.node);
    }
}

impl<T: GameObject> Index<PoolSlot> for ObjectPool<T> {
    type Output = T;

    fn index(&self, slot: PoolSlot) -> &T {
        &self.storage[slot.0]
    }
}

impl<T: GameObject> IndexMut<PoolSlot> for ObjectPool<T> {
    fn index_mut(&mut self, slot: PoolSlot) -> &mut T {
        &mut self.storage[slot.0]
    }
}

fn park(graph: &mut SceneGraph, node: NodeId) {
    if let Some(node) = graph.get_mut(node) {
        node.set_active(false);
        node.set_visible(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MeshHandle;
    use crate::foundation::math::{Vec3, RIGHT};
    use crate::render::RecordingRenderer;
    use crate::scene::Appearance;

    struct Mover {
        node: NodeId,
        updates: u32,
    }

    impl GameObject for Mover {
        fn node(&self) -> NodeId {
            self.node
        }

        fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
            self.updates += 1;
            graph[self.node].translate(RIGHT * delta_time);
        }
    }

    fn pool(graph: &mut SceneGraph, capacity: usize) -> ObjectPool<Mover> {
        let root = graph.root();
        ObjectPool::new(graph, root, capacity, WorldBounds::default(), |graph| Mover {
            node: graph.create_node(Node::default().with_appearance(Appearance::new(MeshHandle::from_raw(0)))),
            updates: 0,
        })
    }

    #[test]
    fn test_instances_start_parked_under_pool_node() {
        let mut graph = SceneGraph::new();
        let pool = pool(&mut graph, 4);

        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.available_count(), 4);
        assert_eq!(graph.children(pool.node()).len(), 4);
        for (_, instance) in pool.iter() {
            assert!(!graph[instance.node].is_active());
            assert!(!graph[instance.node].is_visible());
        }
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let mut graph = SceneGraph::new();
        let mut pool = pool(&mut graph, 2);

        let a = pool.acquire(&mut graph).unwrap();
        let b = pool.acquire(&mut graph).unwrap();
        assert_ne!(a, b);
        assert!(pool.acquire(&mut graph).is_none());
        assert_eq!(pool.active_count(), 2);
        assert!(graph[pool[a].node].is_active());
        assert!(graph[pool[b].node].is_visible());
    }

    #[test]
    fn test_double_release_is_ignored() {
        let mut graph = SceneGraph::new();
        let mut pool = pool(&mut graph, 2);

        let slot = pool.acquire(&mut graph).unwrap();
        assert!(pool.release(&mut graph, slot));
        assert!(!pool.release(&mut graph, slot));
        assert_eq!(pool.available_count(), 2);

        // Free stack holds no duplicates, so two distinct slots come back
        let a = pool.acquire(&mut graph).unwrap();
        let b = pool.acquire(&mut graph).unwrap();
        assert_ne!(a, b);
        assert!(pool.acquire(&mut graph).is_none());
    }

    #[test]
    fn test_release_keeps_pose_and_parks() {
        let mut graph = SceneGraph::new();
        let mut pool = pool(&mut graph, 1);

        let slot = pool.acquire(&mut graph).unwrap();
        let node = pool[slot].node;
        graph[node].init(Vec3::new(4.0, 0.0, 0.0), 0.0, RIGHT, Vec3::new(1.0, 1.0, 1.0));
        pool.release(&mut graph, slot);

        assert!(!graph[node].is_active());
        assert!(!pool.is_active(slot));
        assert_eq!(graph.world_position(node), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_update_skips_free_and_externally_inactive_instances() {
        let mut graph = SceneGraph::new();
        let mut pool = pool(&mut graph, 3);

        let a = pool.acquire(&mut graph).unwrap();
        let b = pool.acquire(&mut graph).unwrap();
        graph[pool[b].node].set_active(false);

        assert_eq!(pool.update(&mut graph, 0.5), 0);
        assert_eq!(pool[a].updates, 1);
        assert_eq!(pool[b].updates, 0);
        assert_eq!(pool.iter().map(|(_, m)| m.updates).sum::<u32>(), 1);
    }

    #[test]
    fn test_release_all_and_draw() {
        let mut graph = SceneGraph::new();
        let mut pool = pool(&mut graph, 3);
        pool.acquire(&mut graph);
        pool.acquire(&mut graph);

        let mut renderer = RecordingRenderer::new();
        pool.draw(&graph, &mut renderer);
        assert_eq!(renderer.len(), 2);

        pool.release_all(&mut graph);
        assert_eq!(pool.active_count(), 0);
        assert!(pool.active_slots().is_empty());

        renderer.clear();
        pool.draw(&graph, &mut renderer);
        assert!(renderer.is_empty());
    }

    #[test]
    fn test_from_config_uses_configured_capacity() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mut built = 0;
        let pool = ObjectPool::from_config(&mut graph, root, &PoolConfig::new(6), WorldBounds::default(), |graph| {
            built += 1;
            Mover {
                node: graph.create_node(Node::default()),
                updates: 0,
            }
        });

        assert_eq!(built, 6);
        assert_eq!(pool.capacity(), 6);
        assert_eq!(pool.available_count(), 6);
    }

    #[test]
    fn test_destroy_removes_every_node() {
        let mut graph = SceneGraph::new();
        let pool = pool(&mut graph, 5);
        assert_eq!(graph.len(), 7);

        pool.destroy(&mut graph);
        assert_eq!(graph.len(), 1);
        assert!(graph.children(graph.root()).is_empty());
    }
}
