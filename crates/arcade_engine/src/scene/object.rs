//! Capability interface for anything that lives in the scene graph

use super::{NodeId, SceneGraph};
use crate::render::Renderer;

/// A gameplay entity backed by a scene graph node
///
/// The graph and the object pools talk to entities only through this trait.
/// Updates do not propagate to children automatically: an owner updates the
/// entities it owns.
pub trait GameObject {
    /// Node this entity drives
    fn node(&self) -> NodeId;

    /// Per-frame logic
    fn update(&mut self, _graph: &mut SceneGraph, _delta_time: f32) {}

    /// Draw this entity's subtree; invisible or inactive nodes draw nothing
    fn draw(&self, graph: &SceneGraph, renderer: &mut dyn Renderer) {
        graph.draw(self.node(), renderer);
    }

    /// Return to the freshly spawned state
    fn reset(&mut self, _graph: &mut SceneGraph) {}
}
