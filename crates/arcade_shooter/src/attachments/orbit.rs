//! Heart satellite circling the player

use arcade_engine::foundation::math::{Vec3, Vec4, FORWARD, UP};
use arcade_engine::prelude::*;

use crate::assets::{upright, GameAssets};

const ORBIT_TINT: Vec4 = Vec4::new(0.85, 0.15, 0.15, 1.0);

/// One remaining heart, drawn as a star spinning around its parent
#[derive(Debug)]
pub struct Orbit {
    node: NodeId,
    angular_speed: f32,
    distance: f32,
    scale: f32,
    phase: f32,
}

impl Orbit {
    /// Attach an orbit to `parent`, starting `phase` degrees around the circle
    pub fn spawn(
        graph: &mut SceneGraph,
        parent: NodeId,
        assets: &GameAssets,
        distance: f32,
        scale: f32,
        angular_speed: f32,
        phase: f32,
    ) -> Self {
        let appearance = Appearance::new(assets.orbit)
            .with_mesh_transform(upright(0.8))
            .with_tint(ORBIT_TINT);
        let node = graph.create_child(parent, Node::default().with_name("orbit").with_appearance(appearance));

        let orbit = Self {
            node,
            angular_speed,
            distance,
            scale,
            phase,
        };
        orbit.place(graph);
        orbit
    }

    fn place(&self, graph: &mut SceneGraph) {
        let node = &mut graph[self.node];
        node.init(Vec3::new(self.distance, 0.0, 0.0), 0.0, UP, Vec3::new(self.scale, self.scale, self.scale));
        node.rotate_world(self.phase, FORWARD);
    }
}

impl GameObject for Orbit {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        if graph[self.node].is_active() {
            graph[self.node].rotate_world(self.angular_speed * delta_time, FORWARD);
        }
    }

    fn reset(&mut self, graph: &mut SceneGraph) {
        self.place(graph);
        graph.set_active_recursive(self.node, true);
        graph.set_visible_recursive(self.node, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::assets::{MeshRegistry, SequentialMeshLoader};
    use approx::assert_relative_eq;

    #[test]
    fn test_orbit_circles_parent_origin() {
        let mut graph = SceneGraph::new();
        let assets = GameAssets::load(&mut MeshRegistry::new(), &mut SequentialMeshLoader::default()).unwrap();
        let ship = graph.create_node(Node::at(Vec3::new(0.0, -20.0, 0.0)));
        let mut orbit = Orbit::spawn(&mut graph, ship, &assets, 5.0, 2.0, 90.0, 0.0);

        orbit.update(&mut graph, 1.0);
        assert_relative_eq!(graph.world_position(orbit.node()), Vec3::new(0.0, -15.0, 0.0), epsilon = 1e-4);

        orbit.reset(&mut graph);
        assert_relative_eq!(graph.world_position(orbit.node()), Vec3::new(5.0, -20.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_phase_spreads_orbits() {
        let mut graph = SceneGraph::new();
        let assets = GameAssets::load(&mut MeshRegistry::new(), &mut SequentialMeshLoader::default()).unwrap();
        let ship = graph.create_node(Node::default());
        let orbit = Orbit::spawn(&mut graph, ship, &assets, 5.0, 2.0, 90.0, 180.0);

        assert_relative_eq!(graph.world_position(orbit.node()), Vec3::new(-5.0, 0.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_inactive_orbit_stays_put() {
        let mut graph = SceneGraph::new();
        let assets = GameAssets::load(&mut MeshRegistry::new(), &mut SequentialMeshLoader::default()).unwrap();
        let ship = graph.create_node(Node::default());
        let mut orbit = Orbit::spawn(&mut graph, ship, &assets, 5.0, 2.0, 90.0, 0.0);

        graph[orbit.node()].set_active(false);
        orbit.update(&mut graph, 1.0);
        assert_relative_eq!(graph.world_position(orbit.node()), Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-4);
    }
}
