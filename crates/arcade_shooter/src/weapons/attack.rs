//! Player projectile

use arcade_engine::foundation::math::{Mat4Ext, Vec3};
use arcade_engine::prelude::*;

use crate::assets::GameAssets;
use crate::config::CannonConfig;

/// Missile fired by a [`Cannon`](super::Cannon)
///
/// Travels at a fixed velocity in its own frame, so it flies wherever the
/// cannon was pointing when it fired.
#[derive(Debug)]
pub struct Attack {
    node: NodeId,
    velocity: Vec3,
    damage: u32,
}

impl Attack {
    /// Build a parked projectile node
    pub fn spawn(graph: &mut SceneGraph, assets: &GameAssets, config: &CannonConfig) -> Self {
        let appearance = Appearance::new(assets.attack)
            .with_mesh_transform(Mat4::scaling(&Vec3::new(0.3, 0.3, 0.3)));
        let node = graph.create_node(
            Node::default()
                .with_name("attack")
                .with_hitbox_radius(config.projectile_hitbox_radius)
                .with_appearance(appearance)
                .parked(),
        );

        Self {
            node,
            velocity: config.projectile_velocity,
            damage: config.projectile_damage,
        }
    }

    /// Damage dealt on hit
    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// Velocity in the projectile's own frame
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

impl GameObject for Attack {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        graph[self.node].translate(self.velocity * delta_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::assets::{MeshRegistry, SequentialMeshLoader};
    use approx::assert_relative_eq;

    #[test]
    fn test_attack_moves_in_its_own_frame() {
        let mut graph = SceneGraph::new();
        let assets = GameAssets::load(&mut MeshRegistry::new(), &mut SequentialMeshLoader::default()).unwrap();
        let mut attack = Attack::spawn(&mut graph, &assets, &CannonConfig::default());

        // Facing left: local +Y is world -X
        graph[attack.node()].init(Vec3::zeros(), 90.0, FORWARD, Vec3::new(1.0, 1.0, 1.0));
        attack.update(&mut graph, 0.25);

        assert_relative_eq!(graph.world_position(attack.node()), Vec3::new(-20.0, 0.0, 0.0), epsilon = 1e-4);
        assert_eq!(attack.damage(), 1);
    }
}
