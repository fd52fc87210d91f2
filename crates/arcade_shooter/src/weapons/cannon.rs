//! Player cannon

use arcade_engine::config::WorldBounds;
use arcade_engine::foundation::math::{Mat4Ext, Vec3, UP};
use arcade_engine::prelude::*;

use super::Attack;
use crate::assets::GameAssets;
use crate::config::CannonConfig;

/// Barrel mounted on the player that owns a pool of [`Attack`] projectiles
#[derive(Debug)]
pub struct Cannon {
    node: NodeId,
    attacks: ObjectPool<Attack>,
    cooldown: f32,
    interval: f32,
}

impl Cannon {
    /// Mount a cannon at `offset` in `parent`'s frame
    ///
    /// The projectile pool hangs off the scene root so projectiles fly free
    /// of the ship once fired.
    pub fn spawn(
        graph: &mut SceneGraph,
        parent: NodeId,
        offset: Vec3,
        assets: &GameAssets,
        config: &CannonConfig,
        bounds: WorldBounds,
    ) -> Self {
        let node = graph.create_child(
            parent,
            Node::default()
                .with_name("cannon")
                .with_pivot(config.pivot)
                .with_pose(offset, 0.0, UP, Vec3::new(1.0, 1.0, 1.0))
                .with_appearance(Appearance::new(assets.cannon)),
        );

        let root = graph.root();
        let attacks = ObjectPool::new(graph, root, config.pool_size, bounds, |graph| {
            Attack::spawn(graph, assets, config)
        });

        Self {
            node,
            attacks,
            cooldown: 0.0,
            interval: config.shoot_interval,
        }
    }

    /// Fire one projectile if the cooldown has elapsed and the pool has room
    ///
    /// The projectile starts at the cannon's world position, facing the way
    /// the cannon faces. Returns whether a projectile was fired.
    pub fn shoot(&mut self, graph: &mut SceneGraph) -> bool {
        if self.cooldown > 0.0 {
            return false;
        }
        let Some(slot) = self.attacks.acquire(graph) else {
            log::trace!("Cannon {:?} has no projectile available", self.node);
            return false;
        };

        let world = graph.world_transform(self.node);
        let (axis, angle) = world
            .rotation()
            .axis_angle()
            .map_or((UP, 0.0), |(axis, angle)| (axis.into_inner(), angle.to_degrees()));

        let projectile = self.attacks[slot].node();
        graph[projectile].init(world.position(), angle, axis, Vec3::new(1.0, 1.0, 1.0));

        self.cooldown = self.interval;
        true
    }

    /// Seconds until the next shot is allowed
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Projectiles fired by this cannon
    pub fn attacks(&self) -> &ObjectPool<Attack> {
        &self.attacks
    }

    /// Mutable access for collision resolution
    pub fn attacks_mut(&mut self) -> &mut ObjectPool<Attack> {
        &mut self.attacks
    }
}

impl GameObject for Cannon {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        // Projectiles already in flight keep flying after the ship is gone
        self.attacks.update(graph, delta_time);

        if graph.get(self.node).is_some_and(Node::is_active) {
            self.cooldown -= delta_time;
        }
    }

    fn reset(&mut self, graph: &mut SceneGraph) {
        self.attacks.release_all(graph);
        self.cooldown = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::assets::{MeshRegistry, SequentialMeshLoader};
    use arcade_engine::render::RecordingRenderer;
    use approx::assert_relative_eq;

    fn setup(config: &CannonConfig) -> (SceneGraph, NodeId, Cannon) {
        let mut graph = SceneGraph::new();
        let assets = GameAssets::load(&mut MeshRegistry::new(), &mut SequentialMeshLoader::default()).unwrap();
        let root = graph.root();
        let ship = graph.create_child(root, Node::new(Vec3::new(0.0, -10.0, 0.0), 0.0, UP, Vec3::new(2.0, 2.0, 2.0)));
        let cannon = Cannon::spawn(&mut graph, ship, Vec3::new(0.8, 0.2, 0.0), &assets, config, WorldBounds::default());
        (graph, ship, cannon)
    }

    #[test]
    fn test_projectile_starts_at_cannon_world_position() {
        let (mut graph, _, mut cannon) = setup(&CannonConfig::default());

        assert!(cannon.shoot(&mut graph));
        let (_, attack) = cannon.attacks().iter_active().next().unwrap();
        assert_relative_eq!(graph.world_position(attack.node()), Vec3::new(1.6, -9.6, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_cooldown_gates_fire_rate() {
        let (mut graph, _, mut cannon) = setup(&CannonConfig::default());

        assert!(cannon.shoot(&mut graph));
        assert!(!cannon.shoot(&mut graph));

        for _ in 0..13 {
            cannon.update(&mut graph, 1.0 / 60.0);
        }
        assert!(cannon.shoot(&mut graph));
        assert_eq!(cannon.attacks().active_count(), 2);
    }

    #[test]
    fn test_projectile_follows_cannon_heading() {
        let (mut graph, ship, mut cannon) = setup(&CannonConfig::default());
        graph[ship].rotate_local(-90.0, FORWARD);

        assert!(cannon.shoot(&mut graph));
        let start = graph.world_position(cannon.attacks().iter_active().next().unwrap().1.node());
        cannon.update(&mut graph, 0.125);
        let (_, attack) = cannon.attacks().iter_active().next().unwrap();

        // Ship turned clockwise: projectiles fly toward +X
        assert_relative_eq!(graph.world_position(attack.node()) - start, Vec3::new(10.0, 0.0, 0.0), epsilon = 1e-3);
    }

    #[test]
    fn test_exhausted_pool_skips_the_shot() {
        let config = CannonConfig {
            pool_size: 1,
            shoot_interval: 0.0,
            ..CannonConfig::default()
        };
        let (mut graph, _, mut cannon) = setup(&config);

        assert!(cannon.shoot(&mut graph));
        assert!(!cannon.shoot(&mut graph));
        assert_eq!(cannon.attacks().active_count(), 1);

        cannon.reset(&mut graph);
        assert_eq!(cannon.attacks().active_count(), 0);
    }

    #[test]
    fn test_scene_pass_draws_each_projectile_once() {
        let (mut graph, _, mut cannon) = setup(&CannonConfig::default());
        let assets = GameAssets::load(&mut MeshRegistry::new(), &mut SequentialMeshLoader::default()).unwrap();
        assert!(cannon.shoot(&mut graph));

        // Projectiles live under the root, outside the cannon's own subtree
        let mut renderer = RecordingRenderer::new();
        cannon.draw(&graph, &mut renderer);
        assert_eq!(renderer.count_mesh(assets.cannon), 1);
        assert_eq!(renderer.count_mesh(assets.attack), 0);

        renderer.clear();
        graph.draw(graph.root(), &mut renderer);
        assert_eq!(renderer.count_mesh(assets.cannon), 1);
        assert_eq!(renderer.count_mesh(assets.attack), 1);
    }
}
