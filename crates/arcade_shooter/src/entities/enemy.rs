//! Enemy boss

use arcade_engine::foundation::math::{utils, Vec3, Vec4, RIGHT};
use arcade_engine::prelude::*;

use crate::assets::{upright, GameAssets};
use crate::attachments::{EscortPlane, Upper};
use crate::config::GameConfig;
use crate::weapons::{Bullet, Cannon};

const ENEMY_TINT: Vec4 = Vec4::new(0.85, 0.15, 0.15, 1.0);

/// Boss that bounces up and down firing radial volleys
///
/// Carries one swinging arm per shoulder, each ending in an escort plane.
#[derive(Debug)]
pub struct Enemy {
    node: NodeId,
    bullets: ObjectPool<Bullet>,
    arms: Vec<Upper>,
    spawn: Vec3,
    scale: f32,
    hearts: u32,
    max_hearts: u32,
    shoot_cooldown: f32,
    shoot_interval: f32,
    move_dir: f32,
    move_speed: f32,
    move_limit: f32,
    move_ceiling: f32,
    bullets_per_volley: u32,
    volley_offset: f32,
    counter: bool,
}

impl Enemy {
    /// Spawn a boss at `spawn` under the scene root
    pub fn spawn(graph: &mut SceneGraph, spawn: Vec3, assets: &GameAssets, game: &GameConfig) -> Self {
        let config = &game.enemy;
        let root = graph.root();
        let appearance = Appearance::new(assets.enemy)
            .with_mesh_transform(upright(5.0))
            .with_tint(ENEMY_TINT);
        let node = graph.create_child(
            root,
            Node::new(spawn, 0.0, RIGHT, Vec3::new(config.scale, config.scale, config.scale))
                .with_name("enemy")
                .with_hitbox_radius(config.hitbox_radius)
                .with_appearance(appearance),
        );

        let bullets = ObjectPool::new(graph, root, config.pool_size, game.world, |graph| {
            Bullet::spawn(graph, assets, &game.bullet)
        });

        let arms = game
            .arm
            .shoulders
            .iter()
            .map(|shoulder| Upper::spawn(graph, node, *shoulder, assets, game))
            .collect();

        log::debug!("Spawned enemy {node:?} at {spawn:?}");

        Self {
            node,
            bullets,
            arms,
            spawn,
            scale: config.scale,
            hearts: config.max_hearts,
            max_hearts: config.max_hearts,
            shoot_cooldown: config.shoot_interval,
            shoot_interval: config.shoot_interval,
            move_dir: -1.0,
            move_speed: config.move_speed,
            move_limit: config.move_limit,
            move_ceiling: config.move_ceiling,
            bullets_per_volley: config.bullets_per_volley,
            volley_offset: config.volley_offset,
            counter: true,
        }
    }

    /// Remaining hits
    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    /// Check if the boss has been destroyed
    pub fn is_destroyed(&self) -> bool {
        self.hearts == 0
    }

    /// Bullets fired by this boss
    pub fn bullets(&self) -> &ObjectPool<Bullet> {
        &self.bullets
    }

    /// Mutable access for collision resolution
    pub fn bullets_mut(&mut self) -> &mut ObjectPool<Bullet> {
        &mut self.bullets
    }

    /// Swinging arms, one per shoulder
    pub fn arms(&self) -> &[Upper] {
        &self.arms
    }

    /// Escort planes at the ends of the arms, attached or fleeing
    pub fn escorts(&self) -> impl Iterator<Item = &EscortPlane> {
        self.arms.iter().map(Upper::escort)
    }

    /// Apply damage, destroying the boss when it runs out of hearts
    pub fn take_damage(&mut self, graph: &mut SceneGraph, damage: u32) {
        if self.is_destroyed() {
            return;
        }
        self.hearts = self.hearts.saturating_sub(damage);
        if self.is_destroyed() {
            self.destroy(graph);
        }
    }

    /// Test every live projectile of `cannons` against this boss
    ///
    /// Each projectile that connects deals its damage and goes back to its
    /// pool. Returns the total damage taken.
    pub fn take_hits(&mut self, graph: &mut SceneGraph, cannons: &mut [Cannon]) -> u32 {
        if self.is_destroyed() || !graph[self.node].is_active() {
            return 0;
        }

        let mut total = 0;
        for cannon in cannons.iter_mut() {
            let attacks = cannon.attacks_mut();
            for slot in attacks.active_slots() {
                let attack = &attacks[slot];
                if graph.check_collision(self.node, attack.node()) {
                    total += attack.damage();
                    attacks.release(graph, slot);
                }
            }
        }

        if total > 0 {
            log::debug!("Enemy {:?} took {total} damage", self.node);
            self.take_damage(graph, total);
        }
        total
    }

    /// Fire one radial volley
    ///
    /// Every other volley is rotated by the configured offset. Stops early
    /// if the bullet pool runs dry.
    pub fn shoot(&mut self, graph: &mut SceneGraph) -> u32 {
        self.counter = !self.counter;
        let origin = graph.world_position(self.node);
        let step = 360.0 / self.bullets_per_volley as f32;
        let offset = if self.counter { self.volley_offset } else { 0.0 };

        let mut fired = 0;
        for i in 0..self.bullets_per_volley {
            let Some(slot) = self.bullets.acquire(graph) else {
                log::trace!("Enemy {:?} bullet pool exhausted", self.node);
                break;
            };
            let angle = utils::deg_to_rad(i as f32 * step + offset);
            let direction = Vec3::new(angle.cos(), angle.sin(), 0.0);
            self.bullets[slot].launch(graph, origin, direction, self.counter);
            fired += 1;
        }
        fired
    }

    fn bounce(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        let node = &mut graph[self.node];
        node.translate_world(Vec3::new(0.0, self.move_dir * self.move_speed * delta_time, 0.0));

        let y = graph.world_position(self.node).y;
        if y > self.move_ceiling {
            graph[self.node].translate_world(Vec3::new(0.0, self.move_ceiling - y, 0.0));
            self.move_dir = -1.0;
        } else if y < self.move_limit {
            graph[self.node].translate_world(Vec3::new(0.0, self.move_limit - y, 0.0));
            self.move_dir = 1.0;
        }
    }

    fn destroy(&mut self, graph: &mut SceneGraph) {
        log::info!("Enemy {:?} destroyed", self.node);

        for arm in &mut self.arms {
            arm.detach_plane(graph);
            arm.deactivate(graph);
        }
        let node = &mut graph[self.node];
        node.set_active(false);
        node.set_visible(false);
        self.bullets.release_all(graph);
    }
}

impl GameObject for Enemy {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        if graph[self.node].is_active() {
            self.bounce(graph, delta_time);

            self.shoot_cooldown -= delta_time;
            if self.shoot_cooldown <= 0.0 {
                self.shoot(graph);
                self.shoot_cooldown = self.shoot_interval;
            }
        }

        self.bullets.update(graph, delta_time);
        for arm in &mut self.arms {
            arm.update(graph, delta_time);
        }
    }

    fn reset(&mut self, graph: &mut SceneGraph) {
        let node = &mut graph[self.node];
        node.init(self.spawn, 0.0, RIGHT, Vec3::new(self.scale, self.scale, self.scale));
        node.set_active(true);
        node.set_visible(true);

        self.bullets.release_all(graph);
        for arm in &mut self.arms {
            arm.reset(graph);
        }

        self.hearts = self.max_hearts;
        self.shoot_cooldown = self.shoot_interval;
        self.move_dir = -1.0;
        self.counter = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use arcade_engine::assets::{MeshRegistry, SequentialMeshLoader};
    use approx::assert_relative_eq;

    fn spawn_enemy(graph: &mut SceneGraph, config: &GameConfig, at: Vec3) -> Enemy {
        let assets = GameAssets::load(&mut MeshRegistry::new(), &mut SequentialMeshLoader::default()).unwrap();
        Enemy::spawn(graph, at, &assets, config)
    }

    #[test]
    fn test_volley_alternates_offset() {
        let mut graph = SceneGraph::new();
        let config = GameConfig::default();
        let mut enemy = spawn_enemy(&mut graph, &config, Vec3::new(0.0, 20.0, 0.0));

        assert_eq!(enemy.shoot(&mut graph), 20);
        let first: Vec<Vec3> = enemy.bullets().iter_active().map(|(_, b)| b.direction()).collect();
        assert!(enemy.bullets().iter_active().all(|(_, b)| !b.counter()));
        assert_relative_eq!(first[0], Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);

        enemy.bullets_mut().release_all(&mut graph);
        assert_eq!(enemy.shoot(&mut graph), 20);
        assert!(enemy.bullets().iter_active().all(|(_, b)| b.counter()));
        let nine = utils::deg_to_rad(9.0);
        let expected = Vec3::new(nine.cos(), nine.sin(), 0.0);
        assert!(enemy
            .bullets()
            .iter_active()
            .any(|(_, b)| (b.direction() - expected).norm() < 1e-5));
    }

    #[test]
    fn test_volley_stops_when_pool_runs_dry() {
        let mut graph = SceneGraph::new();
        let mut config = GameConfig::default();
        config.enemy.pool_size = 30;
        let mut enemy = spawn_enemy(&mut graph, &config, Vec3::new(0.0, 20.0, 0.0));

        assert_eq!(enemy.shoot(&mut graph), 20);
        assert_eq!(enemy.shoot(&mut graph), 10);
        assert_eq!(enemy.shoot(&mut graph), 0);
    }

    #[test]
    fn test_bounces_between_limits() {
        let mut graph = SceneGraph::new();
        let config = GameConfig::default();
        let mut enemy = spawn_enemy(&mut graph, &config, Vec3::new(0.0, -14.0, 0.0));

        // Two units per second downward hits the -15 floor within a second
        enemy.update(&mut graph, 1.0);
        assert_relative_eq!(graph.world_position(enemy.node()).y, -15.0, epsilon = 1e-5);
        enemy.update(&mut graph, 1.0);
        assert_relative_eq!(graph.world_position(enemy.node()).y, -13.0, epsilon = 1e-5);
    }

    #[test]
    fn test_death_detaches_escorts_and_clears_bullets() {
        let mut graph = SceneGraph::new();
        let config = GameConfig::default();
        let mut enemy = spawn_enemy(&mut graph, &config, Vec3::new(0.0, 20.0, 0.0));
        enemy.shoot(&mut graph);

        enemy.take_damage(&mut graph, 3);
        assert_eq!(enemy.hearts(), 7);
        assert!(graph[enemy.node()].is_active());

        enemy.take_damage(&mut graph, 100);
        assert!(enemy.is_destroyed());
        assert!(!graph[enemy.node()].is_active());
        assert_eq!(enemy.bullets().active_count(), 0);
        assert!(enemy.escorts().all(EscortPlane::is_detached));
        assert!(enemy.escorts().all(|e| graph[e.node()].is_active()));
        assert!(enemy.arms().iter().all(|arm| !graph[arm.node()].is_visible()));

        enemy.reset(&mut graph);
        assert_eq!(enemy.hearts(), 10);
        assert!(graph[enemy.node()].is_active());
        assert!(enemy.escorts().all(|e| !e.is_detached()));
        assert!(enemy.arms().iter().all(|arm| graph[arm.lower().hand().node()].is_drawable()));
        assert_eq!(graph.children(enemy.node()).len(), 2);
    }

    #[test]
    fn test_escorts_break_away_mid_swing() {
        let mut graph = SceneGraph::new();
        let config = GameConfig::default();
        let mut enemy = spawn_enemy(&mut graph, &config, Vec3::new(0.0, 20.0, 0.0));

        for _ in 0..40 {
            enemy.update(&mut graph, 1.0 / 60.0);
        }
        assert!(enemy.arms().iter().all(|arm| arm.swing_angle().abs() > 1.0));
        let before: Vec<_> = enemy.escorts().map(|e| graph.world_transform(e.node())).collect();

        enemy.take_damage(&mut graph, 100);
        let after: Vec<_> = enemy.escorts().map(|e| graph.world_transform(e.node())).collect();
        for (a, b) in before.iter().zip(&after) {
            assert_relative_eq!(a, b, epsilon = 1e-4);
        }

        // Dead boss stops bouncing; the escorts fly apart sideways
        let boss_y = graph.world_position(enemy.node()).y;
        enemy.update(&mut graph, 0.1);
        assert_relative_eq!(graph.world_position(enemy.node()).y, boss_y);
        let xs: Vec<f32> = enemy.escorts().map(|e| graph.world_position(e.node()).x).collect();
        assert_relative_eq!(xs[0] - before[0].m14, -5.0, epsilon = 1e-3);
        assert_relative_eq!(xs[1] - before[1].m14, 5.0, epsilon = 1e-3);
    }
}
