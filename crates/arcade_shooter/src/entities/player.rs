//! Player ship

use arcade_engine::config::WorldBounds;
use arcade_engine::foundation::math::{Mat4Ext, Vec3, DOWN, LEFT, RIGHT, UP};
use arcade_engine::prelude::*;

use super::Enemy;
use crate::assets::{upright, GameAssets};
use crate::attachments::Orbit;
use crate::config::{CannonConfig, PlayerConfig};
use crate::input::InputState;
use crate::weapons::Cannon;

/// Tint alpha while invulnerable after a hit
const RECOVERY_ALPHA: f32 = 0.2;

/// Banking angle applied to the model while moving, in degrees
const BANK_ANGLE: f32 = 20.0;

/// Ship steered by the player, with two cannons and one orbit per heart
#[derive(Debug)]
pub struct Player {
    node: NodeId,
    cannons: Vec<Cannon>,
    orbits: Vec<Orbit>,
    spawn: Vec3,
    scale: f32,
    direction: Vec3,
    speed: f32,
    shooting: bool,
    recovering: bool,
    recovery_timer: f32,
    recovery_time: f32,
    hearts: u32,
    max_hearts: u32,
    bounds: WorldBounds,
}

impl Player {
    /// Spawn the ship under the scene root
    pub fn spawn(
        graph: &mut SceneGraph,
        assets: &GameAssets,
        config: &PlayerConfig,
        cannon: &CannonConfig,
        bounds: WorldBounds,
    ) -> Self {
        let root = graph.root();
        let node = graph.create_child(
            root,
            Node::new(config.spawn, 0.0, UP, Vec3::new(config.scale, config.scale, config.scale))
                .with_name("player")
                .with_hitbox_radius(config.hitbox_radius)
                .with_appearance(Appearance::new(assets.player).with_mesh_transform(upright(0.3))),
        );

        let cannons = config
            .cannon_offsets
            .iter()
            .map(|offset| Cannon::spawn(graph, node, *offset, assets, cannon, bounds))
            .collect();

        let orbits = (0..config.max_hearts)
            .map(|i| {
                let phase = 360.0 / config.max_hearts as f32 * i as f32;
                Orbit::spawn(graph, node, assets, config.orbit_distance, config.orbit_scale, config.orbit_speed, phase)
            })
            .collect();

        Self {
            node,
            cannons,
            orbits,
            spawn: config.spawn,
            scale: config.scale,
            direction: Vec3::zeros(),
            speed: config.speed,
            shooting: false,
            recovering: false,
            recovery_timer: 0.0,
            recovery_time: config.recovery_time,
            hearts: config.max_hearts,
            max_hearts: config.max_hearts,
            bounds,
        }
    }

    /// Take direction and fire button from the frame's input
    pub fn apply_input(&mut self, input: &InputState) {
        self.set_direction(input.direction());
        self.set_shooting(input.is_shooting());
    }

    /// Set the movement direction (zero to stand still)
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    /// Set whether the cannons should fire
    pub fn set_shooting(&mut self, shooting: bool) {
        self.shooting = shooting;
    }

    /// Current movement direction
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Remaining hearts
    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    /// Check if the player is in the post-hit invulnerability window
    pub fn is_recovering(&self) -> bool {
        self.recovering
    }

    /// Check if the ship is still in play
    pub fn is_alive(&self) -> bool {
        self.hearts > 0
    }

    /// Cannons mounted on the ship
    pub fn cannons(&self) -> &[Cannon] {
        &self.cannons
    }

    /// Mutable cannons, for enemies resolving hits against their projectiles
    pub fn cannons_mut(&mut self) -> &mut [Cannon] {
        &mut self.cannons
    }

    /// Heart satellites, one per starting heart
    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// Test every live enemy bullet against the ship
    ///
    /// The first bullet that connects costs a heart, hides one orbit, goes
    /// back to its pool and starts the recovery window. Nothing is tested
    /// while recovering. Returns whether the ship was hit.
    pub fn take_hits(&mut self, graph: &mut SceneGraph, enemies: &mut [Enemy]) -> bool {
        if self.recovering || !self.is_alive() || !graph[self.node].is_active() {
            return false;
        }

        for enemy in enemies.iter_mut() {
            let bullets = enemy.bullets_mut();
            let hit = bullets
                .iter_active()
                .find(|(_, bullet)| graph.check_collision(self.node, bullet.node()))
                .map(|(slot, _)| slot);

            if let Some(slot) = hit {
                bullets.release(graph, slot);
                self.lose_heart(graph);
                return true;
            }
        }
        false
    }

    fn lose_heart(&mut self, graph: &mut SceneGraph) {
        self.hearts = self.hearts.saturating_sub(1);
        log::info!("Player hit, {} heart(s) left", self.hearts);

        if let Some(orbit) = self.orbits.get(self.hearts as usize) {
            graph.set_active_recursive(orbit.node(), false);
            graph.set_visible_recursive(orbit.node(), false);
        }

        self.recovering = true;
        self.recovery_timer = self.recovery_time;
        self.set_alpha(graph, RECOVERY_ALPHA);

        if !self.is_alive() {
            log::info!("Player destroyed");
            graph.set_active_recursive(self.node, false);
            graph.set_visible_recursive(self.node, false);
        }
    }

    fn set_alpha(&self, graph: &mut SceneGraph, alpha: f32) {
        if let Some(appearance) = graph[self.node].appearance_mut() {
            appearance.tint.w = alpha;
        }
    }

    /// Bank the model toward the direction of travel
    fn bank(&self, graph: &mut SceneGraph) {
        let tilt = if self.direction == UP {
            Mat4::rotation_deg(-BANK_ANGLE, &RIGHT)
        } else if self.direction == DOWN {
            Mat4::rotation_deg(BANK_ANGLE, &RIGHT)
        } else if self.direction == RIGHT {
            Mat4::rotation_deg(BANK_ANGLE, &UP)
        } else if self.direction == LEFT {
            Mat4::rotation_deg(-BANK_ANGLE, &UP)
        } else {
            Mat4::identity()
        };

        if let Some(appearance) = graph[self.node].appearance_mut() {
            appearance.mesh_transform = tilt * upright(0.3);
        }
    }

    fn steer(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        let factor = if self.shooting || self.recovering { 0.5 } else { 1.0 };
        let step = self.direction * self.speed * delta_time * factor;

        graph[self.node].translate_world(step);
        if self.bounds.is_outside(&graph.world_position(self.node)) {
            graph[self.node].translate_world(-step);
        }
    }
}

impl GameObject for Player {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        if graph[self.node].is_active() {
            self.steer(graph, delta_time);
            self.bank(graph);

            if self.shooting && !self.recovering {
                for cannon in &mut self.cannons {
                    cannon.shoot(graph);
                }
            }

            if self.recovering {
                self.recovery_timer -= delta_time;
                if self.recovery_timer <= 0.0 {
                    self.recovering = false;
                    self.set_alpha(graph, 1.0);
                }
            }

            for orbit in &mut self.orbits {
                orbit.update(graph, delta_time);
            }
        }

        for cannon in &mut self.cannons {
            cannon.update(graph, delta_time);
        }
    }

    fn reset(&mut self, graph: &mut SceneGraph) {
        graph[self.node].init(self.spawn, 0.0, UP, Vec3::new(self.scale, self.scale, self.scale));
        graph.set_active_recursive(self.node, true);
        graph.set_visible_recursive(self.node, true);

        for cannon in &mut self.cannons {
            cannon.reset(graph);
        }
        for orbit in &mut self.orbits {
            orbit.reset(graph);
        }

        self.direction = Vec3::zeros();
        self.shooting = false;
        self.recovering = false;
        self.recovery_timer = 0.0;
        self.hearts = self.max_hearts;
        self.set_alpha(graph, 1.0);
        self.bank(graph);
    }
}
