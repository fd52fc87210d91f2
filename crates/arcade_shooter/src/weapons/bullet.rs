//! Enemy bullet

use arcade_engine::foundation::math::{Vec3, Vec4, RIGHT};
use arcade_engine::prelude::*;

use crate::assets::{upright, GameAssets};
use crate::config::BulletConfig;

/// Tint of bullets fired on an offset volley
pub const OFFSET_TINT: Vec4 = Vec4::new(0.0, 0.68, 1.0, 1.0);

/// Tint of bullets fired on a straight volley
pub const STRAIGHT_TINT: Vec4 = Vec4::new(1.0, 0.32, 0.0, 1.0);

/// Round bullet travelling in a straight line
#[derive(Debug)]
pub struct Bullet {
    node: NodeId,
    speed: f32,
    direction: Vec3,
    counter: bool,
}

impl Bullet {
    /// Build a parked bullet node
    pub fn spawn(graph: &mut SceneGraph, assets: &GameAssets, config: &BulletConfig) -> Self {
        let appearance = Appearance::new(assets.bullet)
            .with_mesh_transform(upright(1.2))
            .with_tint(STRAIGHT_TINT);
        let node = graph.create_node(
            Node::default()
                .with_name("bullet")
                .with_hitbox_radius(config.hitbox_radius())
                .with_appearance(appearance)
                .parked(),
        );

        Self {
            node,
            speed: config.speed,
            direction: Vec3::zeros(),
            counter: false,
        }
    }

    /// Place the bullet at `position` and send it along `direction`
    ///
    /// `counter` marks which of the alternating volleys the bullet belongs to.
    pub fn launch(&mut self, graph: &mut SceneGraph, position: Vec3, direction: Vec3, counter: bool) {
        let node = &mut graph[self.node];
        node.init(position, 0.0, RIGHT, Vec3::new(1.0, 1.0, 1.0));
        if let Some(appearance) = node.appearance_mut() {
            appearance.tint = if counter { OFFSET_TINT } else { STRAIGHT_TINT };
        }

        self.direction = direction;
        self.counter = counter;
    }

    /// Unit travel direction
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Volley flag
    pub fn counter(&self) -> bool {
        self.counter
    }
}

impl GameObject for Bullet {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        graph[self.node].translate(self.direction * self.speed * delta_time);
    }
}
