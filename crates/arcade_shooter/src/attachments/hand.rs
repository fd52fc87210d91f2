//! Boss hand, the last arm segment, carrying an escort plane

use arcade_engine::foundation::math::{Vec3, Vec4};
use arcade_engine::prelude::*;

use super::swing::{Joint, SegmentPose, Swing};
use super::{EscortPlane, EscortSide};
use crate::assets::GameAssets;
use crate::config::GameConfig;

pub(super) const LIMB_TINT: Vec4 = Vec4::new(0.9, 0.9, 0.9, 1.0);

/// Hand hinged at the wrist
///
/// Whatever the arm above swings, the hand turns its escort back by the same
/// amount so the plane keeps the boss's heading.
#[derive(Debug)]
pub struct Hand {
    joint: Joint,
    escort: EscortPlane,
}

impl Hand {
    /// Hinge a hand at `wrist` in `parent`'s frame
    pub fn spawn(
        graph: &mut SceneGraph,
        parent: NodeId,
        wrist: Vec3,
        side: EscortSide,
        assets: &GameAssets,
        config: &GameConfig,
    ) -> Self {
        let pose = SegmentPose {
            joint: wrist,
            length: config.arm.hand_length,
            angle: 0.0,
        };
        let joint = Joint::spawn(
            graph,
            parent,
            "hand",
            Appearance::new(assets.hand).with_tint(LIMB_TINT),
            pose,
            Swing::from_config(&config.arm.hand_swing, side),
        );
        let escort = EscortPlane::spawn(
            graph,
            joint.node(),
            joint.tip(),
            side,
            config.escort.scale,
            assets,
            config.escort.travel_speed,
            config.world,
        );

        Self { joint, escort }
    }

    /// Rotation the lower arm and shoulder applied this frame, in degrees
    pub fn add_parent_rotation_delta(&mut self, degrees: f32) {
        self.joint.add_parent_rotation(degrees);
    }

    /// Current wrist swing in degrees
    pub fn swing_angle(&self) -> f32 {
        self.joint.swing().angle()
    }

    /// Plane mounted on the hand
    pub fn escort(&self) -> &EscortPlane {
        &self.escort
    }

    /// Release the plane into the world
    pub fn detach_plane(&mut self, graph: &mut SceneGraph) {
        self.escort.detach_to_world(graph);
    }

    /// Hide the hand and its plane, unless the plane already left
    pub fn deactivate(&mut self, graph: &mut SceneGraph) {
        self.joint.deactivate(graph);
        self.escort.deactivate(graph);
    }
}

impl GameObject for Hand {
    fn node(&self) -> NodeId {
        self.joint.node()
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        if self.joint.is_active(graph) {
            let carried = self.joint.advance(graph, delta_time);
            self.escort.apply_parent_rotation_correction(graph, carried);
        }
        self.escort.update(graph, delta_time);
    }

    fn reset(&mut self, graph: &mut SceneGraph) {
        self.joint.reset(graph);
        self.escort.reset(graph);
    }
}
