//! Boss lower arm

use arcade_engine::foundation::math::Vec3;
use arcade_engine::prelude::*;

use super::hand::LIMB_TINT;
use super::swing::{Joint, SegmentPose, Swing};
use super::{EscortPlane, EscortSide, Hand};
use crate::assets::GameAssets;
use crate::config::GameConfig;

/// Forearm hinged at the elbow, holding the hand
#[derive(Debug)]
pub struct Lower {
    joint: Joint,
    hand: Hand,
}

impl Lower {
    /// Hinge a lower arm at `elbow` in `parent`'s frame
    pub fn spawn(
        graph: &mut SceneGraph,
        parent: NodeId,
        elbow: Vec3,
        side: EscortSide,
        assets: &GameAssets,
        config: &GameConfig,
    ) -> Self {
        let pose = SegmentPose {
            joint: elbow,
            length: config.arm.lower_length,
            angle: config.arm.lower_angle * side.mirror(),
        };
        let joint = Joint::spawn(
            graph,
            parent,
            "lower_arm",
            Appearance::new(assets.lower_arm).with_tint(LIMB_TINT),
            pose,
            Swing::from_config(&config.arm.lower_swing, side),
        );
        let hand = Hand::spawn(graph, joint.node(), joint.tip(), side, assets, config);

        Self { joint, hand }
    }

    /// Rotation the upper arm applied this frame, in degrees
    pub fn add_parent_rotation_delta(&mut self, degrees: f32) {
        self.joint.add_parent_rotation(degrees);
    }

    /// Current elbow swing in degrees
    pub fn swing_angle(&self) -> f32 {
        self.joint.swing().angle()
    }

    /// Hand at the end of this segment
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Plane at the end of the chain
    pub fn escort(&self) -> &EscortPlane {
        self.hand.escort()
    }

    /// Release the plane into the world
    pub fn detach_plane(&mut self, graph: &mut SceneGraph) {
        self.hand.detach_plane(graph);
    }

    /// Hide this segment and everything below it
    pub fn deactivate(&mut self, graph: &mut SceneGraph) {
        self.joint.deactivate(graph);
        self.hand.deactivate(graph);
    }
}

impl GameObject for Lower {
    fn node(&self) -> NodeId {
        self.joint.node()
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        if self.joint.is_active(graph) {
            let carried = self.joint.advance(graph, delta_time);
            self.hand.add_parent_rotation_delta(carried);
        }
        self.hand.update(graph, delta_time);
    }

    fn reset(&mut self, graph: &mut SceneGraph) {
        self.joint.reset(graph);
        self.hand.reset(graph);
    }
}
