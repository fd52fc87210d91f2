//! Boss upper arm, root of an articulated arm chain
//!
//! ```text
//! Enemy ── Upper (shoulder) ── Lower (elbow) ── Hand (wrist) ── EscortPlane
//! ```
//!
//! Each segment swings about its own joint. The rotation a segment applies
//! is handed down the chain every frame so the hand can turn the escort
//! back by the total and keep it level.

use arcade_engine::foundation::math::{Vec3, Vec4};
use arcade_engine::prelude::*;

use super::swing::{Joint, SegmentPose, Swing};
use super::{EscortPlane, EscortSide, Lower};
use crate::assets::GameAssets;
use crate::config::GameConfig;

const UPPER_TINT: Vec4 = Vec4::new(0.15, 0.42, 0.43, 1.0);

/// Upper arm hinged at a shoulder of the boss
#[derive(Debug)]
pub struct Upper {
    joint: Joint,
    lower: Lower,
    side: EscortSide,
}

impl Upper {
    /// Hinge an arm at `shoulder` in the boss's frame
    ///
    /// The side, and so the mirroring of the rest angles and the flight
    /// direction of the escort, follows the sign of the shoulder's X.
    pub fn spawn(
        graph: &mut SceneGraph,
        boss: NodeId,
        shoulder: Vec3,
        assets: &GameAssets,
        config: &GameConfig,
    ) -> Self {
        let side = EscortSide::of(&shoulder);
        let pose = SegmentPose {
            joint: shoulder,
            length: config.arm.upper_length,
            angle: config.arm.upper_angle * side.mirror(),
        };
        let joint = Joint::spawn(
            graph,
            boss,
            "upper_arm",
            Appearance::new(assets.upper_arm).with_tint(UPPER_TINT),
            pose,
            Swing::from_config(&config.arm.upper_swing, side),
        );
        let lower = Lower::spawn(graph, joint.node(), joint.tip(), side, assets, config);

        Self { joint, lower, side }
    }

    /// Which flank the arm is on
    pub fn side(&self) -> EscortSide {
        self.side
    }

    /// Current shoulder swing in degrees
    pub fn swing_angle(&self) -> f32 {
        self.joint.swing().angle()
    }

    /// Forearm below this segment
    pub fn lower(&self) -> &Lower {
        &self.lower
    }

    /// Plane at the end of the chain
    pub fn escort(&self) -> &EscortPlane {
        self.lower.escort()
    }

    /// Release the plane into the world, keeping its pose
    pub fn detach_plane(&mut self, graph: &mut SceneGraph) {
        self.lower.detach_plane(graph);
    }

    /// Hide the whole arm; a released plane keeps flying
    pub fn deactivate(&mut self, graph: &mut SceneGraph) {
        self.joint.deactivate(graph);
        self.lower.deactivate(graph);
    }
}

impl GameObject for Upper {
    fn node(&self) -> NodeId {
        self.joint.node()
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        if self.joint.is_active(graph) {
            let carried = self.joint.advance(graph, delta_time);
            self.lower.add_parent_rotation_delta(carried);
        }
        self.lower.update(graph, delta_time);
    }

    fn reset(&mut self, graph: &mut SceneGraph) {
        self.joint.reset(graph);
        self.lower.reset(graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::assets::{MeshRegistry, SequentialMeshLoader};
    use arcade_engine::foundation::math::{Mat4, RIGHT};
    use approx::assert_relative_eq;

    const STEP: f32 = 1.0 / 60.0;

    fn setup(shoulder: Vec3) -> (SceneGraph, NodeId, Upper) {
        let mut graph = SceneGraph::new();
        let config = GameConfig::default();
        let assets = GameAssets::load(&mut MeshRegistry::new(), &mut SequentialMeshLoader::default()).unwrap();
        let root = graph.root();
        let boss = graph.create_child(root, Node::new(Vec3::new(0.0, 20.0, 0.0), 0.0, RIGHT, Vec3::new(2.0, 2.0, 2.0)));
        let arm = Upper::spawn(&mut graph, boss, shoulder, &assets, &config);
        (graph, boss, arm)
    }

    fn point(m: &Mat4, p: Vec3) -> Vec3 {
        (m * Vec4::new(p.x, p.y, p.z, 1.0)).xyz()
    }

    #[test]
    fn test_chain_hangs_off_the_shoulder() {
        let (graph, boss, arm) = setup(Vec3::new(-2.0, 0.0, 0.0));
        let lower = arm.lower().node();
        let hand = arm.lower().hand().node();
        let escort = arm.escort().node();

        assert_eq!(arm.side(), EscortSide::Left);
        assert_eq!(graph.parent(arm.node()), Some(boss));
        assert_eq!(graph.parent(lower), Some(arm.node()));
        assert_eq!(graph.parent(hand), Some(lower));
        assert_eq!(graph.parent(escort), Some(hand));

        // Left upper arm points along -X: elbow 3.5 units out, doubled by the boss scale
        let elbow = point(&graph.world_transform(lower), graph[lower].pivot());
        assert_relative_eq!(elbow, Vec3::new(-11.0, 20.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_joints_stay_connected_while_swinging() {
        let (mut graph, _, mut arm) = setup(Vec3::new(2.0, 0.0, 0.0));
        let lower = arm.lower().node();
        let upper_tip = Vec3::new(0.0, GameConfig::default().arm.upper_length / 2.0, 0.0);

        for _ in 0..45 {
            arm.update(&mut graph, STEP);
        }
        assert!(arm.swing_angle().abs() > 1.0);
        assert!(arm.lower().swing_angle().abs() > 1.0);

        let elbow_from_upper = point(&graph.world_transform(arm.node()), upper_tip);
        let elbow_from_lower = point(&graph.world_transform(lower), graph[lower].pivot());
        assert_relative_eq!(elbow_from_upper, elbow_from_lower, epsilon = 1e-4);
    }

    #[test]
    fn test_escort_keeps_heading_while_arm_swings() {
        let (mut graph, _, mut arm) = setup(Vec3::new(-2.0, 0.0, 0.0));
        let escort = arm.escort().node();
        let start = graph.world_rotation(escort);
        let start_position = graph.world_position(escort);

        for _ in 0..90 {
            arm.update(&mut graph, STEP);
        }
        assert!(arm.lower().hand().swing_angle().abs() > 1.0);
        assert!(graph.world_rotation(escort).angle_to(&start) < 1e-3);
        assert!((graph.world_position(escort) - start_position).norm() > 0.1);
    }

    #[test]
    fn test_detached_escort_keeps_pose_mid_swing() {
        let (mut graph, _, mut arm) = setup(Vec3::new(2.0, 0.0, 0.0));
        for _ in 0..30 {
            arm.update(&mut graph, STEP);
        }
        let escort = arm.escort().node();
        let before = graph.world_transform(escort);

        arm.detach_plane(&mut graph);
        arm.deactivate(&mut graph);
        assert_eq!(graph.parent(escort), Some(graph.root()));
        assert_relative_eq!(graph.world_transform(escort), before, epsilon = 1e-4);

        // The arm is parked; the plane flies right on its own
        assert!(!graph[arm.node()].is_active());
        assert!(!graph[arm.lower().hand().node()].is_visible());
        assert!(graph[escort].is_active());
        arm.update(&mut graph, 0.1);
        let moved = graph.world_position(escort) - point(&before, Vec3::zeros());
        assert_relative_eq!(moved, Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-3);
    }

    #[test]
    fn test_deactivate_and_reset_cascade() {
        let (mut graph, boss, mut arm) = setup(Vec3::new(-2.0, 0.0, 0.0));
        let rest = graph.world_transform(arm.escort().node());
        for _ in 0..20 {
            arm.update(&mut graph, STEP);
        }

        arm.deactivate(&mut graph);
        for node in [arm.node(), arm.lower().node(), arm.lower().hand().node(), arm.escort().node()] {
            assert!(!graph[node].is_active());
            assert!(!graph[node].is_visible());
        }

        arm.reset(&mut graph);
        assert_relative_eq!(arm.swing_angle(), 0.0);
        assert!(graph[arm.escort().node()].is_drawable());
        assert_eq!(graph.children(boss), &[arm.node()]);
        assert_relative_eq!(graph.world_transform(arm.escort().node()), rest, epsilon = 1e-4);
    }
}
