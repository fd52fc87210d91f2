//! Swinging joints shared by the boss arm segments

use arcade_engine::foundation::math::{Vec3, FORWARD};
use arcade_engine::prelude::*;

use crate::config::SwingConfig;

/// Sinusoidal joint angle driven by elapsed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swing {
    amplitude: f32,
    frequency: f32,
    phase: f32,
    time: f32,
    current: f32,
}

impl Swing {
    /// Swing of `amplitude` degrees at `frequency` rad/s starting at `phase` rad
    pub fn new(amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            time: 0.0,
            current: 0.0,
        }
    }

    /// Swing for one side from its config
    pub fn from_config(config: &SwingConfig, side: super::EscortSide) -> Self {
        Self::new(config.amplitude, config.frequency, config.phase(side))
    }

    /// Advance by `delta_time` and return the change in angle, in degrees
    pub fn advance(&mut self, delta_time: f32) -> f32 {
        self.time += delta_time;
        let target = (self.time * self.frequency + self.phase).sin() * self.amplitude;
        let delta = target - self.current;
        self.current = target;
        delta
    }

    /// Angle applied so far, in degrees
    pub fn angle(&self) -> f32 {
        self.current
    }

    /// Rewind to time zero with no angle applied
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.current = 0.0;
    }
}

/// Pose of one arm segment in its parent's frame
#[derive(Debug, Clone, Copy)]
pub(super) struct SegmentPose {
    /// Joint position in the parent's frame
    pub joint: Vec3,
    /// Joint to tip
    pub length: f32,
    /// Rest angle about the joint, in degrees
    pub angle: f32,
}

/// Arm segment node hinged at its joint
///
/// The node origin sits at the middle of the segment and the pivot at the
/// joint, so every swing rotates the segment about the joint.
#[derive(Debug)]
pub(super) struct Joint {
    node: NodeId,
    pose: SegmentPose,
    swing: Swing,
    inherited: f32,
}

impl Joint {
    pub(super) fn spawn(
        graph: &mut SceneGraph,
        parent: NodeId,
        name: &str,
        appearance: Appearance,
        pose: SegmentPose,
        swing: Swing,
    ) -> Self {
        let pivot = Vec3::new(0.0, -pose.length / 2.0, 0.0);
        let node = graph.create_child(
            parent,
            Node::default().with_name(name).with_pivot(pivot).with_appearance(appearance),
        );
        let joint = Self {
            node,
            pose,
            swing,
            inherited: 0.0,
        };
        joint.place(graph);
        joint
    }

    fn place(&self, graph: &mut SceneGraph) {
        let node = &mut graph[self.node];
        let center = self.pose.joint - node.pivot();
        node.init(center, self.pose.angle, FORWARD, Vec3::new(1.0, 1.0, 1.0));
    }

    pub(super) fn node(&self) -> NodeId {
        self.node
    }

    /// Mount point for the next segment, in this segment's frame
    pub(super) fn tip(&self) -> Vec3 {
        Vec3::new(0.0, self.pose.length / 2.0, 0.0)
    }

    pub(super) fn swing(&self) -> &Swing {
        &self.swing
    }

    /// Queue rotation applied by the segments above this one this frame
    pub(super) fn add_parent_rotation(&mut self, degrees: f32) {
        self.inherited += degrees;
    }

    /// Swing about the joint
    ///
    /// Returns the total rotation the segment below now carries: everything
    /// queued from above plus this joint's own swing.
    pub(super) fn advance(&mut self, graph: &mut SceneGraph, delta_time: f32) -> f32 {
        let inherited = std::mem::take(&mut self.inherited);
        let delta = self.swing.advance(delta_time);
        graph[self.node].rotate_local(delta, FORWARD);
        inherited + delta
    }

    pub(super) fn is_active(&self, graph: &SceneGraph) -> bool {
        graph[self.node].is_active()
    }

    pub(super) fn deactivate(&self, graph: &mut SceneGraph) {
        let node = &mut graph[self.node];
        node.set_active(false);
        node.set_visible(false);
    }

    pub(super) fn reset(&mut self, graph: &mut SceneGraph) {
        self.place(graph);
        let node = &mut graph[self.node];
        node.set_active(true);
        node.set_visible(true);
        self.swing.reset();
        self.inherited = 0.0;
    }
}
