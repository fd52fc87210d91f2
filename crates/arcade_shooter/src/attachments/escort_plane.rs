//! Escort planes flanking an enemy boss

use arcade_engine::config::WorldBounds;
use arcade_engine::foundation::math::{Mat4Ext, Vec3, FORWARD, LEFT, RIGHT, UP};
use arcade_engine::prelude::*;

use crate::assets::GameAssets;

/// Which flank an escort guards, and so which way it flees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscortSide {
    /// Left flank, flees toward -X
    Left,
    /// Right flank, flees toward +X
    Right,
}

impl EscortSide {
    /// Side for a mount point: negative X is the left flank
    pub fn of(offset: &Vec3) -> Self {
        if offset.x < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Sign applied to rest angles so the right arm mirrors the left
    pub fn mirror(self) -> f32 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// World direction of travel once released
    pub fn travel_direction(self) -> Vec3 {
        match self {
            Self::Left => LEFT,
            Self::Right => RIGHT,
        }
    }
}

/// Plane carried on a boss's hand
///
/// While the boss lives it is a plain child node. When the boss dies it is
/// detached into the scene root without moving, flies sideways and parks
/// itself once it leaves the play volume.
#[derive(Debug)]
pub struct EscortPlane {
    node: NodeId,
    home: NodeId,
    offset: Vec3,
    scale: f32,
    side: EscortSide,
    travel_speed: f32,
    bounds: WorldBounds,
    detached: bool,
}

impl EscortPlane {
    /// Attach an escort to `home` at `offset`
    pub fn spawn(
        graph: &mut SceneGraph,
        home: NodeId,
        offset: Vec3,
        side: EscortSide,
        scale: f32,
        assets: &GameAssets,
        travel_speed: f32,
        bounds: WorldBounds,
    ) -> Self {
        let appearance = Appearance::new(assets.escort).with_mesh_transform(model_fixup(side));
        let node = graph.create_child(home, Node::default().with_name("escort_plane").with_appearance(appearance));

        let escort = Self {
            node,
            home,
            offset,
            scale,
            side,
            travel_speed,
            bounds,
            detached: false,
        };
        escort.place(graph);
        escort
    }

    fn place(&self, graph: &mut SceneGraph) {
        graph[self.node].init(self.offset, 0.0, UP, Vec3::new(self.scale, self.scale, self.scale));
    }

    /// Flank this escort guards
    pub fn side(&self) -> EscortSide {
        self.side
    }

    /// Check if the escort has been released from its boss
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Release the escort into the scene root, keeping its world pose
    pub fn detach_to_world(&mut self, graph: &mut SceneGraph) {
        if self.detached {
            return;
        }

        let root = graph.root();
        graph.set_parent(self.node, Some(root), true);
        self.detached = true;
        log::debug!("Escort {:?} detached, fleeing {:?}", self.node, self.side);
    }

    /// Turn back by rotation the arm applied above the plane this frame
    pub fn apply_parent_rotation_correction(&mut self, graph: &mut SceneGraph, degrees: f32) {
        if self.detached || degrees.abs() < 1e-4 {
            return;
        }
        graph[self.node].rotate_local(-degrees, FORWARD);
    }

    /// Hide the escort unless it is already fleeing
    pub fn deactivate(&mut self, graph: &mut SceneGraph) {
        if self.detached {
            return;
        }
        graph.set_active_recursive(self.node, false);
        graph.set_visible_recursive(self.node, false);
    }
}

impl GameObject for EscortPlane {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        if !self.detached || !graph[self.node].is_active() {
            return;
        }

        graph[self.node].translate_world(self.side.travel_direction() * self.travel_speed * delta_time);

        if self.bounds.is_outside(&graph.world_position(self.node)) {
            let node = &mut graph[self.node];
            node.set_active(false);
            node.set_visible(false);
        }
    }

    fn reset(&mut self, graph: &mut SceneGraph) {
        graph.set_parent(self.node, Some(self.home), false);
        self.place(graph);
        graph.set_active_recursive(self.node, true);
        graph.set_visible_recursive(self.node, true);
        self.detached = false;
    }
}

fn model_fixup(side: EscortSide) -> Mat4 {
    let base = Mat4::scaling(&Vec3::new(10.0, 10.0, 10.0))
        * Mat4::rotation_deg(-90.0, &FORWARD)
        * Mat4::rotation_deg(90.0, &RIGHT);
    match side {
        EscortSide::Left => base * Mat4::rotation_deg(180.0, &UP),
        EscortSide::Right => base,
    }
}
