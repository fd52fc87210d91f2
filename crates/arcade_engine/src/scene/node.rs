//! Transform node: a posed object that may be parented to one other node
//!
//! A node stores only its *local* matrix. World placement is composed on
//! demand by [`SceneGraph`](super::SceneGraph) through the parent chain, so
//! nothing here can go stale when an ancestor moves.
//!
//! Two families of operations exist:
//!
//! - `*_local` post-multiply the local matrix (`M = M * op`), i.e. the
//!   operation happens in the node's own frame.
//! - `*_world` pre-multiply it (`M = op * M`), i.e. the operation happens in
//!   the frame the node is expressed in (the world, for an unparented node).
//!
//! The unqualified [`Node::translate`], [`Node::rotate`] and [`Node::scale`]
//! pick one of the two based on [`Node::is_local`].

use bitflags::bitflags;

use super::NodeId;
use crate::assets::MeshHandle;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3, Vec4, UP};

bitflags! {
    /// Per-node state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node takes part in update logic
        const ACTIVE = 1 << 0;
        /// Node is drawn
        const VISIBLE = 1 << 1;
        /// Unqualified transform ops act in local space
        const LOCAL = 1 << 2;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::ACTIVE | Self::VISIBLE | Self::LOCAL
    }
}

/// What the renderer needs to draw a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Opaque mesh handle from the asset loader
    pub mesh: MeshHandle,
    /// Applied after the world transform (model-space correction of the mesh)
    pub mesh_transform: Mat4,
    /// RGBA tint
    pub tint: Vec4,
}

impl Appearance {
    /// Mesh drawn as-is with a white tint
    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            mesh,
            mesh_transform: Mat4::identity(),
            tint: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Builder pattern: Set mesh-local transform
    pub fn with_mesh_transform(mut self, mesh_transform: Mat4) -> Self {
        self.mesh_transform = mesh_transform;
        self
    }

    /// Builder pattern: Set tint
    pub fn with_tint(mut self, tint: Vec4) -> Self {
        self.tint = tint;
        self
    }
}

/// A posed, possibly-parented object
#[derive(Debug, Clone)]
pub struct Node {
    local: Mat4,
    pivot: Vec3,
    flags: NodeFlags,
    hitbox_radius: f32,
    appearance: Option<Appearance>,
    name: Option<String>,

    // Hierarchy, maintained by SceneGraph only
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            local: Mat4::identity(),
            pivot: Vec3::zeros(),
            flags: NodeFlags::default(),
            hitbox_radius: 1.0,
            appearance: None,
            name: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl Node {
    /// Create a node at `position`, rotated `angle` degrees about `axis`,
    /// scaled by `size`
    pub fn new(position: Vec3, angle: f32, axis: Vec3, size: Vec3) -> Self {
        let mut node = Self::default();
        node.init(position, angle, axis, size);
        node
    }

    /// Create a node at `position` with no rotation and unit scale
    pub fn at(position: Vec3) -> Self {
        Self::new(position, 0.0, UP, Vec3::new(1.0, 1.0, 1.0))
    }

    /// Builder pattern: Set pivot
    ///
    /// Call before posing operations that should honour it.
    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    /// Builder pattern: Re-pose the node (see [`Node::init`])
    pub fn with_pose(mut self, position: Vec3, angle: f32, axis: Vec3, size: Vec3) -> Self {
        self.init(position, angle, axis, size);
        self
    }

    /// Builder pattern: Set collision radius
    pub fn with_hitbox_radius(mut self, radius: f32) -> Self {
        self.hitbox_radius = radius;
        self
    }

    /// Builder pattern: Set appearance
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    /// Builder pattern: Set debug name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder pattern: Start inactive and invisible (parked)
    pub fn parked(mut self) -> Self {
        self.flags.remove(NodeFlags::ACTIVE | NodeFlags::VISIBLE);
        self
    }

    /// Reset the local matrix and pose the node again
    ///
    /// Translation is applied in world space, rotation and scale locally
    /// about the pivot.
    pub fn init(&mut self, position: Vec3, angle: f32, axis: Vec3, size: Vec3) {
        self.local = Mat4::identity();
        self.translate_world(position);
        self.rotate_local(angle, axis);
        self.scale_local(size);
    }

    /// Local transform relative to the parent (or world, if unparented)
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local
    }

    /// Overwrite the local transform
    pub fn set_local_matrix(&mut self, local: Mat4) {
        self.local = local;
    }

    /// Point about which local rotation and scale are applied
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Set the pivot
    pub fn set_pivot(&mut self, pivot: Vec3) {
        self.pivot = pivot;
    }

    /// Parent node, if any
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in attachment order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Raw flag set
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Whether unqualified transform ops act in local space
    pub fn is_local(&self) -> bool {
        self.flags.contains(NodeFlags::LOCAL)
    }

    /// Switch unqualified ops between local and world space
    ///
    /// A parented node is always in local mode; requests to leave it are
    /// ignored.
    pub fn set_local_mode(&mut self, local: bool) {
        if !local && self.parent.is_some() {
            log::warn!("Ignoring world mode request on parented node {:?}", self.name);
            return;
        }
        self.flags.set(NodeFlags::LOCAL, local);
    }

    pub(super) fn force_local_mode(&mut self) {
        self.flags.insert(NodeFlags::LOCAL);
    }

    /// Whether the node takes part in update logic
    pub fn is_active(&self) -> bool {
        self.flags.contains(NodeFlags::ACTIVE)
    }

    /// Set the active flag
    pub fn set_active(&mut self, active: bool) {
        self.flags.set(NodeFlags::ACTIVE, active);
    }

    /// Whether the node is drawn
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Set the visible flag
    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(NodeFlags::VISIBLE, visible);
    }

    /// Both active and visible
    pub fn is_drawable(&self) -> bool {
        self.flags.contains(NodeFlags::ACTIVE | NodeFlags::VISIBLE)
    }

    /// Collision sphere radius
    pub fn hitbox_radius(&self) -> f32 {
        self.hitbox_radius
    }

    /// Set collision sphere radius
    pub fn set_hitbox_radius(&mut self, radius: f32) {
        self.hitbox_radius = radius;
    }

    /// Drawable data, if any
    pub fn appearance(&self) -> Option<&Appearance> {
        self.appearance.as_ref()
    }

    /// Mutable drawable data, if any
    pub fn appearance_mut(&mut self) -> Option<&mut Appearance> {
        self.appearance.as_mut()
    }

    /// Replace drawable data
    pub fn set_appearance(&mut self, appearance: Option<Appearance>) {
        self.appearance = appearance;
    }

    /// Debug name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Translate in local or world space depending on mode
    pub fn translate(&mut self, v: Vec3) {
        if self.is_local() {
            self.translate_local(v);
        } else {
            self.translate_world(v);
        }
    }

    /// Rotate by `angle` degrees about `axis`, around the pivot
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        if self.is_local() {
            self.rotate_local(angle, axis);
        } else {
            self.about_world_pivot(Mat4::rotation_deg(angle, &axis));
        }
    }

    /// Scale by `v`, around the pivot
    pub fn scale(&mut self, v: Vec3) {
        if self.is_local() {
            self.scale_local(v);
        } else {
            self.about_world_pivot(Mat4::scaling(&v));
        }
    }

    /// Translate along the node's own axes
    pub fn translate_local(&mut self, v: Vec3) {
        self.local *= Mat4::translation(&v);
    }

    /// Rotate in the node's own frame, about the pivot
    pub fn rotate_local(&mut self, angle: f32, axis: Vec3) {
        self.about_local_pivot(Mat4::rotation_deg(angle, &axis));
    }

    /// Scale in the node's own frame, about the pivot
    pub fn scale_local(&mut self, v: Vec3) {
        self.about_local_pivot(Mat4::scaling(&v));
    }

    /// Translate in the parent (or world) frame
    pub fn translate_world(&mut self, v: Vec3) {
        self.local = Mat4::translation(&v) * self.local;
    }

    /// Rotate in the parent (or world) frame, about its origin
    pub fn rotate_world(&mut self, angle: f32, axis: Vec3) {
        self.local = Mat4::rotation_deg(angle, &axis) * self.local;
    }

    /// Scale in the parent (or world) frame, about its origin
    pub fn scale_world(&mut self, v: Vec3) {
        self.local = Mat4::scaling(&v) * self.local;
    }

    fn about_local_pivot(&mut self, op: Mat4) {
        self.local = self.local
            * Mat4::translation(&self.pivot)
            * op
            * Mat4::translation(&-self.pivot);
    }

    fn about_world_pivot(&mut self, op: Mat4) {
        self.local = Mat4::translation(&self.pivot)
            * op
            * Mat4::translation(&-self.pivot)
            * self.local;
    }
}
