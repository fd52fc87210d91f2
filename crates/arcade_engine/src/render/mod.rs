//! Renderer boundary
//!
//! Gameplay code only ever hands a mesh, a world transform and a tint to a
//! [`Renderer`]. [`RecordingRenderer`] keeps those submissions in memory,
//! split into opaque and transparent queues.

use crate::assets::MeshHandle;
use crate::foundation::math::{Mat4, Vec4};

/// Draw sink for scene graph nodes
pub trait Renderer {
    /// Draw `mesh` with the given world transform and RGBA tint
    fn draw_mesh(&mut self, mesh: MeshHandle, transform: &Mat4, tint: &Vec4);
}

/// One recorded draw submission
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Mesh to draw
    pub mesh: MeshHandle,
    /// World transform (mesh transform already applied)
    pub transform: Mat4,
    /// RGBA tint
    pub tint: Vec4,
}

impl DrawCommand {
    /// Check if the tint makes this draw translucent
    pub fn is_transparent(&self) -> bool {
        self.tint.w < 1.0
    }
}

/// Renderer that records every submission instead of drawing it
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    opaque_commands: Vec<DrawCommand>,
    transparent_commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far (call once per frame)
    pub fn clear(&mut self) {
        self.opaque_commands.clear();
        self.transparent_commands.clear();
    }

    /// Opaque submissions in order
    pub fn opaque(&self) -> &[DrawCommand] {
        &self.opaque_commands
    }

    /// Translucent submissions in order
    pub fn transparent(&self) -> &[DrawCommand] {
        &self.transparent_commands
    }

    /// All submissions, opaque first
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.opaque_commands.iter().chain(self.transparent_commands.iter())
    }

    /// Number of submissions that used `mesh`
    pub fn count_mesh(&self, mesh: MeshHandle) -> usize {
        self.commands().filter(|cmd| cmd.mesh == mesh).count()
    }

    /// Total number of submissions
    pub fn len(&self) -> usize {
        self.opaque_commands.len() + self.transparent_commands.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Renderer for RecordingRenderer {
    fn draw_mesh(&mut self, mesh: MeshHandle, transform: &Mat4, tint: &Vec4) {
        let command = DrawCommand {
            mesh,
            transform: *transform,
            tint: *tint,
        };
        if command.is_transparent() {
            self.transparent_commands.push(command);
        } else {
            self.opaque_commands.push(command);
        }
    }
}
