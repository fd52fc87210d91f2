//! # Arcade Engine
//!
//! Runtime core shared by the arcade shooter demos: a hierarchical scene
//! graph with lazily composed world transforms, and a fixed-capacity object
//! pool used for every transient gameplay entity.
//!
//! ## Features
//!
//! - **Scene Graph**: Arena-backed node tree with parent/child relations kept
//!   consistent in a single mutating call
//! - **Object Pools**: Pre-allocated, O(1) acquire/release with automatic
//!   expiry outside the play volume
//! - **Collision**: Sphere-vs-sphere tests on world positions
//! - **Renderer Boundary**: Entities hand world transforms and tints to a
//!   [`render::Renderer`]; the core never knows how triangles are drawn
//!
//! ## Quick Start
//!
//! ```rust
//! use arcade_engine::prelude::*;
//!
//! struct Spark {
//!     node: NodeId,
//! }
//!
//! impl GameObject for Spark {
//!     fn node(&self) -> NodeId {
//!         self.node
//!     }
//!
//!     fn update(&mut self, graph: &mut SceneGraph, delta_time: f32) {
//!         graph[self.node].translate(UP * 10.0 * delta_time);
//!     }
//! }
//!
//! let mut graph = SceneGraph::new();
//! let root = graph.root();
//! let mut pool = ObjectPool::new(&mut graph, root, 8, WorldBounds::default(), |graph| Spark {
//!     node: graph.create_node(Node::default()),
//! });
//!
//! if let Some(slot) = pool.acquire(&mut graph) {
//!     let node = pool[slot].node();
//!     graph[node].init(Vec3::zeros(), 0.0, UP, Vec3::new(1.0, 1.0, 1.0));
//! }
//! pool.update(&mut graph, 1.0 / 60.0);
//! assert_eq!(pool.active_count(), 1);
//! ```

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod pool;
pub mod physics;
pub mod render;
pub mod assets;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec3, Vec4, Mat4, Quat, UP, DOWN, LEFT, RIGHT, FORWARD, BACKWARD},
            time::FrameClock,
        },
        config::{Config, ConfigError, WorldBounds},
        scene::{SceneGraph, Node, NodeId, NodeFlags, Appearance, GameObject, SceneVisitor},
        pool::{ObjectPool, PoolSlot},
        physics::BoundingSphere,
        render::{Renderer, RecordingRenderer, DrawCommand},
        assets::{MeshHandle, MeshLoader, MeshRegistry, SequentialMeshLoader, AssetError},
    };
}
