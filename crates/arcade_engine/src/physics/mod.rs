//! Collision primitives
//!
//! Every collision in the game is sphere-vs-sphere on world positions; the
//! spheres are produced by [`SceneGraph::bounding_sphere`](crate::scene::SceneGraph::bounding_sphere).

pub mod primitives;

pub use primitives::BoundingSphere;
