//! Scene graph: transform nodes and the hierarchy that composes them
//!
//! ## Architecture
//!
//! ```text
//! SceneGraph (arena, owns every Node)
//!      ├── root
//!      │    ├── player ── cannon ── ...
//!      │    └── pool node ── pooled instances
//!      └── parentless nodes
//! ```
//!
//! Gameplay types implement [`GameObject`] and hold the [`NodeId`] of the
//! node they drive. The graph and the pools depend only on that trait.

mod graph;
mod node;
mod object;
mod visitor;

pub use graph::SceneGraph;
pub use node::{Node, NodeFlags, Appearance};
pub use object::GameObject;
pub use visitor::{SceneVisitor, NodeCounter};

slotmap::new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`]
    pub struct NodeId;
}
