//! Nodes that ride along with a parent entity
//!
//! Orbits circle the player. Each boss arm is a chain of swinging segments
//! ending in an escort plane that breaks away when the boss dies.

pub mod escort_plane;
pub mod hand;
pub mod lower;
pub mod orbit;
mod swing;
pub mod upper;

pub use escort_plane::{EscortPlane, EscortSide};
pub use hand::Hand;
pub use lower::Lower;
pub use orbit::Orbit;
pub use swing::Swing;
pub use upper::Upper;
