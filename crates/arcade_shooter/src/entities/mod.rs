//! Top-level combatants

pub mod enemy;
pub mod player;

pub use enemy::Enemy;
pub use player::Player;
