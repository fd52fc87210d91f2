//! # Arcade Shooter
//!
//! Vertical shooter built on [`arcade_engine`]: a player ship with two
//! cannons against bouncing bosses that fire radial volleys.
//!
//! ## Architecture
//!
//! ```text
//! GameSession
//!     ├── SceneGraph
//!     ├── Player ── Cannon ×2 ── ObjectPool<Attack>
//!     │        └── Orbit per heart
//!     └── Enemy* ── ObjectPool<Bullet>
//!              └── EscortPlane ×2
//! ```
//!
//! Collisions are resolved by the victim: each enemy tests the player's
//! projectiles, the player tests every enemy's bullets.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod attachments;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod session;
pub mod weapons;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use input::{DirectionKey, InputState};
pub use session::{GameSession, GameState};
