//! Projectiles and the emitters that fire them

pub mod attack;
pub mod bullet;
pub mod cannon;

pub use attack::Attack;
pub use bullet::Bullet;
pub use cannon::Cannon;
