//! Game configuration
//!
//! Every tunable of the shooter lives here. Files are partial: any field
//! left out keeps its default.

use arcade_engine::config::{Config, WorldBounds, MAX_COORD};
use arcade_engine::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::attachments::EscortSide;
use crate::error::{GameError, GameResult};

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds per simulation step
    pub fixed_timestep: f32,

    /// Play volume; projectiles and escorts expire outside it
    pub world: WorldBounds,

    /// Player ship settings
    pub player: PlayerConfig,

    /// Player cannon settings
    pub cannon: CannonConfig,

    /// Enemy boss settings
    pub enemy: EnemyConfig,

    /// Enemy bullet settings
    pub bullet: BulletConfig,

    /// Escort plane settings
    pub escort: EscortConfig,

    /// Boss arm settings
    pub arm: ArmConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            world: WorldBounds::default(),
            player: PlayerConfig::default(),
            cannon: CannonConfig::default(),
            enemy: EnemyConfig::default(),
            bullet: BulletConfig::default(),
            escort: EscortConfig::default(),
            arm: ArmConfig::default(),
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Reject values the session cannot run with
    pub fn validate(&self) -> GameResult<()> {
        if !(self.fixed_timestep > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "fixed_timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        if self.player.max_hearts == 0 {
            return Err(GameError::InvalidConfig(String::from("player.max_hearts must be at least 1")));
        }
        if self.enemy.spawn_points.is_empty() {
            return Err(GameError::InvalidConfig(String::from("enemy.spawn_points is empty")));
        }
        if self.arm.upper_length <= 0.0 || self.arm.lower_length <= 0.0 || self.arm.hand_length <= 0.0 {
            return Err(GameError::InvalidConfig(String::from("arm segment lengths must be positive")));
        }
        if self.enemy.bullets_per_volley == 0 {
            return Err(GameError::InvalidConfig(String::from("enemy.bullets_per_volley must be at least 1")));
        }
        Ok(())
    }
}

/// Player ship settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn position
    pub spawn: Vec3,
    /// Uniform scale of the ship node
    pub scale: f32,
    /// Movement speed in world units per second
    pub speed: f32,
    /// Hits the player can take
    pub max_hearts: u32,
    /// Invulnerability window after a hit, in seconds
    pub recovery_time: f32,
    /// Collision radius
    pub hitbox_radius: f32,
    /// Cannon mount points in ship space
    pub cannon_offsets: Vec<Vec3>,
    /// Orbit distance from the ship in ship space
    pub orbit_distance: f32,
    /// Uniform scale of each orbit
    pub orbit_scale: f32,
    /// Orbit angular speed in degrees per second
    pub orbit_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::zeros(),
            scale: 2.0,
            speed: 15.0,
            max_hearts: 3,
            recovery_time: 3.0,
            hitbox_radius: 1.0,
            cannon_offsets: vec![Vec3::new(-0.8, 0.2, 0.0), Vec3::new(0.8, 0.2, 0.0)],
            orbit_distance: 5.0,
            orbit_scale: 2.0,
            orbit_speed: 90.0,
        }
    }
}

/// Player cannon settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannonConfig {
    /// Seconds between shots
    pub shoot_interval: f32,
    /// Projectiles pre-allocated per cannon
    pub pool_size: usize,
    /// Projectile velocity in its own frame
    pub projectile_velocity: Vec3,
    /// Damage dealt per projectile
    pub projectile_damage: u32,
    /// Projectile collision radius
    pub projectile_hitbox_radius: f32,
    /// Rotation pivot of the barrel
    pub pivot: Vec3,
}

impl Default for CannonConfig {
    fn default() -> Self {
        Self {
            shoot_interval: 0.2,
            pool_size: 50,
            projectile_velocity: Vec3::new(0.0, 80.0, 0.0),
            projectile_damage: 1,
            projectile_hitbox_radius: 1.0,
            pivot: Vec3::new(0.0, -0.5, 0.0),
        }
    }
}

/// Enemy boss settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// One boss per spawn point
    pub spawn_points: Vec<Vec3>,
    /// Uniform scale of the boss node
    pub scale: f32,
    /// Bullets pre-allocated per boss
    pub pool_size: usize,
    /// Seconds between volleys
    pub shoot_interval: f32,
    /// Vertical speed in world units per second
    pub move_speed: f32,
    /// Lowest world Y before bouncing back up
    pub move_limit: f32,
    /// Highest world Y before bouncing back down
    pub move_ceiling: f32,
    /// Bullets per radial volley
    pub bullets_per_volley: u32,
    /// Angle added to every other volley, in degrees
    pub volley_offset: f32,
    /// Hits the boss can take
    pub max_hearts: u32,
    /// Collision radius
    pub hitbox_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_points: vec![Vec3::new(-20.0, 50.0, 0.0), Vec3::new(20.0, 30.0, 0.0)],
            scale: 2.0,
            pool_size: 200,
            shoot_interval: 2.0,
            move_speed: 2.0,
            move_limit: -15.0,
            move_ceiling: MAX_COORD,
            bullets_per_volley: 20,
            volley_offset: 9.0,
            max_hearts: 10,
            hitbox_radius: 1.4,
        }
    }
}

/// Enemy bullet settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Travel speed in world units per second
    pub speed: f32,
    /// Core radius
    pub radius: f32,
    /// Outline thickness around the core
    pub outline: f32,
}

impl BulletConfig {
    /// Collision radius: core plus outline
    pub fn hitbox_radius(&self) -> f32 {
        self.radius + self.outline
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            radius: 1.6,
            outline: 0.6,
        }
    }
}

/// Escort plane settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscortConfig {
    /// Sideways speed after the boss dies, in world units per second
    pub travel_speed: f32,
    /// Uniform scale in boss space
    pub scale: f32,
}

impl Default for EscortConfig {
    fn default() -> Self {
        Self {
            travel_speed: 50.0,
            scale: 0.5,
        }
    }
}

/// One swinging joint: `amplitude * sin(frequency * t + phase)` degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwingConfig {
    /// Peak swing in degrees
    pub amplitude: f32,
    /// Angular frequency in radians per second
    pub frequency: f32,
    /// Phase of the left arm, in radians
    pub left_phase: f32,
    /// Phase of the right arm, in radians
    pub right_phase: f32,
}

impl SwingConfig {
    /// Phase for the arm on `side`
    pub fn phase(&self, side: EscortSide) -> f32 {
        match side {
            EscortSide::Left => self.left_phase,
            EscortSide::Right => self.right_phase,
        }
    }
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            amplitude: 18.0,
            frequency: 1.1,
            left_phase: 0.0,
            right_phase: std::f32::consts::PI,
        }
    }
}

/// Boss arm settings
///
/// Each arm is a chain upper arm, lower arm, hand, with an escort plane on
/// the hand. Angles are given for the left arm and mirrored for the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    /// Shoulder joints in boss space; negative X is the left arm
    pub shoulders: Vec<Vec3>,
    /// Upper arm length, shoulder to elbow
    pub upper_length: f32,
    /// Lower arm length, elbow to wrist
    pub lower_length: f32,
    /// Hand length, wrist to escort mount
    pub hand_length: f32,
    /// Rest angle of the upper arm at the shoulder, in degrees
    pub upper_angle: f32,
    /// Rest angle of the lower arm at the elbow, in degrees
    pub lower_angle: f32,
    /// Shoulder swing
    pub upper_swing: SwingConfig,
    /// Elbow swing
    pub lower_swing: SwingConfig,
    /// Wrist swing
    pub hand_swing: SwingConfig,
}

impl Default for ArmConfig {
    fn default() -> Self {
        let pi = std::f32::consts::PI;
        Self {
            shoulders: vec![Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)],
            upper_length: 3.5,
            lower_length: 3.5,
            hand_length: 1.0,
            upper_angle: 90.0,
            lower_angle: -30.0,
            upper_swing: SwingConfig::default(),
            lower_swing: SwingConfig {
                amplitude: 28.0,
                frequency: 1.7,
                left_phase: 0.5,
                right_phase: pi,
            },
            hand_swing: SwingConfig {
                amplitude: 28.0 * 1.15,
                frequency: 1.7 * 1.4,
                left_phase: 0.55,
                right_phase: pi * 1.1,
            },
        }
    }
}
