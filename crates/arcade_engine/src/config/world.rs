//! Play volume and pool sizing configuration

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

use super::Config;

/// Half-extent of the play area on X and Y used by the demos
pub const MAX_COORD: f32 = 50.0;

/// Axis-aligned play volume
///
/// Pooled entities whose world position leaves this volume expire
/// automatically. Bounds are inclusive: a point exactly on a face is inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl WorldBounds {
    /// Create bounds from two corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Symmetric cube of half-extent `half`
    pub fn cube(half: f32) -> Self {
        Self::new(Vec3::new(-half, -half, -half), Vec3::new(half, half, half))
    }

    /// Check if a point is inside the volume
    pub fn contains(&self, point: &Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if a point is outside the volume on any axis
    pub fn is_outside(&self, point: &Vec3) -> bool {
        !self.contains(point)
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(
            Vec3::new(-MAX_COORD, -MAX_COORD, -MAX_COORD),
            Vec3::new(MAX_COORD, MAX_COORD, MAX_COORD / 4.0),
        )
    }
}

impl Config for WorldBounds {}

/// Sizing for a single object pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of instances built up front
    pub capacity: usize,
}

impl PoolConfig {
    /// Create a pool config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}
