//! Math utilities and types
//!
//! Provides fundamental math types for the scene graph and gameplay code.
//! Conventions: right-handed, Y-up, column vectors, `world = parent * local`.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// World up (+Y)
pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// World down (-Y)
pub const DOWN: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// World right (+X)
pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// World left (-X)
pub const LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);

/// Toward the viewer (+Z)
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Away from the viewer (-Z)
pub const BACKWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for building and decomposing affine `Mat4` transforms
pub trait Mat4Ext {
    /// Translation matrix
    fn translation(v: &Vec3) -> Mat4;

    /// Rotation matrix of `degrees` about `axis` (axis need not be normalized)
    fn rotation_deg(degrees: f32, axis: &Vec3) -> Mat4;

    /// Non-uniform scale matrix
    fn scaling(v: &Vec3) -> Mat4;

    /// Translation column of an affine matrix
    fn position(&self) -> Vec3;

    /// Per-axis length of the upper 3x3 columns
    fn axis_scale(&self) -> Vec3;

    /// Rotation of the upper 3x3 after normalizing its columns
    fn rotation(&self) -> Quat;
}

impl Mat4Ext for Mat4 {
    fn translation(v: &Vec3) -> Mat4 {
        Mat4::new_translation(v)
    }

    fn rotation_deg(degrees: f32, axis: &Vec3) -> Mat4 {
        Mat4::from_axis_angle(&Unit::new_normalize(*axis), utils::deg_to_rad(degrees))
    }

    fn scaling(v: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(v)
    }

    fn position(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn axis_scale(&self) -> Vec3 {
        Vec3::new(
            Vec3::new(self.m11, self.m21, self.m31).magnitude(),
            Vec3::new(self.m12, self.m22, self.m32).magnitude(),
            Vec3::new(self.m13, self.m23, self.m33).magnitude(),
        )
    }

    fn rotation(&self) -> Quat {
        let scale = self.axis_scale();
        let rotation_matrix = Mat3::new(
            self.m11 / scale.x, self.m12 / scale.y, self.m13 / scale.z,
            self.m21 / scale.x, self.m22 / scale.y, self.m23 / scale.z,
            self.m31 / scale.x, self.m32 / scale.y, self.m33 / scale.z,
        );
        // Nearest rotation, so skew from non-uniform parent scale cannot leak in
        Quat::from_matrix(&rotation_matrix)
    }
}
