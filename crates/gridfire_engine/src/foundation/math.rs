//! Math utilities and types
//!
//! Provides the vector type shared by every subsystem plus the handful of
//! yaw helpers used for ground-plane movement.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Distances below this are treated as "already there"
    pub const ARRIVAL_EPSILON: f32 = 1e-4;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Rotate a vector around the world Y axis
    ///
    /// A yaw of zero leaves `+Z` as forward; positive yaw turns `+Z` towards `+X`.
    pub fn rotate_y(vector: &Vec3, yaw: f32) -> Vec3 {
        let (sin, cos) = yaw.sin_cos();
        Vec3::new(
            vector.x * cos + vector.z * sin,
            vector.y,
            -vector.x * sin + vector.z * cos,
        )
    }

    /// Forward direction on the ground plane for a given yaw
    pub fn forward_from_yaw(yaw: f32) -> Vec3 {
        rotate_y(&Vec3::z(), yaw)
    }

    /// Right direction on the ground plane for a given yaw
    pub fn right_from_yaw(yaw: f32) -> Vec3 {
        rotate_y(&Vec3::x(), yaw)
    }

    /// Yaw that makes `from` face `to`, ignoring height
    pub fn yaw_towards(from: &Vec3, to: &Vec3) -> f32 {
        let delta = to - from;
        delta.x.atan2(delta.z)
    }

    /// Distance between two points projected onto the ground plane
    pub fn planar_distance(a: &Vec3, b: &Vec3) -> f32 {
        let dx = b.x - a.x;
        let dz = b.z - a.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Normalized ground-plane direction from `from` to `to`
    ///
    /// Returns `None` when the two points coincide on the plane.
    pub fn planar_direction(from: &Vec3, to: &Vec3) -> Option<Vec3> {
        let delta = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
        let length = delta.magnitude();
        if length <= constants::ARRIVAL_EPSILON {
            None
        } else {
            Some(delta / length)
        }
    }

    /// Move `from` towards `to` on the ground plane by at most `max_step`
    ///
    /// Never overshoots: when the target is closer than `max_step` the target
    /// itself is returned (keeping the original height).
    pub fn step_towards(from: &Vec3, to: &Vec3, max_step: f32) -> Vec3 {
        let distance = planar_distance(from, to);
        match planar_direction(from, to) {
            Some(_) if distance <= max_step => Vec3::new(to.x, from.y, to.z),
            Some(direction) => from + direction * max_step,
            None => *from,
        }
    }
}
