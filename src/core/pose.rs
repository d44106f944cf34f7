//! 6-DoF agent pose.
//!
//! Coordinate frame follows the usual navmesh convention:
//! - Y-up, ground plane is XZ
//! - The agent looks along its local −Z axis
//! - Positive rotation about +Y turns the agent to its left

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Agent pose: unit rotation + translation.
///
/// Poses are plain values. The follower only ever mutates copies it owns
/// exclusively (its scratch poses).
///
/// # Example
/// ```
/// use marga::core::Pose;
/// use glam::Vec3;
///
/// // Facing +X from the origin
/// let pose = Pose::from_yaw(Vec3::ZERO, -std::f32::consts::FRAC_PI_2);
/// let next = pose.moved_forward(0.25);
/// assert!((next.translation.x - 0.25).abs() < 1e-5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Orientation (unit quaternion).
    pub rotation: Quat,
    /// Position in world frame.
    pub translation: Vec3,
}

impl Pose {
    /// Create a new pose. The rotation is normalized.
    #[inline]
    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation: rotation.normalize(),
            translation,
        }
    }

    /// Identity pose (origin, looking down −Z).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation: Vec3::ZERO,
        }
    }

    /// Create a pose from a position and a heading angle about +Y.
    #[inline]
    pub fn from_yaw(translation: Vec3, yaw: f32) -> Self {
        Self {
            rotation: Quat::from_rotation_y(yaw),
            translation,
        }
    }

    /// Create a pose from raw arrays: translation `[x, y, z]` and
    /// rotation `[x, y, z, w]`.
    #[inline]
    pub fn from_arrays(translation: [f32; 3], rotation: [f32; 4]) -> Self {
        Self::new(Quat::from_array(rotation), Vec3::from_array(translation))
    }

    /// Forward direction (unit vector) in world frame.
    #[inline]
    pub fn forward(self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Heading angle about +Y in radians, in (−π, π].
    ///
    /// Zero means looking down −Z.
    #[inline]
    pub fn yaw(self) -> f32 {
        let f = self.forward();
        (-f.x).atan2(-f.z)
    }

    /// Pose translated by `distance` along the current heading.
    #[inline]
    pub fn moved_forward(self, distance: f32) -> Self {
        Self {
            rotation: self.rotation,
            translation: self.translation + self.forward() * distance,
        }
    }

    /// Pose rotated in place by `angle` about +Y (positive = left).
    #[inline]
    pub fn turned(self, angle: f32) -> Self {
        Self {
            rotation: (Quat::from_rotation_y(angle) * self.rotation).normalize(),
            translation: self.translation,
        }
    }

    /// Check if this pose is approximately equal to another.
    #[inline]
    pub fn approx_eq(self, other: Pose, pos_epsilon: f32, angle_epsilon: f32) -> bool {
        self.translation.distance(other.translation) <= pos_epsilon
            && self.rotation.angle_between(other.rotation) <= angle_epsilon
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
