//! Core types shared by the follower and its collaborators.
//!
//! - [`Pose`]: 6-DoF agent pose (rotation + translation)
//! - [`Action`]: discrete action / control signal emitted by the follower

mod action;
mod pose;

pub use action::Action;
pub use pose::Pose;

use glam::{Vec2, Vec3};

/// Project a world point onto the XZ ground plane.
#[inline]
pub fn planar(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.z)
}

/// Distance between two points measured on the XZ ground plane.
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}
