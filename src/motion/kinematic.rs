//! Fixed-step kinematic motion.

use crate::config::FollowerConfig;
use crate::core::Pose;

use super::{ActionApplicator, Navigable};

/// Moves in fixed steps over a [`Navigable`] surface.
///
/// - Forward: translate `forward_amount` along the heading if the whole
///   segment is navigable, otherwise stay put and report a collision
/// - Left / Right: rotate by `turn_amount` about +Y, never collides
#[derive(Clone, Debug)]
pub struct KinematicApplicator<N> {
    navigable: N,
    forward_amount: f32,
    turn_amount: f32,
    /// Sample spacing used for segment checks.
    collision_step: f32,
}

impl<N: Navigable> KinematicApplicator<N> {
    /// Create an applicator with explicit step sizes.
    pub fn new(navigable: N, forward_amount: f32, turn_amount: f32) -> Self {
        Self {
            navigable,
            forward_amount,
            turn_amount,
            collision_step: (forward_amount / 8.0).max(1e-3),
        }
    }

    /// Create an applicator matching the follower's step sizes.
    pub fn from_config(navigable: N, config: &FollowerConfig) -> Self {
        Self::new(navigable, config.forward_amount, config.turn_amount)
    }

    /// Builder-style setter for segment sample spacing.
    pub fn with_collision_step(mut self, step: f32) -> Self {
        self.collision_step = step;
        self
    }

    /// Access the navigability source.
    pub fn navigable(&self) -> &N {
        &self.navigable
    }
}

impl<N: Navigable> ActionApplicator for KinematicApplicator<N> {
    fn move_forward(&self, pose: &mut Pose) -> bool {
        let next = pose.moved_forward(self.forward_amount);
        if self
            .navigable
            .is_segment_navigable(pose.translation, next.translation, self.collision_step)
        {
            *pose = next;
            false
        } else {
            true
        }
    }

    fn turn_left(&self, pose: &mut Pose) -> bool {
        *pose = pose.turned(self.turn_amount);
        false
    }

    fn turn_right(&self, pose: &mut Pose) -> bool {
        *pose = pose.turned(-self.turn_amount);
        false
    }
}
