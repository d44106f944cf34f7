//! Discrete action execution.
//!
//! The follower never moves a pose itself. It delegates every forward
//! step and turn to an [`ActionApplicator`] supplied by the caller, both
//! for simulation on scratch poses and for advancing the pose in
//! `find_path`.
//!
//! - [`FnApplicator`]: wraps three closures
//! - [`KinematicApplicator`]: fixed-step motion on a [`Navigable`] surface

mod kinematic;

pub use kinematic::KinematicApplicator;

use glam::Vec3;

use crate::core::{Action, Pose};

/// Applies one discrete action to a pose.
///
/// Each method mutates only the pose it is given and returns `true` if
/// the attempt collided. Implementations must be deterministic.
pub trait ActionApplicator {
    /// Move the pose forward by one step.
    fn move_forward(&self, pose: &mut Pose) -> bool;

    /// Rotate the pose left by one step.
    fn turn_left(&self, pose: &mut Pose) -> bool;

    /// Rotate the pose right by one step.
    fn turn_right(&self, pose: &mut Pose) -> bool;

    /// Apply `action` to `pose`.
    ///
    /// `Stop` and `Error` leave the pose untouched and never collide.
    fn apply(&self, action: Action, pose: &mut Pose) -> bool {
        match action {
            Action::Forward => self.move_forward(pose),
            Action::Left => self.turn_left(pose),
            Action::Right => self.turn_right(pose),
            Action::Stop | Action::Error => false,
        }
    }
}

impl<T: ActionApplicator + ?Sized> ActionApplicator for &T {
    fn move_forward(&self, pose: &mut Pose) -> bool {
        (**self).move_forward(pose)
    }

    fn turn_left(&self, pose: &mut Pose) -> bool {
        (**self).turn_left(pose)
    }

    fn turn_right(&self, pose: &mut Pose) -> bool {
        (**self).turn_right(pose)
    }
}

/// [`ActionApplicator`] built from three closures.
///
/// # Example
/// ```
/// use marga::core::Pose;
/// use marga::motion::{ActionApplicator, FnApplicator};
///
/// let applicator = FnApplicator::new(
///     |pose: &mut Pose| { *pose = pose.moved_forward(0.5); false },
///     |pose: &mut Pose| { *pose = pose.turned(0.1); false },
///     |pose: &mut Pose| { *pose = pose.turned(-0.1); false },
/// );
///
/// let mut pose = Pose::identity();
/// assert!(!applicator.move_forward(&mut pose));
/// assert!((pose.translation.z + 0.5).abs() < 1e-6);
/// ```
#[derive(Clone)]
pub struct FnApplicator<F, L, R> {
    forward: F,
    left: L,
    right: R,
}

impl<F, L, R> FnApplicator<F, L, R>
where
    F: Fn(&mut Pose) -> bool,
    L: Fn(&mut Pose) -> bool,
    R: Fn(&mut Pose) -> bool,
{
    /// Create an applicator from forward, left and right closures.
    pub fn new(forward: F, left: L, right: R) -> Self {
        Self {
            forward,
            left,
            right,
        }
    }
}

impl<F, L, R> ActionApplicator for FnApplicator<F, L, R>
where
    F: Fn(&mut Pose) -> bool,
    L: Fn(&mut Pose) -> bool,
    R: Fn(&mut Pose) -> bool,
{
    fn move_forward(&self, pose: &mut Pose) -> bool {
        (self.forward)(pose)
    }

    fn turn_left(&self, pose: &mut Pose) -> bool {
        (self.left)(pose)
    }

    fn turn_right(&self, pose: &mut Pose) -> bool {
        (self.right)(pose)
    }
}

/// Point-wise navigability query.
pub trait Navigable {
    /// Check if the agent may stand at `point`.
    fn is_navigable(&self, point: Vec3) -> bool;

    /// Check every sample along `from → to`, spaced at most `step` apart.
    ///
    /// Both endpoints are included.
    fn is_segment_navigable(&self, from: Vec3, to: Vec3, step: f32) -> bool {
        let length = from.distance(to);
        let samples = if step > 0.0 {
            (length / step).ceil().max(1.0) as usize
        } else {
            1
        };
        (0..=samples).all(|i| {
            let t = i as f32 / samples as f32;
            self.is_navigable(from.lerp(to, t))
        })
    }
}

impl<T: Navigable + ?Sized> Navigable for &T {
    fn is_navigable(&self, point: Vec3) -> bool {
        (**self).is_navigable(point)
    }

    fn is_segment_navigable(&self, from: Vec3, to: Vec3, step: f32) -> bool {
        (**self).is_segment_navigable(from, to, step)
    }
}
