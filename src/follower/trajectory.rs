//! Action sequences produced by `find_trajectory`.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Pose};

/// Actions and the pose each one was decided from.
///
/// `poses[i]` is the pose before `actions[i]`; both vectors have the
/// same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Decided actions, ending in `Stop` or `Error`.
    pub actions: Vec<Action>,
    /// Pose before each action.
    pub poses: Vec<Pose>,
}

impl Trajectory {
    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if no action was produced.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Did the trajectory end at the goal?
    pub fn reached_goal(&self) -> bool {
        self.actions.last() == Some(&Action::Stop)
    }

    /// Pose at which the trajectory terminated.
    pub fn final_pose(&self) -> Option<Pose> {
        self.poses.last().copied()
    }

    /// Count occurrences of one action.
    pub fn count(&self, action: Action) -> usize {
        self.actions.iter().filter(|a| **a == action).count()
    }

    pub(super) fn push(&mut self, pose: Pose, action: Action) {
        self.poses.push(pose);
        self.actions.push(action);
    }
}
