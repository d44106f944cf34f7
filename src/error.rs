//! Error types for the follower.

use glam::Vec3;

/// Result type alias
pub type Result<T> = std::result::Result<T, FollowerError>;

/// Follower error taxonomy.
///
/// Only `MisconfiguredParameters` is ever surfaced as an `Err` from the
/// public API. The other variants describe why a decision produced
/// [`Action::Error`](crate::core::Action::Error) and are reported through
/// [`GreedyFollower::last_failure`](crate::follower::GreedyFollower::last_failure).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FollowerError {
    /// The oracle cannot connect the two points
    #[error("No navigable path from {from} to {to}")]
    Unreachable {
        /// Query start point
        from: Vec3,
        /// Query end point
        to: Vec3,
    },

    /// Every simulated candidate action collided
    #[error("All candidate actions collide")]
    AllCandidatesCollide,

    /// `find_path` hit its safety cap
    #[error("Step budget of {budget} actions exceeded")]
    StepBudgetExceeded {
        /// Budget that was exhausted
        budget: usize,
    },

    /// Invalid configuration value
    #[error("Misconfigured parameter `{name}`: {reason}")]
    MisconfiguredParameters {
        /// Offending parameter
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl FollowerError {
    /// Shorthand for a configuration error.
    pub(crate) fn misconfigured(name: &'static str, reason: impl Into<String>) -> Self {
        FollowerError::MisconfiguredParameters {
            name,
            reason: reason.into(),
        }
    }

    /// Is this a per-candidate condition (as opposed to a fatal one)?
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FollowerError::Unreachable { .. })
    }
}
