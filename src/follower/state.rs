//! Follower decision states.

/// Follower state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FollowerState {
    /// No decision since construction or the last reset
    #[default]
    Ready,

    /// Last decision was a motion action
    Following,

    /// Last decision was `Stop` (goal reached)
    Stopped,

    /// Last decision was `Error`
    Errored,
}

impl FollowerState {
    /// Is this a terminal state?
    pub fn is_terminal(&self) -> bool {
        matches!(self, FollowerState::Stopped | FollowerState::Errored)
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            FollowerState::Ready => "Ready",
            FollowerState::Following => "Following",
            FollowerState::Stopped => "Stopped",
            FollowerState::Errored => "Errored",
        }
    }
}

impl std::fmt::Display for FollowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
