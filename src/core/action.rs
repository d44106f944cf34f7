//! Discrete agent actions.

use serde::{Deserialize, Serialize};

/// Output of the follower: the next action to take, or a control signal.
///
/// The same closed enum is used for movement commands and for the
/// `Stop` / `Error` signals, so callers can key directly off the discrete
/// action space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Unrecoverable decision failure (no viable action, or oracle failure).
    Error,
    /// Goal reached.
    Stop,
    /// Move forward by one step.
    Forward,
    /// Turn left in place by one turn increment.
    Left,
    /// Turn right in place by one turn increment.
    Right,
}

impl Action {
    /// Candidate movement actions in tie-break priority order.
    pub const CANDIDATES: [Action; 3] = [Action::Forward, Action::Left, Action::Right];

    /// Stable integer code (`Error=-2, Stop=-1, Forward=0, Left=1, Right=2`).
    pub fn code(self) -> i32 {
        match self {
            Action::Error => -2,
            Action::Stop => -1,
            Action::Forward => 0,
            Action::Left => 1,
            Action::Right => 2,
        }
    }

    /// Inverse of [`Action::code`].
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -2 => Some(Action::Error),
            -1 => Some(Action::Stop),
            0 => Some(Action::Forward),
            1 => Some(Action::Left),
            2 => Some(Action::Right),
            _ => None,
        }
    }

    /// Is this a movement command (forward or a turn)?
    pub fn is_motion(self) -> bool {
        matches!(self, Action::Forward | Action::Left | Action::Right)
    }

    /// Is this a turn?
    pub fn is_turn(self) -> bool {
        matches!(self, Action::Left | Action::Right)
    }

    /// Does this action end a path (stop or error)?
    pub fn is_terminal(self) -> bool {
        matches!(self, Action::Stop | Action::Error)
    }

    /// Short name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Action::Error => "error",
            Action::Stop => "stop",
            Action::Forward => "forward",
            Action::Left => "left",
            Action::Right => "right",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
