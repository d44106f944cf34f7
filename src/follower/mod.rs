//! Greedy geodesic follower.
//!
//! Turns a geodesic shortest path into discrete actions, one decision at a
//! time:
//!
//! 1. [`StepSimulator`] applies each candidate (forward, left, right) to a
//!    scratch copy of the pose and queries the oracle
//! 2. [`RewardScorer`] ranks the outcomes
//! 3. [`ThrashingDetector`] overrides left/right oscillation
//! 4. [`GreedyFollower`] records the action and updates its
//!    [`FollowerState`]

mod greedy;
mod reward;
mod simulator;
mod state;
mod thrashing;
mod trajectory;

pub use greedy::GreedyFollower;
pub use reward::RewardScorer;
pub use simulator::{ScratchPoses, StepResult, StepSimulator};
pub use state::FollowerState;
pub use thrashing::ThrashingDetector;
pub use trajectory::Trajectory;
