//! Greedy follower state machine.

use glam::Vec3;
use log::{debug, trace, warn};

use super::simulator::StepSimulator;
use super::state::FollowerState;
use super::thrashing::ThrashingDetector;
use super::trajectory::Trajectory;
use crate::config::FollowerConfig;
use crate::core::{Action, Pose};
use crate::error::{FollowerError, Result};
use crate::motion::ActionApplicator;
use crate::oracle::{GeodesicOracle, PathFinder};

/// Greedy geodesic follower.
///
/// Each decision simulates forward, left and right, scores them by
/// geodesic progress toward the goal, and returns the best one. Left/right
/// oscillation is broken by forcing a forward step.
///
/// One follower serves one (pathfinder, applicator, configuration) triple.
/// Call [`reset`](Self::reset) whenever the goal changes or the agent was
/// moved by anything other than the returned actions.
///
/// # Example
/// ```
/// use marga::config::FollowerConfig;
/// use marga::core::{Action, Pose};
/// use marga::follower::GreedyFollower;
/// use marga::grid::{GridPathFinder, NavGrid};
/// use marga::motion::KinematicApplicator;
/// use glam::{Vec2, Vec3};
///
/// let finder = GridPathFinder::new(NavGrid::new(40, 20, 0.1, Vec2::ZERO));
/// let config = FollowerConfig::default();
/// let applicator = KinematicApplicator::from_config(&finder, &config);
/// let mut follower = GreedyFollower::new(&finder, applicator, config).unwrap();
///
/// // Facing +X, goal straight ahead
/// let start = Pose::from_yaw(Vec3::new(0.5, 0.0, 1.0), -std::f32::consts::FRAC_PI_2);
/// let actions = follower.find_path(start, Vec3::new(3.0, 0.0, 1.0));
/// assert_eq!(actions.last(), Some(&Action::Stop));
/// ```
pub struct GreedyFollower<P, A> {
    oracle: GeodesicOracle<P>,
    applicator: A,
    config: FollowerConfig,
    simulator: StepSimulator,
    thrashing: ThrashingDetector,
    history: Vec<Action>,
    state: FollowerState,
    last_failure: Option<FollowerError>,
}

impl<P: PathFinder, A: ActionApplicator> GreedyFollower<P, A> {
    /// Create a follower.
    ///
    /// Fails with `MisconfiguredParameters` if the configuration is invalid.
    pub fn new(pathfinder: P, applicator: A, config: FollowerConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "[Follower] created: forward={:.3} turn={:.1}° goal_radius={:.3} thrashing_fix={}",
            config.forward_amount,
            config.turn_amount.to_degrees(),
            config.goal_radius,
            config.fix_thrashing
        );
        Ok(Self {
            oracle: GeodesicOracle::new(pathfinder),
            applicator,
            simulator: StepSimulator::new(&config),
            thrashing: ThrashingDetector::new(config.thrashing_threshold),
            config,
            history: Vec::new(),
            state: FollowerState::Ready,
            last_failure: None,
        })
    }

    // ===== Decisions =====

    /// Decide the next action from `pose` toward `goal`.
    ///
    /// Every returned action, `Stop` and `Error` included, is appended to
    /// the history. The reason for an `Error` is available from
    /// [`last_failure`](Self::last_failure).
    pub fn next_action_along(&mut self, pose: Pose, goal: Vec3) -> Action {
        let action = match self.decide(pose, goal) {
            Ok(action) => {
                self.last_failure = None;
                action
            }
            Err(err) => {
                warn!("[Follower] decision failed at {}: {}", pose.translation, err);
                self.last_failure = Some(err);
                Action::Error
            }
        };
        self.record(action);
        action
    }

    /// [`next_action_along`](Self::next_action_along) with raw arrays:
    /// position `[x, y, z]`, rotation `[x, y, z, w]`, goal `[x, y, z]`.
    pub fn next_action_along_arrays(
        &mut self,
        position: [f32; 3],
        rotation: [f32; 4],
        goal: [f32; 3],
    ) -> Action {
        let pose = Pose::from_arrays(position, rotation);
        self.next_action_along(pose, Vec3::from_array(goal))
    }

    /// Full action sequence from `start` to `goal`.
    ///
    /// Resets the follower first. The sequence ends with `Stop` or `Error`
    /// and never exceeds [`step_budget`](Self::step_budget).
    pub fn find_path(&mut self, start: Pose, goal: Vec3) -> Vec<Action> {
        self.find_trajectory(start, goal).actions
    }

    /// Like [`find_path`](Self::find_path), also returning the pose each
    /// action was decided from.
    pub fn find_trajectory(&mut self, start: Pose, goal: Vec3) -> Trajectory {
        self.reset();
        let budget = self.step_budget(start.translation, goal);
        let mut trajectory = Trajectory::default();
        let mut pose = start;

        debug!(
            "[Follower] find_path: {} -> {} (budget {})",
            start.translation, goal, budget
        );

        loop {
            let action = self.next_action_along(pose, goal);

            if action.is_terminal() {
                trajectory.push(pose, action);
                break;
            }

            // Last slot is reserved for the budget error
            if trajectory.len() + 1 >= budget {
                let err = FollowerError::StepBudgetExceeded { budget };
                warn!("[Follower] {}", err);
                self.last_failure = Some(err);
                self.retract_last();
                self.record(Action::Error);
                trajectory.push(pose, Action::Error);
                break;
            }

            trajectory.push(pose, action);
            if self.applicator.apply(action, &mut pose) {
                trace!("[Follower] {} collided at {}", action, pose.translation);
            }
        }

        debug!(
            "[Follower] find_path finished: {} actions, final state {}",
            trajectory.len(),
            self.state
        );
        trajectory
    }

    /// [`find_path`](Self::find_path) with raw arrays: start position
    /// `[x, y, z]`, start rotation `[x, y, z, w]`, goal `[x, y, z]`.
    pub fn find_path_arrays(
        &mut self,
        position: [f32; 3],
        rotation: [f32; 4],
        goal: [f32; 3],
    ) -> Vec<Action> {
        let start = Pose::from_arrays(position, rotation);
        self.find_path(start, Vec3::from_array(goal))
    }

    /// Safety cap on `find_path` length for this start and goal.
    pub fn step_budget(&self, start: Vec3, goal: Vec3) -> usize {
        let straight_steps = start.distance(goal) / self.config.forward_amount;
        let budget = (self.config.step_budget_factor * straight_steps).ceil();
        // Float-to-int `as` saturates, NaN maps to 0
        (budget as usize).clamp(self.config.min_step_budget, self.config.max_step_budget)
    }

    /// Clear history, thrashing window and last failure. Keeps
    /// configuration and collaborators.
    pub fn reset(&mut self) {
        self.history.clear();
        self.thrashing.clear();
        self.last_failure = None;
        self.state = FollowerState::Ready;
    }

    fn decide(&mut self, pose: Pose, goal: Vec3) -> Result<Action> {
        let current = self.oracle.distance(pose.translation, goal)?;
        if current <= self.config.goal_radius {
            debug!(
                "[Follower] goal reached: distance {:.3} <= {:.3}",
                current, self.config.goal_radius
            );
            return Ok(Action::Stop);
        }

        let thrashing = self.config.fix_thrashing && self.thrashing.is_thrashing();

        self.simulator.reset(pose);
        let mut viable: Vec<(Action, f32)> = Vec::with_capacity(Action::CANDIDATES.len());
        let mut collisions = 0;

        for candidate in Action::CANDIDATES {
            match self.simulator.try_step(
                &self.oracle,
                &self.applicator,
                candidate,
                pose,
                goal,
                current,
            ) {
                Ok(result) if result.collided => collisions += 1,
                Ok(result) => {
                    let score = self.simulator.scorer().score(&result, current);
                    viable.push((candidate, score));
                }
                Err(err) => trace!("[Follower] {} discarded: {}", candidate, err),
            }
        }

        if collisions == Action::CANDIDATES.len() {
            return Err(FollowerError::AllCandidatesCollide);
        }

        let Some(best) = self.simulator.scorer().select(viable.iter().copied()) else {
            return Err(FollowerError::Unreachable {
                from: pose.translation,
                to: goal,
            });
        };

        trace!(
            "[Follower] d={:.3} scores={:?} -> {}",
            current, viable, best
        );

        if thrashing {
            let is_viable = |action: Action| viable.iter().any(|(a, _)| *a == action);
            let corrective = if is_viable(Action::Forward) {
                Some(Action::Forward)
            } else {
                self.thrashing.last_turn().filter(|turn| is_viable(*turn))
            };
            if let Some(corrective) = corrective {
                debug!(
                    "[Follower] thrashing detected, overriding {} with {}",
                    best, corrective
                );
                return Ok(corrective);
            }
        }

        Ok(best)
    }

    fn record(&mut self, action: Action) {
        self.history.push(action);
        self.thrashing.record(action);
        self.state = match action {
            Action::Stop => FollowerState::Stopped,
            Action::Error => FollowerState::Errored,
            _ => FollowerState::Following,
        };
    }

    /// Undo the latest `record`, for a decision that is replaced.
    fn retract_last(&mut self) {
        self.history.pop();
        self.thrashing.retract();
    }

    // ===== Accessors =====

    /// State after the latest decision.
    pub fn state(&self) -> FollowerState {
        self.state
    }

    /// Every action returned since the last reset.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Does the trailing action window show left/right oscillation?
    pub fn is_thrashing(&self) -> bool {
        self.thrashing.is_thrashing()
    }

    /// Why the latest decision was `Error`, if it was.
    pub fn last_failure(&self) -> Option<&FollowerError> {
        self.last_failure.as_ref()
    }

    /// Follower configuration.
    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    /// Geodesic oracle.
    pub fn oracle(&self) -> &GeodesicOracle<P> {
        &self.oracle
    }

    /// Action applicator.
    pub fn applicator(&self) -> &A {
        &self.applicator
    }
}
