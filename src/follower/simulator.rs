//! Candidate simulation on scratch poses.

use glam::Vec3;
use log::trace;

use super::reward::RewardScorer;
use crate::config::FollowerConfig;
use crate::core::{Action, Pose};
use crate::error::Result;
use crate::motion::ActionApplicator;
use crate::oracle::{GeodesicOracle, PathFinder};

/// Outcome of simulating one candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    /// Geodesic distance to the goal after the primitive.
    pub geodesic_distance: f32,
    /// Clearance after the primitive, capped at the close-to-obstacle threshold.
    pub obstacle_distance: f32,
    /// Did the candidate action itself collide?
    pub collided: bool,
    /// Number of actions the evaluated primitive spans.
    pub primitive_len: usize,
}

/// Working copies of the agent pose, one per candidate plus one for
/// lookahead probes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScratchPoses {
    forward: Pose,
    left: Pose,
    right: Pose,
    try_step: Pose,
}

impl ScratchPoses {
    /// Reinitialize every slot from the real pose.
    pub fn reset(&mut self, pose: Pose) {
        self.forward = pose;
        self.left = pose;
        self.right = pose;
        self.try_step = pose;
    }

    /// Candidate slot and probe slot as disjoint borrows.
    ///
    /// `Stop` and `Error` share the forward slot; they are never simulated.
    fn slots_mut(&mut self, candidate: Action) -> (&mut Pose, &mut Pose) {
        let slot = match candidate {
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            _ => &mut self.forward,
        };
        (slot, &mut self.try_step)
    }
}

/// Simulates candidates without touching the caller's pose.
#[derive(Clone, Debug)]
pub struct StepSimulator {
    scratch: ScratchPoses,
    scorer: RewardScorer,
    close_to_obstacle_threshold: f32,
    turn_lookahead: bool,
    max_lookahead_turns: usize,
}

impl StepSimulator {
    /// Create a simulator from follower configuration.
    pub fn new(config: &FollowerConfig) -> Self {
        Self {
            scratch: ScratchPoses::default(),
            scorer: RewardScorer::new(config),
            close_to_obstacle_threshold: config.close_to_obstacle_threshold,
            turn_lookahead: config.turn_lookahead,
            max_lookahead_turns: config.max_lookahead_turns(),
        }
    }

    /// Scorer used for lookahead probes and candidate selection.
    pub fn scorer(&self) -> &RewardScorer {
        &self.scorer
    }

    /// Reinitialize scratch poses before a decision.
    pub fn reset(&mut self, pose: Pose) {
        self.scratch.reset(pose);
    }

    /// Simulate `candidate` from `current_pose`.
    ///
    /// Fails with `Unreachable` when the non-colliding outcome has no path
    /// to the goal. A collided candidate never fails: its distance is
    /// reported as `f32::INFINITY` if the oracle cannot answer, since it is
    /// never scored on distance.
    pub fn try_step<P, A>(
        &mut self,
        oracle: &GeodesicOracle<P>,
        applicator: &A,
        candidate: Action,
        current_pose: Pose,
        goal: Vec3,
        current_distance: f32,
    ) -> Result<StepResult>
    where
        P: PathFinder,
        A: ActionApplicator,
    {
        let turn_lookahead = self.turn_lookahead;
        let (slot, _) = self.scratch.slots_mut(candidate);
        *slot = current_pose;
        let collided = applicator.apply(candidate, slot);
        let moved = *slot;

        if collided {
            return Ok(StepResult {
                geodesic_distance: oracle
                    .distance(moved.translation, goal)
                    .unwrap_or(f32::INFINITY),
                obstacle_distance: oracle
                    .obstacle_distance(moved.translation, self.close_to_obstacle_threshold),
                collided: true,
                primitive_len: 1,
            });
        }

        if candidate.is_turn()
            && turn_lookahead
            && let Some(best) = self.lookahead(oracle, applicator, candidate, goal, current_distance)
        {
            return Ok(best);
        }

        self.evaluate(oracle, moved, goal, 1)
    }

    /// Best "keep turning, then step forward" primitive for a turn candidate
    /// whose first turn is already applied to its scratch slot.
    fn lookahead<P, A>(
        &mut self,
        oracle: &GeodesicOracle<P>,
        applicator: &A,
        candidate: Action,
        goal: Vec3,
        current_distance: f32,
    ) -> Option<StepResult>
    where
        P: PathFinder,
        A: ActionApplicator,
    {
        let threshold = self.close_to_obstacle_threshold;
        let mut best: Option<(StepResult, f32)> = None;

        for extra in 0..self.max_lookahead_turns {
            let (slot, probe) = self.scratch.slots_mut(candidate);
            if extra > 0 && applicator.apply(candidate, slot) {
                break;
            }
            *probe = *slot;
            if applicator.move_forward(probe) {
                continue;
            }
            let Ok(geodesic_distance) = oracle.distance(probe.translation, goal) else {
                continue;
            };
            let result = StepResult {
                geodesic_distance,
                obstacle_distance: oracle.obstacle_distance(probe.translation, threshold),
                collided: false,
                primitive_len: extra + 2,
            };
            let score = self.scorer.score(&result, current_distance);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((result, score));
            }
        }

        if let Some((result, score)) = best {
            trace!(
                "[StepSim] {} lookahead: {} turns, score {:.3}",
                candidate,
                result.primitive_len - 1,
                score
            );
        }
        best.map(|(result, _)| result)
    }

    fn evaluate<P: PathFinder>(
        &self,
        oracle: &GeodesicOracle<P>,
        pose: Pose,
        goal: Vec3,
        primitive_len: usize,
    ) -> Result<StepResult> {
        let geodesic_distance = oracle.distance(pose.translation, goal)?;
        Ok(StepResult {
            geodesic_distance,
            obstacle_distance: oracle
                .obstacle_distance(pose.translation, self.close_to_obstacle_threshold),
            collided: false,
            primitive_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::FnApplicator;
    use crate::oracle::ShortestPath;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    /// Obstacle-free plane with Euclidean distances.
    struct OpenPlane;

    impl PathFinder for OpenPlane {
        fn find_path(&self, start: Vec3, end: Vec3) -> Option<ShortestPath> {
            Some(ShortestPath::from_points(vec![start, end]))
        }

        fn distance_to_closest_obstacle(&self, _point: Vec3, max_search_radius: f32) -> f32 {
            max_search_radius
        }
    }

    fn stepper(turn: f32) -> impl ActionApplicator {
        FnApplicator::new(
            |pose: &mut Pose| {
                *pose = pose.moved_forward(0.25);
                false
            },
            move |pose: &mut Pose| {
                *pose = pose.turned(turn);
                false
            },
            move |pose: &mut Pose| {
                *pose = pose.turned(-turn);
                false
            },
        )
    }

    #[test]
    fn test_forward_step() {
        let config = FollowerConfig::default();
        let mut sim = StepSimulator::new(&config);
        let oracle = GeodesicOracle::new(OpenPlane);
        let pose = Pose::from_yaw(Vec3::ZERO, -FRAC_PI_2);
        let goal = Vec3::new(2.0, 0.0, 0.0);

        sim.reset(pose);
        let result = sim
            .try_step(&oracle, &stepper(0.1), Action::Forward, pose, goal, 2.0)
            .unwrap();
        assert_relative_eq!(result.geodesic_distance, 1.75, epsilon = 1e-5);
        assert!(!result.collided);
        assert_eq!(result.primitive_len, 1);
    }

    #[test]
    fn test_caller_pose_untouched() {
        let config = FollowerConfig::default();
        let mut sim = StepSimulator::new(&config);
        let oracle = GeodesicOracle::new(OpenPlane);
        let pose = Pose::identity();
        let copy = pose;

        sim.reset(pose);
        for candidate in Action::CANDIDATES {
            sim.try_step(&oracle, &stepper(0.1), candidate, pose, Vec3::X, 1.0)
                .unwrap();
        }
        assert_eq!(pose, copy);
    }

    #[test]
    fn test_lookahead_finds_turn_primitive() {
        let config = FollowerConfig::new().with_turn_amount(FRAC_PI_2 / 3.0);
        let mut sim = StepSimulator::new(&config);
        let oracle = GeodesicOracle::new(OpenPlane);
        // Looking down -Z, goal to the left (-X)
        let pose = Pose::identity();
        let goal = Vec3::new(-2.0, 0.0, 0.0);

        sim.reset(pose);
        let left = sim
            .try_step(&oracle, &stepper(config.turn_amount), Action::Left, pose, goal, 2.0)
            .unwrap();
        // Three 30° turns face the goal, then one forward step
        assert_eq!(left.primitive_len, 4);
        assert_relative_eq!(left.geodesic_distance, 1.75, epsilon = 1e-4);

        let right = sim
            .try_step(&oracle, &stepper(config.turn_amount), Action::Right, pose, goal, 2.0)
            .unwrap();
        assert!(right.geodesic_distance > left.geodesic_distance);
    }

    #[test]
    fn test_lookahead_disabled() {
        let config = FollowerConfig::new().with_turn_lookahead(false);
        let mut sim = StepSimulator::new(&config);
        let oracle = GeodesicOracle::new(OpenPlane);
        let pose = Pose::identity();

        sim.reset(pose);
        let result = sim
            .try_step(&oracle, &stepper(0.1), Action::Left, pose, Vec3::X, 1.0)
            .unwrap();
        assert_eq!(result.primitive_len, 1);
        assert_relative_eq!(result.geodesic_distance, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_collision_reported() {
        let config = FollowerConfig::default();
        let mut sim = StepSimulator::new(&config);
        let oracle = GeodesicOracle::new(OpenPlane);
        let blocked = FnApplicator::new(
            |_: &mut Pose| true,
            |_: &mut Pose| true,
            |_: &mut Pose| true,
        );

        sim.reset(Pose::identity());
        for candidate in Action::CANDIDATES {
            let result = sim
                .try_step(&oracle, &blocked, candidate, Pose::identity(), Vec3::X, 1.0)
                .unwrap();
            assert!(result.collided);
        }
    }
}
