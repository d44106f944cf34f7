//! Follower behavior in an analytic straight corridor.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use marga::motion::{FnApplicator, KinematicApplicator};
use marga::{Action, FollowerConfig, FollowerError, FollowerState, GreedyFollower, Pose};

use crate::{StraightCorridor, init_logging};

fn corridor_follower(
    config: FollowerConfig,
) -> GreedyFollower<StraightCorridor, KinematicApplicator<StraightCorridor>> {
    let corridor = StraightCorridor::new(1.0, 6.0);
    let applicator = KinematicApplicator::from_config(corridor, &config);
    GreedyFollower::new(corridor, applicator, config).unwrap()
}

#[test]
fn test_straight_corridor_only_forward_then_stop() {
    init_logging();
    let mut follower = corridor_follower(FollowerConfig::new().with_goal_radius(0.2));

    // Facing +X, goal 4.5m ahead
    let start = Pose::from_yaw(Vec3::new(0.5, 0.0, 0.0), -FRAC_PI_2);
    let actions = follower.find_path(start, Vec3::new(5.0, 0.0, 0.0));

    let (last, rest) = actions.split_last().unwrap();
    assert_eq!(*last, Action::Stop);
    assert_eq!(rest.len(), 18);
    assert!(rest.iter().all(|a| *a == Action::Forward));
    assert_eq!(follower.state(), FollowerState::Stopped);
}

#[test]
fn test_goal_behind_turns_one_way() {
    init_logging();
    let mut follower = corridor_follower(FollowerConfig::new().with_goal_radius(0.2));

    // Facing -X, rotated 10° left; the goal is 170° further left
    let start = Pose::from_yaw(Vec3::new(1.0, 0.0, 0.0), FRAC_PI_2 + 10.0_f32.to_radians());
    let trajectory = follower.find_trajectory(start, Vec3::new(4.0, 0.0, 0.0));

    assert!(trajectory.reached_goal());
    assert_eq!(trajectory.count(Action::Right), 0);
    assert_eq!(trajectory.count(Action::Left), 17);
    assert_eq!(trajectory.count(Action::Forward), 12);

    // All turning happens before any forward step
    let first_forward = trajectory
        .actions
        .iter()
        .position(|a| *a == Action::Forward)
        .unwrap();
    assert!(trajectory.actions[..first_forward]
        .iter()
        .all(|a| *a == Action::Left));

    let final_pose = trajectory.final_pose().unwrap();
    assert!(final_pose.translation.distance(Vec3::new(4.0, 0.0, 0.0)) <= 0.2);
}

#[test]
fn test_trajectory_poses_follow_actions() {
    let config = FollowerConfig::new().with_goal_radius(0.2);
    let mut follower = corridor_follower(config.clone());
    let start = Pose::from_yaw(Vec3::new(0.5, 0.0, 0.2), -FRAC_PI_2);
    let trajectory = follower.find_trajectory(start, Vec3::new(3.0, 0.0, 0.2));

    assert_eq!(trajectory.actions.len(), trajectory.poses.len());
    assert_eq!(trajectory.poses[0], start);
    for (i, pair) in trajectory.poses.windows(2).enumerate() {
        let step = pair[0].translation.distance(pair[1].translation);
        match trajectory.actions[i] {
            Action::Forward => assert!((step - config.forward_amount).abs() < 1e-4),
            _ => assert!(step < 1e-6),
        }
    }
}

#[test]
fn test_find_path_never_exceeds_budget() {
    init_logging();
    let config = FollowerConfig::new().with_step_budget(2.0, 10, 10);
    let corridor = StraightCorridor::new(1.0, 6.0);
    // An agent that never moves and never collides
    let frozen = FnApplicator::new(
        |_: &mut Pose| false,
        |_: &mut Pose| false,
        |_: &mut Pose| false,
    );
    let mut follower = GreedyFollower::new(corridor, frozen, config).unwrap();

    let start = Pose::from_yaw(Vec3::new(0.5, 0.0, 0.0), -FRAC_PI_2);
    let goal = Vec3::new(5.0, 0.0, 0.0);
    let actions = follower.find_path(start, goal);

    assert_eq!(actions.len(), follower.step_budget(start.translation, goal));
    assert_eq!(actions.last(), Some(&Action::Error));
    assert_eq!(
        follower.last_failure(),
        Some(&FollowerError::StepBudgetExceeded { budget: 10 })
    );
}

#[test]
fn test_dead_end_against_wall_turns_away() {
    let mut follower = corridor_follower(FollowerConfig::default());

    // Nose against the far end cap, goal behind
    let pose = Pose::from_yaw(Vec3::new(5.9, 0.0, 0.0), -FRAC_PI_2);
    let action = follower.next_action_along(pose, Vec3::new(1.0, 0.0, 0.0));
    assert!(action.is_turn());
    assert_eq!(follower.state(), FollowerState::Following);
}

#[test]
fn test_goal_outside_corridor_is_error() {
    let mut follower = corridor_follower(FollowerConfig::default());
    let pose = Pose::from_yaw(Vec3::new(1.0, 0.0, 0.0), -FRAC_PI_2);

    let action = follower.next_action_along(pose, Vec3::new(1.0, 0.0, 3.0));
    assert_eq!(action, Action::Error);
    assert!(matches!(
        follower.last_failure(),
        Some(FollowerError::Unreachable { .. })
    ));

    follower.reset();
    assert_eq!(follower.state(), FollowerState::Ready);
    assert!(!follower.is_thrashing());
}
