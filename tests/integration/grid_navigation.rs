//! Follower on the reference grid oracle.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use marga::grid::{GridPathFinder, NavGrid};
use marga::motion::KinematicApplicator;
use marga::oracle::PathFinder;
use marga::{Action, FollowerConfig, GreedyFollower, Pose};

use crate::init_logging;

/// 3m x 3m room with a wall at x = 1.5 from z = 0 to z = 1.6.
fn walled_room() -> GridPathFinder {
    let mut grid = NavGrid::new(30, 30, 0.1, Vec2::ZERO);
    grid.block_rect(Vec2::new(1.42, 0.0), Vec2::new(1.58, 1.6));
    GridPathFinder::new(grid)
}

#[test]
fn test_detours_around_wall() {
    init_logging();
    let finder = walled_room();
    let config = FollowerConfig::default().with_step_budget(40.0, 100, 2000);
    let applicator = KinematicApplicator::from_config(&finder, &config);
    let mut follower = GreedyFollower::new(&finder, applicator, config.clone()).unwrap();

    let start = Pose::from_yaw(Vec3::new(0.6, 0.0, 0.6), -FRAC_PI_2);
    let goal = Vec3::new(2.4, 0.0, 0.6);
    let trajectory = follower.find_trajectory(start, goal);

    assert!(
        trajectory.reached_goal(),
        "ended with {:?} after {} actions",
        trajectory.actions.last(),
        trajectory.len()
    );
    assert!(trajectory.len() <= follower.step_budget(start.translation, goal));

    let final_pose = trajectory.final_pose().unwrap();
    let remaining = finder
        .geodesic_distance(final_pose.translation, goal)
        .unwrap();
    assert!(remaining <= config.goal_radius);

    // The agent never entered the wall and had to go around its end
    assert!(
        trajectory
            .poses
            .iter()
            .all(|p| finder.grid().is_navigable(p.translation))
    );
    assert!(trajectory.poses.iter().any(|p| p.translation.z > 1.6));
}

#[test]
fn test_enclosed_goal_is_error() {
    let mut grid = NavGrid::new(30, 30, 0.1, Vec2::ZERO);
    // Box around (2.5, 2.5)
    grid.block_rect(Vec2::new(2.0, 2.0), Vec2::new(3.0, 2.1));
    grid.block_rect(Vec2::new(2.0, 2.9), Vec2::new(3.0, 3.0));
    grid.block_rect(Vec2::new(2.0, 2.0), Vec2::new(2.1, 3.0));
    grid.block_rect(Vec2::new(2.9, 2.0), Vec2::new(3.0, 3.0));
    let finder = GridPathFinder::new(grid);

    let config = FollowerConfig::default();
    let applicator = KinematicApplicator::from_config(&finder, &config);
    let mut follower = GreedyFollower::new(&finder, applicator, config).unwrap();

    let start = Pose::from_yaw(Vec3::new(0.5, 0.0, 0.5), 0.0);
    let actions = follower.find_path(start, Vec3::new(2.5, 0.0, 2.5));
    assert_eq!(actions, vec![Action::Error]);
}

#[test]
fn test_ascii_map_room() {
    init_logging();
    let grid = NavGrid::from_ascii(
        "
        ############
        #..........#
        #..........#
        #..........#
        #..........#
        ############
        ",
        0.25,
        Vec2::ZERO,
    );
    let finder = GridPathFinder::new(grid);
    let config = FollowerConfig::default();
    let applicator = KinematicApplicator::from_config(&finder, &config);
    let mut follower = GreedyFollower::new(&finder, applicator, config).unwrap();

    // Start facing -Z (yaw 0), goal along +X
    let start = Pose::from_yaw(Vec3::new(0.5, 0.0, 0.75), 0.0);
    let goal = Vec3::new(2.5, 0.0, 0.75);
    let actions = follower.find_path(start, goal);

    assert_eq!(actions.last(), Some(&Action::Stop));
    assert!(actions.contains(&Action::Right));
    assert!(!actions.contains(&Action::Error));
}
