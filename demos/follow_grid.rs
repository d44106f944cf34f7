//! Greedy follower on an ASCII grid scenario.
//!
//! Loads a YAML scenario (map, start pose, goal, follower settings), runs
//! `find_trajectory` against the reference grid oracle and prints the
//! resulting action sequence.
//!
//! Usage:
//!   cargo run --example follow_grid
//!   cargo run --example follow_grid -- --scenario demos/scenarios/detour.yaml --poses
//!   RUST_LOG=marga=debug cargo run --example follow_grid

use std::path::PathBuf;

use clap::Parser;
use glam::{Vec2, Vec3};
use serde::Deserialize;

use marga::grid::{GridPathFinder, NavGrid};
use marga::motion::KinematicApplicator;
use marga::{Action, FollowerConfig, GreedyFollower, Pose};

/// Run the greedy follower on a grid scenario
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file path
    #[arg(short, long, default_value = "demos/scenarios/detour.yaml")]
    scenario: PathBuf,

    /// Print the pose before every action
    #[arg(short, long)]
    poses: bool,
}

/// Scenario file layout.
#[derive(Debug, Deserialize)]
struct Scenario {
    /// Scenario name
    name: String,
    /// Cell size in meters
    resolution: f32,
    /// World (x, z) of the map's first cell corner
    #[serde(default)]
    origin: [f32; 2],
    /// ASCII map, `#` is blocked
    map: String,
    /// Starting pose
    start: StartPose,
    /// Goal position
    goal: [f32; 3],
    /// Follower settings; omitted keys use defaults
    #[serde(default)]
    follower: FollowerConfig,
}

#[derive(Debug, Deserialize)]
struct StartPose {
    position: [f32; 3],
    #[serde(default)]
    yaw_degrees: f32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let scenario: Scenario = match std::fs::read_to_string(&args.scenario)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_yaml::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.scenario.display(), e);
            std::process::exit(1);
        }
    };

    let grid = NavGrid::from_ascii(
        &scenario.map,
        scenario.resolution,
        Vec2::from_array(scenario.origin),
    );
    println!(
        "Scenario '{}': {}x{} cells at {:.2}m",
        scenario.name,
        grid.width(),
        grid.height(),
        grid.resolution()
    );
    let finder = GridPathFinder::new(grid);

    let config = scenario.follower;
    let applicator = KinematicApplicator::from_config(&finder, &config);
    let mut follower = match GreedyFollower::new(&finder, applicator, config) {
        Ok(follower) => follower,
        Err(e) => {
            eprintln!("Invalid follower settings: {}", e);
            std::process::exit(1);
        }
    };

    let start = Pose::from_yaw(
        Vec3::from_array(scenario.start.position),
        scenario.start.yaw_degrees.to_radians(),
    );
    let goal = Vec3::from_array(scenario.goal);
    let trajectory = follower.find_trajectory(start, goal);

    if args.poses {
        for (action, pose) in trajectory.actions.iter().zip(&trajectory.poses) {
            println!(
                "  ({:6.2}, {:6.2}) yaw {:7.1}°  -> {}",
                pose.translation.x,
                pose.translation.z,
                pose.yaw().to_degrees(),
                action
            );
        }
    }

    let codes: Vec<String> = trajectory
        .actions
        .iter()
        .map(|a| a.code().to_string())
        .collect();
    println!("Actions: [{}]", codes.join(", "));
    println!(
        "{} actions: {} forward, {} left, {} right",
        trajectory.len(),
        trajectory.count(Action::Forward),
        trajectory.count(Action::Left),
        trajectory.count(Action::Right)
    );

    if trajectory.reached_goal() {
        println!("Goal reached");
    } else {
        let reason = follower
            .last_failure()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("Failed: {}", reason);
        std::process::exit(2);
    }
}
