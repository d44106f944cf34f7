//! # Marga: Greedy Geodesic Path Follower
//!
//! Converts a geodesic shortest path between two points in a navigable 3D
//! environment into discrete agent actions: move forward, turn left, turn
//! right, stop.
//!
//! ## Features
//!
//! - **Greedy local planning**: each step simulates every candidate action
//!   and picks the one with the best geodesic progress
//! - **Obstacle awareness**: candidates close to obstacles are penalized
//! - **Thrashing correction**: left/right oscillation is broken by a forced
//!   forward step
//! - **Pluggable collaborators**: any [`PathFinder`] back-end and any
//!   [`ActionApplicator`]; reference grid implementations are included
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::{Action, FollowerConfig, GreedyFollower, Pose};
//! use marga::grid::{GridPathFinder, NavGrid};
//! use marga::motion::KinematicApplicator;
//! use glam::{Vec2, Vec3};
//!
//! let mut grid = NavGrid::new(40, 40, 0.1, Vec2::ZERO);
//! grid.block_rect(Vec2::new(1.92, 0.0), Vec2::new(2.08, 2.5));
//! let finder = GridPathFinder::new(grid);
//!
//! let config = FollowerConfig::default().with_step_budget(40.0, 100, 2000);
//! let applicator = KinematicApplicator::from_config(&finder, &config);
//! let mut follower = GreedyFollower::new(&finder, applicator, config).unwrap();
//!
//! let start = Pose::from_yaw(Vec3::new(1.0, 0.0, 1.0), 0.0);
//! let goal = Vec3::new(3.0, 0.0, 1.0);
//! let actions = follower.find_path(start, goal);
//! println!("{} actions, last = {}", actions.len(), actions[actions.len() - 1]);
//! ```
//!
//! ## Coordinate Frame
//!
//! - **Y-up**: the ground plane is XZ
//! - **Forward**: the agent looks along its local −Z axis
//! - **Rotation**: positive yaw about +Y turns the agent left
//!
//! ## Architecture
//!
//! - [`core`]: Pose and Action
//! - [`config`]: Follower configuration and YAML loading
//! - [`error`]: Error taxonomy
//! - [`oracle`]: Pathfinding capability and adapter
//! - [`motion`]: Action applicators
//! - [`follower`]: Step simulator, reward scorer, thrashing detector, follower
//! - [`grid`]: Reference grid-based oracle
//!
//! ## Decision Flow
//!
//! ```text
//!   pose, goal
//!       │
//!       ▼
//!  ┌──────────────┐  distance ≤ goal_radius  ┌──────┐
//!  │ Geodesic     │─────────────────────────►│ Stop │
//!  │ Oracle       │                          └──────┘
//!  └──────┬───────┘
//!         │ Forward / Left / Right
//!         ▼
//!  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!  │ Step         │──►│ Reward       │──►│ Thrashing    │──► Action
//!  │ Simulator    │   │ Scorer       │   │ Detector     │
//!  └──────────────┘   └──────────────┘   └──────────────┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod follower;
pub mod grid;
pub mod motion;
pub mod oracle;

// Re-export main types at crate root
pub use config::{ConfigLoadError, FollowerConfig, RewardConfig};
pub use crate::core::{Action, Pose};
pub use error::{FollowerError, Result};
pub use follower::{FollowerState, GreedyFollower, Trajectory};

// Re-export extensibility traits
pub use motion::{ActionApplicator, Navigable};
pub use oracle::{PathFinder, ShortestPath};
