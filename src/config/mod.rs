//! Follower configuration.
//!
//! All parameters live in [`FollowerConfig`] and can be loaded from a
//! single YAML file. Omitted keys fall back to the values in `defaults`.

mod defaults;
mod error;
mod follower;

pub use error::ConfigLoadError;
pub use follower::{FollowerConfig, RewardConfig};
