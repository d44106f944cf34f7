//! Integration tests for marga
//!
//! These tests drive the follower end to end through its public API:
//! an analytic corridor oracle, the reference grid oracle, and YAML
//! configuration loading.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration -- --nocapture
//! RUST_LOG=marga=trace cargo test --test integration grid_navigation
//! ```

mod config_yaml;
mod corridor;
mod grid_navigation;
mod support;

pub use support::{StraightCorridor, init_logging};
