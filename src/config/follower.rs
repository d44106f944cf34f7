//! Follower configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigLoadError;
use crate::error::{FollowerError, Result};

/// Reward scorer weights.
///
/// All weights are expressed in units of one forward step of progress, so
/// the policy does not depend on the step size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Penalty applied at zero clearance; scales linearly down to zero at
    /// `close_to_obstacle_threshold`.
    #[serde(default = "defaults::obstacle_penalty")]
    pub obstacle_penalty: f32,

    /// Penalty per extra action in a lookahead primitive.
    #[serde(default = "defaults::primitive_length_penalty")]
    pub primitive_length_penalty: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            obstacle_penalty: defaults::obstacle_penalty(),
            primitive_length_penalty: defaults::primitive_length_penalty(),
        }
    }
}

/// Configuration for [`GreedyFollower`](crate::follower::GreedyFollower).
///
/// Set once at construction. Distances are in world units (meters),
/// angles in radians.
///
/// # Example
/// ```
/// use marga::config::FollowerConfig;
///
/// let config = FollowerConfig::new()
///     .with_forward_amount(0.25)
///     .with_turn_amount(15.0_f32.to_radians())
///     .with_goal_radius(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowerConfig {
    /// Distance to the goal at which the follower emits `Stop`.
    /// Default: 0.25
    #[serde(default = "defaults::goal_radius")]
    pub goal_radius: f32,

    /// Distance covered by one `Forward` action.
    /// Default: 0.25
    #[serde(default = "defaults::forward_amount")]
    pub forward_amount: f32,

    /// Angle covered by one `Left` / `Right` action (radians).
    /// Default: 10°
    #[serde(default = "defaults::turn_amount")]
    pub turn_amount: f32,

    /// Break left/right oscillation by forcing a forward step.
    /// Default: true
    #[serde(default = "defaults::enabled")]
    pub fix_thrashing: bool,

    /// Number of alternating turns that counts as thrashing.
    /// Default: 16
    #[serde(default = "defaults::thrashing_threshold")]
    pub thrashing_threshold: usize,

    /// Clearance below which candidates are penalized.
    /// Default: 0.2
    #[serde(default = "defaults::close_to_obstacle_threshold")]
    pub close_to_obstacle_threshold: f32,

    /// Score turns as "turn, keep turning, then step forward" primitives.
    /// Default: true
    #[serde(default = "defaults::enabled")]
    pub turn_lookahead: bool,

    /// Largest total rotation considered by turn lookahead (radians).
    /// Default: π
    #[serde(default = "defaults::max_lookahead_angle")]
    pub max_lookahead_angle: f32,

    /// Reward scorer weights.
    #[serde(default)]
    pub reward: RewardConfig,

    /// `find_path` budget as a multiple of straight-line steps to the goal.
    /// Default: 10.0
    #[serde(default = "defaults::step_budget_factor")]
    pub step_budget_factor: f32,

    /// Lower bound of the `find_path` step budget.
    /// Default: 100
    #[serde(default = "defaults::min_step_budget")]
    pub min_step_budget: usize,

    /// Upper bound of the `find_path` step budget.
    /// Default: 5000
    #[serde(default = "defaults::max_step_budget")]
    pub max_step_budget: usize,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            goal_radius: defaults::goal_radius(),
            forward_amount: defaults::forward_amount(),
            turn_amount: defaults::turn_amount(),
            fix_thrashing: true,
            thrashing_threshold: defaults::thrashing_threshold(),
            close_to_obstacle_threshold: defaults::close_to_obstacle_threshold(),
            turn_lookahead: true,
            max_lookahead_angle: defaults::max_lookahead_angle(),
            reward: RewardConfig::default(),
            step_budget_factor: defaults::step_budget_factor(),
            min_step_budget: defaults::min_step_budget(),
            max_step_budget: defaults::max_step_budget(),
        }
    }
}

impl FollowerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every invariant. Fails fast on the first bad value.
    pub fn validate(&self) -> Result<()> {
        require_positive("goal_radius", self.goal_radius)?;
        require_positive("forward_amount", self.forward_amount)?;
        require_positive("turn_amount", self.turn_amount)?;
        require_positive(
            "close_to_obstacle_threshold",
            self.close_to_obstacle_threshold,
        )?;
        require_positive("max_lookahead_angle", self.max_lookahead_angle)?;
        require_positive("step_budget_factor", self.step_budget_factor)?;
        require_non_negative("reward.obstacle_penalty", self.reward.obstacle_penalty)?;
        require_non_negative(
            "reward.primitive_length_penalty",
            self.reward.primitive_length_penalty,
        )?;

        if self.thrashing_threshold < 1 {
            return Err(FollowerError::misconfigured(
                "thrashing_threshold",
                "must be at least 1",
            ));
        }
        if self.min_step_budget < 1 {
            return Err(FollowerError::misconfigured(
                "min_step_budget",
                "must be at least 1",
            ));
        }
        if self.max_step_budget < self.min_step_budget {
            return Err(FollowerError::misconfigured(
                "max_step_budget",
                format!(
                    "{} is below min_step_budget {}",
                    self.max_step_budget, self.min_step_budget
                ),
            ));
        }
        Ok(())
    }

    /// Number of turn actions that make up `max_lookahead_angle`.
    ///
    /// Exact multiples count in full despite float rounding.
    pub fn max_lookahead_turns(&self) -> usize {
        ((self.max_lookahead_angle / self.turn_amount + 1e-4).floor() as usize).max(1)
    }

    // ===== YAML =====

    /// Load configuration from a YAML file and validate it.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML string and validate it.
    ///
    /// Omitted keys take their default values.
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, ConfigLoadError> {
        let config: FollowerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> std::result::Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    // ===== Builder Methods =====

    /// Builder-style setter for goal radius.
    pub fn with_goal_radius(mut self, radius: f32) -> Self {
        self.goal_radius = radius;
        self
    }

    /// Builder-style setter for forward step length.
    pub fn with_forward_amount(mut self, amount: f32) -> Self {
        self.forward_amount = amount;
        self
    }

    /// Builder-style setter for turn angle (radians).
    pub fn with_turn_amount(mut self, angle: f32) -> Self {
        self.turn_amount = angle;
        self
    }

    /// Builder-style setter for thrashing correction.
    pub fn with_fix_thrashing(mut self, enabled: bool) -> Self {
        self.fix_thrashing = enabled;
        self
    }

    /// Builder-style setter for the thrashing window length.
    pub fn with_thrashing_threshold(mut self, threshold: usize) -> Self {
        self.thrashing_threshold = threshold;
        self
    }

    /// Builder-style setter for the close-to-obstacle threshold.
    pub fn with_close_to_obstacle_threshold(mut self, threshold: f32) -> Self {
        self.close_to_obstacle_threshold = threshold;
        self
    }

    /// Builder-style setter for turn lookahead.
    pub fn with_turn_lookahead(mut self, enabled: bool) -> Self {
        self.turn_lookahead = enabled;
        self
    }

    /// Builder-style setter for the largest lookahead rotation.
    pub fn with_max_lookahead_angle(mut self, angle: f32) -> Self {
        self.max_lookahead_angle = angle;
        self
    }

    /// Builder-style setter for reward weights.
    pub fn with_reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }

    /// Builder-style setter for the step budget bounds.
    pub fn with_step_budget(mut self, factor: f32, min: usize, max: usize) -> Self {
        self.step_budget_factor = factor;
        self.min_step_budget = min;
        self.max_step_budget = max;
        self
    }
}

fn require_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FollowerError::misconfigured(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

fn require_non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FollowerError::misconfigured(
            name,
            format!("must be non-negative and finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = FollowerConfig::default();
        assert_eq!(config.goal_radius, 0.25);
        assert_eq!(config.forward_amount, 0.25);
        assert_relative_eq!(config.turn_amount, 0.174_532_92, epsilon = 1e-6);
        assert!(config.fix_thrashing);
        assert_eq!(config.thrashing_threshold, 16);
        assert_eq!(config.close_to_obstacle_threshold, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = FollowerConfig::new()
            .with_forward_amount(0.5)
            .with_fix_thrashing(false)
            .with_thrashing_threshold(4);

        assert_eq!(config.forward_amount, 0.5);
        assert!(!config.fix_thrashing);
        assert_eq!(config.thrashing_threshold, 4);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let cases = [
            FollowerConfig::new().with_goal_radius(0.0),
            FollowerConfig::new().with_forward_amount(-0.25),
            FollowerConfig::new().with_turn_amount(f32::NAN),
            FollowerConfig::new().with_close_to_obstacle_threshold(0.0),
            FollowerConfig::new().with_thrashing_threshold(0),
            FollowerConfig::new().with_step_budget(10.0, 0, 10),
            FollowerConfig::new().with_step_budget(10.0, 50, 10),
        ];

        for config in cases {
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err,
                FollowerError::MisconfiguredParameters { .. }
            ));
        }
    }

    #[test]
    fn test_max_lookahead_turns() {
        let config = FollowerConfig::default();
        // π / 10° = 18 turns
        assert_eq!(config.max_lookahead_turns(), 18);

        let config = FollowerConfig::new()
            .with_turn_amount(1.0)
            .with_max_lookahead_angle(0.5);
        assert_eq!(config.max_lookahead_turns(), 1);
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let yaml = r#"
forward_amount: 0.5
fix_thrashing: false
reward:
  obstacle_penalty: 0.1
"#;
        let config = FollowerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.forward_amount, 0.5);
        assert!(!config.fix_thrashing);
        assert_eq!(config.reward.obstacle_penalty, 0.1);
        assert_eq!(config.reward.primitive_length_penalty, 0.0125);
        assert_eq!(config.thrashing_threshold, 16);
    }

    #[test]
    fn test_yaml_rejects_invalid() {
        let result = FollowerConfig::from_yaml_str("goal_radius: -1.0\n");
        assert!(matches!(result, Err(ConfigLoadError::Invalid(_))));

        let result = FollowerConfig::from_yaml_str("goal_radius: [1, 2]\n");
        assert!(matches!(result, Err(ConfigLoadError::Parse(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = FollowerConfig::new().with_turn_amount(0.3);
        let yaml = config.to_yaml_string().unwrap();
        let parsed = FollowerConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
