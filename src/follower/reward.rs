//! Candidate scoring.

use crate::config::{FollowerConfig, RewardConfig};
use crate::core::Action;

use super::simulator::StepResult;

/// Scores simulated candidates and picks the best one.
///
/// ```text
/// score = (current − post) / forward_amount
///       − obstacle_penalty · (threshold − clearance) / threshold   [clearance < threshold]
///       − primitive_length_penalty · (primitive_len − 1)
/// ```
///
/// Colliding candidates score `−∞`.
#[derive(Clone, Debug)]
pub struct RewardScorer {
    weights: RewardConfig,
    forward_amount: f32,
    close_to_obstacle_threshold: f32,
}

impl RewardScorer {
    /// Create a scorer from follower configuration.
    pub fn new(config: &FollowerConfig) -> Self {
        Self {
            weights: config.reward.clone(),
            forward_amount: config.forward_amount,
            close_to_obstacle_threshold: config.close_to_obstacle_threshold,
        }
    }

    /// Score one simulated outcome.
    pub fn score(&self, result: &StepResult, current_distance: f32) -> f32 {
        if result.collided {
            return f32::NEG_INFINITY;
        }

        let progress = (current_distance - result.geodesic_distance) / self.forward_amount;

        let threshold = self.close_to_obstacle_threshold;
        let obstacle = if result.obstacle_distance < threshold {
            let closeness = (threshold - result.obstacle_distance.max(0.0)) / threshold;
            self.weights.obstacle_penalty * closeness
        } else {
            0.0
        };

        let primitive = self.weights.primitive_length_penalty
            * result.primitive_len.saturating_sub(1) as f32;

        progress - obstacle - primitive
    }

    /// Pick the highest score.
    ///
    /// Candidates are expected in tie-break priority order
    /// ([`Action::CANDIDATES`]); an equal score never displaces an earlier
    /// candidate.
    pub fn select<I>(&self, candidates: I) -> Option<Action>
    where
        I: IntoIterator<Item = (Action, f32)>,
    {
        let mut best: Option<(Action, f32)> = None;
        for (action, score) in candidates {
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((action, score));
            }
        }
        best.map(|(action, _)| action)
    }
}
