//! Left/right oscillation detection.

use std::collections::VecDeque;

use crate::core::Action;

/// Sliding window over the most recent actions.
///
/// Thrashing is a full window of strictly alternating turns:
/// `L R L R ...` or `R L R L ...`.
#[derive(Clone, Debug)]
pub struct ThrashingDetector {
    window: VecDeque<Action>,
    threshold: usize,
}

impl ThrashingDetector {
    /// Create a detector with a window of `threshold` actions.
    pub fn new(threshold: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(threshold),
            threshold,
        }
    }

    /// Push an action, evicting the oldest once the window is full.
    pub fn record(&mut self, action: Action) {
        self.window.push_back(action);
        while self.window.len() > self.threshold {
            self.window.pop_front();
        }
    }

    /// Is the window full of alternating turns?
    pub fn is_thrashing(&self) -> bool {
        if self.window.len() < self.threshold {
            return false;
        }
        if !self.window.iter().all(|a| a.is_turn()) {
            return false;
        }
        self.window
            .iter()
            .zip(self.window.iter().skip(1))
            .all(|(a, b)| a != b)
    }

    /// Most recent turn in the window, if any.
    pub fn last_turn(&self) -> Option<Action> {
        self.window.iter().rev().copied().find(|a| a.is_turn())
    }

    /// Forget all recorded actions.
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Window contents, oldest first.
    pub fn window(&self) -> impl Iterator<Item = Action> + '_ {
        self.window.iter().copied()
    }

    /// Drop the most recent action. Entries already evicted stay evicted.
    pub fn retract(&mut self) -> Option<Action> {
        self.window.pop_back()
    }
}
