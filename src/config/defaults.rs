//! Default value functions for serde deserialization.

pub fn goal_radius() -> f32 {
    0.25
}

pub fn forward_amount() -> f32 {
    0.25
}

pub fn turn_amount() -> f32 {
    10.0_f32.to_radians()
}

pub fn enabled() -> bool {
    true
}

pub fn thrashing_threshold() -> usize {
    16
}

pub fn close_to_obstacle_threshold() -> f32 {
    0.2
}

pub fn max_lookahead_angle() -> f32 {
    std::f32::consts::PI
}

pub fn obstacle_penalty() -> f32 {
    0.25
}

pub fn primitive_length_penalty() -> f32 {
    0.0125
}

pub fn step_budget_factor() -> f32 {
    10.0
}

pub fn min_step_budget() -> usize {
    100
}

pub fn max_step_budget() -> usize {
    5000
}
