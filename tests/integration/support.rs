//! Shared test collaborators.

use glam::Vec3;
use marga::motion::Navigable;
use marga::oracle::{PathFinder, ShortestPath};

/// Initialize `env_logger` once for the whole test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Straight corridor along +X: `0 ≤ x ≤ length`, `|z| ≤ half_width`.
///
/// Convex, so geodesic distance is the Euclidean distance. Walls are the
/// two long sides and both end caps.
#[derive(Clone, Copy, Debug)]
pub struct StraightCorridor {
    pub half_width: f32,
    pub length: f32,
}

impl StraightCorridor {
    pub fn new(half_width: f32, length: f32) -> Self {
        Self { half_width, length }
    }

    fn contains(&self, point: Vec3) -> bool {
        (0.0..=self.length).contains(&point.x) && point.z.abs() <= self.half_width
    }
}

impl PathFinder for StraightCorridor {
    fn find_path(&self, start: Vec3, end: Vec3) -> Option<ShortestPath> {
        if !self.contains(start) || !self.contains(end) {
            return None;
        }
        Some(ShortestPath::from_points(vec![start, end]))
    }

    fn distance_to_closest_obstacle(&self, point: Vec3, max_search_radius: f32) -> f32 {
        if !self.contains(point) {
            return 0.0;
        }
        (self.half_width - point.z.abs())
            .min(point.x)
            .min(self.length - point.x)
            .clamp(0.0, max_search_radius)
    }
}

impl Navigable for StraightCorridor {
    fn is_navigable(&self, point: Vec3) -> bool {
        self.contains(point)
    }
}
