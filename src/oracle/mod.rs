//! Geodesic pathfinding oracle.
//!
//! The follower never plans globally. It asks an external [`PathFinder`]
//! for shortest navigable-surface distances and for clearance to the
//! nearest obstacle, through the [`GeodesicOracle`] adapter.

mod adapter;

pub use adapter::GeodesicOracle;

use std::rc::Rc;
use std::sync::Arc;

use glam::Vec3;

/// Shortest path between two points on the navigable surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShortestPath {
    /// Waypoints from start to end (inclusive).
    pub points: Vec<Vec3>,
    /// Length of the path along the navigable surface.
    pub geodesic_distance: f32,
}

impl ShortestPath {
    /// Create a path and compute its length from the waypoints.
    pub fn from_points(points: Vec<Vec3>) -> Self {
        let geodesic_distance = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        Self {
            points,
            geodesic_distance,
        }
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path has no waypoints.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Pathfinding capability supplied by the navigation back-end.
///
/// Implementations must be deterministic for a given environment.
pub trait PathFinder {
    /// Shortest path from `start` to `end`, or `None` if unreachable.
    fn find_path(&self, start: Vec3, end: Vec3) -> Option<ShortestPath>;

    /// Shortest navigable-surface distance from `start` to `end`.
    ///
    /// The default implementation goes through [`find_path`](Self::find_path).
    /// Back-ends that can answer distance queries without building the
    /// waypoint list should override it.
    fn geodesic_distance(&self, start: Vec3, end: Vec3) -> Option<f32> {
        self.find_path(start, end).map(|path| path.geodesic_distance)
    }

    /// Distance from `point` to the closest obstacle, capped at
    /// `max_search_radius`.
    fn distance_to_closest_obstacle(&self, point: Vec3, max_search_radius: f32) -> f32;
}

impl<T: PathFinder + ?Sized> PathFinder for &T {
    fn find_path(&self, start: Vec3, end: Vec3) -> Option<ShortestPath> {
        (**self).find_path(start, end)
    }

    fn geodesic_distance(&self, start: Vec3, end: Vec3) -> Option<f32> {
        (**self).geodesic_distance(start, end)
    }

    fn distance_to_closest_obstacle(&self, point: Vec3, max_search_radius: f32) -> f32 {
        (**self).distance_to_closest_obstacle(point, max_search_radius)
    }
}

impl<T: PathFinder + ?Sized> PathFinder for Arc<T> {
    fn find_path(&self, start: Vec3, end: Vec3) -> Option<ShortestPath> {
        (**self).find_path(start, end)
    }

    fn geodesic_distance(&self, start: Vec3, end: Vec3) -> Option<f32> {
        (**self).geodesic_distance(start, end)
    }

    fn distance_to_closest_obstacle(&self, point: Vec3, max_search_radius: f32) -> f32 {
        (**self).distance_to_closest_obstacle(point, max_search_radius)
    }
}

impl<T: PathFinder + ?Sized> PathFinder for Rc<T> {
    fn find_path(&self, start: Vec3, end: Vec3) -> Option<ShortestPath> {
        (**self).find_path(start, end)
    }

    fn geodesic_distance(&self, start: Vec3, end: Vec3) -> Option<f32> {
        (**self).geodesic_distance(start, end)
    }

    fn distance_to_closest_obstacle(&self, point: Vec3, max_search_radius: f32) -> f32 {
        (**self).distance_to_closest_obstacle(point, max_search_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shortest_path_length() {
        let path = ShortestPath::from_points(vec![
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 4.0),
        ]);
        assert_eq!(path.len(), 3);
        assert_relative_eq!(path.geodesic_distance, 7.0);

        let empty = ShortestPath::from_points(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.geodesic_distance, 0.0);
    }
}
