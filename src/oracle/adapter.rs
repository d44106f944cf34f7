//! Adapter between the follower and a [`PathFinder`].

use glam::Vec3;
use log::trace;

use super::{PathFinder, ShortestPath};
use crate::error::{FollowerError, Result};

/// Thin query wrapper over a [`PathFinder`].
///
/// Turns "no path" and non-finite lengths into
/// [`FollowerError::Unreachable`] so callers can propagate with `?`.
/// Holds no state beyond the wrapped pathfinder.
#[derive(Clone, Debug)]
pub struct GeodesicOracle<P> {
    pathfinder: P,
}

impl<P: PathFinder> GeodesicOracle<P> {
    /// Wrap a pathfinder.
    pub fn new(pathfinder: P) -> Self {
        Self { pathfinder }
    }

    /// Shortest navigable-surface distance from `a` to `b`.
    pub fn distance(&self, a: Vec3, b: Vec3) -> Result<f32> {
        match self.pathfinder.geodesic_distance(a, b) {
            Some(d) if d.is_finite() => Ok(d),
            _ => {
                trace!("[Oracle] unreachable: {} -> {}", a, b);
                Err(FollowerError::Unreachable { from: a, to: b })
            }
        }
    }

    /// Full shortest path from `a` to `b`.
    pub fn shortest_path(&self, a: Vec3, b: Vec3) -> Result<ShortestPath> {
        match self.pathfinder.find_path(a, b) {
            Some(path) if path.geodesic_distance.is_finite() => Ok(path),
            _ => Err(FollowerError::Unreachable { from: a, to: b }),
        }
    }

    /// Clearance at `point`, capped at `max_search_radius`.
    pub fn obstacle_distance(&self, point: Vec3, max_search_radius: f32) -> f32 {
        self.pathfinder
            .distance_to_closest_obstacle(point, max_search_radius)
    }

    /// Access the wrapped pathfinder.
    pub fn pathfinder(&self) -> &P {
        &self.pathfinder
    }

    /// Unwrap into the pathfinder.
    pub fn into_inner(self) -> P {
        self.pathfinder
    }
}
