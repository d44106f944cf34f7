//! Grid-based geodesic oracle.

use std::cell::RefCell;

use glam::Vec3;
use log::{debug, trace};

use super::distance::{GoalField, clearance_field, line_of_sight};
use super::NavGrid;
use crate::core::planar_distance;
use crate::motion::Navigable;
use crate::oracle::{PathFinder, ShortestPath};

/// [`PathFinder`] over a [`NavGrid`].
///
/// Distances are measured on the XZ plane:
///
/// 1. If the straight segment is clear, the exact Euclidean distance
/// 2. Otherwise the best entry into the goal's Dijkstra field from one of
///    the 3x3 cells around the start that the start can see
///
/// The goal field is cached for the most recent goal, so repeated queries
/// toward the same goal (the follower's access pattern) cost one field
/// computation. The cache makes this type `!Sync`.
///
/// # Example
/// ```
/// use marga::grid::{GridPathFinder, NavGrid};
/// use marga::oracle::PathFinder;
/// use glam::{Vec2, Vec3};
///
/// let mut grid = NavGrid::new(20, 20, 0.1, Vec2::ZERO);
/// grid.block_rect(Vec2::new(0.92, 0.0), Vec2::new(1.08, 1.5));
/// let finder = GridPathFinder::new(grid);
///
/// let d = finder
///     .geodesic_distance(Vec3::new(0.5, 0.0, 0.5), Vec3::new(1.5, 0.0, 0.5))
///     .unwrap();
/// assert!(d > 1.0);
/// ```
#[derive(Debug)]
pub struct GridPathFinder {
    grid: NavGrid,
    /// Center-to-center distance to the nearest blocked cell.
    clearance: Vec<f32>,
    goal_field: RefCell<Option<GoalField>>,
}

impl GridPathFinder {
    /// Wrap a grid. Computes the clearance field once.
    pub fn new(grid: NavGrid) -> Self {
        let clearance = clearance_field(&grid);
        debug!(
            "[GridOracle] {}x{} grid at {:.2}m, {} blocked cells",
            grid.width(),
            grid.height(),
            grid.resolution(),
            grid.blocked_cells().count()
        );
        Self {
            grid,
            clearance,
            goal_field: RefCell::new(None),
        }
    }

    /// Access the underlying grid.
    pub fn grid(&self) -> &NavGrid {
        &self.grid
    }

    /// Drop the cached goal field.
    pub fn clear_cache(&self) {
        self.goal_field.borrow_mut().take();
    }

    /// Run `f` against the goal field for `goal`, computing it if needed.
    ///
    /// Returns `None` if the goal is not navigable.
    fn with_goal_field<R>(&self, goal: Vec3, f: impl FnOnce(&GoalField) -> R) -> Option<R> {
        let mut cache = self.goal_field.borrow_mut();
        let fresh = cache.as_ref().is_some_and(|field| field.is_for(goal));
        if !fresh {
            let field = GoalField::compute(&self.grid, goal)?;
            debug!(
                "[GridOracle] goal field for ({:.2}, {:.2}): {} cells reached",
                goal.x,
                goal.z,
                field.reached()
            );
            *cache = Some(field);
        }
        cache.as_ref().map(f)
    }

    /// Best entry cell into the goal field from `start`.
    ///
    /// Returns `(cell index, total distance)`.
    fn best_entry(&self, start: Vec3, field: &GoalField) -> Option<(usize, f32)> {
        let start_cell = self.grid.world_to_grid(start);
        let mut best: Option<(usize, f32)> = None;

        for coord in start_cell.block_3x3() {
            let Some(idx) = self.grid.coord_to_index(coord) else {
                continue;
            };
            let remaining = field.distance(idx);
            if !remaining.is_finite() {
                continue;
            }
            let center = self.grid.grid_to_world(coord);
            let total = planar_distance(start, center) + remaining;
            if best.is_some_and(|(_, d)| d <= total) {
                continue;
            }
            if line_of_sight(&self.grid, start, center) {
                best = Some((idx, total));
            }
        }

        best
    }
}

impl PathFinder for GridPathFinder {
    fn find_path(&self, start: Vec3, end: Vec3) -> Option<ShortestPath> {
        if !self.grid.is_navigable(start) || !self.grid.is_navigable(end) {
            return None;
        }
        if line_of_sight(&self.grid, start, end) {
            return Some(ShortestPath {
                points: vec![start, end],
                geodesic_distance: planar_distance(start, end),
            });
        }

        let path = self
            .with_goal_field(end, |field| {
                let (entry, total) = self.best_entry(start, field)?;
                let mut points = Vec::new();
                points.push(start);
                points.extend(
                    field
                        .descend(entry)
                        .into_iter()
                        .map(|idx| self.grid.grid_to_world(self.grid.index_to_coord(idx))),
                );
                points.push(end);
                Some(ShortestPath {
                    points,
                    geodesic_distance: total,
                })
            })
            .flatten();

        if path.is_none() {
            trace!("[GridOracle] no path {} -> {}", start, end);
        }
        path
    }

    fn geodesic_distance(&self, start: Vec3, end: Vec3) -> Option<f32> {
        if !self.grid.is_navigable(start) || !self.grid.is_navigable(end) {
            return None;
        }
        if line_of_sight(&self.grid, start, end) {
            return Some(planar_distance(start, end));
        }
        self.with_goal_field(end, |field| self.best_entry(start, field).map(|(_, d)| d))
            .flatten()
    }

    fn distance_to_closest_obstacle(&self, point: Vec3, max_search_radius: f32) -> f32 {
        let coord = self.grid.world_to_grid(point);
        let Some(idx) = self.grid.coord_to_index(coord) else {
            return 0.0;
        };
        if self.grid.is_blocked(coord) {
            return 0.0;
        }
        // Field is center-to-center; an obstacle cell's edge is half a cell closer
        let to_cells = self.clearance[idx] - self.grid.resolution() * 0.5;
        let to_boundary = self.grid.distance_to_boundary(point);
        to_cells.min(to_boundary).clamp(0.0, max_search_radius)
    }
}

impl Navigable for GridPathFinder {
    fn is_navigable(&self, point: Vec3) -> bool {
        self.grid.is_navigable(point)
    }
}
