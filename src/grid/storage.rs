//! Navigability grid storage.

use glam::{Vec2, Vec3};

use super::GridCoord;
use crate::core::planar;

/// Boolean occupancy grid on the XZ plane.
///
/// Cells outside the grid count as blocked.
///
/// # Example
/// ```
/// use marga::grid::NavGrid;
/// use glam::{Vec2, Vec3};
///
/// let grid = NavGrid::from_ascii(
///     "#####\n\
///      #...#\n\
///      #####",
///     0.5,
///     Vec2::ZERO,
/// );
/// assert_eq!(grid.width(), 5);
/// assert!(grid.is_navigable(Vec3::new(0.75, 0.0, 0.75)));
/// assert!(!grid.is_navigable(Vec3::new(0.25, 0.0, 0.25)));
/// ```
#[derive(Clone, Debug)]
pub struct NavGrid {
    blocked: Vec<bool>,
    width: usize,
    height: usize,
    resolution: f32,
    /// World (x, z) of the corner of cell (0, 0)
    origin: Vec2,
    floor_height: f32,
}

impl NavGrid {
    /// Create a fully navigable grid.
    pub fn new(width: usize, height: usize, resolution: f32, origin: Vec2) -> Self {
        Self {
            blocked: vec![false; width * height],
            width,
            height,
            resolution,
            origin,
            floor_height: 0.0,
        }
    }

    /// Parse an ASCII map: `#` is blocked, anything else is free.
    ///
    /// Line `i` becomes grid row `i` (world +Z). Short lines are padded
    /// with blocked cells. Leading and trailing whitespace on each line is
    /// ignored, as are blank lines.
    pub fn from_ascii(map: &str, resolution: f32, origin: Vec2) -> Self {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let height = rows.len();

        let mut grid = Self::new(width, height, resolution, origin);
        grid.blocked.fill(true);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid.blocked[y * width + x] = ch == '#';
            }
        }
        grid
    }

    /// Builder-style setter for the floor height (world Y of cell centers).
    pub fn with_floor_height(mut self, height: f32) -> Self {
        self.floor_height = height;
        self
    }

    /// Grid width in cells (along X)
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells (along Z)
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell size in meters
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World (x, z) of the corner of cell (0, 0)
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// World Y of the floor
    #[inline]
    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Planar bounds: (min, max) as (x, z).
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let size = Vec2::new(self.width as f32, self.height as f32) * self.resolution;
        (self.origin, self.origin + size)
    }

    /// Convert a world point to the cell containing it.
    #[inline]
    pub fn world_to_grid(&self, point: Vec3) -> GridCoord {
        let p = (planar(point) - self.origin) / self.resolution;
        GridCoord::new(p.x.floor() as i32, p.y.floor() as i32)
    }

    /// World position of a cell center, at floor height.
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> Vec3 {
        Vec3::new(
            self.origin.x + (coord.x as f32 + 0.5) * self.resolution,
            self.floor_height,
            self.origin.y + (coord.y as f32 + 0.5) * self.resolution,
        )
    }

    /// Check if grid coordinates are within bounds
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Convert grid coordinates to flat array index
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert flat array index to grid coordinates
    #[inline]
    pub fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Is this cell blocked? Out-of-grid cells are.
    #[inline]
    pub fn is_blocked(&self, coord: GridCoord) -> bool {
        self.coord_to_index(coord)
            .map(|i| self.blocked[i])
            .unwrap_or(true)
    }

    /// Mark a cell blocked or free. Returns false if out of bounds.
    pub fn set_blocked(&mut self, coord: GridCoord, blocked: bool) -> bool {
        match self.coord_to_index(coord) {
            Some(i) => {
                self.blocked[i] = blocked;
                true
            }
            None => false,
        }
    }

    /// Block every cell whose center lies in the planar rectangle
    /// `min..=max` (x, z).
    pub fn block_rect(&mut self, min: Vec2, max: Vec2) {
        for i in 0..self.cell_count() {
            let center = planar(self.grid_to_world(self.index_to_coord(i)));
            if center.cmpge(min).all() && center.cmple(max).all() {
                self.blocked[i] = true;
            }
        }
    }

    /// Can the agent stand at this world point?
    #[inline]
    pub fn is_navigable(&self, point: Vec3) -> bool {
        !self.is_blocked(self.world_to_grid(point))
    }

    /// Planar distance from `point` to the nearest grid edge
    /// (negative when outside).
    pub fn distance_to_boundary(&self, point: Vec3) -> f32 {
        let p = planar(point);
        let (min, max) = self.bounds();
        (p.x - min.x)
            .min(max.x - p.x)
            .min(p.y - min.y)
            .min(max.y - p.y)
    }

    /// Iterate over blocked cell coordinates.
    pub fn blocked_cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| self.index_to_coord(i))
    }
}
