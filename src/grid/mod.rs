//! Reference navigability grid and grid-based pathfinding oracle.
//!
//! The grid lies on the XZ ground plane at a fixed floor height:
//! grid column `x` runs along world +X, grid row `y` along world +Z.
//!
//! - [`NavGrid`]: blocked / free cells
//! - [`GridPathFinder`]: [`PathFinder`](crate::oracle::PathFinder) and
//!   [`Navigable`](crate::motion::Navigable) over a [`NavGrid`]

mod distance;
mod pathfinder;
mod storage;

pub use pathfinder::GridPathFinder;
pub use storage::NavGrid;

use serde::{Deserialize, Serialize};

/// Integer cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column index (world X)
    pub x: i32,
    /// Row index (world Z)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (max of x and y distance)
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// The 3x3 block centered on this cell, including itself.
    #[inline]
    pub fn block_3x3(&self) -> [GridCoord; 9] {
        let mut out = [*self; 9];
        let mut i = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                out[i] = GridCoord::new(self.x + dx, self.y + dy);
                i += 1;
            }
        }
        out
    }
}
