//! Distance fields over a [`NavGrid`].
//!
//! - Clearance: brushfire propagation from every blocked cell
//! - Goal field: Dijkstra from the cells around a goal point

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::f32::consts::SQRT_2;

use glam::Vec3;

use super::{GridCoord, NavGrid};
use crate::core::{planar, planar_distance};

const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Distance from each cell center to the nearest blocked cell center.
///
/// `f32::MAX` where the grid has no blocked cells.
pub(super) fn clearance_field(grid: &NavGrid) -> Vec<f32> {
    let mut field = vec![f32::MAX; grid.cell_count()];
    let mut queue = VecDeque::new();

    for coord in grid.blocked_cells() {
        if let Some(idx) = grid.coord_to_index(coord) {
            field[idx] = 0.0;
            queue.push_back((coord, 0.0f32));
        }
    }

    let res = grid.resolution();
    let diag = res * SQRT_2;

    while let Some((coord, dist)) = queue.pop_front() {
        let steps = ORTHOGONAL
            .iter()
            .map(|d| (*d, res))
            .chain(DIAGONAL.iter().map(|d| (*d, diag)));

        for ((dx, dy), cost) in steps {
            let neighbor = GridCoord::new(coord.x + dx, coord.y + dy);
            let new_dist = dist + cost;

            if let Some(idx) = grid.coord_to_index(neighbor)
                && new_dist < field[idx]
            {
                field[idx] = new_dist;
                queue.push_back((neighbor, new_dist));
            }
        }
    }

    field
}

/// Open-set entry for the goal Dijkstra.
#[derive(Clone, Copy, Debug)]
struct DistNode {
    index: usize,
    cost: f32,
}

impl Eq for DistNode {}

impl PartialEq for DistNode {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Ord for DistNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DistNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Geodesic distance from every cell center to one goal point.
#[derive(Clone, Debug)]
pub(super) struct GoalField {
    /// Goal the field was computed for, as (x, z) bit patterns.
    key: [u32; 2],
    /// Distance to the goal, `f32::INFINITY` where unreachable.
    distances: Vec<f32>,
    /// Next cell toward the goal, `None` for seed cells.
    next: Vec<Option<usize>>,
}

impl GoalField {
    /// Cache key for a goal point. Height is ignored.
    pub(super) fn key_for(goal: Vec3) -> [u32; 2] {
        [goal.x.to_bits(), goal.z.to_bits()]
    }

    /// Run Dijkstra outward from `goal`.
    ///
    /// Seeds are the free cells of the 3x3 block around the goal cell that
    /// the goal can see. Moves are 8-connected; a diagonal move requires
    /// both adjacent orthogonal cells to be free.
    ///
    /// Returns `None` if the goal is not navigable.
    pub(super) fn compute(grid: &NavGrid, goal: Vec3) -> Option<Self> {
        if !grid.is_navigable(goal) {
            return None;
        }

        let cells = grid.cell_count();
        let mut distances = vec![f32::INFINITY; cells];
        let mut next = vec![None; cells];
        let mut open = BinaryHeap::new();

        let goal_cell = grid.world_to_grid(goal);
        for seed in goal_cell.block_3x3() {
            let Some(idx) = grid.coord_to_index(seed) else {
                continue;
            };
            if grid.is_blocked(seed) {
                continue;
            }
            let center = grid.grid_to_world(seed);
            if !line_of_sight(grid, goal, center) {
                continue;
            }
            let cost = planar_distance(goal, center);
            distances[idx] = cost;
            open.push(DistNode { index: idx, cost });
        }

        let res = grid.resolution();
        let diag = res * SQRT_2;

        while let Some(DistNode { index, cost }) = open.pop() {
            if cost > distances[index] {
                continue;
            }
            let coord = grid.index_to_coord(index);

            for (dx, dy) in ORTHOGONAL {
                let neighbor = GridCoord::new(coord.x + dx, coord.y + dy);
                relax(grid, &mut distances, &mut next, &mut open, index, neighbor, cost + res);
            }
            for (dx, dy) in DIAGONAL {
                // No corner cutting
                if grid.is_blocked(GridCoord::new(coord.x + dx, coord.y))
                    || grid.is_blocked(GridCoord::new(coord.x, coord.y + dy))
                {
                    continue;
                }
                let neighbor = GridCoord::new(coord.x + dx, coord.y + dy);
                relax(grid, &mut distances, &mut next, &mut open, index, neighbor, cost + diag);
            }
        }

        Some(Self {
            key: Self::key_for(goal),
            distances,
            next,
        })
    }

    /// Does this field belong to `goal`?
    #[inline]
    pub(super) fn is_for(&self, goal: Vec3) -> bool {
        self.key == Self::key_for(goal)
    }

    /// Distance from a cell center to the goal.
    #[inline]
    pub(super) fn distance(&self, index: usize) -> f32 {
        self.distances[index]
    }

    /// Follow the descent chain from `index` to a seed cell.
    pub(super) fn descend(&self, index: usize) -> Vec<usize> {
        let mut chain = vec![index];
        let mut current = index;
        while let Some(n) = self.next[current] {
            chain.push(n);
            current = n;
        }
        chain
    }

    /// Number of cells with a finite distance.
    pub(super) fn reached(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }
}

fn relax(
    grid: &NavGrid,
    distances: &mut [f32],
    next: &mut [Option<usize>],
    open: &mut BinaryHeap<DistNode>,
    from: usize,
    neighbor: GridCoord,
    cost: f32,
) {
    if grid.is_blocked(neighbor) {
        return;
    }
    if let Some(idx) = grid.coord_to_index(neighbor)
        && cost < distances[idx]
    {
        distances[idx] = cost;
        next[idx] = Some(from);
        open.push(DistNode { index: idx, cost });
    }
}

/// Check that every cell the planar segment `a → b` touches is free.
///
/// Supercover walk over the cells crossed by the segment. Passing exactly
/// through a cell corner requires both side cells to be free, matching the
/// no-corner-cutting rule of the goal field.
pub(super) fn line_of_sight(grid: &NavGrid, a: Vec3, b: Vec3) -> bool {
    const CORNER_EPS: f32 = 1e-6;

    let start = (planar(a) - grid.origin()) / grid.resolution();
    let end = (planar(b) - grid.origin()) / grid.resolution();
    let delta = end - start;

    let mut cell = grid.world_to_grid(a);
    let target = grid.world_to_grid(b);
    if grid.is_blocked(cell) {
        return false;
    }

    let (step_x, mut t_max_x, t_delta_x) = axis_walk(start.x, delta.x, cell.x);
    let (step_y, mut t_max_y, t_delta_y) = axis_walk(start.y, delta.y, cell.y);

    // Each step moves one or two cells closer in Manhattan distance
    let mut remaining = (target.x - cell.x).abs() + (target.y - cell.y).abs();
    while cell != target && remaining > 0 {
        if (t_max_x - t_max_y).abs() <= CORNER_EPS {
            if grid.is_blocked(GridCoord::new(cell.x + step_x, cell.y))
                || grid.is_blocked(GridCoord::new(cell.x, cell.y + step_y))
            {
                return false;
            }
            cell = GridCoord::new(cell.x + step_x, cell.y + step_y);
            t_max_x += t_delta_x;
            t_max_y += t_delta_y;
            remaining -= 2;
        } else if t_max_x < t_max_y {
            cell.x += step_x;
            t_max_x += t_delta_x;
            remaining -= 1;
        } else {
            cell.y += step_y;
            t_max_y += t_delta_y;
            remaining -= 1;
        }
        if grid.is_blocked(cell) {
            return false;
        }
    }
    true
}

/// Cell step direction, parameter of the first boundary crossing and
/// parameter span of one cell along one axis (grid units).
fn axis_walk(start: f32, delta: f32, cell: i32) -> (i32, f32, f32) {
    if delta > 0.0 {
        (1, ((cell + 1) as f32 - start) / delta, 1.0 / delta)
    } else if delta < 0.0 {
        (-1, (cell as f32 - start) / delta, -1.0 / delta)
    } else {
        (0, f32::INFINITY, f32::INFINITY)
    }
}
