//! The traversal-cost grid.

use gamelab_core::{GridSpace, Point, Range};

use crate::neighbors::walkable_neighbors;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Cost of an ordinary passable cell.
pub const PASSABLE_COST: f32 = 1.0;

/// Cost written by obstacle toggles. Any cost at or above this value is
/// impassable.
pub const OBSTACLE_COST: f32 = 9999.0;

/// A `cols × rows` grid of per-cell traversal costs.
///
/// Moving into a neighbor costs the neighbor's cell cost plus the
/// centre-to-centre distance in world units.
#[derive(Clone, Debug)]
pub struct CostGrid {
    space: GridSpace,
    costs: Vec<f32>,
}

impl CostGrid {
    /// Create an all-passable grid.
    pub fn new(space: GridSpace) -> Self {
        Self {
            costs: vec![PASSABLE_COST; space.range.len()],
            space,
        }
    }

    /// The world/grid mapping of this grid.
    #[inline]
    pub fn space(&self) -> GridSpace {
        self.space
    }

    /// The cell bounds.
    #[inline]
    pub fn range(&self) -> Range {
        self.space.range
    }

    /// Row-major cost values.
    pub fn costs(&self) -> &[f32] {
        &self.costs
    }

    /// Cost at `p`, or `None` outside the grid.
    pub fn cost_at(&self, p: Point) -> Option<f32> {
        self.space.range.index(p).map(|i| self.costs[i])
    }

    /// Whether `p` is inside the grid and below the obstacle threshold.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cost_at(p).is_some_and(|c| c < OBSTACLE_COST)
    }

    /// Set the cost of `p`. Negative costs are clamped to zero. Returns
    /// `false` when `p` is outside the grid.
    pub fn set_cost(&mut self, p: Point, cost: f32) -> bool {
        let Some(i) = self.space.range.index(p) else {
            return false;
        };
        self.costs[i] = cost.max(0.0);
        true
    }

    /// Flip `p` between passable and obstacle. Returns the new passability,
    /// or `None` when `p` is outside the grid.
    pub fn toggle_obstacle(&mut self, p: Point) -> Option<bool> {
        let i = self.space.range.index(p)?;
        let c = &mut self.costs[i];
        *c = if *c >= OBSTACLE_COST {
            PASSABLE_COST
        } else {
            OBSTACLE_COST
        };
        Some(*c < OBSTACLE_COST)
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.costs.iter().filter(|&&c| c >= OBSTACLE_COST).count()
    }
}

impl Pather for CostGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        walkable_neighbors(p, |q| self.is_passable(q), buf);
    }

    fn passable(&self, p: Point) -> bool {
        self.is_passable(p)
    }
}

impl WeightedPather for CostGrid {
    fn cost(&self, from: Point, to: Point) -> f32 {
        let cell = self.cost_at(to).unwrap_or(OBSTACLE_COST);
        cell + from.distance(to) * self.space.cell_size
    }
}

impl AstarPather for CostGrid {
    fn estimate(&self, from: Point, to: Point) -> f32 {
        from.distance(to) * self.space.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> CostGrid {
        CostGrid::new(GridSpace::new(4, 4, 10.0))
    }

    #[test]
    fn toggle_flips_and_ignores_out_of_range() {
        let mut g = grid();
        let p = Point::new(1, 2);
        assert_eq!(g.toggle_obstacle(p), Some(false));
        assert!(!g.is_passable(p));
        assert_eq!(g.obstacle_count(), 1);
        assert_eq!(g.toggle_obstacle(p), Some(true));
        assert_eq!(g.cost_at(p), Some(PASSABLE_COST));
        assert_eq!(g.toggle_obstacle(Point::new(4, 0)), None);
        assert_eq!(g.obstacle_count(), 0);
    }

    #[test]
    fn edge_cost_includes_distance_and_cell_cost() {
        let g = grid();
        let a = Point::new(1, 1);
        assert_eq!(g.cost(a, Point::new(2, 1)), 11.0);
        let diag = g.cost(a, Point::new(2, 2));
        assert!((diag - (1.0 + 10.0 * 2f32.sqrt())).abs() < 1e-4);
    }

    #[test]
    fn heuristic_never_exceeds_edge_cost() {
        let g = grid();
        let a = Point::new(0, 0);
        let mut buf = Vec::new();
        g.neighbors(a, &mut buf);
        for n in buf {
            assert!(g.estimate(a, n) <= g.cost(a, n));
        }
    }

    #[test]
    fn heavy_cells_stay_passable_below_threshold() {
        let mut g = grid();
        let p = Point::new(2, 2);
        assert!(g.set_cost(p, 50.0));
        assert!(g.is_passable(p));
        assert!(g.set_cost(p, -3.0));
        assert_eq!(g.cost_at(p), Some(0.0));
        assert!(!g.set_cost(Point::new(-1, 0), 1.0));
    }
}
