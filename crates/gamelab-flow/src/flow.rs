//! Direction (flow) field derived from an integration field.

use gamelab_core::{Point, Range, Vec2};

use crate::integration::IntegrationField;
use crate::traits::Pather;

/// Per-cell best direction towards the goal.
///
/// Each cell stores the unit vector towards its lowest-valued neighbor and the
/// grid offset of that neighbor. Both are zero when no neighbor improves on
/// the cell itself (the goal, obstacles, unreached cells).
#[derive(Clone, Debug)]
pub struct DirectionField {
    rng: Range,
    dirs: Vec<Vec2>,
    steps: Vec<Point>,
    nbuf: Vec<Point>,
}

impl DirectionField {
    /// Create an all-zero field over `rng`.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            dirs: vec![Vec2::ZERO; len],
            steps: vec![Point::ZERO; len],
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Row-major direction vectors.
    pub fn directions(&self) -> &[Vec2] {
        &self.dirs
    }

    /// Direction at `p`; zero outside the range.
    #[inline]
    pub fn at(&self, p: Point) -> Vec2 {
        self.rng.index(p).map_or(Vec2::ZERO, |i| self.dirs[i])
    }

    /// Grid offset to the neighbor `p` flows into; zero outside the range.
    #[inline]
    pub fn step_at(&self, p: Point) -> Point {
        self.rng.index(p).map_or(Point::ZERO, |i| self.steps[i])
    }

    /// Recompute every cell from `integration`.
    ///
    /// Among the neighbors `pather` yields, the first one with the strictly
    /// lowest value is chosen, and only if it is strictly lower than the
    /// cell's own value.
    pub fn compute<P: Pather>(&mut self, pather: &P, integration: &IntegrationField) {
        let mut nbuf = std::mem::take(&mut self.nbuf);

        for (i, p) in self.rng.iter().enumerate() {
            self.dirs[i] = Vec2::ZERO;
            self.steps[i] = Point::ZERO;
            if !pather.passable(p) {
                continue;
            }

            let mut best = integration.at(p);
            let mut best_step = None;
            nbuf.clear();
            pather.neighbors(p, &mut nbuf);
            for &n in nbuf.iter() {
                let v = integration.at(n);
                if v < best {
                    best = v;
                    best_step = Some(n - p);
                }
            }

            if let Some(step) = best_step {
                self.steps[i] = step;
                self.dirs[i] = Vec2::new(step.x as f32, step.y as f32).normalize_or_zero();
            }
        }

        self.nbuf = nbuf;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::CostGrid;
    use gamelab_core::GridSpace;

    fn solve(grid: &CostGrid, goal: Point) -> (IntegrationField, DirectionField) {
        let mut integration = IntegrationField::new(grid.range());
        integration.bfs_field(grid, goal);
        let mut flow = DirectionField::new(grid.range());
        flow.compute(grid, &integration);
        (integration, flow)
    }

    #[test]
    fn points_diagonally_in_open_space() {
        let grid = CostGrid::new(GridSpace::new(5, 5, 10.0));
        let (_, flow) = solve(&grid, Point::new(4, 4));
        assert_eq!(flow.step_at(Point::new(0, 0)), Point::new(1, 1));
        let d = flow.at(Point::new(0, 0));
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert_eq!(flow.at(Point::new(4, 4)), Vec2::ZERO);
    }

    #[test]
    fn every_direction_has_a_lower_neighbor() {
        let mut grid = CostGrid::new(GridSpace::new(6, 6, 10.0));
        for p in [Point::new(2, 1), Point::new(2, 2), Point::new(2, 3), Point::new(4, 4)] {
            grid.toggle_obstacle(p);
        }
        let (integration, flow) = solve(&grid, Point::new(5, 2));
        for p in grid.range() {
            let step = flow.step_at(p);
            if step == Point::ZERO {
                assert_eq!(flow.at(p), Vec2::ZERO);
                continue;
            }
            assert!(integration.at(p + step) < integration.at(p));
            assert!(grid.is_passable(p + step));
        }
    }

    #[test]
    fn obstacles_and_unreached_cells_have_no_direction() {
        let mut grid = CostGrid::new(GridSpace::new(4, 4, 1.0));
        for p in [Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)] {
            grid.toggle_obstacle(p);
        }
        let (_, flow) = solve(&grid, Point::new(3, 3));
        assert_eq!(flow.at(Point::new(0, 0)), Vec2::ZERO);
        assert_eq!(flow.at(Point::new(1, 1)), Vec2::ZERO);
        assert_eq!(flow.at(Point::new(9, 9)), Vec2::ZERO);
    }
}
