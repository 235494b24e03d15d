use gamelab_core::Point;

/// Minimal field-search interface: neighbor enumeration.
pub trait Pather {
    /// Append the neighbors reachable from `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether `p` may be entered or expanded. Searches never expand from an
    /// impassable cell.
    fn passable(&self, _p: Point) -> bool {
        true
    }
}

/// Pather with weighted (non-negative) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving between the adjacent cells `from` and `to`.
    fn cost(&self, from: Point, to: Point) -> f32;
}

/// Weighted pather with a heuristic for A*.
pub trait AstarPather: WeightedPather {
    /// Estimate of the cost between `from` and `to`. Must never exceed the
    /// cost of any single edge chain between them.
    fn estimate(&self, from: Point, to: Point) -> f32;
}
