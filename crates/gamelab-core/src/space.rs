//! Mapping between world positions and grid cells.

use glam::Vec2;

use crate::geom::{Point, Range};

/// A grid laid over world space with square cells of `cell_size` units,
/// anchored at the world origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpace {
    pub range: Range,
    pub cell_size: f32,
}

impl GridSpace {
    /// A `cols × rows` grid of `cell_size` cells.
    pub fn new(cols: i32, rows: i32, cell_size: f32) -> Self {
        Self {
            range: Range::with_size(cols, rows),
            cell_size,
        }
    }

    /// The cell containing `pos`, or `None` when `pos` is outside the grid.
    pub fn cell_at(&self, pos: Vec2) -> Option<Point> {
        if !pos.is_finite() || self.cell_size <= 0.0 {
            return None;
        }
        let p = Point::new(
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        );
        self.range.contains(p).then_some(p)
    }

    /// World position of the centre of `cell`.
    pub fn center(&self, cell: Point) -> Vec2 {
        Vec2::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// World-space extent of the whole grid.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.range.width() as f32 * self.cell_size,
            self.range.height() as f32 * self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_lookup_floors_positions() {
        let s = GridSpace::new(4, 3, 10.0);
        assert_eq!(s.cell_at(Vec2::new(0.0, 0.0)), Some(Point::new(0, 0)));
        assert_eq!(s.cell_at(Vec2::new(19.99, 29.9)), Some(Point::new(1, 2)));
        assert_eq!(s.cell_at(Vec2::new(40.0, 5.0)), None);
        assert_eq!(s.cell_at(Vec2::new(-0.1, 5.0)), None);
        assert_eq!(s.cell_at(Vec2::new(f32::NAN, 5.0)), None);
    }

    #[test]
    fn centers_map_back_to_their_cell() {
        let s = GridSpace::new(5, 5, 21.6);
        for p in s.range {
            assert_eq!(s.cell_at(s.center(p)), Some(p));
        }
        assert_eq!(s.extent(), Vec2::new(108.0, 108.0));
    }
}
