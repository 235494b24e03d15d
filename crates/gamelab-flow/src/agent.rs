//! Stepping an agent along the flow field.

use gamelab_core::{Point, Vec2};

use crate::field::FlowField;

impl FlowField {
    /// Move `position` along the field for `dt` seconds and return the new
    /// position.
    ///
    /// A zero direction (goal reached, unreachable goal, outside the grid)
    /// leaves the position unchanged. When the step would leave the current
    /// cell the agent snaps to the centre of the neighbor the field points
    /// at, so it never drifts off the cell centres and never enters an
    /// obstacle. Visited cells are appended to [`path`](Self::path).
    ///
    /// The field may be dirty when this is called directly: obstacle edits
    /// since the last recompute are still honoured, and the agent waits
    /// instead of crossing into a cell that has become impassable.
    pub fn advance(&mut self, position: Vec2, dt: f32) -> Vec2 {
        let space = self.space();
        let Some(cell) = space.cell_at(position) else {
            return position;
        };
        let dir = self.directions.at(cell);
        if dir == Vec2::ZERO || dt <= 0.0 {
            return position;
        }

        if self.costs.is_passable(cell) {
            self.record_visit(cell);
        }
        let stepped = position + dir * self.agent_speed * dt;
        if space.cell_at(stepped) == Some(cell) {
            return stepped;
        }

        let next = cell + self.directions.step_at(cell);
        if !self.costs.is_passable(next) {
            log::trace!("{next} became impassable, waiting for a recompute");
            return position;
        }
        self.record_visit(next);
        space.center(next)
    }

    fn record_visit(&mut self, cell: Point) {
        if self.path.last() != Some(&cell) {
            self.path.push(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::field::{FieldConfig, FlowField};
    use gamelab_core::{Point, Vec2};

    fn corridor() -> FlowField {
        FlowField::new(&FieldConfig {
            cols: 6,
            rows: 1,
            cell_size: 10.0,
            start: Point::new(0, 0),
            goal: Point::new(5, 0),
            agent_speed: 20.0,
            ..FieldConfig::default()
        })
    }

    #[test]
    fn small_steps_stay_inside_the_cell() {
        let mut f = corridor();
        let p = f.advance(Vec2::new(5.0, 5.0), 0.1);
        assert_eq!(p, Vec2::new(7.0, 5.0));
        assert_eq!(f.path(), &[Point::new(0, 0)]);
    }

    #[test]
    fn crossing_snaps_to_next_centre() {
        let mut f = corridor();
        let p = f.advance(Vec2::new(9.0, 5.0), 0.1);
        assert_eq!(p, Vec2::new(15.0, 5.0));
        assert_eq!(f.path(), &[Point::new(0, 0), Point::new(1, 0)]);
    }

    #[test]
    fn stale_field_never_crosses_into_a_new_obstacle() {
        let mut f = corridor();
        f.toggle_obstacle(Point::new(1, 0));
        assert!(f.is_dirty());
        let p = f.advance(Vec2::new(9.0, 5.0), 0.1);
        assert_eq!(p, Vec2::new(9.0, 5.0));
        assert_eq!(f.path(), &[Point::new(0, 0)]);

        // Moving within the current cell is still allowed.
        let p = f.advance(Vec2::new(5.0, 5.0), 0.1);
        assert_eq!(p, Vec2::new(7.0, 5.0));

        f.update(0.0);
        assert_eq!(f.direction_of(Point::new(0, 0)), Vec2::ZERO);
    }

    #[test]
    fn large_steps_move_one_cell_at_a_time() {
        let mut f = corridor();
        let p = f.advance(Vec2::new(5.0, 5.0), 10.0);
        assert_eq!(p, Vec2::new(15.0, 5.0));
    }

    #[test]
    fn agent_reaches_goal_and_stops() {
        let mut f = corridor();
        for _ in 0..200 {
            f.update(0.1);
        }
        assert_eq!(f.agent(), f.space().center(Point::new(5, 0)));
        let expected: Vec<Point> = (0..6).map(|x| Point::new(x, 0)).collect();
        assert_eq!(f.path(), expected.as_slice());
    }

    #[test]
    fn unreachable_goal_means_no_movement() {
        let mut f = corridor();
        f.toggle_obstacle(Point::new(3, 0));
        f.update(0.0);
        let before = f.agent();
        // The wall cuts the whole left side off from the goal.
        f.update(1.0);
        assert_eq!(f.agent(), before);
        assert!(f.path().is_empty());
    }

    #[test]
    fn paused_agent_does_not_move() {
        let mut f = corridor();
        f.toggle_movement();
        f.update(1.0);
        assert_eq!(f.agent(), f.space().center(Point::new(0, 0)));
        assert!(!f.is_moving());
    }

    #[test]
    fn outside_positions_are_returned_unchanged() {
        let mut f = corridor();
        let p = Vec2::new(-4.0, 2.0);
        assert_eq!(f.advance(p, 1.0), p);
    }
}
