use gamelab_core::{GridSpace, Point, Vec2};

use crate::costs::CostGrid;
use crate::flow::DirectionField;
use crate::integration::{IntegrationField, SearchMode};

/// Construction parameters for a [`FlowField`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    pub cols: i32,
    pub rows: i32,
    /// World units per cell.
    pub cell_size: f32,
    pub start: Point,
    pub goal: Point,
    pub mode: SearchMode,
    /// Agent speed in world units per second.
    pub agent_speed: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            cols: 50,
            rows: 50,
            cell_size: 21.6,
            start: Point::new(5, 5),
            goal: Point::new(45, 45),
            mode: SearchMode::Bfs,
            agent_speed: 120.0,
        }
    }
}

/// A flow field over a cost grid, plus the agent that follows it.
///
/// Goal, start and search-mode changes recompute the field immediately.
/// Obstacle and cost edits only mark it dirty; the next [`update`] performs a
/// single recomputation however many edits were made in between.
///
/// [`update`]: FlowField::update
#[derive(Clone, Debug)]
pub struct FlowField {
    pub(crate) costs: CostGrid,
    pub(crate) integration: IntegrationField,
    pub(crate) directions: DirectionField,
    pub(crate) mode: SearchMode,
    pub(crate) goal: Point,
    pub(crate) start: Point,
    pub(crate) dirty: bool,
    pub(crate) agent: Vec2,
    pub(crate) agent_speed: f32,
    pub(crate) moving: bool,
    pub(crate) path: Vec<Point>,
    pub(crate) recomputes: u64,
}

/// A grid for a field. Edge costs scale with the cell size, so a zero,
/// negative or non-finite size is replaced by the default.
pub(crate) fn field_space(cols: i32, rows: i32, cell_size: f32) -> GridSpace {
    let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
        cell_size
    } else {
        let fallback = FieldConfig::default().cell_size;
        log::warn!("cell size {cell_size} is invalid, using {fallback}");
        fallback
    };
    GridSpace::new(cols, rows, cell_size)
}

impl FlowField {
    /// Build an all-passable field from `cfg` and compute it.
    ///
    /// Degenerate sizes are raised to 1×1 and out-of-range start/goal cells
    /// are clamped into the grid. A cell size that is not a positive finite
    /// number falls back to the default one, and a negative or non-finite
    /// agent speed becomes zero.
    pub fn new(cfg: &FieldConfig) -> Self {
        let space = field_space(cfg.cols.max(1), cfg.rows.max(1), cfg.cell_size);
        Self::with_costs(CostGrid::new(space), cfg.start, cfg.goal, cfg.mode, cfg.agent_speed)
    }

    pub(crate) fn with_costs(
        costs: CostGrid,
        start: Point,
        goal: Point,
        mode: SearchMode,
        agent_speed: f32,
    ) -> Self {
        let rng = costs.range();
        let clamp = |p: Point| {
            Point::new(
                p.x.clamp(rng.min.x, rng.max.x - 1),
                p.y.clamp(rng.min.y, rng.max.y - 1),
            )
        };
        let start = clamp(start);
        let agent_speed = if agent_speed.is_finite() && agent_speed >= 0.0 {
            agent_speed
        } else {
            log::warn!("agent speed {agent_speed} is invalid, the agent will not move");
            0.0
        };
        let mut field = Self {
            integration: IntegrationField::new(rng),
            directions: DirectionField::new(rng),
            agent: costs.space().center(start),
            costs,
            mode,
            goal: clamp(goal),
            start,
            dirty: true,
            agent_speed,
            moving: true,
            path: Vec::new(),
            recomputes: 0,
        };
        field.recompute();
        field
    }

    // -----------------------------------------------------------------------
    // Recomputation
    // -----------------------------------------------------------------------

    /// Recompute the integration field with the current mode.
    pub fn compute_integration_field(&mut self) {
        let expanded = self
            .integration
            .compute(&self.costs, self.mode, self.goal, self.start);
        log::debug!(
            "{} integration from goal {} expanded {} cells",
            self.mode,
            self.goal,
            expanded
        );
    }

    /// Re-derive every cell's direction from the integration field.
    pub fn compute_flow_field(&mut self) {
        self.directions.compute(&self.costs, &self.integration);
    }

    /// Recompute both fields and clear the dirty flag.
    pub fn recompute(&mut self) {
        self.compute_integration_field();
        self.compute_flow_field();
        self.dirty = false;
        self.recomputes += 1;
    }

    /// Per-tick entry point: apply pending edits, then move the agent.
    pub fn update(&mut self, dt: f32) {
        if self.dirty {
            self.recompute();
        }
        if self.moving {
            self.agent = self.advance(self.agent, dt);
        }
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Toggle `cell` between passable and obstacle. Deferred to the next
    /// [`update`](Self::update); ignored outside the grid.
    pub fn toggle_obstacle(&mut self, cell: Point) {
        if self.costs.toggle_obstacle(cell).is_some() {
            self.dirty = true;
        }
    }

    /// [`toggle_obstacle`](Self::toggle_obstacle) at a world position.
    pub fn toggle_obstacle_at(&mut self, pos: Vec2) {
        if let Some(cell) = self.space().cell_at(pos) {
            self.toggle_obstacle(cell);
        }
    }

    /// Set the traversal cost of `cell`. Deferred like obstacle toggles.
    pub fn set_cost(&mut self, cell: Point, cost: f32) {
        if self.costs.set_cost(cell, cost) {
            self.dirty = true;
        }
    }

    /// Move the goal, clear the path and recompute. Ignored outside the grid.
    pub fn set_goal(&mut self, cell: Point) {
        if !self.costs.range().contains(cell) {
            return;
        }
        self.goal = cell;
        self.path.clear();
        log::info!("goal set to {cell}");
        self.recompute();
    }

    /// [`set_goal`](Self::set_goal) at a world position.
    pub fn set_goal_at(&mut self, pos: Vec2) {
        if let Some(cell) = self.space().cell_at(pos) {
            self.set_goal(cell);
        }
    }

    /// Move the start, place the agent on it, clear the path and recompute.
    /// Ignored outside the grid.
    pub fn set_start(&mut self, cell: Point) {
        if !self.costs.range().contains(cell) {
            return;
        }
        self.start = cell;
        self.agent = self.space().center(cell);
        self.path.clear();
        log::info!("start set to {cell}");
        self.recompute();
    }

    /// [`set_start`](Self::set_start) at a world position.
    pub fn set_start_at(&mut self, pos: Vec2) {
        if let Some(cell) = self.space().cell_at(pos) {
            self.set_start(cell);
        }
    }

    /// Switch between BFS and A* and recompute.
    pub fn switch_search_mode(&mut self) {
        self.mode = self.mode.toggled();
        log::info!("search mode: {}", self.mode);
        self.recompute();
    }

    /// Pause or resume the agent.
    pub fn toggle_movement(&mut self) {
        self.moving = !self.moving;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Direction at a world position; zero outside the grid.
    pub fn direction_at(&self, pos: Vec2) -> Vec2 {
        self.space()
            .cell_at(pos)
            .map_or(Vec2::ZERO, |cell| self.directions.at(cell))
    }

    /// Direction of a cell; zero outside the grid.
    pub fn direction_of(&self, cell: Point) -> Vec2 {
        self.directions.at(cell)
    }

    /// Integration value of a cell.
    pub fn integration_of(&self, cell: Point) -> f32 {
        self.integration.at(cell)
    }

    pub fn space(&self) -> GridSpace {
        self.costs.space()
    }

    pub fn cost_grid(&self) -> &CostGrid {
        &self.costs
    }

    pub fn costs(&self) -> &[f32] {
        self.costs.costs()
    }

    pub fn integration(&self) -> &[f32] {
        self.integration.values()
    }

    pub fn directions(&self) -> &[Vec2] {
        self.directions.directions()
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn agent(&self) -> Vec2 {
        self.agent
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// How many times the fields have been recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::UNREACHED;

    fn small_config() -> FieldConfig {
        FieldConfig {
            cols: 8,
            rows: 8,
            cell_size: 10.0,
            start: Point::new(0, 0),
            goal: Point::new(7, 7),
            ..FieldConfig::default()
        }
    }

    fn small() -> FlowField {
        FlowField::new(&small_config())
    }

    #[test]
    fn goal_is_zero_and_reachable_cells_non_negative() {
        let mut f = small();
        for p in [Point::new(3, 3), Point::new(3, 4), Point::new(4, 3)] {
            f.toggle_obstacle(p);
        }
        f.update(0.0);
        assert_eq!(f.integration_of(f.goal()), 0.0);
        for (i, &v) in f.integration().iter().enumerate() {
            let p = f.space().range.point(i);
            if f.cost_grid().is_passable(p) {
                assert!(v >= 0.0 && v < UNREACHED, "cell {p} = {v}");
            } else {
                assert_eq!(v, UNREACHED);
            }
        }
    }

    #[test]
    fn obstacle_edits_coalesce_until_update() {
        let mut f = small();
        let before = f.recompute_count();
        f.toggle_obstacle(Point::new(1, 1));
        f.toggle_obstacle(Point::new(2, 2));
        f.toggle_obstacle(Point::new(9, 9));
        assert!(f.is_dirty());
        assert_eq!(f.recompute_count(), before);
        f.update(0.0);
        f.update(0.0);
        assert!(!f.is_dirty());
        assert_eq!(f.recompute_count(), before + 1);
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut f = small();
        f.toggle_obstacle(Point::new(-1, 3));
        assert!(!f.is_dirty());
        f.set_goal(Point::new(8, 0));
        assert_eq!(f.goal(), Point::new(7, 7));
        f.set_start_at(Vec2::new(-5.0, 5.0));
        assert_eq!(f.start(), Point::new(0, 0));
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut f = small();
        f.toggle_obstacle(Point::new(5, 6));
        f.switch_search_mode();
        let integration = f.integration().to_vec();
        let directions = f.directions().to_vec();
        f.recompute();
        assert_eq!(f.integration(), integration.as_slice());
        assert_eq!(f.directions(), directions.as_slice());
    }

    #[test]
    fn goal_on_start_has_no_direction() {
        let mut f = small();
        f.set_goal(Point::new(0, 0));
        assert_eq!(f.integration_of(f.start()), 0.0);
        assert_eq!(f.direction_at(f.agent()), Vec2::ZERO);
    }

    #[test]
    fn set_start_moves_agent_and_clears_path() {
        let mut f = small();
        f.update(0.2);
        assert!(!f.path().is_empty());
        f.set_start(Point::new(2, 5));
        assert!(f.path().is_empty());
        assert_eq!(f.agent(), f.space().center(Point::new(2, 5)));
    }

    #[test]
    fn degenerate_config_is_clamped() {
        let f = FlowField::new(&FieldConfig {
            cols: 0,
            rows: -4,
            start: Point::new(10, 10),
            goal: Point::new(-3, 2),
            ..FieldConfig::default()
        });
        assert_eq!(f.space().range.len(), 1);
        assert_eq!(f.start(), Point::ZERO);
        assert_eq!(f.goal(), Point::ZERO);
    }

    #[test]
    fn invalid_cell_size_and_speed_are_replaced() {
        for cell_size in [-10.0, 0.0, f32::NAN, f32::INFINITY] {
            let mut f = FlowField::new(&FieldConfig {
                cell_size,
                agent_speed: f32::NAN,
                ..small_config()
            });
            assert_eq!(f.space().cell_size, FieldConfig::default().cell_size);
            assert_eq!(f.integration_of(f.goal()), 0.0);
            assert!(f.integration_of(f.start()) > 0.0);
            assert!(f.integration().iter().all(|&v| v >= 0.0));
            let before = f.agent();
            f.update(1.0);
            assert_eq!(f.agent(), before);
        }

        let f = FlowField::new(&FieldConfig {
            agent_speed: -5.0,
            ..small_config()
        });
        assert_eq!(f.agent_speed, 0.0);
    }

    #[test]
    fn direction_outside_grid_is_zero() {
        let f = small();
        assert_eq!(f.direction_at(Vec2::new(-1.0, 5.0)), Vec2::ZERO);
        assert_eq!(f.direction_at(Vec2::new(5.0, 80.0)), Vec2::ZERO);
        assert_ne!(f.direction_at(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    }
}
