//! Headless flow-field run: build a field, tick its agent, render the result.

use gamelab_core::Point;
use gamelab_flow::{FlowField, MapError, UNREACHED};

use crate::config::DemoConfig;

const HEAT: &[u8] = b"0123456789";

/// Build the field described by `cfg`: the ASCII map if one is given,
/// otherwise `cfg.field` with `cfg.obstacles` toggled on.
pub fn build_field(cfg: &DemoConfig) -> Result<FlowField, MapError> {
    if let Some(map) = &cfg.map {
        return FlowField::from_text(map, cfg.field.cell_size, cfg.field.mode, cfg.field.agent_speed);
    }
    let mut field = FlowField::new(&cfg.field);
    for &cell in &cfg.obstacles {
        if cell == field.start() || cell == field.goal() {
            log::warn!("obstacle at {cell} would cover the start or goal, skipped");
            continue;
        }
        if field.cost_grid().is_passable(cell) {
            field.toggle_obstacle(cell);
        }
    }
    field.update(0.0);
    Ok(field)
}

/// What happened during [`run_field`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRun {
    /// Ticks actually simulated.
    pub ticks: u32,
    pub reached: bool,
    /// Distinct cells the agent passed through.
    pub path_len: usize,
    pub recomputes: u64,
}

/// Tick `field` until its agent stands on the goal or `ticks` run out.
pub fn run_field(field: &mut FlowField, ticks: u32, dt: f32) -> FieldRun {
    let goal = field.goal();
    let mut run = FieldRun {
        ticks: 0,
        reached: false,
        path_len: 0,
        recomputes: 0,
    };
    for _ in 0..ticks {
        if agent_cell(field) == Some(goal) {
            break;
        }
        field.update(dt);
        run.ticks += 1;
    }
    run.reached = agent_cell(field) == Some(goal);
    run.path_len = field.path().len();
    run.recomputes = field.recompute_count();
    if run.reached {
        log::info!("agent reached {goal} after {} ticks", run.ticks);
    } else {
        log::info!("agent stopped short of {goal} after {} ticks", run.ticks);
    }
    run
}

fn agent_cell(field: &FlowField) -> Option<Point> {
    field.space().cell_at(field.agent())
}

/// Integration values as digits scaled to the farthest reachable cell.
/// `#` is an obstacle, `G` the goal and `?` a cell the goal cannot reach.
pub fn heat_map(field: &FlowField) -> String {
    let range = field.space().range;
    let max = range
        .iter()
        .map(|p| field.integration_of(p))
        .filter(|&v| v < UNREACHED)
        .fold(0.0_f32, f32::max);
    let mut out = String::with_capacity(range.len() + range.height() as usize);
    for y in range.min.y..range.max.y {
        for x in range.min.x..range.max.x {
            let p = Point::new(x, y);
            let v = field.integration_of(p);
            let ch = if !field.cost_grid().is_passable(p) {
                '#'
            } else if p == field.goal() {
                'G'
            } else if v >= UNREACHED {
                '?'
            } else {
                let level = if max > 0.0 { v / max } else { 0.0 };
                let idx = ((level * (HEAT.len() - 1) as f32).round() as usize).min(HEAT.len() - 1);
                HEAT[idx] as char
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
