//! ASCII maps for flow fields.
//!
//! Each character maps to one cell; lines are separated by `'\n'` and must
//! all have the same width.
//!
//! | Char | Cell |
//! |---|---|
//! | `.` | passable |
//! | `#` | obstacle |
//! | `S` | start (passable) |
//! | `G` | goal (passable) |

use std::fmt;

use gamelab_core::{Point, Vec2};

use crate::costs::{CostGrid, OBSTACLE_COST};
use crate::field::{FlowField, field_space};
use crate::integration::SearchMode;

const OPEN: char = '.';
const WALL: char = '#';
const START: char = 'S';
const GOAL: char = 'G';
const TRAIL: char = '*';

/// Errors that can occur when parsing a map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// The map has no cells.
    Empty,
    /// Line `line` does not have the width of the first line.
    InconsistentWidth { line: usize, expected: usize, found: usize },
    /// A character outside the map alphabet.
    InvalidChar { ch: char, pos: Point },
    /// The `S` or `G` marker is missing.
    MissingMarker(char),
    /// The `S` or `G` marker appears more than once.
    DuplicateMarker { ch: char, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("map: no cells"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(f, "map: line {line} is {found} wide, expected {expected}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map: invalid character {ch:?} at {pos}")
            }
            Self::MissingMarker(ch) => write!(f, "map: missing {ch:?} marker"),
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "map: second {ch:?} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}

impl FlowField {
    /// Parse an ASCII map into a computed flow field.
    ///
    /// Leading/trailing whitespace of the whole text is trimmed, individual
    /// lines are not.
    pub fn from_text(
        text: &str,
        cell_size: f32,
        mode: SearchMode,
        agent_speed: f32,
    ) -> Result<Self, MapError> {
        let lines: Vec<&str> = text.trim().lines().collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut walls = Vec::new();
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    OPEN => {}
                    WALL => walls.push(pos),
                    START | GOAL => {
                        let slot = if ch == START { &mut start } else { &mut goal };
                        if slot.is_some() {
                            return Err(MapError::DuplicateMarker { ch, pos });
                        }
                        *slot = Some(pos);
                    }
                    _ => return Err(MapError::InvalidChar { ch, pos }),
                }
            }
        }
        let start = start.ok_or(MapError::MissingMarker(START))?;
        let goal = goal.ok_or(MapError::MissingMarker(GOAL))?;

        let space = field_space(width as i32, lines.len() as i32, cell_size);
        let mut costs = CostGrid::new(space);
        for p in walls {
            costs.set_cost(p, OBSTACLE_COST);
        }
        Ok(Self::with_costs(costs, start, goal, mode, agent_speed))
    }

    /// Render the cost grid with the start, goal and traced path.
    pub fn to_text(&self) -> String {
        self.render(|f, p| {
            if p == f.start {
                START
            } else if p == f.goal {
                GOAL
            } else if !f.costs.is_passable(p) {
                WALL
            } else if f.path.contains(&p) {
                TRAIL
            } else {
                OPEN
            }
        })
    }

    /// Render the direction field as arrows; `·` marks zero directions.
    pub fn directions_text(&self) -> String {
        self.render(|f, p| {
            if !f.costs.is_passable(p) {
                return WALL;
            }
            if p == f.goal {
                return GOAL;
            }
            arrow(f.directions.at(p))
        })
    }

    fn render(&self, glyph: impl Fn(&Self, Point) -> char) -> String {
        let rng = self.costs.range();
        let mut out = String::with_capacity(rng.len() + rng.height() as usize);
        for y in rng.min.y..rng.max.y {
            for x in rng.min.x..rng.max.x {
                out.push(glyph(self, Point::new(x, y)));
            }
            out.push('\n');
        }
        out
    }
}

fn arrow(dir: Vec2) -> char {
    if dir == Vec2::ZERO {
        return '·';
    }
    let sx = if dir.x > 0.25 { 1 } else if dir.x < -0.25 { -1 } else { 0 };
    let sy = if dir.y > 0.25 { 1 } else if dir.y < -0.25 { -1 } else { 0 };
    match (sx, sy) {
        (0, -1) => '↑',
        (1, -1) => '↗',
        (1, 0) => '→',
        (1, 1) => '↘',
        (0, 1) => '↓',
        (-1, 1) => '↙',
        (-1, 0) => '←',
        (-1, -1) => '↖',
        _ => '·',
    }
}
