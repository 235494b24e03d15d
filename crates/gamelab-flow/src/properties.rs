//! Randomised checks of the field invariants.

use gamelab_core::{Point, Vec2};
use proptest::prelude::*;

use crate::field::{FieldConfig, FlowField};
use crate::integration::{SearchMode, UNREACHED};

const SIZE: i32 = 10;

fn cell() -> impl Strategy<Value = Point> {
    (0..SIZE, 0..SIZE).prop_map(|(x, y)| Point::new(x, y))
}

fn build(walls: &[Point], start: Point, goal: Point, mode: SearchMode) -> FlowField {
    let mut f = FlowField::new(&FieldConfig {
        cols: SIZE,
        rows: SIZE,
        cell_size: 8.0,
        start,
        goal,
        mode,
        agent_speed: 40.0,
    });
    for &w in walls {
        if w != start && w != goal && f.cost_grid().is_passable(w) {
            f.toggle_obstacle(w);
        }
    }
    f.update(0.0);
    f
}

proptest! {
    #[test]
    fn integration_is_zero_at_goal_and_non_negative(
        walls in prop::collection::vec(cell(), 0..35),
        start in cell(),
        goal in cell(),
        astar in any::<bool>(),
    ) {
        let mode = if astar { SearchMode::AStar } else { SearchMode::Bfs };
        let f = build(&walls, start, goal, mode);
        prop_assert_eq!(f.integration_of(goal), 0.0);
        for &v in f.integration() {
            prop_assert!(v >= 0.0);
            prop_assert!(v <= UNREACHED);
        }
    }

    #[test]
    fn directions_always_descend(
        walls in prop::collection::vec(cell(), 0..35),
        start in cell(),
        goal in cell(),
        astar in any::<bool>(),
    ) {
        let mode = if astar { SearchMode::AStar } else { SearchMode::Bfs };
        let f = build(&walls, start, goal, mode);
        for p in f.space().range {
            let d = f.direction_of(p);
            if d == Vec2::ZERO {
                continue;
            }
            let here = f.integration_of(p);
            let lower = Point::DIRECTIONS_8
                .iter()
                .any(|&o| f.integration_of(p + o) < here);
            prop_assert!(lower, "cell {} points nowhere lower", p);
        }
    }

    #[test]
    fn bfs_and_astar_agree(
        walls in prop::collection::vec(cell(), 0..35),
        start in cell(),
        goal in cell(),
    ) {
        let bfs = build(&walls, start, goal, SearchMode::Bfs);
        let astar = build(&walls, start, goal, SearchMode::AStar);
        for p in bfs.space().range {
            let (a, b) = (bfs.integration_of(p), astar.integration_of(p));
            prop_assert!((a - b).abs() < 1e-2, "{}: {} vs {}", p, a, b);
        }
    }

    #[test]
    fn walking_never_enters_obstacles(
        walls in prop::collection::vec(cell(), 0..35),
        start in cell(),
        goal in cell(),
    ) {
        let mut f = build(&walls, start, goal, SearchMode::AStar);
        for _ in 0..300 {
            f.update(0.1);
        }
        for p in f.path() {
            prop_assert!(f.cost_grid().is_passable(*p));
        }
        if f.integration_of(start) < UNREACHED {
            prop_assert_eq!(f.space().cell_at(f.agent()), Some(goal));
        }
    }

    #[test]
    fn edits_between_steps_never_route_through_walls(
        walls in prop::collection::vec(cell(), 0..25),
        start in cell(),
        goal in cell(),
        astar in any::<bool>(),
        steps in prop::collection::vec(
            (prop::option::of(cell()), 0.05f32..0.5, any::<bool>()),
            1..80,
        ),
    ) {
        let mode = if astar { SearchMode::AStar } else { SearchMode::Bfs };
        let mut f = build(&walls, start, goal, mode);
        let mut pos = f.agent();
        for (edit, dt, tick) in steps {
            if let Some(c) = edit {
                f.toggle_obstacle(c);
            }
            let seen = f.path().len();
            if tick {
                f.update(dt);
            } else {
                pos = f.advance(pos, dt);
            }
            for p in &f.path()[seen..] {
                prop_assert!(f.cost_grid().is_passable(*p), "stepped into wall {}", p);
            }
        }
    }

    #[test]
    fn recompute_twice_is_stable(
        walls in prop::collection::vec(cell(), 0..35),
        goal in cell(),
    ) {
        let mut f = build(&walls, Point::ZERO, goal, SearchMode::Bfs);
        let integration = f.integration().to_vec();
        let directions = f.directions().to_vec();
        f.recompute();
        prop_assert_eq!(f.integration(), integration.as_slice());
        prop_assert_eq!(f.directions(), directions.as_slice());
    }
}
