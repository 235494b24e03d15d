use std::collections::BinaryHeap;

use gamelab_core::Point;

use crate::integration::{IntegrationField, NodeRef};
use crate::traits::AstarPather;

impl IntegrationField {
    /// Fill the field with a best-first search from `goal`, ordered by
    /// `g + estimate(cell, start)`.
    ///
    /// A cell is closed the first time it is popped and never expanded again.
    /// The search runs until the open list is empty, so every cell reachable
    /// from the goal receives a value, not only those on the way to `start`.
    /// Returns the number of cells closed.
    pub fn astar_field<P: AstarPather>(&mut self, pather: &P, goal: Point, start: Point) -> usize {
        let Some(gi) = self.reset(goal) else {
            return 0;
        };

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: gi,
            f: pather.estimate(goal, start),
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0;

        while let Some(current) = open.pop() {
            let ci = current.idx;
            if self.closed[ci] {
                continue;
            }
            self.closed[ci] = true;

            let cp = self.rng.point(ci);
            if !pather.passable(cp) {
                continue;
            }
            expanded += 1;
            let current_g = self.values[ci];

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.rng.index(np) else {
                    continue;
                };
                if self.closed[ni] {
                    continue;
                }
                let tentative = current_g + pather.cost(cp, np);
                if tentative >= self.values[ni] {
                    continue;
                }
                self.values[ni] = tentative;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative + pather.estimate(np, start),
                });
            }
        }

        self.nbuf = nbuf;
        expanded
    }
}
