use gamelab_core::Point;

use crate::integration::IntegrationField;
use crate::traits::WeightedPather;

impl IntegrationField {
    /// Fill the field by FIFO relaxation from `goal`.
    ///
    /// A neighbor is re-queued every time its value strictly improves, so a
    /// cell may be expanded more than once; the sweep stops once no value can
    /// be lowered. Returns the number of expansions.
    pub fn bfs_field<P: WeightedPather>(&mut self, pather: &P, goal: Point) -> usize {
        let Some(gi) = self.reset(goal) else {
            return 0;
        };
        if pather.passable(goal) {
            self.queue.push_back(gi);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0;

        while let Some(ci) = self.queue.pop_front() {
            expanded += 1;
            let cp = self.rng.point(ci);
            let current = self.values[ci];

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.rng.index(np) else {
                    continue;
                };
                let candidate = current + pather.cost(cp, np);
                if candidate < self.values[ni] {
                    self.values[ni] = candidate;
                    self.queue.push_back(ni);
                }
            }
        }

        self.nbuf = nbuf;
        expanded
    }
}
