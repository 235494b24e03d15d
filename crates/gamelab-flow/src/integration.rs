use std::collections::VecDeque;
use std::fmt;

use gamelab_core::{Point, Range};

use crate::traits::AstarPather;

/// Sentinel integration value meaning "not reached by the last search".
pub const UNREACHED: f32 = 999_999.0;

/// How the integration field is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchMode {
    /// FIFO relaxation sweep from the goal.
    #[default]
    Bfs,
    /// Best-first search from the goal, guided towards the start cell.
    AStar,
}

impl SearchMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Bfs => Self::AStar,
            Self::AStar => Self::Bfs,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bfs => f.write_str("BFS"),
            Self::AStar => f.write_str("A*"),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority-queue entry for A*
// ---------------------------------------------------------------------------

/// Reference into the value array, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: f32,
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first; lower
        // index wins ties so pop order is deterministic.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// IntegrationField
// ---------------------------------------------------------------------------

/// Per-cell accumulated cost to the goal.
///
/// `IntegrationField` owns its work queues and scratch buffers so repeated
/// recomputations do not reallocate.
#[derive(Clone, Debug)]
pub struct IntegrationField {
    pub(crate) rng: Range,
    pub(crate) values: Vec<f32>,
    pub(crate) queue: VecDeque<usize>,
    pub(crate) closed: Vec<bool>,
    pub(crate) nbuf: Vec<Point>,
}

impl IntegrationField {
    /// Create an all-unreached field over `rng`.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            values: vec![UNREACHED; len],
            queue: VecDeque::new(),
            closed: vec![false; len],
            nbuf: Vec::with_capacity(8),
        }
    }

    /// The grid rectangle covered.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Row-major integration values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Integration value at `p`; [`UNREACHED`] outside the range.
    #[inline]
    pub fn at(&self, p: Point) -> f32 {
        match self.rng.index(p) {
            Some(i) => self.values[i],
            None => UNREACHED,
        }
    }

    /// Whether the last search reached `p`.
    #[inline]
    pub fn is_reached(&self, p: Point) -> bool {
        self.at(p) < UNREACHED
    }

    /// Run the search selected by `mode` from `goal`. `start` only guides A*.
    ///
    /// Returns the number of cells expanded. Does nothing (and returns 0) if
    /// `goal` is outside the range.
    pub fn compute<P: AstarPather>(
        &mut self,
        pather: &P,
        mode: SearchMode,
        goal: Point,
        start: Point,
    ) -> usize {
        match mode {
            SearchMode::Bfs => self.bfs_field(pather, goal),
            SearchMode::AStar => self.astar_field(pather, goal, start),
        }
    }

    /// Mark every cell unreached and seed `goal` with 0. Returns the goal's
    /// index, or `None` when it lies outside the range.
    pub(crate) fn reset(&mut self, goal: Point) -> Option<usize> {
        self.values.fill(UNREACHED);
        self.closed.fill(false);
        self.queue.clear();
        let gi = self.rng.index(goal)?;
        self.values[gi] = 0.0;
        Some(gi)
    }
}
