//! Pathfinder - cost-weighted best-first search over the grid
//!
//! Open points are ordered by `accumulated_cost + manhattan(point, target)`.
//! Entering a cell costs that cell's passability; cells holding an entity or
//! with passability `<= 0` are never entered. A point is settled the first
//! time it is popped and is never expanded again.
//!
//! The Manhattan heuristic is kept as-is for arbitrary terrain weights; no
//! optimality guarantee is made beyond what it gives.
//!
//! Two goal modes exist: [`path_to_point`] (exact cell) and [`path_to_area`]
//! (any cell 4-adjacent to the target). The returned path excludes the start
//! cell and ends at the goal cell; `None` means unreachable.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use crate::grid::Grid;
use crate::types::Point;

/// Route from the start (exclusive) to the goal (inclusive).
pub type Path = VecDeque<Point>;

/// Path to exactly `end`.
pub fn path_to_point(grid: &Grid, start: Point, end: Point) -> Option<Path> {
    PathFinder::new(grid, start, end, move |p| p == end).find_path()
}

/// Path to any cell Manhattan-adjacent to `end`.
pub fn path_to_area(grid: &Grid, start: Point, end: Point) -> Option<Path> {
    PathFinder::new(grid, start, end, move |p| p.manhattan(end) == 1).find_path()
}

/// Total entry cost of walking `path` on `grid`.
pub fn path_cost(grid: &Grid, path: &Path) -> i64 {
    path.iter().map(|&p| grid.get(p).terrain.passability() as i64).sum()
}

#[derive(Debug, Clone, Copy)]
struct PathPoint {
    parent: Point,
    cost: i64,
    calculated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    priority: i64,
    seq: u64,
    pos: Point,
}

// BinaryHeap is a max-heap: lowest priority first, then insertion order.
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct PathFinder<'a, F> {
    grid: &'a Grid,
    start: Point,
    end: Point,
    is_target: F,
    points: HashMap<Point, PathPoint>,
    pending: BinaryHeap<Pending>,
    seq: u64,
}

impl<'a, F> PathFinder<'a, F>
where
    F: Fn(Point) -> bool,
{
    fn new(grid: &'a Grid, start: Point, end: Point, is_target: F) -> Self {
        Self {
            grid,
            start,
            end,
            is_target,
            points: HashMap::new(),
            pending: BinaryHeap::new(),
            seq: 0,
        }
    }

    fn find_path(mut self) -> Option<Path> {
        if !self.grid.in_bounds(self.start) {
            return None;
        }

        self.points.insert(
            self.start,
            PathPoint {
                parent: self.start,
                cost: 0,
                calculated: false,
            },
        );
        self.push(self.start, 0);

        while let Some(Pending { pos, .. }) = self.pending.pop() {
            if (self.is_target)(pos) {
                return Some(self.convert_path(pos));
            }
            self.explore_point(pos);
        }

        None
    }

    fn push(&mut self, pos: Point, cost: i64) {
        let priority = cost + self.dist_to_target(pos);
        self.pending.push(Pending {
            priority,
            seq: self.seq,
            pos,
        });
        self.seq += 1;
    }

    fn explore_point(&mut self, pos: Point) {
        let Some(current) = self.points.get_mut(&pos) else {
            return;
        };
        if current.calculated {
            return;
        }
        current.calculated = true;
        let cost = current.cost;

        for next in self.grid.neighbors(pos) {
            self.look_at_new(next, pos, cost);
        }
    }

    fn look_at_new(&mut self, next: Point, from: Point, current_cost: i64) {
        let step = self.grid.passability(next);
        if step <= 0 {
            return;
        }

        let new_cost = current_cost + step as i64;
        match self.points.get(&next) {
            Some(known) if known.calculated || new_cost >= known.cost => return,
            _ => {}
        }

        self.points.insert(
            next,
            PathPoint {
                parent: from,
                cost: new_cost,
                calculated: false,
            },
        );
        self.push(next, new_cost);
    }

    fn dist_to_target(&self, p: Point) -> i64 {
        p.manhattan(self.end) as i64
    }

    fn convert_path(&self, goal: Point) -> Path {
        let mut path = VecDeque::new();
        let mut current = goal;
        while current != self.start {
            path.push_front(current);
            current = self.points[&current].parent;
        }
        path
    }
}
