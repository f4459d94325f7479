//! This module implements the A* loop on top of a successor function, in the style of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! but with floating point costs, a closed set that records every expanded node and a
//! deterministic `(f, h, row, col)` ordering of the frontier.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::{IndexMap, IndexSet};

use grid_util::point::Point;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::solver::{SearchResult, SearchStatus};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

struct SmallestCostHolder {
    estimated_cost: f64,
    heuristic: f64,
    node: Point,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest estimated cost first. Equal estimates
        // prefer the node closer to the goal, then the smaller row and column.
        other
            .estimated_cost
            .total_cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.total_cmp(&self.heuristic))
            .then_with(|| other.node.x.cmp(&self.node.x))
            .then_with(|| other.node.y.cmp(&self.node.y))
    }
}

fn reverse_path<V, F>(parents: &FxIndexMap<Point, V>, mut parent: F, start: usize) -> Vec<Point>
where
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<Point> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            *node
        })
    })
    .collect();
    path.reverse();
    path
}

/// Runs A* from `start` until `goal` is expanded, the frontier is empty or `max_expansions`
/// nodes have been expanded. Stale frontier entries are skipped when popped instead of being
/// removed on improvement.
pub(crate) fn astar<FN, IN, FH>(
    start: &Point,
    goal: &Point,
    mut successors: FN,
    mut heuristic: FH,
    max_expansions: Option<usize>,
) -> SearchResult
where
    FN: FnMut(&Point) -> IN,
    IN: IntoIterator<Item = (Point, f64)>,
    FH: FnMut(&Point) -> f64,
{
    let mut to_see = BinaryHeap::new();
    let h = heuristic(start);
    to_see.push(SmallestCostHolder {
        estimated_cost: h,
        heuristic: h,
        node: *start,
        index: 0,
    });
    // Maps each discovered node to its parent index and best known cost from the start.
    let mut parents: FxIndexMap<Point, (usize, f64)> = FxIndexMap::default();
    parents.insert(*start, (usize::MAX, 0.0));
    let mut closed: FxIndexSet<Point> = FxIndexSet::default();

    while let Some(SmallestCostHolder { node, index, .. }) = to_see.pop() {
        if closed.contains(&node) {
            continue;
        }
        if max_expansions.is_some_and(|limit| closed.len() >= limit) {
            debug!(
                "Expansion budget of {} exhausted before reaching {}",
                closed.len(),
                goal
            );
            return SearchResult::unsolved(closed, SearchStatus::BudgetExhausted);
        }
        closed.insert(node);

        let cost = parents[index].1;
        if node == *goal {
            let path = reverse_path(&parents, |&(p, _)| p, index);
            trace!(
                "Reached {} from {} with cost {:.3} after {} expansions",
                goal,
                start,
                cost,
                closed.len()
            );
            return SearchResult {
                path,
                visited: closed,
                cost,
                status: SearchStatus::Found,
            };
        }

        for (successor, move_cost) in successors(&node) {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                heuristic: h,
                node: successor,
                index: n,
            });
        }
    }
    trace!(
        "No path from {} to {}, {} nodes expanded",
        start,
        goal,
        closed.len()
    );
    SearchResult::unsolved(closed, SearchStatus::NoPath)
}
