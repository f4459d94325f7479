use crate::astar::{astar, FxIndexSet};
use crate::config::SearchConfig;
use crate::error::{Endpoint, Result, SearchError};
use crate::grid::Grid;
use crate::heuristic::{Heuristic, HeuristicKind};
use grid_util::point::Point;
use log::debug;

/// How a search ended. Only [Found](SearchStatus::Found) comes with a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Found,
    /// The frontier ran empty; `visited` holds everything reachable from the start.
    NoPath,
    /// The start or goal cell is blocked, nothing was searched.
    Blocked,
    /// The expansion budget ran out before the goal was expanded.
    BudgetExhausted,
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Start to goal inclusive, empty unless the goal was reached.
    pub path: Vec<Point>,
    /// Every expanded cell, in expansion order.
    pub visited: FxIndexSet<Point>,
    /// Best known cost of reaching the goal, `0.0` if it was not reached. Matches
    /// [path_cost](crate::path_cost) of `path` unless the heuristic is inconsistent.
    pub cost: f64,
    pub status: SearchStatus,
}

impl SearchResult {
    pub(crate) fn unsolved(visited: FxIndexSet<Point>, status: SearchStatus) -> SearchResult {
        SearchResult {
            path: Vec::new(),
            visited,
            cost: 0.0,
            status,
        }
    }

    pub fn found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    pub fn into_parts(self) -> (Vec<Point>, FxIndexSet<Point>) {
        (self.path, self.visited)
    }
}

/// Computes a shortest path from `start` to `goal` on an 8-connected grid where orthogonal
/// moves cost `1`, diagonal moves cost `sqrt(2)` and diagonals may not cut a blocked corner.
/// The path is optimal if `heuristic` never overestimates the remaining cost.
///
/// Returns an error only if `start` or `goal` lies outside the grid. A blocked endpoint or an
/// unreachable goal give an empty path.
pub fn search<H>(start: Point, goal: Point, grid: &Grid, heuristic: &H) -> Result<SearchResult>
where
    H: Heuristic + ?Sized,
{
    run(grid, start, goal, heuristic, None)
}

/// A reusable search setup: a heuristic plus an optional limit on the number of expanded nodes.
#[derive(Clone, Debug)]
pub struct AstarSolver<H = HeuristicKind> {
    pub heuristic: H,
    pub max_expansions: Option<usize>,
}

impl AstarSolver<HeuristicKind> {
    pub fn from_config(config: &SearchConfig) -> AstarSolver<HeuristicKind> {
        AstarSolver {
            heuristic: config.heuristic,
            max_expansions: config.max_expansions,
        }
    }
}

impl Default for AstarSolver<HeuristicKind> {
    fn default() -> Self {
        AstarSolver::from_config(&SearchConfig::default())
    }
}

impl<H: Heuristic> AstarSolver<H> {
    pub fn new(heuristic: H) -> AstarSolver<H> {
        AstarSolver {
            heuristic,
            max_expansions: None,
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Same as [search], stopping with [SearchStatus::BudgetExhausted] once the expansion
    /// limit is hit.
    pub fn search(&self, grid: &Grid, start: Point, goal: Point) -> Result<SearchResult> {
        run(grid, start, goal, &self.heuristic, self.max_expansions)
    }
}

fn check_bounds(grid: &Grid, endpoint: Endpoint, coord: Point) -> Result<()> {
    if grid.in_bounds(&coord) {
        Ok(())
    } else {
        let (rows, cols) = grid.dimensions();
        debug!("Rejecting {} {} outside {}x{} grid", endpoint, coord, rows, cols);
        Err(SearchError::OutOfBounds {
            endpoint,
            coord,
            rows,
            cols,
        })
    }
}

fn run<H>(
    grid: &Grid,
    start: Point,
    goal: Point,
    heuristic: &H,
    max_expansions: Option<usize>,
) -> Result<SearchResult>
where
    H: Heuristic + ?Sized,
{
    check_bounds(grid, Endpoint::Start, start)?;
    check_bounds(grid, Endpoint::Goal, goal)?;
    if grid.is_blocked(&start) || grid.is_blocked(&goal) {
        debug!("{} or {} is blocked, not searching", start, goal);
        return Ok(SearchResult::unsolved(
            FxIndexSet::default(),
            SearchStatus::Blocked,
        ));
    }
    Ok(astar(
        &start,
        &goal,
        |node| grid.neighborhood_points_and_cost(node),
        |point| heuristic.estimate(point, &goal),
        max_expansions,
    ))
}
