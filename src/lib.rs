//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search on an 8-connected grid.
//! Orthogonal moves cost `1` and diagonal moves `sqrt(2)`; a diagonal move is only allowed when
//! both orthogonal cells it passes between are open, so paths never cut a wall corner.
//! Heuristics are swappable per call: pass a function such as [manhattan], a closure, or a
//! [HeuristicKind] picked from configuration.
//!
//! Besides the path, every search reports the set of expanded cells, which is what benchmark
//! harnesses compare heuristics by. Ties between equal estimated costs are broken by the
//! heuristic value and then by coordinate, so repeated searches expand cells in the same order.
//!
//! Coordinates are [Point]s holding the row in `x` and the column in `y`.
//!
//! ```
//! use grid_astar::{heuristic::chebyshev, search, Grid, Point};
//!
//! let grid = Grid::from_rows(&[[0u8, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
//! let result = search(Point::new(0, 0), Point::new(2, 2), &grid, &chebyshev).unwrap();
//! assert_eq!(result.path.len(), 5);
//! ```
mod astar;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod solver;

pub use astar::FxIndexSet;
pub use config::SearchConfig;
pub use error::{Endpoint, GridError, Result, SearchError};
pub use grid::{path_cost, step_cost, Grid, MOVING_AI_WALLS};
pub use grid_util::point::Point;
pub use heuristic::{
    chebyshev, euclidean, hybrid, manhattan, zero, Heuristic, HeuristicKind, Hybrid,
};
pub use solver::{search, AstarSolver, SearchResult, SearchStatus};

/// A grid cell as `(row, col)`.
pub type Coordinate = Point;

/// Cost of a move along a row or column.
pub const ORTHOGONAL_COST: f64 = 1.0;
/// Cost of a diagonal move.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Inline capacity for neighbour lists, the full Moore neighbourhood.
const N_SMALLVEC_SIZE: usize = 8;
