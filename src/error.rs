//! Error types for grid construction and search input validation.
//!
//! Only structurally invalid input is an error. An unreachable goal or a blocked endpoint is a
//! regular [SearchResult](crate::SearchResult) with an empty path.

use core::fmt;
use grid_util::point::Point;
use thiserror::Error;

/// Reason a set of rows could not be turned into a [Grid](crate::Grid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Which end of the requested path an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridError),

    #[error("{endpoint} {coord} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        coord: Point,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, SearchError>;
