//! Search configuration, loadable with serde from whatever format the caller uses.

use serde::{Deserialize, Serialize};

use crate::heuristic::HeuristicKind;

/// Settings for an [AstarSolver](crate::AstarSolver).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Heuristic used to estimate the remaining cost, Chebyshev unless set.
    pub heuristic: HeuristicKind,

    /// Maximum nodes to expand; unlimited if absent.
    pub max_expansions: Option<usize>,
}
