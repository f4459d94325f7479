//! Distance estimates between two cells.
//!
//! A heuristic is any `Fn(&Point, &Point) -> f64`, or one of the named variants in
//! [HeuristicKind]. With `1`/`sqrt(2)` step costs only [zero], [euclidean] and [chebyshev] never
//! overestimate the remaining cost; [manhattan] and [hybrid] can, which trades optimality for
//! fewer expansions.
use core::fmt;
use core::str::FromStr;
use grid_util::point::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub trait Heuristic {
    /// Non-negative estimate of the cost from `from` to `to`.
    fn estimate(&self, from: &Point, to: &Point) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&Point, &Point) -> f64,
{
    fn estimate(&self, from: &Point, to: &Point) -> f64 {
        self(from, to)
    }
}

fn deltas(p1: &Point, p2: &Point) -> (f64, f64) {
    ((p1.x - p2.x).abs() as f64, (p1.y - p2.y).abs() as f64)
}

/// Always `0`, which turns A* into uniform-cost search.
pub fn zero(_: &Point, _: &Point) -> f64 {
    0.0
}

pub fn manhattan(p1: &Point, p2: &Point) -> f64 {
    let (dx, dy) = deltas(p1, p2);
    dx + dy
}

pub fn euclidean(p1: &Point, p2: &Point) -> f64 {
    let (dx, dy) = deltas(p1, p2);
    (dx * dx + dy * dy).sqrt()
}

/// Also known as the diagonal distance.
pub fn chebyshev(p1: &Point, p2: &Point) -> f64 {
    let (dx, dy) = deltas(p1, p2);
    dx.max(dy)
}

/// Weighted sum of [manhattan] and [euclidean]. Negative or NaN weights count as `0`, so the
/// estimate is never negative.
pub fn hybrid(p1: &Point, p2: &Point, manhattan_weight: f64, euclidean_weight: f64) -> f64 {
    manhattan_weight.max(0.0) * manhattan(p1, p2) + euclidean_weight.max(0.0) * euclidean(p1, p2)
}

/// Weights for [hybrid], `0.5`/`0.5` by default. Weights below zero are treated as zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hybrid {
    pub manhattan_weight: f64,
    pub euclidean_weight: f64,
}

impl Default for Hybrid {
    fn default() -> Self {
        Hybrid {
            manhattan_weight: 0.5,
            euclidean_weight: 0.5,
        }
    }
}

impl Heuristic for Hybrid {
    fn estimate(&self, from: &Point, to: &Point) -> f64 {
        hybrid(from, to, self.manhattan_weight, self.euclidean_weight)
    }
}

/// The built-in heuristics, selectable by name from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeuristicKind {
    Zero,
    Manhattan,
    Euclidean,
    #[default]
    #[serde(alias = "diagonal")]
    Chebyshev,
    Hybrid(Hybrid),
}

impl HeuristicKind {
    /// The heuristics compared by the benchmark harness, in its reporting order.
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::Chebyshev,
        HeuristicKind::Hybrid(Hybrid {
            manhattan_weight: 0.5,
            euclidean_weight: 0.5,
        }),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeuristicKind::Zero => "zero",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Euclidean => "euclidean",
            HeuristicKind::Chebyshev => "diagonal",
            HeuristicKind::Hybrid(_) => "hybrid",
        }
    }
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, from: &Point, to: &Point) -> f64 {
        match self {
            HeuristicKind::Zero => zero(from, to),
            HeuristicKind::Manhattan => manhattan(from, to),
            HeuristicKind::Euclidean => euclidean(from, to),
            HeuristicKind::Chebyshev => chebyshev(from, to),
            HeuristicKind::Hybrid(weights) => weights.estimate(from, to),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown heuristic '{0}'")]
pub struct ParseHeuristicError(pub String);

impl FromStr for HeuristicKind {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "dijkstra" => Ok(HeuristicKind::Zero),
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "euclidean" => Ok(HeuristicKind::Euclidean),
            "diagonal" | "chebyshev" => Ok(HeuristicKind::Chebyshev),
            "hybrid" => Ok(HeuristicKind::Hybrid(Hybrid::default())),
            _ => Err(ParseHeuristicError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(1, 2);
        let b = Point::new(4, 6);
        assert_eq!(zero(&a, &b), 0.0);
        assert_eq!(manhattan(&a, &b), 7.0);
        assert_eq!(euclidean(&a, &b), 5.0);
        assert_eq!(chebyshev(&a, &b), 4.0);
        assert_eq!(hybrid(&a, &b, 0.5, 0.5), 6.0);
        assert_eq!(hybrid(&a, &b, 1.0, 0.0), 7.0);
        for h in HeuristicKind::ALL {
            assert_eq!(h.estimate(&a, &b), h.estimate(&b, &a));
            assert_eq!(h.estimate(&a, &a), 0.0);
        }
    }

    #[test]
    fn hybrid_ignores_negative_weights() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(hybrid(&a, &b, -1.0, 0.5), 2.5);
        assert_eq!(hybrid(&a, &b, 1.0, f64::NAN), 7.0);
        let weights: Hybrid =
            serde_json::from_str(r#"{"manhattan_weight": -2.0, "euclidean_weight": -1.0}"#)
                .unwrap();
        assert_eq!(weights.estimate(&a, &b), 0.0);
        let kind = HeuristicKind::Hybrid(Hybrid {
            manhattan_weight: -0.5,
            euclidean_weight: 1.0,
        });
        assert_eq!(kind.estimate(&a, &b), 5.0);
    }

    #[test]
    fn closures_are_heuristics() {
        let scaled = |p1: &Point, p2: &Point| 2.0 * chebyshev(p1, p2);
        assert_eq!(scaled.estimate(&Point::new(0, 0), &Point::new(3, 1)), 6.0);
        assert_eq!(manhattan.estimate(&Point::new(0, 0), &Point::new(3, 1)), 4.0);
    }

    #[test]
    fn parse_harness_names() {
        assert_eq!("diagonal".parse(), Ok(HeuristicKind::Chebyshev));
        assert_eq!("Chebyshev".parse(), Ok(HeuristicKind::Chebyshev));
        assert_eq!("dijkstra".parse(), Ok(HeuristicKind::Zero));
        assert_eq!(
            "hybrid".parse(),
            Ok(HeuristicKind::Hybrid(Hybrid::default()))
        );
        assert_eq!(
            "octile".parse::<HeuristicKind>(),
            Err(ParseHeuristicError("octile".to_owned()))
        );
        for h in HeuristicKind::ALL {
            assert_eq!(h.to_string().parse(), Ok(h));
        }
    }
}
