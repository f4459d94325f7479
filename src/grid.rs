use crate::error::{GridError, Result};
use crate::{DIAGONAL_COST, N_SMALLVEC_SIZE, ORTHOGONAL_COST};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid as _};
use grid_util::point::Point;
use log::debug;
use smallvec::SmallVec;

/// Wall characters of the Moving AI map format as treated by the benchmark harness. Every other
/// character is open terrain.
pub const MOVING_AI_WALLS: [char; 2] = ['@', 'T'];

/// Row/column offsets of the 8-neighbourhood in expansion order: the four orthogonal moves
/// followed by the four diagonal ones.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// [Grid] is an immutable traversability map. Blocked cells are stored as [true] in the
/// underlying [BoolGrid], indexed with the row as `x` and the column as `y`. There is no mutation
/// API, so a grid can be shared freely between concurrent searches.
#[derive(Clone, Debug)]
pub struct Grid {
    grid: BoolGrid,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Builds a grid from rows of flags where `0` is open and any other value is blocked.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Grid> {
        let cols = check_shape(rows.iter().map(|r| r.as_ref().len()))?;
        Ok(Grid::from_fn(rows.len(), cols, |p| {
            rows[p.x as usize].as_ref()[p.y as usize] != 0
        }))
    }

    /// Builds a grid from rows of flags where [true] marks a blocked cell.
    pub fn from_bools<R: AsRef<[bool]>>(rows: &[R]) -> Result<Grid> {
        let cols = check_shape(rows.iter().map(|r| r.as_ref().len()))?;
        Ok(Grid::from_fn(rows.len(), cols, |p| {
            rows[p.x as usize].as_ref()[p.y as usize]
        }))
    }

    /// Builds a grid from map text, one string per row. Characters contained in `walls` are
    /// blocked, see [MOVING_AI_WALLS].
    pub fn from_char_rows<S: AsRef<str>>(lines: &[S], walls: &[char]) -> Result<Grid> {
        let rows = lines
            .iter()
            .map(|line| {
                line.as_ref()
                    .chars()
                    .map(|c| walls.contains(&c))
                    .collect::<Vec<bool>>()
            })
            .collect::<Vec<_>>();
        Grid::from_bools(&rows)
    }

    /// Builds a `rows` x `cols` grid, asking `blocked` for every cell. Zero-sized grids are
    /// accepted here; they simply have no cell in bounds.
    pub fn from_fn<F>(rows: usize, cols: usize, mut blocked: F) -> Grid
    where
        F: FnMut(Point) -> bool,
    {
        let mut grid = BoolGrid::new(rows, cols, false);
        for x in 0..rows {
            for y in 0..cols {
                grid.set(x, y, blocked(Point::new(x as i32, y as i32)));
            }
        }
        Grid { grid, rows, cols }
    }

    /// `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.rows
            && (point.y as usize) < self.cols
    }

    /// False if the point is out of bounds or blocked.
    pub fn is_open(&self, point: &Point) -> bool {
        self.in_bounds(point) && !self.grid.get_point(*point)
    }

    /// True only for in-bounds blocked cells.
    pub fn is_blocked(&self, point: &Point) -> bool {
        self.in_bounds(point) && self.grid.get_point(*point)
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        (0..self.rows as i32)
            .flat_map(|x| (0..self.cols as i32).map(move |y| Point::new(x, y)))
            .filter(|p| self.is_open(p))
            .count()
    }

    /// Whether a single step from `from` to the adjacent cell `to` is allowed. A diagonal step
    /// additionally needs both orthogonal cells it passes between to be open, so paths never
    /// clip a wall corner.
    pub fn can_move_to(&self, to: Point, from: Point) -> bool {
        debug_assert!((from.x - to.x).abs() <= 1 && (from.y - to.y).abs() <= 1);
        if !self.is_open(&to) {
            return false;
        }
        if from.x != to.x && from.y != to.y {
            self.is_open(&Point::new(to.x, from.y)) && self.is_open(&Point::new(from.x, to.y))
        } else {
            true
        }
    }

    /// The reachable neighbours of `pos` with their move cost, in a fixed order.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .filter(|p| self.can_move_to(*p, *pos))
            .map(|p| (p, step_cost(pos, &p)))
            .collect()
    }
}

/// Cost of a single move between adjacent cells: `sqrt(2)` if both row and column change, `1`
/// otherwise.
pub fn step_cost(a: &Point, b: &Point) -> f64 {
    if a.x != b.x && a.y != b.y {
        DIAGONAL_COST
    } else {
        ORTHOGONAL_COST
    }
}

/// Sum of [step_cost] along a path. Empty and single-cell paths cost nothing.
pub fn path_cost(path: &[Point]) -> f64 {
    path.windows(2).map(|w| step_cost(&w[0], &w[1])).sum()
}

/// Validates that rows are non-empty and equally long, returning the column count.
fn check_shape<I: Iterator<Item = usize>>(mut lengths: I) -> std::result::Result<usize, GridError> {
    let expected = match lengths.next() {
        Some(0) | None => {
            debug!("Rejecting grid without cells");
            return Err(GridError::Empty);
        }
        Some(n) => n,
    };
    for (i, found) in lengths.enumerate() {
        if found != expected {
            debug!("Rejecting ragged grid at row {}", i + 1);
            return Err(GridError::Ragged {
                row: i + 1,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for x in 0..self.rows {
            let line = (0..self.cols)
                .map(|y| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn rejects_empty_and_ragged() {
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(
            Grid::from_rows(&empty).unwrap_err(),
            SearchError::InvalidGrid(GridError::Empty)
        );
        assert_eq!(
            Grid::from_rows(&[[0u8; 0]]).unwrap_err(),
            SearchError::InvalidGrid(GridError::Empty)
        );
        let ragged: Vec<Vec<u8>> = vec![vec![0, 0, 0], vec![0, 0]];
        assert_eq!(
            Grid::from_rows(&ragged).unwrap_err(),
            SearchError::InvalidGrid(GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn bounds_and_blocked_cells() {
        // |.#.|
        // |...|
        let grid = Grid::from_rows(&[[0u8, 1, 0], [0, 0, 0]]).unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert!(grid.is_open(&Point::new(0, 0)));
        assert!(!grid.is_open(&Point::new(0, 1)));
        assert!(grid.is_blocked(&Point::new(0, 1)));
        assert!(!grid.is_open(&Point::new(-1, 0)));
        assert!(!grid.is_open(&Point::new(2, 0)));
        assert!(!grid.is_open(&Point::new(0, 3)));
        assert!(!grid.is_blocked(&Point::new(0, 3)));
        assert_eq!(grid.open_count(), 5);
    }

    #[test]
    fn char_rows_use_wall_set() {
        let grid = Grid::from_char_rows(&[".@T", "G.S"], &MOVING_AI_WALLS).unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert!(grid.is_blocked(&Point::new(0, 1)));
        assert!(grid.is_blocked(&Point::new(0, 2)));
        assert!(grid.is_open(&Point::new(1, 0)));
        assert!(grid.is_open(&Point::new(1, 2)));
        assert!(Grid::from_char_rows(&["..", "."], &MOVING_AI_WALLS).is_err());
    }

    #[test]
    fn neighbourhood_of_open_cell() {
        let grid = Grid::from_fn(3, 3, |_| false);
        let center = grid.neighborhood_points_and_cost(&Point::new(1, 1));
        assert_eq!(center.len(), 8);
        assert_eq!(center[0], (Point::new(0, 1), ORTHOGONAL_COST));
        assert_eq!(center[4], (Point::new(0, 0), DIAGONAL_COST));
        let corner = grid.neighborhood_points_and_cost(&Point::new(0, 0));
        assert_eq!(
            corner.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
    }

    /// A single blocked orthogonal cell is enough to forbid the diagonal past it.
    #[test]
    fn no_corner_cutting() {
        //  ___
        // |.#|
        // |..|
        //  __
        let grid = Grid::from_rows(&[[0u8, 1], [0, 0]]).unwrap();
        assert!(!grid.can_move_to(Point::new(1, 1), Point::new(0, 0)));
        assert!(grid.can_move_to(Point::new(1, 0), Point::new(0, 0)));
        assert!(grid.can_move_to(Point::new(1, 1), Point::new(1, 0)));
        let open = Grid::from_fn(2, 2, |_| false);
        assert!(open.can_move_to(Point::new(1, 1), Point::new(0, 0)));
    }

    #[test]
    fn costs_along_path() {
        let path = [Point::new(0, 0), Point::new(1, 1), Point::new(1, 2)];
        assert!((path_cost(&path) - (DIAGONAL_COST + 1.0)).abs() < 1e-12);
        assert_eq!(path_cost(&path[..1]), 0.0);
        assert_eq!(path_cost(&[]), 0.0);
    }

    #[test]
    fn display_marks_walls() {
        let grid = Grid::from_rows(&[[0u8, 1], [1, 0]]).unwrap();
        assert_eq!(grid.to_string(), ".#\n#.\n");
    }

    /// Rows and columns must not be swapped when the grid is not square, and cells past the
    /// storage's bit words stay addressable.
    #[test]
    fn non_square_grid_keeps_row_col_order() {
        let grid = Grid::from_fn(2, 5, |p| p.x == 1 && p.y == 3);
        assert_eq!(grid.dimensions(), (2, 5));
        assert!(grid.is_blocked(&Point::new(1, 3)));
        assert!(grid.is_open(&Point::new(0, 3)));
        assert!(grid.is_open(&Point::new(1, 4)));
        assert!(!grid.is_open(&Point::new(3, 1)));
        assert!(!grid.is_blocked(&Point::new(3, 1)));
        assert!(!grid.is_open(&Point::new(i32::MIN, 0)));
        assert_eq!(grid.open_count(), 9);
        assert_eq!(grid.to_string(), ".....\n...#.\n");

        let tall = Grid::from_fn(70, 3, |p| p.x == 69 && p.y == 2);
        assert!(tall.is_blocked(&Point::new(69, 2)));
        assert!(tall.is_open(&Point::new(69, 1)));
        assert_eq!(tall.open_count(), 70 * 3 - 1);
    }
}
