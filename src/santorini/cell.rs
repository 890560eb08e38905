use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::consts::Worker;
use super::coords::Spot;

/// One square of the grid: a bare tower height, or a tower with the worker
/// standing on it. Wire form: an integer, or `[height, "worker"]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Height(u8),
    Tower(u8, Worker),
}

impl Cell {
    pub fn height(&self) -> u8 {
        match self {
            Cell::Height(h) => *h,
            Cell::Tower(h, _) => *h,
        }
    }

    pub fn worker(&self) -> Option<Worker> {
        match self {
            Cell::Height(_) => None,
            Cell::Tower(_, w) => Some(*w),
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Tower(_, _))
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::Height(0)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Height(h) => write!(f, "{h}"),
            Cell::Tower(h, w) => write!(f, "{h}:{w}"),
        }
    }
}

/// The value form of a board: rows of cells, row-major. This is the shape
/// that crosses the wire and the shape players exchange with the referee.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid(pub Vec<Vec<Cell>>);

impl Grid {
    /// A grid of bare height-0 cells.
    pub fn empty(rows: usize, cols: usize) -> Grid {
        Grid(vec![vec![Cell::default(); cols]; rows])
    }

    pub fn rows(&self) -> usize {
        self.0.len()
    }

    pub fn cols(&self) -> usize {
        self.0.first().map_or(0, |row| row.len())
    }

    /// All rows hold the same number of cells.
    pub fn is_rectangular(&self) -> bool {
        let cols = self.cols();
        self.rows() > 0 && cols > 0 && self.0.iter().all(|row| row.len() == cols)
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.0[row][col]
    }

    /// Every worker present in the grid, with where it stands.
    pub fn workers(&self) -> impl Iterator<Item = (Worker, Spot)> + '_ {
        self.0.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.worker().map(|w| (w, Spot { row: r, col: c, height: cell.height() }))
            })
        })
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|row| row.iter().map(|cell| format!("{:<8}", cell.to_string())).join(" "))
            .join("\n");
        write!(f, "{rendered}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::santorini::consts::Worker;

    #[test]
    fn cells_decode_both_shapes() {
        let bare: Cell = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(bare, Cell::Height(3));

        let tower: Cell = serde_json::from_value(json!([2, "white1"])).unwrap();
        assert_eq!(tower, Cell::Tower(2, Worker::White1));
        assert_eq!(serde_json::to_value(tower).unwrap(), json!([2, "white1"]));
    }

    #[test]
    fn unknown_workers_are_rejected() {
        assert!(serde_json::from_value::<Cell>(json!([1, "green1"])).is_err());
    }

    #[test]
    fn grids_index_their_workers() {
        let grid: Grid = serde_json::from_value(json!([
            [0, 0, [1, "blue1"], 0, 0],
            [0, 0, 0, 0, 0],
            [0, [0, "white2"], 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0]
        ]))
        .unwrap();

        assert!(grid.is_rectangular());
        assert_eq!(grid.rows(), 5);

        let found: Vec<_> = grid.workers().collect();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&(Worker::Blue1, Spot { row: 0, col: 2, height: 1 })));
    }
}
