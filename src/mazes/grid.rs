//! Rectangular grid maze with 4-neighborhood moves.
//!
//! Rows use one character per cell:
//! - `#` wall
//! - `.` floor
//! - `S` floor, start cell (at most one)
//! - `G` floor, goal cell
//!
//! Node id of `(row, col)` is `row * width + col`. Walls are nodes with no
//! neighbors, so ids stay dense.

use crate::error::MazeError;
use crate::traits::{Maze, NodeId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Wall,
    Floor,
    Goal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {ch:?} at ({row}, {col})")]
    UnknownCell { row: usize, col: usize, ch: char },

    #[error("second start cell at ({row}, {col})")]
    DuplicateStart { row: usize, col: usize },
}

#[derive(Debug, Clone)]
pub struct GridMaze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Option<NodeId>,
}

impl GridMaze {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut start = None;
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Floor,
                    'G' => Cell::Goal,
                    'S' => {
                        if start.is_some() {
                            return Err(GridError::DuplicateStart { row, col });
                        }
                        start = Some(row * width + col);
                        Cell::Floor
                    }
                    ch => return Err(GridError::UnknownCell { row, col, ch }),
                };
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            start,
        })
    }

    /// Start cell marked `S`, if any.
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(row, col)` of a node id.
    pub fn cell_of(&self, id: NodeId) -> (usize, usize) {
        (id / self.width, id % self.width)
    }

    pub fn id_of(&self, row: usize, col: usize) -> NodeId {
        row * self.width + col
    }

    pub fn is_open(&self, id: NodeId) -> bool {
        matches!(self.cells.get(id), Some(Cell::Floor | Cell::Goal))
    }
}

impl Maze for GridMaze {
    fn num_nodes(&self) -> usize {
        self.cells.len()
    }

    fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, MazeError> {
        if id >= self.cells.len() {
            return Err(MazeError::new(id, "cell outside grid"));
        }
        if !self.is_open(id) {
            return Ok(Vec::new());
        }
        let (row, col) = self.cell_of(id);
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push(self.id_of(row - 1, col));
        }
        if col + 1 < self.width {
            out.push(self.id_of(row, col + 1));
        }
        if row + 1 < self.height {
            out.push(self.id_of(row + 1, col));
        }
        if col > 0 {
            out.push(self.id_of(row, col - 1));
        }
        out.retain(|&n| self.is_open(n));
        Ok(out)
    }

    fn has_goal(&self, id: NodeId) -> bool {
        matches!(self.cells.get(id), Some(Cell::Goal))
    }
}
