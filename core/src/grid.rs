//! Cell addressing, row-major grid storage and the occupancy map
//!
//! The occupancy map records which path owns each cell. Together with the
//! priority map it decides the order in which the growth engine visits cells:
//! a path always steps to its unclaimed neighbour with the greatest priority.

use core::ops::{Index, IndexMut};

use crate::error::MazeError;
use crate::path_tree::PathId;

/// One grid unit, addressed by column `x` and row `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// In-bounds neighbours in scan order: Up, Down, Left, Right
    pub fn neighbours(self, size_x: usize, size_y: usize) -> impl Iterator<Item = Cell> {
        // wrapping_sub turns an underflow into a huge index that fails the bounds check
        let candidates = [
            (self.x, self.y.wrapping_sub(1)),
            (self.x, self.y + 1),
            (self.x.wrapping_sub(1), self.y),
            (self.x + 1, self.y),
        ];

        candidates
            .into_iter()
            .filter(move |&(x, y)| x < size_x && y < size_y)
            .map(|(x, y)| Cell::new(x, y))
    }

    /// Whether the cell touches the outer edge of a `size_x × size_y` grid
    pub fn is_on_boundary(self, size_x: usize, size_y: usize) -> bool {
        self.x == 0 || self.y == 0 || self.x + 1 == size_x || self.y + 1 == size_y
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dense `size_y × size_x` storage indexed by [`Cell`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    size_x: usize,
    size_y: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn filled(size_x: usize, size_y: usize, value: T) -> Self {
        Self {
            size_x,
            size_y,
            cells: vec![value; size_x * size_y],
        }
    }
}

impl<T> Grid<T> {
    /// Wrap values laid out row by row. Panics if the length does not match.
    pub(crate) fn from_row_major(size_x: usize, size_y: usize, cells: Vec<T>) -> Self {
        assert_eq!(cells.len(), size_x * size_y, "grid data does not match its size");
        Self { size_x, size_y, cells }
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_y(&self) -> usize {
        self.size_y
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size_x && cell.y < self.size_y
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.contains(cell).then(|| &self.cells[cell.y * self.size_x + cell.x])
    }

    /// Values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.size_x.max(1))
    }

    /// Every cell of the grid in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size_x = self.size_x;
        (0..self.size_y).flat_map(move |y| (0..size_x).map(move |x| Cell::new(x, y)))
    }
}

impl<T> Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &T {
        assert!(self.contains(cell), "cell {} outside {}x{} grid", cell, self.size_x, self.size_y);
        &self.cells[cell.y * self.size_x + cell.x]
    }
}

impl<T> IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        assert!(self.contains(cell), "cell {} outside {}x{} grid", cell, self.size_x, self.size_y);
        &mut self.cells[cell.y * self.size_x + cell.x]
    }
}

/// Per-cell priorities in `[0, 1)`, drawn once per build
pub type PriorityMap = Grid<f32>;

/// Ownership state of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Unclaimed,
    /// Backtracked off the initial path; unavailable until that path is final
    Reclaimable,
    Claimed(PathId),
}

/// Which path owns each cell
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    grid: Grid<Occupancy>,
    /// Cells not yet `Claimed` (unclaimed or reclaimable)
    unclaimed: usize,
}

impl OccupancyMap {
    pub fn new(size_x: usize, size_y: usize) -> Self {
        Self {
            grid: Grid::filled(size_x, size_y, Occupancy::Unclaimed),
            unclaimed: size_x * size_y,
        }
    }

    pub fn size_x(&self) -> usize {
        self.grid.size_x()
    }

    pub fn size_y(&self) -> usize {
        self.grid.size_y()
    }

    pub fn get(&self, cell: Cell) -> Occupancy {
        self.grid[cell]
    }

    /// Assign an unclaimed cell to `path`
    pub fn claim(&mut self, cell: Cell, path: PathId) -> Result<(), MazeError> {
        match self.grid[cell] {
            Occupancy::Unclaimed => {
                self.grid[cell] = Occupancy::Claimed(path);
                self.unclaimed -= 1;
                Ok(())
            }
            other => Err(MazeError::invariant(format!(
                "cannot claim {} for path {}: cell is {:?}",
                cell, path, other
            ))),
        }
    }

    /// Release a cell the initial path backtracked off.
    ///
    /// Only root claims are provisional; every other claim is final.
    pub fn mark_reclaimable(&mut self, cell: Cell) -> Result<(), MazeError> {
        match self.grid[cell] {
            Occupancy::Claimed(PathId::ROOT) => {
                self.grid[cell] = Occupancy::Reclaimable;
                self.unclaimed += 1;
                Ok(())
            }
            other => Err(MazeError::invariant(format!(
                "cannot backtrack off {}: cell is {:?}",
                cell, other
            ))),
        }
    }

    /// Make a backtracked cell available again
    pub fn reset_reclaimable(&mut self, cell: Cell) {
        if self.grid[cell] == Occupancy::Reclaimable {
            self.grid[cell] = Occupancy::Unclaimed;
        }
    }

    pub fn unclaimed_count(&self) -> usize {
        self.unclaimed
    }

    pub fn is_full(&self) -> bool {
        self.unclaimed == 0
    }

    /// The unclaimed neighbour of `cell` with the strictly greatest priority.
    ///
    /// Neighbours are scanned Up, Down, Left, Right; on equal priorities the
    /// first one scanned wins.
    pub fn greatest_unclaimed_neighbour(&self, cell: Cell, priorities: &PriorityMap) -> Option<Cell> {
        let mut best: Option<(Cell, f32)> = None;

        for n in cell.neighbours(self.size_x(), self.size_y()) {
            if self.grid[n] != Occupancy::Unclaimed {
                continue;
            }
            let value = priorities[n];
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((n, value));
            }
        }

        best.map(|(c, _)| c)
    }
}
