//! Text and binary renderings of a finished maze
//!
//! Both renderings use the same lattice: for a maze of R rows and C columns
//! the output is (R*2 + 1) x (C*2 + 1).
//! - Cell (x, y) sits at (y*2 + 1, x*2 + 1)
//! - The position between two cells (or a cell and the edge) is its border
//! - Positions with both coordinates even are lattice corners

use crate::grid::Cell;
use crate::layout::{Border, Side};
use crate::maze_gen::Maze;

const BLANK: char = ' ';

/// Lattice position of the border on `side` of `cell`
fn border_position(cell: Cell, side: Side) -> (usize, usize) {
    let (row, col) = (cell.y * 2 + 1, cell.x * 2 + 1);
    match side {
        Side::Top => (row - 1, col),
        Side::Bottom => (row + 1, col),
        Side::Left => (row, col - 1),
        Side::Right => (row, col + 1),
    }
}

/// Render the maze as a character grid
///
/// Corners are always `wall`. A border position is `wall` only when that side
/// is a wall, so the entrance and exit show up as gaps in the outer wall.
/// If `solution` is given and the maze saved its solution, the cells of the
/// main path are marked with it.
pub fn ascii_grid(maze: &Maze, wall: char, solution: Option<char>) -> Vec<Vec<char>> {
    let rows = maze.size_y() * 2 + 1;
    let cols = maze.size_x() * 2 + 1;
    let mut grid = vec![vec![BLANK; cols]; rows];

    for r in (0..rows).step_by(2) {
        for c in (0..cols).step_by(2) {
            grid[r][c] = wall;
        }
    }

    for (y, row) in maze.layout().rows().enumerate() {
        for (x, layout) in row.iter().enumerate() {
            let cell = Cell::new(x, y);
            for side in sides_drawn_by(cell) {
                if layout.border_is(side, Border::Wall) {
                    let (r, c) = border_position(cell, side);
                    grid[r][c] = wall;
                }
            }
        }
    }

    if let (Some(mark), Some(path)) = (solution, maze.solution()) {
        for cell in path {
            grid[cell.y * 2 + 1][cell.x * 2 + 1] = mark;
        }
    }

    grid
}

/// Each shared border is drawn once: by the cell below / to the right of it.
/// Cells on the top row and left column also draw the outer edge.
fn sides_drawn_by(cell: Cell) -> impl Iterator<Item = Side> {
    let top = (cell.y == 0).then_some(Side::Top);
    let left = (cell.x == 0).then_some(Side::Left);
    top.into_iter()
        .chain(left)
        .chain([Side::Bottom, Side::Right])
}

/// [`ascii_grid`] joined into lines
pub fn ascii_string(maze: &Maze, wall: char, solution: Option<char>) -> String {
    ascii_grid(maze, wall, solution)
        .iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the maze as a walkability grid: 1 = passable, 0 = wall
///
/// Cell centres are always 1; a border is 1 when its side is open, the
/// entrance or the exit.
pub fn binary_grid(maze: &Maze) -> Vec<Vec<u8>> {
    let rows = maze.size_y() * 2 + 1;
    let cols = maze.size_x() * 2 + 1;
    let mut grid = vec![vec![0u8; cols]; rows];

    for (y, row) in maze.layout().rows().enumerate() {
        for (x, layout) in row.iter().enumerate() {
            let cell = Cell::new(x, y);
            grid[y * 2 + 1][x * 2 + 1] = 1;
            for side in layout.open_sides() {
                let (r, c) = border_position(cell, side);
                grid[r][c] = 1;
            }
        }
    }

    grid
}
