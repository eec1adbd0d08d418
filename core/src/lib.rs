//! Seeded branching-path maze generation
//!
//! A maze is grown as a tree of paths over a rectangular grid: one main path
//! from an entrance on the top edge to an exit somewhere on the boundary, and
//! branches grown off it (and off each other) until every cell belongs to
//! exactly one path. The result is a perfect maze: every cell is reachable and
//! there is exactly one route between any two cells.
//!
//! Generation is a pure function of (seed, size, difficulty, curve), so the
//! same configuration always reproduces the same maze.

pub mod builder;
pub mod difficulty;
pub mod error;
pub mod grid;
pub mod growth;
pub mod layout;
pub mod maze_gen;
pub mod path_tree;
pub mod render;
pub mod rng;

// Re-export commonly used types for convenience
pub use builder::{MazeBuilder, MazeConfig};
pub use difficulty::{Bounds, Difficulty, DifficultyCurve};
pub use error::MazeError;
pub use grid::Cell;
pub use layout::{Border, CellLayout, LayoutGrid, Side};
pub use maze_gen::Maze;
pub use rng::Lcg48;

/// Default maze dimensions (cells, not including walls)
pub const DEFAULT_SIZE: usize = 16;

/// Largest accepted width or height
pub const MAX_DIMENSION: usize = 1024;

/// Rendered grid side for `cells` cells: one wall line around and between every cell
pub const fn rendered_size(cells: usize) -> usize {
    cells * 2 + 1
}
