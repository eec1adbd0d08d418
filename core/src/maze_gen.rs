//! Maze assembly
//!
//! Pipeline for one build:
//! 1. Validate the configuration (nothing is drawn or allocated before this)
//! 2. Draw the starting cell and the priority map from the seed
//! 3. Grow the main path and its branches until every cell is claimed
//! 4. Carve the paths into per-cell borders, entrance and exit
//!
//! The result is immutable. The same configuration always produces the same
//! maze, so a maze can be shared by publishing its configuration alone.

use crate::builder::MazeConfig;
use crate::difficulty::{Bounds, DifficultyCurve};
use crate::error::MazeError;
use crate::grid::Cell;
use crate::growth;
use crate::layout::{self, Border, CellLayout, LayoutGrid, Side};
use crate::rng;

/// A finished maze
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    seed: u64,
    difficulty: u8,
    curve: DifficultyCurve,
    size_x: usize,
    size_y: usize,
    start: Cell,
    bounds: Bounds,
    path_count: usize,
    layout: LayoutGrid,
    solution: Option<Vec<Cell>>,
}

impl Maze {
    /// Generate the maze described by `config`
    ///
    /// # Returns
    /// * `Ok(Maze)` - the finished maze
    /// * `Err(MazeError::InvalidDifficulty | InvalidSize)` - rejected configuration
    /// * `Err(MazeError::Invariant)` - a defect in the generator itself
    ///
    /// # Example
    /// ```
    /// use maze_core::{Maze, MazeBuilder, Difficulty};
    ///
    /// let config = MazeBuilder::new()
    ///     .seed(42)
    ///     .size(8, 6)
    ///     .difficulty_level(Difficulty::Hard)
    ///     .config();
    /// let maze = Maze::generate(&config).unwrap();
    /// assert_eq!(maze.start().y, 0);
    /// ```
    pub fn generate(config: &MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;

        let (size_x, size_y) = (config.size_x, config.size_y);
        let bounds = Bounds::compute(config.difficulty, size_x, size_y, config.curve);
        tracing::debug!(
            "Generating {}x{} maze: seed={}, difficulty={} ({}), min_moves={}, max_sub_path_moves={}",
            size_x,
            size_y,
            config.seed,
            config.difficulty,
            config.curve,
            bounds.min_moves,
            bounds.max_sub_path_moves
        );

        // Nothing may draw from the generator before this call
        let draw = rng::draw_sequence(config.seed, size_x, size_y);

        let growth = growth::grow(draw.start, &draw.priorities, bounds)?;
        let layout = layout::carve(&growth.tree, size_x, size_y)?;

        let solution = config
            .save_solution
            .then(|| growth.tree.root().cells().to_vec());

        tracing::debug!(
            "Maze ready: {} paths, main path {} cells",
            growth.tree.len(),
            growth.tree.root().len()
        );

        Ok(Self {
            seed: config.seed,
            difficulty: config.difficulty,
            curve: config.curve,
            size_x,
            size_y,
            start: draw.start,
            bounds,
            path_count: growth.tree.len(),
            layout,
            solution,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn curve(&self) -> DifficultyCurve {
        self.curve
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_y(&self) -> usize {
        self.size_y
    }

    /// First cell of the main path, always on row 0
    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of paths (main path plus branches) the maze was grown from
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    pub fn layout(&self) -> &LayoutGrid {
        &self.layout
    }

    /// Borders of the cell at column `x`, row `y`
    pub fn cell(&self, x: usize, y: usize) -> Option<&CellLayout> {
        self.layout.get(Cell::new(x, y))
    }

    /// The main path from entrance to exit, if it was saved
    pub fn solution(&self) -> Option<&[Cell]> {
        self.solution.as_deref()
    }

    pub fn entrance(&self) -> Option<(Cell, Side)> {
        self.layout.find(Border::Entrance).into_iter().next()
    }

    pub fn exit(&self) -> Option<(Cell, Side)> {
        self.layout.find(Border::Exit).into_iter().next()
    }

    /// The configuration that reproduces this maze
    pub fn config(&self) -> MazeConfig {
        MazeConfig {
            seed: self.seed,
            size_x: self.size_x,
            size_y: self.size_y,
            difficulty: self.difficulty,
            curve: self.curve,
            save_solution: self.solution.is_some(),
        }
    }
}

#[cfg(test)]
pub(crate) fn from_parts(config: &MazeConfig, layout: LayoutGrid, solution: Option<Vec<Cell>>) -> Maze {
    let start = layout
        .find(Border::Entrance)
        .first()
        .map(|&(cell, _)| cell)
        .unwrap_or(Cell::new(0, 0));

    Maze {
        seed: config.seed,
        difficulty: config.difficulty,
        curve: config.curve,
        size_x: layout.size_x(),
        size_y: layout.size_y(),
        start,
        bounds: Bounds::compute(config.difficulty, layout.size_x(), layout.size_y(), config.curve),
        path_count: 0,
        layout,
        solution,
    }
}
