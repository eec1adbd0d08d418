//! Maze configuration and the fluent builder used to set it

use crate::difficulty::{self, Difficulty, DifficultyCurve};
use crate::error::MazeError;
use crate::maze_gen::Maze;
use crate::{DEFAULT_SIZE, MAX_DIMENSION};

/// Everything a maze is a function of
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    pub seed: u64,
    pub size_x: usize,
    pub size_y: usize,
    /// 1 (easiest) to 10
    pub difficulty: u8,
    pub curve: DifficultyCurve,
    /// Keep the main path as the recorded solution
    pub save_solution: bool,
}

impl Default for MazeConfig {
    /// 16x16, medium, with a fresh random seed
    fn default() -> Self {
        Self {
            seed: rand::random(),
            size_x: DEFAULT_SIZE,
            size_y: DEFAULT_SIZE,
            difficulty: Difficulty::Medium.value(),
            curve: DifficultyCurve::default(),
            save_solution: false,
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<(), MazeError> {
        difficulty::validate(self.difficulty)?;

        let valid = |side: usize| (1..=MAX_DIMENSION).contains(&side);
        if !valid(self.size_x) || !valid(self.size_y) {
            return Err(MazeError::InvalidSize {
                size_x: self.size_x,
                size_y: self.size_y,
                max: MAX_DIMENSION,
            });
        }

        Ok(())
    }
}

/// Fluent configuration surface
///
/// A builder only holds settings. Every [`MazeBuilder::build`] generates from
/// the current settings, so changing the seed, size or difficulty always
/// yields a fresh maze.
///
/// # Example
/// ```
/// use maze_core::{Difficulty, MazeBuilder};
///
/// let maze = MazeBuilder::new()
///     .seed(7)
///     .size(25, 25)
///     .difficulty_level(Difficulty::Easy)
///     .save_solution(true)
///     .build()
///     .unwrap();
/// assert!(maze.solution().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MazeBuilder {
    config: MazeConfig,
}

impl MazeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: MazeConfig) -> Self {
        Self { config }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn size(mut self, size_x: usize, size_y: usize) -> Self {
        self.config.size_x = size_x;
        self.config.size_y = size_y;
        self
    }

    /// Set a numeric difficulty; anything outside 1-10 is rejected here
    pub fn difficulty(mut self, difficulty: u8) -> Result<Self, MazeError> {
        self.config.difficulty = difficulty::validate(difficulty)?;
        Ok(self)
    }

    pub fn difficulty_level(mut self, level: Difficulty) -> Self {
        self.config.difficulty = level.value();
        self
    }

    pub fn curve(mut self, curve: DifficultyCurve) -> Self {
        self.config.curve = curve;
        self
    }

    pub fn save_solution(mut self, save: bool) -> Self {
        self.config.save_solution = save;
        self
    }

    pub fn config(&self) -> MazeConfig {
        self.config.clone()
    }

    pub fn build(&self) -> Result<Maze, MazeError> {
        Maze::generate(&self.config)
    }
}
