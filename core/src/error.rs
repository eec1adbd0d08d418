use thiserror::Error;

/// Errors returned while configuring or generating a maze
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Difficulty must be between 1 and 10, got {0}")]
    InvalidDifficulty(u8),

    #[error("Unknown difficulty '{0}'. Must be easy, medium, hard, extreme or 1-10")]
    UnknownDifficulty(String),

    #[error("Unknown difficulty curve '{0}'. Must be 'linear' or 'truncated'")]
    UnknownCurve(String),

    #[error("Invalid maze size {size_x}x{size_y}: each side must be between 1 and {max}")]
    InvalidSize { size_x: usize, size_y: usize, max: usize },

    /// A generation or carving step broke one of its own invariants.
    /// This is a defect in the generator, never a property of the input.
    #[error("Maze invariant violated: {0}")]
    Invariant(String),
}

impl MazeError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("{}", message);
        MazeError::Invariant(message)
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
