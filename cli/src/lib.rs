use std::fs;
use std::path::Path;

use maze_core::render;
use maze_core::{Bounds, Cell, Maze, MazeConfig, MazeError, Side};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest record or config file accepted from disk
const MAX_FILE_BYTES: u64 = 10_000_000;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File {path} is too large ({size} bytes, max {max})")]
    FileTooLarge { path: String, size: u64, max: u64 },

    #[error("Record for seed {seed} does not match the maze its config generates")]
    RecordMismatch { seed: u64 },
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Characters used to draw a maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    pub wall: char,
    /// Marks the solution, if one was saved
    pub path: Option<char>,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            wall: '#',
            path: Some('.'),
        }
    }
}

/// A gap in the outer wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub cell: Cell,
    pub side: Side,
}

/// A generated maze as stored on disk
///
/// The config alone reproduces the maze; everything else is kept so the file
/// can be displayed and inspected without regenerating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeRecord {
    pub config: MazeConfig,
    pub start: Cell,
    pub entrance: Option<Opening>,
    pub exit: Option<Opening>,
    pub bounds: Bounds,
    pub path_count: usize,
    pub solution: Option<Vec<Cell>>,
    pub glyphs: Glyphs,
    /// Rendered maze, one string per text row
    pub rows: Vec<String>,
}

impl MazeRecord {
    pub fn from_maze(maze: &Maze, glyphs: Glyphs) -> Self {
        let opening = |found: Option<(Cell, Side)>| found.map(|(cell, side)| Opening { cell, side });

        Self {
            config: maze.config(),
            start: maze.start(),
            entrance: opening(maze.entrance()),
            exit: opening(maze.exit()),
            bounds: maze.bounds(),
            path_count: maze.path_count(),
            solution: maze.solution().map(<[Cell]>::to_vec),
            glyphs,
            rows: render::ascii_grid(maze, glyphs.wall, glyphs.path)
                .into_iter()
                .map(|row| row.into_iter().collect())
                .collect(),
        }
    }

    /// The rendered maze as one string
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }
}

/// Generate one maze and its record.
///
/// # Example
/// ```
/// use maze_cli::{generate_maze, Glyphs};
/// use maze_core::MazeBuilder;
///
/// let config = MazeBuilder::new().seed(42).size(5, 5).config();
/// let (maze, record) = generate_maze(&config, Glyphs::default()).unwrap();
/// assert_eq!(record.rows.len(), 11);
/// assert_eq!(record.start, maze.start());
/// ```
pub fn generate_maze(config: &MazeConfig, glyphs: Glyphs) -> Result<(Maze, MazeRecord)> {
    tracing::info!(
        "Generating {}x{} maze for seed {} (difficulty {}, {} curve)",
        config.size_x,
        config.size_y,
        config.seed,
        config.difficulty,
        config.curve
    );

    let maze = Maze::generate(config)?;
    let record = MazeRecord::from_maze(&maze, glyphs);

    tracing::info!(
        "Maze generated: {} paths, main path >= {} cells",
        record.path_count,
        record.bounds.min_moves
    );
    Ok((maze, record))
}

/// Generate one maze per seed, all other settings taken from `base`.
///
/// Builds are independent, so they run in parallel; the output keeps the
/// order of `seeds`.
pub fn generate_batch(base: &MazeConfig, seeds: &[u64], glyphs: Glyphs) -> Result<Vec<MazeRecord>> {
    base.validate()?;
    tracing::info!("Generating batch of {} mazes", seeds.len());

    seeds
        .par_iter()
        .map(|&seed| -> Result<MazeRecord> {
            let config = MazeConfig {
                seed,
                ..base.clone()
            };
            let maze = Maze::generate(&config)?;
            Ok(MazeRecord::from_maze(&maze, glyphs))
        })
        .collect()
}

/// Regenerate the maze a record was built from and check they agree
pub fn verify_record(record: &MazeRecord) -> Result<()> {
    tracing::info!("Verifying record for seed {}", record.config.seed);

    let maze = Maze::generate(&record.config)?;
    if MazeRecord::from_maze(&maze, record.glyphs) != *record {
        return Err(CliError::RecordMismatch {
            seed: record.config.seed,
        });
    }

    tracing::info!("Record verified");
    Ok(())
}

pub fn save_record(record: &MazeRecord, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_record(path: impl AsRef<Path>) -> Result<MazeRecord> {
    let json = read_limited(path.as_ref())?;
    Ok(serde_json::from_str(&json)?)
}

/// Read a maze configuration from JSON. Missing fields take their defaults
/// (a missing seed becomes a fresh random one).
pub fn load_config(path: impl AsRef<Path>) -> Result<MazeConfig> {
    let json = read_limited(path.as_ref())?;
    let config: MazeConfig = serde_json::from_str(&json)?;
    config.validate()?;
    Ok(config)
}

fn read_limited(path: &Path) -> Result<String> {
    // Validate file size (prevent loading gigabytes into memory)
    let size = fs::metadata(path)?.len();
    if size > MAX_FILE_BYTES {
        return Err(CliError::FileTooLarge {
            path: path.display().to_string(),
            size,
            max: MAX_FILE_BYTES,
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Default file name for a saved maze
pub fn default_record_name(seed: u64) -> String {
    format!("{}_maze.json", seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::MazeBuilder;

    #[test]
    fn test_record_fields() {
        let config = MazeBuilder::new().seed(3).size(6, 4).save_solution(true).config();
        let (maze, record) = generate_maze(&config, Glyphs::default()).unwrap();

        assert_eq!(record.config, config);
        assert_eq!(record.rows.len(), 9);
        assert!(record.rows.iter().all(|r| r.chars().count() == 13));
        assert_eq!(record.entrance.map(|o| o.cell), Some(maze.start()));
        assert_eq!(record.solution.as_deref(), maze.solution());
        assert!(record.text().contains('.'));
    }

    #[test]
    fn test_verify_detects_tampering() {
        let config = MazeBuilder::new().seed(10).size(5, 5).config();
        let (_, mut record) = generate_maze(&config, Glyphs::default()).unwrap();
        assert!(verify_record(&record).is_ok());

        record.rows[1] = record.rows[1].replace(' ', "#");
        assert!(matches!(verify_record(&record), Err(CliError::RecordMismatch { seed: 10 })));
    }

    #[test]
    fn test_batch_rejects_bad_base() {
        let mut base = MazeBuilder::new().config();
        base.difficulty = 0;
        assert!(matches!(
            generate_batch(&base, &[1, 2], Glyphs::default()),
            Err(CliError::Maze(MazeError::InvalidDifficulty(0)))
        ));
    }

    #[test]
    fn test_default_record_name() {
        assert_eq!(default_record_name(2918957128), "2918957128_maze.json");
    }
}
