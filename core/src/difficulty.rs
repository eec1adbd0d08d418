//! Difficulty levels and the path-length bounds derived from them
//!
//! Two numbers shape a maze:
//! - `min_moves`: the shortest the main path may be before it is allowed to
//!   stop on the boundary
//! - `max_sub_path_moves`: the longest any branch may grow
//!
//! Both are a percentage of the grid area scaled by difficulty.

use core::str::FromStr;

use crate::error::MazeError;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

/// Named difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const fn value(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 5,
            Difficulty::Hard => 8,
            Difficulty::Extreme => 10,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// Reject anything outside `1..=10`
pub fn validate(difficulty: u8) -> Result<u8, MazeError> {
    if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        Ok(difficulty)
    } else {
        Err(MazeError::InvalidDifficulty(difficulty))
    }
}

/// Parse a level name (`easy`, `medium`, `hard`, `extreme`) or an integer 1-10
pub fn parse(s: &str) -> Result<u8, MazeError> {
    let trimmed = s.trim();
    if let Ok(level) = trimmed.parse::<Difficulty>() {
        return Ok(level.value());
    }
    match trimmed.parse::<u8>() {
        Ok(value) => validate(value),
        Err(_) => Err(MazeError::UnknownDifficulty(s.to_string())),
    }
}

impl FromStr for Difficulty {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            _ => Err(MazeError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Extreme => write!(f, "extreme"),
        }
    }
}

/// How the difficulty value scales the area percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DifficultyCurve {
    /// Percentages scale continuously with `difficulty / 10`
    #[default]
    Linear,
    /// `difficulty / 10` in integer arithmetic: every level below 10 gets the
    /// level-1 bounds. Kept so mazes built on that curve can be reproduced.
    Truncated,
}

impl DifficultyCurve {
    fn factor(self, difficulty: u8) -> f64 {
        match self {
            DifficultyCurve::Linear => f64::from(difficulty) / 10.0,
            DifficultyCurve::Truncated => f64::from(difficulty / 10),
        }
    }
}

impl FromStr for DifficultyCurve {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(DifficultyCurve::Linear),
            "truncated" => Ok(DifficultyCurve::Truncated),
            _ => Err(MazeError::UnknownCurve(s.to_string())),
        }
    }
}

impl core::fmt::Display for DifficultyCurve {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DifficultyCurve::Linear => write!(f, "linear"),
            DifficultyCurve::Truncated => write!(f, "truncated"),
        }
    }
}

/// Path-length bounds for one (difficulty, size) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_moves: usize,
    pub max_sub_path_moves: usize,
}

impl Bounds {
    pub fn compute(difficulty: u8, size_x: usize, size_y: usize, curve: DifficultyCurve) -> Self {
        let factor = curve.factor(difficulty);
        let main_share = 0.10 + factor * 0.15;
        let sub_share = 0.05 + factor * 0.20;

        let area = size_x * size_y;
        let scaled = |share: f64| (area as f64 * share).round() as usize;

        // The main path needs two cells whenever the grid has them so that the
        // entrance and exit land on different cells. Branches need at least
        // one cell to exist at all.
        Self {
            min_moves: scaled(main_share).max(area.min(2)),
            max_sub_path_moves: scaled(sub_share).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_values() {
        assert_eq!(Difficulty::Easy.value(), 1);
        assert_eq!(Difficulty::Medium.value(), 5);
        assert_eq!(Difficulty::Hard.value(), 8);
        assert_eq!(Difficulty::Extreme.value(), 10);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(1), Ok(1));
        assert_eq!(validate(10), Ok(10));
        assert_eq!(validate(0), Err(MazeError::InvalidDifficulty(0)));
        assert_eq!(validate(11), Err(MazeError::InvalidDifficulty(11)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("EASY"), Ok(1));
        assert_eq!(parse(" hard "), Ok(8));
        assert_eq!(parse("7"), Ok(7));
        assert_eq!(parse("0"), Err(MazeError::InvalidDifficulty(0)));
        assert!(matches!(parse("brutal"), Err(MazeError::UnknownDifficulty(_))));
        assert!(matches!(parse("-3"), Err(MazeError::UnknownDifficulty(_))));
    }

    #[test]
    fn test_curve_parse() {
        assert_eq!("Linear".parse::<DifficultyCurve>(), Ok(DifficultyCurve::Linear));
        assert_eq!("truncated".parse::<DifficultyCurve>(), Ok(DifficultyCurve::Truncated));
        assert!("steep".parse::<DifficultyCurve>().is_err());
    }

    #[test]
    fn test_linear_bounds() {
        // 16x16 = 256 cells
        let easy = Bounds::compute(1, 16, 16, DifficultyCurve::Linear);
        assert_eq!(easy.min_moves, 29); // 256 * 0.115 = 29.44
        assert_eq!(easy.max_sub_path_moves, 18); // 256 * 0.07 = 17.92

        let extreme = Bounds::compute(10, 16, 16, DifficultyCurve::Linear);
        assert_eq!(extreme.min_moves, 64); // 256 * 0.25
        assert_eq!(extreme.max_sub_path_moves, 64); // 256 * 0.25

        let medium = Bounds::compute(5, 16, 16, DifficultyCurve::Linear);
        assert!(easy.min_moves < medium.min_moves && medium.min_moves < extreme.min_moves);
    }

    #[test]
    fn test_truncated_bounds_only_move_at_ten() {
        let one = Bounds::compute(1, 16, 16, DifficultyCurve::Truncated);
        let nine = Bounds::compute(9, 16, 16, DifficultyCurve::Truncated);
        let ten = Bounds::compute(10, 16, 16, DifficultyCurve::Truncated);

        assert_eq!(one, nine);
        assert_eq!(one.min_moves, 26); // 256 * 0.10 = 25.6
        assert_eq!(one.max_sub_path_moves, 13); // 256 * 0.05 = 12.8
        assert_eq!(ten, Bounds::compute(10, 16, 16, DifficultyCurve::Linear));
    }

    #[test]
    fn test_small_grid_clamps() {
        let single = Bounds::compute(1, 1, 1, DifficultyCurve::Linear);
        assert_eq!(single.min_moves, 1);
        assert_eq!(single.max_sub_path_moves, 1);

        let tiny = Bounds::compute(1, 3, 2, DifficultyCurve::Linear);
        assert_eq!(tiny.min_moves, 2);
        assert_eq!(tiny.max_sub_path_moves, 1);
    }
}
