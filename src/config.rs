//! Run configuration shared by the random and exhaustive searches.

use crate::error::PuzzleError;
use crate::generator::EdgeSupply;
use crate::grid::Board;

/// Settings for one search run. Read-only once the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Grid width in pieces.
    pub width: usize,
    /// Grid height in pieces.
    pub height: usize,
    /// Number of distinct edge shape classes.
    pub classes: usize,
    /// Times each class may be used in one grid.
    pub supply_per_class: u32,
    /// Log progress every this many attempts.
    pub report_interval: u64,
    /// Stop after generating this many piece sets, degenerate ones included.
    pub max_puzzles: Option<u64>,
    /// Seed for the random generator; entropy when unset.
    pub seed: Option<u64>,
    /// Report boring pairs instead of skipping them.
    pub keep_boring: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            classes: 20,
            supply_per_class: 2,
            report_interval: 100_000,
            max_puzzles: None,
            seed: None,
            keep_boring: false,
        }
    }
}

impl Config {
    pub fn board(&self) -> Result<Board, PuzzleError> {
        Board::new(self.width, self.height)
    }

    pub fn supply(&self) -> EdgeSupply {
        EdgeSupply::uniform(self.classes, self.supply_per_class)
    }

    /// Checks every setting, returning the board on success.
    pub fn validate(&self) -> Result<Board, PuzzleError> {
        let board = self.board()?;
        if self.classes == 0 {
            return Err(PuzzleError::InvalidConfig(
                "at least one edge class is required".to_string(),
            ));
        }
        if self.report_interval == 0 {
            return Err(PuzzleError::InvalidConfig(
                "report interval must be positive".to_string(),
            ));
        }
        self.supply().check_covers(&board)?;
        Ok(board)
    }
}
