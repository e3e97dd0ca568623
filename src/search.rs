//! The search loop: generate a piece set, gate it, solve it, classify it.
//!
//! Each attempt builds its own pieces, edge index and solver state, so
//! nothing carries over between attempts except the counters in
//! [`SearchStats`]. The stop flag is only looked at between attempts; a
//! solve that has started always runs to completion.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use rand::Rng;

use crate::analysis::{classify, Outcome};
use crate::config::Config;
use crate::duplicates::has_duplicate_pieces;
use crate::edges::EdgeIndex;
use crate::error::PuzzleError;
use crate::generator::{enumerate_puzzles, random_puzzle, EdgeSupply};
use crate::grid::Board;
use crate::pieces::Piece;
use crate::solver::{solve, Assembly};

/// Result of checking one piece set.
#[derive(Debug)]
pub enum Examination<'a> {
    /// Two pieces are indistinguishable; the set was not solved.
    Degenerate,
    /// The set was solved.
    Solved {
        solutions: Vec<Assembly<'a>>,
        outcome: Outcome,
    },
}

/// Runs the duplicate-piece gate and, if it passes, the solver.
pub fn examine<'a>(board: &Board, pieces: &'a [Piece]) -> Result<Examination<'a>, PuzzleError> {
    let index = EdgeIndex::new(board, pieces)?;
    if has_duplicate_pieces(board, pieces, &index)? {
        return Ok(Examination::Degenerate);
    }
    let solutions = solve(board, pieces, &index)?;
    let outcome = classify(&solutions);
    Ok(Examination::Solved { solutions, outcome })
}

/// Counters for one search run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Piece sets produced by the generator.
    pub generated: u64,
    /// Sets rejected for containing indistinguishable pieces.
    pub degenerate: u64,
    /// Sets that were solved.
    pub attempts: u64,
    pub unsolvable: u64,
    pub unique: u64,
    /// Sets with two or more assemblies, boring ones included.
    pub ambiguous: u64,
    /// Ambiguous sets whose only two assemblies form a boring pair.
    pub boring: u64,
    /// Findings handed to the caller.
    pub reported: u64,
}

/// An ambiguous piece set and its distinct assemblies.
#[derive(Debug)]
pub struct Finding<'a> {
    /// 1-based number of the attempt that produced it.
    pub attempt: u64,
    pub board: Board,
    /// The generating grid, row-major.
    pub pieces: &'a [Piece],
    pub solutions: &'a [Assembly<'a>],
    pub outcome: Outcome,
}

/// Per-run state owned by the driving loop.
struct Search<'r, F> {
    config: &'r Config,
    board: Board,
    stop: &'r AtomicBool,
    on_finding: F,
    stats: SearchStats,
}

impl<'r, F> Search<'r, F>
where
    F: FnMut(&Finding<'_>),
{
    fn new(config: &'r Config, stop: &'r AtomicBool, on_finding: F) -> Result<Self, PuzzleError> {
        let board = config.validate()?;
        Ok(Self {
            config,
            board,
            stop,
            on_finding,
            stats: SearchStats::default(),
        })
    }

    /// True once cancelled or once the puzzle limit is reached.
    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
            || self
                .config
                .max_puzzles
                .is_some_and(|limit| self.stats.generated >= limit)
    }

    /// Examines one generated piece set and updates the counters.
    fn record(&mut self, pieces: &[Piece]) -> Result<(), PuzzleError> {
        self.stats.generated += 1;

        let (solutions, outcome) = match examine(&self.board, pieces)? {
            Examination::Degenerate => {
                self.stats.degenerate += 1;
                return Ok(());
            }
            Examination::Solved { solutions, outcome } => (solutions, outcome),
        };

        self.stats.attempts += 1;
        if self.stats.attempts % self.config.report_interval == 0 {
            info!("checking puzzle number {}", self.stats.attempts);
        }

        match outcome {
            Outcome::Unsolvable => self.stats.unsolvable += 1,
            Outcome::Unique => self.stats.unique += 1,
            Outcome::Ambiguous { count, boring } => {
                self.stats.ambiguous += 1;
                debug!(
                    "puzzle {} has {} distinct assemblies",
                    self.stats.attempts, count
                );
                if boring {
                    self.stats.boring += 1;
                    if !self.config.keep_boring {
                        debug!("boring pair on puzzle {}, skipping", self.stats.attempts);
                        return Ok(());
                    }
                }
                self.stats.reported += 1;
                (self.on_finding)(&Finding {
                    attempt: self.stats.attempts,
                    board: self.board,
                    pieces,
                    solutions: &solutions,
                    outcome,
                });
            }
        }
        Ok(())
    }

    fn finish(self) -> SearchStats {
        info!(
            "checked {} puzzles ({} generated, {} degenerate, {} ambiguous)",
            self.stats.attempts, self.stats.generated, self.stats.degenerate, self.stats.ambiguous
        );
        self.stats
    }
}

/// Samples random puzzles until `stop` is set or the puzzle limit is hit.
///
/// Degenerate sets are thrown away and regenerated. Ambiguous sets are
/// passed to `on_finding`, except boring pairs unless `keep_boring` is set.
pub fn run_random<R, F>(
    config: &Config,
    rng: &mut R,
    stop: &AtomicBool,
    on_finding: F,
) -> Result<SearchStats, PuzzleError>
where
    R: Rng + ?Sized,
    F: FnMut(&Finding<'_>),
{
    let mut search = Search::new(config, stop, on_finding)?;
    let supply = config.supply();

    while !search.should_stop() {
        let pieces = random_puzzle(&search.board, &supply, rng)?;
        search.record(&pieces)?;
    }

    Ok(search.finish())
}

/// Visits every canonically labelled puzzle until done, stopped, or limited.
///
/// Each complete grid is gated and solved as soon as it is produced;
/// degenerate grids are skipped and the enumeration carries on.
pub fn run_exhaustive<F>(
    config: &Config,
    stop: &AtomicBool,
    on_finding: F,
) -> Result<SearchStats, PuzzleError>
where
    F: FnMut(&Finding<'_>),
{
    let mut search = Search::new(config, stop, on_finding)?;
    let board = search.board;
    let supply: EdgeSupply = config.supply();

    let mut failure = None;
    let flow = enumerate_puzzles(&board, &supply, |pieces| {
        if search.should_stop() {
            return ControlFlow::Break(());
        }
        match search.record(pieces) {
            Ok(()) => ControlFlow::Continue(()),
            Err(error) => {
                failure = Some(error);
                ControlFlow::Break(())
            }
        }
    })?;

    if let Some(error) = failure {
        return Err(error);
    }
    if flow.is_break() {
        debug!("enumeration stopped after {} puzzles", search.stats.generated);
    }
    Ok(search.finish())
}
