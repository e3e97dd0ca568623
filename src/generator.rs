//! Puzzle generation: weighted random sampling and canonical enumeration.
//!
//! Both modes walk the internal boundaries in the same row-major order and
//! give each boundary a shape class and a polarity: `+code` on one facing
//! side, `-code` on the other. Outer sides stay flat. A supply pool caps how
//! often each class may be used across one grid.

use std::ops::ControlFlow;

use rand::Rng;

use crate::error::PuzzleError;
use crate::grid::{Board, Boundary};
use crate::pieces::{EdgeCode, Piece};

/// How many times each edge class may appear in one grid.
///
/// Class `i` is written on pieces as code `±(i + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSupply {
    uses: Vec<u32>,
}

impl EdgeSupply {
    /// `classes` classes with `uses_per_class` uses each.
    pub fn uniform(classes: usize, uses_per_class: u32) -> Self {
        Self {
            uses: vec![uses_per_class; classes],
        }
    }

    /// Explicit per-class use counts.
    pub fn from_uses(uses: Vec<u32>) -> Self {
        Self { uses }
    }

    /// Total number of edge uses across all classes.
    pub fn total(&self) -> usize {
        self.uses.iter().map(|&uses| uses as usize).sum()
    }

    /// Fails if the pool cannot cover every internal boundary of `board`.
    pub fn check_covers(&self, board: &Board) -> Result<(), PuzzleError> {
        let needed = board.boundary_count();
        let available = self.total();
        if available < needed {
            return Err(PuzzleError::InsufficientSupply { needed, available });
        }
        Ok(())
    }
}

/// The code written on pieces for class index `class` with the given polarity.
#[inline]
fn class_code(class: usize, positive: bool) -> EdgeCode {
    let code = class as EdgeCode + 1;
    if positive {
        code
    } else {
        -code
    }
}

/// Picks a class with probability proportional to its remaining supply.
///
/// Returns `None` when every class is used up.
fn draw_class<R: Rng + ?Sized>(remaining: &[u32], rng: &mut R) -> Option<usize> {
    let total: u64 = remaining.iter().map(|&uses| u64::from(uses)).sum();
    if total == 0 {
        return None;
    }
    let mut pick = rng.gen_range(0..total);
    for (class, &uses) in remaining.iter().enumerate() {
        let uses = u64::from(uses);
        if pick < uses {
            return Some(class);
        }
        pick -= uses;
    }
    None
}

/// Generates one fully assigned grid by weighted random sampling.
///
/// Each boundary draws a class weighted by remaining supply and a fair coin
/// for polarity, then consumes one use of that class. Pieces are numbered
/// `1..=W·H` in row-major order.
pub fn random_puzzle<R: Rng + ?Sized>(
    board: &Board,
    supply: &EdgeSupply,
    rng: &mut R,
) -> Result<Vec<Piece>, PuzzleError> {
    let mut remaining = supply.uses.clone();
    let mut pieces = board.blank_pieces();

    for (position, boundary) in board.boundaries().into_iter().enumerate() {
        let class = draw_class(&remaining, rng).ok_or(PuzzleError::SupplyExhausted {
            boundary: position,
        })?;
        remaining[class] -= 1;
        let positive: bool = rng.gen();
        board.assign(&mut pieces, boundary, class_code(class, positive));
    }

    Ok(pieces)
}

/// Walks every canonically labelled grid, calling `visit` on each complete one.
///
/// Class labels are introduced in order: a boundary may reuse any class seen
/// earlier in the walk, or open the next unseen class, but never skip ahead.
/// Grids that differ only by renaming classes are therefore visited once.
/// Both polarities are tried at every boundary, positive first.
///
/// The walk stops early when `visit` breaks; the break is passed back.
pub fn enumerate_puzzles<F>(
    board: &Board,
    supply: &EdgeSupply,
    visit: F,
) -> Result<ControlFlow<()>, PuzzleError>
where
    F: FnMut(&[Piece]) -> ControlFlow<()>,
{
    supply.check_covers(board)?;

    let mut walk = CanonicalWalk {
        board,
        boundaries: board.boundaries(),
        remaining: supply.uses.clone(),
        pieces: board.blank_pieces(),
        visit,
    };
    Ok(walk.assign_from(0, 0))
}

/// State of the depth-first enumeration.
struct CanonicalWalk<'b, F> {
    board: &'b Board,
    boundaries: Vec<Boundary>,
    remaining: Vec<u32>,
    pieces: Vec<Piece>,
    visit: F,
}

impl<F> CanonicalWalk<'_, F>
where
    F: FnMut(&[Piece]) -> ControlFlow<()>,
{
    /// Assigns boundary `position` onwards, given `classes_seen` classes already used.
    fn assign_from(&mut self, position: usize, classes_seen: usize) -> ControlFlow<()> {
        let Some(&boundary) = self.boundaries.get(position) else {
            return (self.visit)(&self.pieces);
        };

        let candidate_classes = (classes_seen + 1).min(self.remaining.len());
        for class in 0..candidate_classes {
            if self.remaining[class] == 0 {
                continue;
            }
            let seen = if class == classes_seen {
                classes_seen + 1
            } else {
                classes_seen
            };

            self.remaining[class] -= 1;
            for positive in [true, false] {
                self.board
                    .assign(&mut self.pieces, boundary, class_code(class, positive));
                let flow = self.assign_from(position + 1, seen);
                if flow.is_break() {
                    self.remaining[class] += 1;
                    return flow;
                }
            }
            self.remaining[class] += 1;
        }

        self.board.assign(&mut self.pieces, boundary, 0);
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grid::check_edges;

    #[test]
    fn test_random_puzzles_mate_and_have_flat_borders() {
        let board = Board::new(5, 5).unwrap();
        let supply = EdgeSupply::uniform(20, 2);
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let pieces = random_puzzle(&board, &supply, &mut rng).unwrap();
            assert!(check_edges(&board, &pieces));
        }
    }

    #[test]
    fn test_random_puzzle_respects_supply() {
        let board = Board::new(4, 3).unwrap();
        let supply = EdgeSupply::from_uses(vec![5, 0, 12]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let pieces = random_puzzle(&board, &supply, &mut rng).unwrap();
            let mut uses = [0u32; 3];
            // count each boundary once, from its left or upper piece
            for piece in &pieces {
                for code in [piece.sides[1], piece.sides[2]] {
                    if code != 0 {
                        uses[code.unsigned_abs() as usize - 1] += 1;
                    }
                }
            }
            assert_eq!(uses[1], 0, "class 2 has no supply");
            assert!(uses[0] <= 5);
            assert!(uses[2] <= 12);
            assert_eq!(uses.iter().sum::<u32>(), 17);
        }
    }

    #[test]
    fn test_random_puzzle_is_reproducible_for_a_seed() {
        let board = Board::new(4, 4).unwrap();
        let supply = EdgeSupply::uniform(6, 5);
        let first = random_puzzle(&board, &supply, &mut StdRng::seed_from_u64(99)).unwrap();
        let second = random_puzzle(&board, &supply, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_puzzle_fails_when_supply_runs_out() {
        let board = Board::new(2, 2).unwrap();
        let supply = EdgeSupply::uniform(1, 3);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            random_puzzle(&board, &supply, &mut rng),
            Err(PuzzleError::SupplyExhausted { boundary: 3 })
        );
    }

    #[test]
    fn test_draw_class_skips_empty_classes() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(draw_class(&[0, 0, 4, 0], &mut rng), Some(2));
        }
        assert_eq!(draw_class(&[0, 0], &mut rng), None);
    }

    #[test]
    fn test_enumeration_opens_classes_in_order() {
        let board = Board::new(2, 2).unwrap();
        let supply = EdgeSupply::uniform(4, 1);
        let mut count = 0;
        let flow = enumerate_puzzles(&board, &supply, |pieces| {
            count += 1;
            assert!(check_edges(&board, pieces));
            // with one use per class, boundary k must carry class k + 1
            assert_eq!(pieces[0].sides[1].abs(), 1);
            assert_eq!(pieces[0].sides[2].abs(), 2);
            assert_eq!(pieces[1].sides[2].abs(), 3);
            assert_eq!(pieces[2].sides[1].abs(), 4);
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(count, 16);
    }

    #[test]
    fn test_enumeration_stops_on_break() {
        let board = Board::new(3, 2).unwrap();
        let supply = EdgeSupply::uniform(2, 4);
        let mut count = 0;
        let flow = enumerate_puzzles(&board, &supply, |_| {
            count += 1;
            if count == 10 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(count, 10);
    }

    #[test]
    fn test_enumeration_rejects_small_supply() {
        let board = Board::new(3, 3).unwrap();
        let supply = EdgeSupply::uniform(5, 2);
        assert_eq!(
            enumerate_puzzles(&board, &supply, |_| ControlFlow::Continue(())),
            Err(PuzzleError::InsufficientSupply {
                needed: 12,
                available: 10
            })
        );
    }
}
