//! Backtracking assembly solver.
//!
//! Key points:
//! - The top-left cell is seeded with the first corner piece, turned so its
//!   flat sides face TOP and LEFT. This pins the board's orientation.
//! - Cells are filled in row-major order; candidates come straight from the
//!   edge index bucket for the code the cell must show on top (or, in the
//!   first row, on the left).
//! - Remaining pieces are a `u128` bitmask instead of a list.
//! - The search is an explicit stack of frames, one per filled cell, and
//!   always runs to exhaustion so no assembly is missed.

use log::trace;

use crate::analysis::SolutionSet;
use crate::edges::EdgeIndex;
use crate::error::PuzzleError;
use crate::geometry::Side;
use crate::grid::Board;
use crate::pieces::{EdgeCode, Piece, RotatedPiece, Sides, BORDER};

/// One complete placement: a view per cell, row-major.
pub type Assembly<'a> = Vec<RotatedPiece<'a>>;

/// Bit for a piece in the remaining-pieces mask.
#[inline(always)]
fn piece_bit(view: &RotatedPiece<'_>) -> u128 {
    1u128 << (view.piece.number - 1)
}

/// Candidates tried at one cell, and how far through them the search is.
struct Frame<'a> {
    candidates: Vec<RotatedPiece<'a>>,
    next: usize,
}

/// Finds every structurally distinct assembly of `pieces`.
///
/// Two assemblies are the same when every cell shows the same four codes;
/// only the first one found is kept. Returns an empty list when the set has
/// no corner piece or cannot be assembled.
pub fn solve<'a>(
    board: &Board,
    pieces: &'a [Piece],
    index: &EdgeIndex<'a>,
) -> Result<Vec<Assembly<'a>>, PuzzleError> {
    board.check_piece_set(pieces)?;

    let mut solutions = SolutionSet::new();
    let Some(seed) = seed_corner(pieces) else {
        return Ok(solutions.into_assemblies());
    };

    let cell_count = board.cell_count();
    let all_pieces = if cell_count == 128 {
        u128::MAX
    } else {
        (1u128 << cell_count) - 1
    };
    let mut remaining = all_pieces & !piece_bit(&seed);
    let mut placed: Assembly<'a> = Vec::with_capacity(cell_count);
    placed.push(seed);

    let mut search_stack = vec![Frame {
        candidates: candidates(board, index, &placed, remaining),
        next: 0,
    }];

    while let Some(frame) = search_stack.last_mut() {
        let Some(&candidate) = frame.candidates.get(frame.next) else {
            // dead or finished branch: undo the placement that led here
            search_stack.pop();
            if !search_stack.is_empty() {
                if let Some(view) = placed.pop() {
                    remaining |= piece_bit(&view);
                }
            }
            continue;
        };
        frame.next += 1;

        placed.push(candidate);
        remaining &= !piece_bit(&candidate);

        if placed.len() == cell_count {
            if solutions.insert(&placed) {
                trace!("accepted assembly #{}", solutions.len());
            } else {
                trace!("skipped duplicate assembly");
            }
            placed.pop();
            remaining |= piece_bit(&candidate);
            continue;
        }

        let next_candidates = candidates(board, index, &placed, remaining);
        search_stack.push(Frame {
            candidates: next_candidates,
            next: 0,
        });
    }

    Ok(solutions.into_assemblies())
}

/// The first corner piece, turned so its flat sides face TOP and LEFT.
fn seed_corner(pieces: &[Piece]) -> Option<RotatedPiece<'_>> {
    pieces.iter().find_map(|piece| {
        piece
            .corner_rotation()
            .map(|rotation| RotatedPiece::new(piece, rotation))
    })
}

/// Views that fit the next empty cell, in edge index order.
///
/// The cell's TOP must mate with the cell above and its LEFT with the cell
/// to the left; outer sides must be flat and inner sides must not.
fn candidates<'a>(
    board: &Board,
    index: &EdgeIndex<'a>,
    placed: &[RotatedPiece<'a>],
    remaining: u128,
) -> Vec<RotatedPiece<'a>> {
    let cell = placed.len();
    let border_right = board.is_last_column(cell);
    let border_bottom = board.is_last_row(cell);

    let required_left: EdgeCode = if board.is_first_column(cell) {
        BORDER
    } else {
        -placed[cell - 1].side(Side::Right)
    };

    let fits = |view: &RotatedPiece<'a>| {
        remaining & piece_bit(view) != 0
            && (view.side(Side::Right) == BORDER) == border_right
            && (view.side(Side::Bottom) == BORDER) == border_bottom
    };

    if board.is_first_row(cell) {
        // the bucket shows the wanted code on top; turn it round to the left
        index
            .views_with_top(required_left)
            .iter()
            .map(|view| view.turned_counterclockwise())
            .filter(|view| view.side(Side::Top) == BORDER && fits(view))
            .collect()
    } else {
        let required_top = -placed[cell - board.width].side(Side::Bottom);
        index
            .views_with_top(required_top)
            .iter()
            .copied()
            .filter(|view| view.side(Side::Left) == required_left && fits(view))
            .collect()
    }
}
