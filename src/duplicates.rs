//! Detection of physically indistinguishable pieces.
//!
//! Two pieces carrying the same raw edge codes always share every bucket of
//! the edge index, so only pieces within one bucket need comparing.

use crate::edges::EdgeIndex;
use crate::error::PuzzleError;
use crate::grid::Board;
use crate::pieces::Piece;

/// Returns true if two distinct pieces have identical raw edge codes.
///
/// A set flagged here is degenerate: swapping the twin pieces yields the
/// same picture, so it is never worth solving.
pub fn has_duplicate_pieces(
    board: &Board,
    pieces: &[Piece],
    index: &EdgeIndex<'_>,
) -> Result<bool, PuzzleError> {
    board.check_piece_set(pieces)?;

    for (_, views) in index.buckets() {
        for (position, a) in views.iter().enumerate() {
            let twin = views[position + 1..].iter().any(|b| {
                a.piece.number != b.piece.number && a.piece.sides == b.piece.sides
            });
            if twin {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
