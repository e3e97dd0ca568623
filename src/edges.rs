//! Lookup of piece orientations by the edge code they show at the top.
//!
//! For every nonzero side of every piece, one view is registered: the piece
//! turned so that side faces TOP, filed under that side's code. Finding "a
//! piece showing code `c` on its top" is then a single map lookup instead of
//! a scan over all pieces and rotations.

use rustc_hash::FxHashMap;

use crate::error::PuzzleError;
use crate::geometry::{Rotation, Side};
use crate::grid::Board;
use crate::pieces::{EdgeCode, Piece, RotatedPiece, Sides, BORDER};

/// Views of a piece set grouped by the code each shows at `TOP`.
///
/// Within a bucket, views keep piece order, then raw side order.
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex<'a> {
    buckets: FxHashMap<EdgeCode, Vec<RotatedPiece<'a>>>,
}

impl<'a> EdgeIndex<'a> {
    /// Builds the index for a complete piece set.
    pub fn new(board: &Board, pieces: &'a [Piece]) -> Result<Self, PuzzleError> {
        board.check_piece_set(pieces)?;

        let mut buckets: FxHashMap<EdgeCode, Vec<RotatedPiece<'a>>> = FxHashMap::default();
        for piece in pieces {
            for side in Side::ALL {
                let code = piece.side(side);
                if code == BORDER {
                    continue;
                }
                let view = RotatedPiece::new(piece, Rotation::bringing_to_top(side));
                debug_assert_eq!(view.side(Side::Top), code);
                buckets.entry(code).or_default().push(view);
            }
        }

        Ok(Self { buckets })
    }

    /// Views whose `TOP` shows `code`; empty if no piece carries it.
    #[inline]
    pub fn views_with_top(&self, code: EdgeCode) -> &[RotatedPiece<'a>] {
        self.buckets.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over every (code, views) bucket.
    pub fn buckets(&self) -> impl Iterator<Item = (EdgeCode, &[RotatedPiece<'a>])> {
        self.buckets
            .iter()
            .map(|(&code, views)| (code, views.as_slice()))
    }
}
