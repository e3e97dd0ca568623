//! Piece definitions and rotated views of pieces.
//!
//! Each piece carries one signed edge code per side. Zero marks a flat
//! border side; a nonzero code `±c` is shape class `c` with a polarity, and
//! two facing sides mate only when their codes are exact negatives.

use crate::geometry::{Rotation, Side};

/// Signed shape code on one side of a piece.
pub type EdgeCode = i32;

/// Code carried by a flat border side.
pub const BORDER: EdgeCode = 0;

/// Read access to the four sides of something placed in a grid cell.
///
/// Implemented by [`Piece`] (as if unrotated) and [`RotatedPiece`], so that
/// grid checks and formatting work for generation-time and solve-time grids.
pub trait Sides {
    /// The code seen on `side`.
    fn side(&self, side: Side) -> EdgeCode;

    /// The 1-based number identifying the underlying piece.
    fn piece_number(&self) -> usize;

    /// Quarter turns applied to the underlying piece.
    fn rotation(&self) -> Rotation {
        Rotation::IDENTITY
    }

    /// All four codes in `[TOP, RIGHT, BOTTOM, LEFT]` order.
    fn codes(&self) -> [EdgeCode; 4] {
        Side::ALL.map(|side| self.side(side))
    }
}

/// A square piece: a number plus an edge code per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub number: usize,
    pub sides: [EdgeCode; 4],
}

impl Piece {
    /// A piece with every side flat, ready to have codes assigned.
    pub const fn blank(number: usize) -> Self {
        Self {
            number,
            sides: [BORDER; 4],
        }
    }

    pub const fn new(number: usize, sides: [EdgeCode; 4]) -> Self {
        Self { number, sides }
    }

    /// Number of nonzero sides: 2 for a corner, 3 for a border piece, 4 for an interior piece.
    pub fn side_count(&self) -> usize {
        self.sides.iter().filter(|&&code| code != BORDER).count()
    }

    #[inline]
    pub fn set_side(&mut self, side: Side, code: EdgeCode) {
        self.sides[side.index()] = code;
    }

    /// The rotation putting this piece's two flat sides at TOP and LEFT.
    ///
    /// Returns `None` unless the piece is a corner piece whose flat sides are adjacent.
    pub fn corner_rotation(&self) -> Option<Rotation> {
        if self.side_count() != 2 {
            return None;
        }
        Rotation::ALL.into_iter().find(|&rotation| {
            let view = RotatedPiece::new(self, rotation);
            view.side(Side::Top) == BORDER && view.side(Side::Left) == BORDER
        })
    }
}

impl Sides for Piece {
    #[inline]
    fn side(&self, side: Side) -> EdgeCode {
        self.sides[side.index()]
    }

    #[inline]
    fn piece_number(&self) -> usize {
        self.number
    }
}

/// A read-only view of a piece turned by some number of quarter turns.
///
/// Views borrow the piece; any number of them may share one piece.
#[derive(Debug, Clone, Copy)]
pub struct RotatedPiece<'a> {
    pub piece: &'a Piece,
    pub rotation: Rotation,
}

impl<'a> RotatedPiece<'a> {
    #[inline]
    pub const fn new(piece: &'a Piece, rotation: Rotation) -> Self {
        Self { piece, rotation }
    }

    /// The same piece turned so that its current TOP side faces LEFT.
    #[inline]
    pub fn turned_counterclockwise(self) -> Self {
        Self::new(self.piece, self.rotation.turned_counterclockwise())
    }
}

/// Two views are equal when they show the same piece in the same orientation.
impl PartialEq for RotatedPiece<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.piece.number == other.piece.number && self.rotation == other.rotation
    }
}

impl Eq for RotatedPiece<'_> {}

impl Sides for RotatedPiece<'_> {
    #[inline(always)]
    fn side(&self, side: Side) -> EdgeCode {
        self.piece.sides[self.rotation.raw_side(side).index()]
    }

    #[inline]
    fn piece_number(&self) -> usize {
        self.piece.number
    }

    #[inline]
    fn rotation(&self) -> Rotation {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_count_classifies_pieces() {
        assert_eq!(Piece::new(1, [0, 3, -2, 0]).side_count(), 2);
        assert_eq!(Piece::new(2, [0, 1, 4, -3]).side_count(), 3);
        assert_eq!(Piece::new(3, [2, -1, 5, 1]).side_count(), 4);
        assert_eq!(Piece::blank(4).side_count(), 0);
    }

    #[test]
    fn test_rotated_view_reads_shifted_sides() {
        let piece = Piece::new(1, [10, 20, 30, 40]);
        let view = RotatedPiece::new(&piece, Rotation::new(1));
        assert_eq!(view.codes(), [40, 10, 20, 30]);
        let view = RotatedPiece::new(&piece, Rotation::new(3));
        assert_eq!(view.codes(), [20, 30, 40, 10]);
        assert_eq!(piece.codes(), [10, 20, 30, 40], "views never change the piece");
    }

    #[test]
    fn test_corner_rotation_for_every_corner() {
        let cases = [
            ([0, 1, 2, 0], 0),
            ([0, 0, 1, 2], 3),
            ([1, 0, 0, 2], 2),
            ([1, 2, 0, 0], 1),
        ];
        for (sides, quarter_turns) in cases {
            let piece = Piece::new(1, sides);
            assert_eq!(piece.corner_rotation(), Some(Rotation::new(quarter_turns)));
        }
    }

    #[test]
    fn test_corner_rotation_rejects_non_corners() {
        assert_eq!(Piece::new(1, [0, 1, 0, 2]).corner_rotation(), None);
        assert_eq!(Piece::new(2, [0, 1, 2, 3]).corner_rotation(), None);
    }

    #[test]
    fn test_view_equality_uses_piece_and_rotation() {
        let a = Piece::new(1, [1, 2, 1, 2]);
        let b = Piece::new(2, [1, 2, 1, 2]);
        let a0 = RotatedPiece::new(&a, Rotation::IDENTITY);
        assert_eq!(a0, RotatedPiece::new(&a, Rotation::IDENTITY));
        assert_ne!(a0, RotatedPiece::new(&a, Rotation::new(2)));
        assert_ne!(a0, RotatedPiece::new(&b, Rotation::IDENTITY));
    }
}
