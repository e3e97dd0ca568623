//! Grid dimensions, cell indexing and boundary traversal.
//!
//! The grid is stored as a flat row-major array: cell `(x, y)` lives at
//! index `y * width + x`. Neighbouring cells meet at an internal boundary;
//! the outer ring's outward-facing sides must be flat.

use crate::error::PuzzleError;
use crate::geometry::Side;
use crate::pieces::{EdgeCode, Piece, Sides, BORDER};

/// Largest supported cell count (the solver tracks remaining pieces in a `u128`).
pub const MAX_CELLS: usize = 128;

/// Width and height of a puzzle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
}

/// An internal boundary between two neighbouring cells.
///
/// `cell` is the left (for vertical boundaries) or upper (for horizontal
/// boundaries) of the two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Vertical { cell: usize },
    Horizontal { cell: usize },
}

impl Board {
    /// Creates a board, rejecting grids without four corners or too large for the solver.
    pub fn new(width: usize, height: usize) -> Result<Self, PuzzleError> {
        if width < 2 || height < 2 || width * height > MAX_CELLS {
            return Err(PuzzleError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline(always)]
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Converts (x, y) to a linear cell index.
    #[inline(always)]
    pub const fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Converts a linear cell index to (x, y).
    #[inline(always)]
    pub const fn cell_coords(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    #[inline]
    pub const fn is_first_column(&self, cell: usize) -> bool {
        cell % self.width == 0
    }

    #[inline]
    pub const fn is_last_column(&self, cell: usize) -> bool {
        cell % self.width == self.width - 1
    }

    #[inline]
    pub const fn is_first_row(&self, cell: usize) -> bool {
        cell < self.width
    }

    #[inline]
    pub const fn is_last_row(&self, cell: usize) -> bool {
        cell >= self.width * (self.height - 1)
    }

    /// Number of internal boundaries: `H·(W−1) + W·(H−1)`.
    pub const fn boundary_count(&self) -> usize {
        self.height * (self.width - 1) + self.width * (self.height - 1)
    }

    /// Internal boundaries in generation order.
    ///
    /// Row by row: the row's vertical boundaries left to right, then the
    /// horizontal boundaries between that row and the one below it.
    pub fn boundaries(&self) -> Vec<Boundary> {
        let mut boundaries = Vec::with_capacity(self.boundary_count());
        for y in 0..self.height {
            for x in 0..self.width - 1 {
                boundaries.push(Boundary::Vertical {
                    cell: self.cell_index(x, y),
                });
            }
            if y + 1 < self.height {
                for x in 0..self.width {
                    boundaries.push(Boundary::Horizontal {
                        cell: self.cell_index(x, y),
                    });
                }
            }
        }
        boundaries
    }

    /// Sets `code` on one side of a boundary and its negative on the other.
    pub fn assign(&self, pieces: &mut [Piece], boundary: Boundary, code: EdgeCode) {
        match boundary {
            Boundary::Vertical { cell } => {
                pieces[cell].set_side(Side::Right, code);
                pieces[cell + 1].set_side(Side::Left, -code);
            }
            Boundary::Horizontal { cell } => {
                pieces[cell].set_side(Side::Bottom, code);
                pieces[cell + self.width].set_side(Side::Top, -code);
            }
        }
    }

    /// Blank pieces numbered `1..=W·H` in row-major order.
    pub fn blank_pieces(&self) -> Vec<Piece> {
        (1..=self.cell_count()).map(Piece::blank).collect()
    }

    /// Checks that `pieces` holds exactly one piece per cell numbered `1..=W·H`.
    pub fn check_piece_set(&self, pieces: &[Piece]) -> Result<(), PuzzleError> {
        if pieces.len() != self.cell_count() {
            return Err(PuzzleError::PieceCount {
                expected: self.cell_count(),
                actual: pieces.len(),
            });
        }
        let mut seen: u128 = 0;
        for piece in pieces {
            let number = piece.number;
            if number == 0 || number > self.cell_count() || seen & (1u128 << (number - 1)) != 0 {
                return Err(PuzzleError::PieceNumber { number });
            }
            seen |= 1u128 << (number - 1);
        }
        Ok(())
    }
}

/// Returns true if every internal boundary mates and every outer side is flat.
pub fn check_edges<S: Sides>(board: &Board, cells: &[S]) -> bool {
    if cells.len() != board.cell_count() {
        return false;
    }
    (0..board.cell_count()).all(|cell| {
        let here = &cells[cell];
        let top_ok = if board.is_first_row(cell) {
            here.side(Side::Top) == BORDER
        } else {
            here.side(Side::Top) == -cells[cell - board.width].side(Side::Bottom)
        };
        let left_ok = if board.is_first_column(cell) {
            here.side(Side::Left) == BORDER
        } else {
            here.side(Side::Left) == -cells[cell - 1].side(Side::Right)
        };
        let right_ok = !board.is_last_column(cell) || here.side(Side::Right) == BORDER;
        let bottom_ok = !board.is_last_row(cell) || here.side(Side::Bottom) == BORDER;
        top_ok && left_ok && right_ok && bottom_ok
    })
}

/// Formats a grid as text, one line per row.
///
/// Each cell shows `number@rotation[top right bottom left]`.
pub fn format_grid<S: Sides>(board: &Board, cells: &[S]) -> String {
    let mut output = String::new();
    for row in cells.chunks(board.width) {
        let line = row
            .iter()
            .map(|cell| {
                let [top, right, bottom, left] = cell.codes();
                format!(
                    "{}@{}[{} {} {} {}]",
                    cell.piece_number(),
                    cell.rotation().quarter_turns(),
                    top,
                    right,
                    bottom,
                    left
                )
            })
            .collect::<Vec<_>>()
            .join("  ");
        output.push_str(&line);
        output.push('\n');
    }
    output
}
