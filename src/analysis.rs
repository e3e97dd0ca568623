//! Deduplication and classification of assemblies.
//!
//! Assemblies are compared by the codes each cell shows, so two search
//! paths that end in the same picture count once. A pair of assemblies that
//! keep most pieces in place is "boring": the ambiguity is just a local
//! rearrangement of a couple of pieces.

use rustc_hash::FxHashSet;

use crate::pieces::{EdgeCode, RotatedPiece, Sides};
use crate::solver::Assembly;

/// Cells two assemblies may share before the pair counts as boring.
pub const BORING_SHARED_CELLS: usize = 2;

/// Codes shown by each cell, row-major; equal keys mean the same picture.
type AssemblyKey = Vec<[EdgeCode; 4]>;

fn assembly_key(assembly: &[RotatedPiece<'_>]) -> AssemblyKey {
    assembly.iter().map(|view| view.codes()).collect()
}

/// Accepted assemblies in discovery order, without repeated pictures.
#[derive(Debug, Default)]
pub struct SolutionSet<'a> {
    seen: FxHashSet<AssemblyKey>,
    assemblies: Vec<Assembly<'a>>,
}

impl<'a> SolutionSet<'a> {
    pub fn new() -> Self {
        Self {
            seen: FxHashSet::default(),
            assemblies: Vec::new(),
        }
    }

    /// Keeps `assembly` unless an accepted one shows the same codes in every cell.
    ///
    /// Returns true if it was kept.
    pub fn insert(&mut self, assembly: &[RotatedPiece<'a>]) -> bool {
        if !self.seen.insert(assembly_key(assembly)) {
            return false;
        }
        self.assemblies.push(assembly.to_vec());
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.assemblies.len()
    }

    pub fn into_assemblies(self) -> Vec<Assembly<'a>> {
        self.assemblies
    }
}

/// What the solution count says about a piece set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No assembly exists.
    Unsolvable,
    /// Exactly one assembly: the puzzle is well posed.
    Unique,
    /// Several assemblies. `boring` is only ever set for exactly two.
    Ambiguous { count: usize, boring: bool },
}

impl Outcome {
    /// Ambiguous and worth reporting.
    pub fn is_interesting(&self) -> bool {
        matches!(self, Outcome::Ambiguous { boring: false, .. })
    }
}

/// Number of cells holding the same piece in the same orientation in both.
pub fn shared_cells(a: &[RotatedPiece<'_>], b: &[RotatedPiece<'_>]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x == y).count()
}

/// True if the two assemblies share more than [`BORING_SHARED_CELLS`] cells.
pub fn is_boring_pair(a: &[RotatedPiece<'_>], b: &[RotatedPiece<'_>]) -> bool {
    shared_cells(a, b) > BORING_SHARED_CELLS
}

/// Classifies a deduplicated list of assemblies for one piece set.
pub fn classify(assemblies: &[Assembly<'_>]) -> Outcome {
    match assemblies {
        [] => Outcome::Unsolvable,
        [_] => Outcome::Unique,
        [a, b] => Outcome::Ambiguous {
            count: 2,
            boring: is_boring_pair(a, b),
        },
        _ => Outcome::Ambiguous {
            count: assemblies.len(),
            boring: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rotation;
    use crate::pieces::Piece;

    fn five_by_five() -> Vec<Piece> {
        (1..=25)
            .map(|number| Piece::new(number, [number as EdgeCode, 0, 0, 0]))
            .collect()
    }

    fn identity_assembly(pieces: &[Piece]) -> Assembly<'_> {
        pieces
            .iter()
            .map(|piece| RotatedPiece::new(piece, Rotation::IDENTITY))
            .collect()
    }

    #[test]
    fn test_pair_differing_in_two_cells_is_boring() {
        let pieces = five_by_five();
        let a = identity_assembly(&pieces);
        let mut b = a.clone();
        b.swap(6, 18);
        assert_eq!(shared_cells(&a, &b), 23);
        assert!(is_boring_pair(&a, &b));
        assert_eq!(
            classify(&[a, b]),
            Outcome::Ambiguous {
                count: 2,
                boring: true
            }
        );
    }

    #[test]
    fn test_pair_differing_everywhere_is_not_boring() {
        let pieces = five_by_five();
        let a = identity_assembly(&pieces);
        let mut b = a.clone();
        b.rotate_left(1);
        assert_eq!(shared_cells(&a, &b), 0);
        assert!(!is_boring_pair(&a, &b));
        assert_eq!(
            classify(&[a, b]),
            Outcome::Ambiguous {
                count: 2,
                boring: false
            }
        );
    }

    #[test]
    fn test_rotation_change_counts_as_different_cell() {
        let pieces = five_by_five();
        let a = identity_assembly(&pieces);
        let b: Assembly<'_> = a
            .iter()
            .map(|view| RotatedPiece::new(view.piece, Rotation::new(1)))
            .collect();
        assert_eq!(shared_cells(&a, &b), 0);
    }

    #[test]
    fn test_three_shared_cells_is_the_threshold() {
        let pieces = five_by_five();
        let a = identity_assembly(&pieces);
        let mut b = a.clone();
        b[3..].rotate_left(1);
        assert_eq!(shared_cells(&a, &b), 3);
        assert!(is_boring_pair(&a, &b));
        let mut c = a.clone();
        c[2..].rotate_left(1);
        assert_eq!(shared_cells(&a, &c), 2);
        assert!(!is_boring_pair(&a, &c));
    }

    #[test]
    fn test_classify_counts() {
        let pieces = five_by_five();
        let a = identity_assembly(&pieces);
        assert_eq!(classify(&[]), Outcome::Unsolvable);
        assert_eq!(classify(&[a.clone()]), Outcome::Unique);
        let many = vec![a.clone(), a.clone(), a];
        assert_eq!(
            classify(&many),
            Outcome::Ambiguous {
                count: 3,
                boring: false
            }
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        let pieces = five_by_five();
        let a = identity_assembly(&pieces);
        let mut b = a.clone();
        b.swap(0, 24);
        let assemblies = vec![a, b];
        let first = classify(&assemblies);
        for _ in 0..3 {
            assert_eq!(classify(&assemblies), first);
        }
    }

    #[test]
    fn test_solution_set_drops_repeated_pictures() {
        let twins = [Piece::new(1, [1, 2, 1, 2]), Piece::new(2, [3, 0, 0, 0])];
        let upright = vec![
            RotatedPiece::new(&twins[0], Rotation::IDENTITY),
            RotatedPiece::new(&twins[1], Rotation::IDENTITY),
        ];
        let half_turn = vec![
            RotatedPiece::new(&twins[0], Rotation::new(2)),
            RotatedPiece::new(&twins[1], Rotation::IDENTITY),
        ];
        let mut set = SolutionSet::new();
        assert!(set.insert(&upright));
        assert!(!set.insert(&half_turn), "same codes in every cell");
        assert!(!set.insert(&upright));
        assert_eq!(set.into_assemblies(), vec![upright]);
    }
}
