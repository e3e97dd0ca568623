//! Square tile sides and quarter-turn rotations.
//!
//! A tile has 4 sides in fixed cyclic order TOP, RIGHT, BOTTOM, LEFT, and 4
//! possible orientations in the plane. Rotation `r` means the tile has been
//! turned `r` quarter turns clockwise, so the raw side that sat at `TOP` now
//! faces direction `r`.

/// One side of a square tile, in clockwise order starting at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    /// All four sides in cyclic order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Position of this side in a `[TOP, RIGHT, BOTTOM, LEFT]` tuple.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The side at tuple position `index % 4`.
    #[inline]
    pub const fn from_index(index: usize) -> Side {
        match index % 4 {
            0 => Side::Top,
            1 => Side::Right,
            2 => Side::Bottom,
            _ => Side::Left,
        }
    }
}

/// Number of quarter turns (0..4) applied clockwise to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rotation(u8);

impl Rotation {
    pub const IDENTITY: Rotation = Rotation(0);

    /// All four rotations, identity first.
    pub const ALL: [Rotation; 4] = [Rotation(0), Rotation(1), Rotation(2), Rotation(3)];

    /// Wraps `quarter_turns` into `0..4`.
    #[inline]
    pub const fn new(quarter_turns: u8) -> Self {
        Rotation(quarter_turns % 4)
    }

    #[inline(always)]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    /// The rotation that brings raw side `side` to the `TOP` direction.
    #[inline]
    pub const fn bringing_to_top(side: Side) -> Self {
        Rotation::new(4 - side.index() as u8)
    }

    /// One quarter turn the other way: whatever faced `TOP` now faces `LEFT`.
    #[inline]
    pub const fn turned_counterclockwise(self) -> Self {
        Rotation::new(self.0 + 3)
    }

    /// Which raw side of the tile is seen when looking at direction `side`.
    ///
    /// This is the lookup `raw[(side - rotation) mod 4]`.
    #[inline(always)]
    pub const fn raw_side(self, side: Side) -> Side {
        Side::from_index(side.index() + 4 - self.0 as usize)
    }
}
