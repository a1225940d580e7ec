//! Board geometry: squares, deltas and square sets.
//!
//! Every game in this crate is played on the same fixed 8x8 grid. Coordinates are
//! 1-based on both axes: `file` runs 1..=8 from left to right (a..h) and `rank`
//! runs 1..=8 from Light's home edge towards Dark's.
//!
//! Stepping off the board never clamps. [`Square::offset`] returns `None` and
//! callers treat that as "no such square".
//!
//! ## Usage
//!
//! ```
//! use tabletop_rules::core::{Delta, Square};
//!
//! let e2: Square = "e2".parse().unwrap();
//! assert_eq!(e2.file(), 5);
//! assert_eq!(e2.rank(), 2);
//!
//! assert_eq!(e2.offset(0, 2), Square::new(5, 4));
//! assert_eq!(e2.offset(4, 0), None);
//!
//! let ray: Vec<_> = e2.ray(Delta::new(1, 1)).collect();
//! assert_eq!(ray.len(), 3); // f3, g4, h5
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::error::SquareParseError;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: u8 = 8;

/// Number of squares on the board.
pub const SQUARE_COUNT: usize = 64;

/// A square on the 8x8 board.
///
/// Ordering is rank-major, which matches [`Square::index`]. Boards iterate their
/// pieces in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Create a square from 1-based file and rank.
    ///
    /// Returns `None` if either coordinate is outside 1..=8.
    #[must_use]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file >= 1 && file <= BOARD_SIZE && rank >= 1 && rank <= BOARD_SIZE {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    /// Create a square from its 0-based index (`(rank - 1) * 8 + (file - 1)`).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < SQUARE_COUNT {
            Some(Self {
                rank: (index / 8) as u8 + 1,
                file: (index % 8) as u8 + 1,
            })
        } else {
            None
        }
    }

    /// File (column), 1..=8.
    #[must_use]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Rank (row), 1..=8.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// 0-based index in rank-major order.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.rank as usize - 1) * 8 + (self.file as usize - 1)
    }

    /// The square `df` files and `dr` ranks away, if it is on the board.
    #[must_use]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Self> {
        // No pair of i8 deltas overflows an i16 sum.
        let file = self.file as i16 + df as i16;
        let rank = self.rank as i16 + dr as i16;
        if file < 1 || rank < 1 || file > BOARD_SIZE as i16 || rank > BOARD_SIZE as i16 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// The square one `delta` away, if it is on the board.
    #[must_use]
    pub const fn step(self, delta: Delta) -> Option<Self> {
        self.offset(delta.df, delta.dr)
    }

    /// Successive squares along `delta`, excluding `self`, until the board edge.
    pub fn ray(self, delta: Delta) -> Ray {
        Ray {
            next: self.step(delta),
            delta,
        }
    }

    /// Signed file and rank distance from `self` to `other`.
    #[must_use]
    pub const fn delta_to(self, other: Square) -> Delta {
        Delta::new(
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    /// The square halfway between `self` and `other`, if the distance is even on both axes.
    #[must_use]
    pub fn midpoint(self, other: Square) -> Option<Square> {
        let d = self.delta_to(other);
        if d.df % 2 != 0 || d.dr % 2 != 0 {
            return None;
        }
        self.offset(d.df / 2, d.dr / 2)
    }

    /// Dark squares are those with an even file + rank sum (a1 is dark).
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    /// Iterate over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file - 1) as char, self.rank)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(SquareParseError::BadLength),
        };
        let file = match file {
            'a'..='h' => file as u8 - b'a' + 1,
            c => return Err(SquareParseError::UnexpectedFileChar(c)),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'0',
            c => return Err(SquareParseError::UnexpectedRankChar(c)),
        };
        Square::new(file, rank).ok_or(SquareParseError::BadLength)
    }
}

// Squares travel as their algebraic name so they can key JSON maps.
impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// A signed step on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Delta {
    pub df: i8,
    pub dr: i8,
}

impl Delta {
    #[must_use]
    pub const fn new(df: i8, dr: i8) -> Self {
        Self { df, dr }
    }

    /// Multiply both components by `n`, or `None` if either leaves the `i8` range.
    #[must_use]
    pub const fn scale(self, n: i8) -> Option<Self> {
        match (self.df.checked_mul(n), self.dr.checked_mul(n)) {
            (Some(df), Some(dr)) => Some(Self::new(df, dr)),
            _ => None,
        }
    }

    pub const ORTHOGONAL: [Delta; 4] = [
        Delta::new(1, 0),
        Delta::new(-1, 0),
        Delta::new(0, 1),
        Delta::new(0, -1),
    ];

    pub const DIAGONAL: [Delta; 4] = [
        Delta::new(1, 1),
        Delta::new(-1, 1),
        Delta::new(1, -1),
        Delta::new(-1, -1),
    ];

    /// The 8 king steps around a square. Also the 8 Reversi flank directions.
    pub const KING_STEPS: [Delta; 8] = [
        Delta::new(-1, -1),
        Delta::new(-1, 0),
        Delta::new(-1, 1),
        Delta::new(0, -1),
        Delta::new(0, 1),
        Delta::new(1, -1),
        Delta::new(1, 0),
        Delta::new(1, 1),
    ];

    pub const KNIGHT_JUMPS: [Delta; 8] = [
        Delta::new(1, 2),
        Delta::new(2, 1),
        Delta::new(2, -1),
        Delta::new(1, -2),
        Delta::new(-1, -2),
        Delta::new(-2, -1),
        Delta::new(-2, 1),
        Delta::new(-1, 2),
    ];
}

/// Iterator over the squares along a direction. See [`Square::ray`].
#[derive(Clone, Debug)]
pub struct Ray {
    next: Option<Square>,
    delta: Delta,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let current = self.next?;
        self.next = current.step(self.delta);
        Some(current)
    }
}

/// A set of squares, stored as a 64-bit mask.
///
/// Iteration yields squares in index order, so answers built from a `SquareSet`
/// are deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[must_use]
    pub const fn from_square(square: Square) -> Self {
        SquareSet(1u64 << square.index())
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.index());
    }

    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw mask, bit `i` set for the square with index `i`.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitAnd for SquareSet {
    type Output = SquareSet;

    fn bitand(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 & rhs.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        set.extend(iter);
        set
    }
}

impl Extend<Square> for SquareSet {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        for square in iter {
            self.insert(square);
        }
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

/// Iterator over a [`SquareSet`] in index order.
#[derive(Clone, Debug)]
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}
