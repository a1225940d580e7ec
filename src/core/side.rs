//! Sides and per-side data storage.
//!
//! ## Side
//!
//! All three games are two-sided. `Light` always moves first, so the side to
//! move is a pure function of how many entries the history holds.
//!
//! ## SideMap
//!
//! Per-side data with O(1) access, indexed by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Light,
    Dark,
}

impl Side {
    /// Both sides, Light first.
    pub const ALL: [Side; 2] = [Side::Light, Side::Dark];

    /// The side to move after `history_len` recorded entries.
    ///
    /// ```
    /// use tabletop_rules::core::Side;
    ///
    /// assert_eq!(Side::from_parity(0), Side::Light);
    /// assert_eq!(Side::from_parity(3), Side::Dark);
    /// ```
    #[must_use]
    pub const fn from_parity(history_len: usize) -> Self {
        if history_len % 2 == 0 {
            Side::Light
        } else {
            Side::Dark
        }
    }

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Rank direction this side advances in: +1 for Light, -1 for Dark.
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Side::Light => 1,
            Side::Dark => -1,
        }
    }

    /// The rank this side starts from.
    #[must_use]
    pub const fn home_rank(self) -> u8 {
        match self {
            Side::Light => 1,
            Side::Dark => 8,
        }
    }

    /// The rank on which this side's pawns promote and men are kinged.
    #[must_use]
    pub const fn far_rank(self) -> u8 {
        self.opponent().home_rank()
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Light => 0,
            Side::Dark => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Light => write!(f, "Light"),
            Side::Dark => write!(f, "Dark"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use tabletop_rules::core::{Side, SideMap};
///
/// let mut discs: SideMap<u32> = SideMap::with_value(2);
/// discs[Side::Dark] += 1;
///
/// assert_eq!(discs[Side::Light], 2);
/// assert_eq!(discs[Side::Dark], 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    light: T,
    dark: T,
}

impl<T> SideMap<T> {
    /// Create a SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            light: factory(Side::Light),
            dark: factory(Side::Dark),
        }
    }

    /// Create a SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            light: value.clone(),
            dark: value,
        }
    }

    /// Iterate over (Side, &T) pairs, Light first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Light, &self.light), (Side::Dark, &self.dark)].into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Light => &self.light,
            Side::Dark => &self.dark,
        }
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Light => &mut self.light,
            Side::Dark => &mut self.dark,
        }
    }
}
