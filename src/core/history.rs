//! Move history.
//!
//! The history is the only mutable record of a game. It grows by appending one
//! or two entries per player action and shrinks only from the end (undo) or by
//! being cleared (new game). The current board is always derived from it.
//!
//! Uses `im::Vector` so saving a game or replaying from a session shares
//! structure with the live history instead of copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::side::Side;

/// Ordered, append-only list of recorded moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "M: Serialize",
    deserialize = "M: Deserialize<'de> + Clone"
))]
#[serde(transparent)]
pub struct History<M: Clone> {
    moves: Vector<M>,
}

impl<M: Clone> Default for History<M> {
    fn default() -> Self {
        Self {
            moves: Vector::new(),
        }
    }
}

impl<M: Clone> History<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a move.
    pub fn push(&mut self, mv: M) {
        self.moves.push_back(mv);
    }

    /// Remove and return the last move.
    pub fn pop(&mut self) -> Option<M> {
        self.moves.pop_back()
    }

    #[must_use]
    pub fn last(&self) -> Option<&M> {
        self.moves.back()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&M> {
        self.moves.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Keep only the first `len` moves.
    pub fn truncate(&mut self, len: usize) {
        if len < self.moves.len() {
            self.moves.truncate(len);
        }
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &M> + ExactSizeIterator {
        self.moves.iter()
    }

    /// Side to move after every recorded entry, counting every entry.
    #[must_use]
    pub fn side_to_move(&self) -> Side {
        Side::from_parity(self.len())
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<M> {
        self.moves.iter().cloned().collect()
    }
}

impl<M: Clone> FromIterator<M> for History<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}
