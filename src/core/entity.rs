//! Piece identity.
//!
//! Every piece carries a `PieceId` that stays with it for its whole life:
//! moving keeps the id, Reversi recoloring keeps the id, and a captured
//! piece's id is never handed out again.
//!
//! ## Allocation
//!
//! Ids are minted only in three places:
//! - when a game builds its initial arrangement,
//! - when a Reversi disc is placed,
//! - when a Chess pawn promotes.
//!
//! Boards carry the allocator (see [`IdAllocator`]), so minting is
//! deterministic: the same history always produces the same ids. Replay never
//! mints; it only advances the allocator past ids it observes.

use serde::{Deserialize, Serialize};

/// Opaque, stable identity of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PieceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Monotone id allocator.
///
/// ```
/// use tabletop_rules::core::{IdAllocator, PieceId};
///
/// let mut ids = IdAllocator::default();
/// assert_eq!(ids.mint(), PieceId(0));
/// assert_eq!(ids.mint(), PieceId(1));
///
/// ids.observe(PieceId(10));
/// assert_eq!(ids.peek(), PieceId(11));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Allocate a fresh id.
    pub fn mint(&mut self) -> PieceId {
        let id = PieceId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `mint` would return.
    #[must_use]
    pub const fn peek(&self) -> PieceId {
        PieceId(self.next)
    }

    /// Make sure `id` is never minted again.
    pub fn observe(&mut self, id: PieceId) {
        self.next = self.next.max(id.0 + 1);
    }
}
