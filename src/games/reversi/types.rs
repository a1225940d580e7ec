//! Reversi discs, moves and status.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Piece, PieceId, Side, Square};
use crate::rules::GameStatus;

/// A disc. Flanking recolors a disc in place; its id never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disc {
    pub id: PieceId,
    pub side: Side,
}

impl Disc {
    #[must_use]
    pub const fn new(id: PieceId, side: Side) -> Self {
        Self { id, side }
    }

    /// The same disc showing the other color.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self {
            side: self.side.opponent(),
            ..self
        }
    }
}

impl Piece for Disc {
    fn id(&self) -> PieceId {
        self.id
    }

    fn side(&self) -> Side {
        self.side
    }
}

/// Squares flanked by one placement, nearest first within each direction.
pub type Flanked = SmallVec<[Square; 8]>;

/// A recorded reversi history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReversiMove {
    /// `disc` is placed on `square` and every flanked disc is recolored.
    Place {
        disc: Disc,
        square: Square,
        flanked: Flanked,
    },
    /// `side` had no legal placement and passed. Counts toward turn parity.
    Skip { side: Side },
}

impl ReversiMove {
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, ReversiMove::Skip { .. })
    }

    /// The side that made this entry.
    #[must_use]
    pub const fn side(&self) -> Side {
        match self {
            ReversiMove::Place { disc, .. } => disc.side,
            ReversiMove::Skip { side } => *side,
        }
    }

    #[must_use]
    pub const fn square(&self) -> Option<Square> {
        match self {
            ReversiMove::Place { square, .. } => Some(*square),
            ReversiMove::Skip { .. } => None,
        }
    }
}

/// Reversi state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReversiStatus {
    Ongoing,
    /// Neither side can place. `winner` is the side with more discs, `None`
    /// on equal counts.
    Finished { winner: Option<Side> },
}

impl GameStatus for ReversiStatus {
    fn is_terminal(&self) -> bool {
        matches!(self, ReversiStatus::Finished { .. })
    }

    fn winner(&self, _side_to_move: Side) -> Option<Side> {
        match self {
            ReversiStatus::Finished { winner } => *winner,
            ReversiStatus::Ongoing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flipped_keeps_identity() {
        let disc = Disc::new(PieceId(2), Side::Light);
        let flipped = disc.flipped();
        assert_eq!(flipped.side, Side::Dark);
        assert_eq!(flipped.id, disc.id);
    }

    #[test]
    fn test_move_accessors() {
        let skip = ReversiMove::Skip { side: Side::Dark };
        assert!(skip.is_skip());
        assert_eq!(skip.side(), Side::Dark);
        assert_eq!(skip.square(), None);
    }

    #[test]
    fn test_status_winner_ignores_side_to_move() {
        let status = ReversiStatus::Finished {
            winner: Some(Side::Light),
        };
        assert!(status.is_terminal());
        assert_eq!(status.winner(Side::Light), Some(Side::Light));
        assert_eq!(status.winner(Side::Dark), Some(Side::Light));
        assert_eq!(ReversiStatus::Ongoing.winner(Side::Dark), None);
    }
}
