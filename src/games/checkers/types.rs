//! Checkers pieces, moves and status.

use serde::{Deserialize, Serialize};

use crate::core::{Piece, PieceId, Side, Square};
use crate::rules::GameStatus;

/// A checkers piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersPiece {
    pub id: PieceId,
    pub side: Side,
    /// Kings move and capture in all four diagonal directions.
    pub kinged: bool,
}

impl CheckersPiece {
    #[must_use]
    pub const fn new(id: PieceId, side: Side) -> Self {
        Self {
            id,
            side,
            kinged: false,
        }
    }

    #[must_use]
    pub const fn crowned(self) -> Self {
        Self {
            kinged: true,
            ..self
        }
    }
}

impl Piece for CheckersPiece {
    fn id(&self) -> PieceId {
        self.id
    }

    fn side(&self) -> Side {
        self.side
    }
}

/// A recorded checkers history entry.
///
/// Player moves are one-square steps or two-square jumps. A jump that leaves
/// the same piece with another capture is followed by a continuation entry
/// (`skip == true`) with `from == to` on the landing square. The continuation
/// changes nothing on the board; it only keeps the turn with the capturing
/// side, since every entry counts toward turn parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersMove {
    /// The moving piece as it stood on `from`. For a continuation, the piece
    /// that must keep capturing, as it stands on the landing square.
    pub piece: CheckersPiece,
    pub from: Square,
    pub to: Square,
    /// The move crowns the piece.
    pub kinged: bool,
    pub captured: Option<CheckersPiece>,
    pub skip: bool,
}

impl CheckersMove {
    /// A non-capturing step.
    #[must_use]
    pub const fn step(piece: CheckersPiece, from: Square, to: Square, kinged: bool) -> Self {
        Self {
            piece,
            from,
            to,
            kinged,
            captured: None,
            skip: false,
        }
    }

    /// A jump over `captured`.
    #[must_use]
    pub const fn jump(piece: CheckersPiece, from: Square, to: Square, kinged: bool, captured: CheckersPiece) -> Self {
        Self {
            piece,
            from,
            to,
            kinged,
            captured: Some(captured),
            skip: false,
        }
    }

    /// Continuation entry: `piece` on `at` must capture again.
    #[must_use]
    pub const fn continuation(piece: CheckersPiece, at: Square) -> Self {
        Self {
            piece,
            from: at,
            to: at,
            kinged: false,
            captured: None,
            skip: true,
        }
    }

    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Checkers state for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckersStatus {
    /// Normal turn with at least one legal move.
    Ongoing,
    /// Mid-turn: the piece that just captured must capture again.
    Continuing,
    /// No legal move. The side to move has lost.
    NoMoves,
}

impl GameStatus for CheckersStatus {
    fn is_terminal(&self) -> bool {
        *self == CheckersStatus::NoMoves
    }

    fn winner(&self, side_to_move: Side) -> Option<Side> {
        self.is_terminal().then(|| side_to_move.opponent())
    }
}
