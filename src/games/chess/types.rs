//! Chess pieces, moves and status.

use serde::{Deserialize, Serialize};

use crate::core::{Piece, PieceId, Side, Square};
use crate::rules::GameStatus;

/// Chess piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChessKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl ChessKind {
    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [ChessKind; 4] = [
        ChessKind::Queen,
        ChessKind::Rook,
        ChessKind::Bishop,
        ChessKind::Knight,
    ];

    /// Back-rank order from file a to file h.
    pub const BACK_RANK: [ChessKind; 8] = [
        ChessKind::Rook,
        ChessKind::Knight,
        ChessKind::Bishop,
        ChessKind::Queen,
        ChessKind::King,
        ChessKind::Bishop,
        ChessKind::Knight,
        ChessKind::Rook,
    ];

    #[must_use]
    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }
}

/// A chess piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessPiece {
    pub id: PieceId,
    pub side: Side,
    pub kind: ChessKind,
}

impl ChessPiece {
    #[must_use]
    pub const fn new(id: PieceId, side: Side, kind: ChessKind) -> Self {
        Self { id, side, kind }
    }
}

impl Piece for ChessPiece {
    fn id(&self) -> PieceId {
        self.id
    }

    fn side(&self) -> Side {
        self.side
    }
}

/// A recorded chess move.
///
/// Castling is recorded as the king's two-file move and en passant as the
/// pawn's diagonal step. The replay step works out the rook shift and the
/// captured pawn's square from the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    /// The moving piece as it stood on `from`.
    pub piece: ChessPiece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<ChessPiece>,
    /// Where the captured piece stood. Differs from `to` only for en passant.
    pub captured_square: Option<Square>,
    /// The piece that replaces a promoting pawn on `to`.
    pub promoted: Option<ChessPiece>,
}

impl ChessMove {
    /// A non-capturing, non-promoting move.
    #[must_use]
    pub const fn quiet(piece: ChessPiece, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            captured: None,
            captured_square: None,
            promoted: None,
        }
    }

    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[must_use]
    pub const fn is_promotion(&self) -> bool {
        self.promoted.is_some()
    }

    /// King moving two files.
    #[must_use]
    pub fn is_castling(&self) -> bool {
        self.piece.kind == ChessKind::King && self.from.delta_to(self.to).df.abs() == 2
    }

    #[must_use]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.captured_square, Some(square) if square != self.to)
    }

    /// Pawn advancing two ranks.
    #[must_use]
    pub fn is_double_push(&self) -> bool {
        self.piece.kind == ChessKind::Pawn && self.from.delta_to(self.to).dr.abs() == 2
    }

    /// Whether this move starts on or lands on `square`.
    #[must_use]
    pub fn touches(&self, square: Square) -> bool {
        self.from == square || self.to == square
    }
}

/// Chess state for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChessStatus {
    /// Not in check, at least one legal move.
    Ok,
    /// In check, at least one legal move.
    Check,
    /// In check, no legal move.
    Checkmate,
    /// Not in check, no legal move.
    Stalemate,
}

impl GameStatus for ChessStatus {
    fn is_terminal(&self) -> bool {
        matches!(self, ChessStatus::Checkmate | ChessStatus::Stalemate)
    }

    fn winner(&self, side_to_move: Side) -> Option<Side> {
        match self {
            ChessStatus::Checkmate => Some(side_to_move.opponent()),
            _ => None,
        }
    }
}
