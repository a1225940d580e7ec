//! Error types.
//!
//! Queries never fail: asking about an empty origin or an occupied destination
//! answers "illegal". Errors are reserved for three situations:
//! - text that does not name a square ([`SquareParseError`]),
//! - a history that does not replay onto its base board ([`ReplayError`]),
//! - a session refusing to record a move ([`MoveError`]),
//! plus encoding failures in the persistence codec ([`CodecError`]).

use thiserror::Error;

use super::entity::PieceId;
use super::geometry::Square;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// A move does not fit the board it is replayed onto.
///
/// The core only guarantees replay of histories it produced itself, so these
/// indicate corrupted or hand-edited data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The move's origin square is empty.
    #[error("no piece on {0}")]
    MissingPiece(Square),
    /// The origin holds a different piece than the move claims.
    #[error("expected {expected} on {square}, found {found}")]
    PieceMismatch {
        square: Square,
        expected: PieceId,
        found: PieceId,
    },
    /// The destination is occupied and the move does not capture it.
    #[error("destination {0} is occupied")]
    Occupied(Square),
    /// The recorded capture disagrees with what the geometry implies.
    #[error("recorded capture does not match the board at {0}")]
    CaptureMismatch(Square),
    /// A flanked square does not hold an opposing disc.
    #[error("square {0} cannot be flanked")]
    NotFlankable(Square),
    /// The move is well formed but was not legal at its point in the history.
    #[error("move {index} is not legal in its position")]
    IllegalMove { index: usize },
}

/// A session refused to record a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("move from {from} to {to} is not legal")]
    Illegal { from: Square, to: Square },
    #[error("placement on {0} is not legal")]
    IllegalPlacement(Square),
    #[error("the game is over")]
    GameOver,
    #[error("a promotion is waiting for a piece kind")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPendingPromotion,
    #[error("pawns cannot promote to that piece")]
    InvalidPromotion,
    #[error("the piece on {0} must continue capturing")]
    MustContinue(Square),
    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// Persistence encoding failure.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
