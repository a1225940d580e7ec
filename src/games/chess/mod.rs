//! Chess.
//!
//! Standard rules: castling, en passant and promotion included. There is no
//! fifty-move or repetition rule; a game ends only in checkmate or stalemate.

pub mod attack;
pub mod legality;
pub mod replay;
pub mod rules;
pub mod session;
pub mod types;

pub use rules::ChessRules;
pub use session::{ChessSession, PlayOutcome, SavedChess};
pub use types::{ChessKind, ChessMove, ChessPiece, ChessStatus};
