//! `Rules` implementation for chess.

use crate::core::{Board, History, ReplayError};
use crate::rules::Rules;

use super::legality;
use super::replay;
use super::types::{ChessMove, ChessPiece, ChessStatus};

/// Standard chess rules. Stateless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChessRules;

impl Rules for ChessRules {
    type Piece = ChessPiece;
    type Move = ChessMove;
    type Status = ChessStatus;

    fn initial_board(&self) -> Board<ChessPiece> {
        replay::initial_board()
    }

    fn apply_move(&self, board: &mut Board<ChessPiece>, mv: &ChessMove) -> Result<(), ReplayError> {
        replay::apply_move(board, mv)
    }

    fn legal_moves(&self, board: &Board<ChessPiece>, history: &History<ChessMove>) -> Vec<ChessMove> {
        legality::legal_moves(board, history, self.side_to_move(history))
    }

    fn status(&self, board: &Board<ChessPiece>, history: &History<ChessMove>) -> ChessStatus {
        legality::status(board, history, self.side_to_move(history))
    }
}
