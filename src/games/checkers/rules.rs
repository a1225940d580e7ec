//! `Rules` implementation for checkers.

use crate::core::{Board, History, ReplayError};
use crate::rules::Rules;

use super::legality;
use super::replay;
use super::types::{CheckersMove, CheckersPiece, CheckersStatus};

/// English draughts on an 8x8 board, Light moving first. Stateless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckersRules;

impl Rules for CheckersRules {
    type Piece = CheckersPiece;
    type Move = CheckersMove;
    type Status = CheckersStatus;

    fn initial_board(&self) -> Board<CheckersPiece> {
        replay::initial_board()
    }

    fn apply_move(&self, board: &mut Board<CheckersPiece>, mv: &CheckersMove) -> Result<(), ReplayError> {
        replay::apply_move(board, mv)
    }

    fn legal_moves(&self, board: &Board<CheckersPiece>, history: &History<CheckersMove>) -> Vec<CheckersMove> {
        legality::legal_moves(board, history, self.side_to_move(history))
    }

    fn status(&self, board: &Board<CheckersPiece>, history: &History<CheckersMove>) -> CheckersStatus {
        legality::status(board, history, self.side_to_move(history))
    }

    fn is_auxiliary(&self, mv: &CheckersMove) -> bool {
        mv.skip
    }

    fn pending_auxiliary(&self, board: &Board<CheckersPiece>, history: &History<CheckersMove>) -> Option<CheckersMove> {
        legality::pending_continuation(board, history)
    }
}
