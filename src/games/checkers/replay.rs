//! Checkers replay step and starting arrangement.

use crate::core::{Board, ReplayError, Side, Square};

use super::types::{CheckersMove, CheckersPiece};

/// Twelve pieces per side on the dark squares of the three nearest ranks.
///
/// Light fills ranks 1-3 and Dark ranks 6-8. Ids are minted in square order.
#[must_use]
pub fn initial_board() -> Board<CheckersPiece> {
    let mut board = Board::new();
    for square in Square::all().filter(|s| s.is_dark()) {
        let side = match square.rank() {
            1..=3 => Side::Light,
            6..=8 => Side::Dark,
            _ => continue,
        };
        let piece = CheckersPiece::new(board.mint_id(), side);
        board.replace(square, piece);
    }
    board
}

/// Apply one recorded checkers entry.
///
/// Continuations only check that the named piece stands on the square.
pub fn apply_move(board: &mut Board<CheckersPiece>, mv: &CheckersMove) -> Result<(), ReplayError> {
    let mover = board.get(mv.from).ok_or(ReplayError::MissingPiece(mv.from))?;
    if mover.id != mv.piece.id {
        return Err(ReplayError::PieceMismatch {
            square: mv.from,
            expected: mv.piece.id,
            found: mover.id,
        });
    }
    if mv.skip {
        return Ok(());
    }

    if let Some(captured) = mv.captured {
        let over = mv
            .from
            .midpoint(mv.to)
            .filter(|_| mv.from.delta_to(mv.to).df.abs() == 2)
            .ok_or(ReplayError::CaptureMismatch(mv.to))?;
        board
            .take(over, captured.id)
            .map_err(|_| ReplayError::CaptureMismatch(over))?;
    }

    let piece = board.take(mv.from, mv.piece.id)?;
    let piece = if mv.kinged { piece.crowned() } else { piece };
    board.place(mv.to, piece)
}
