//! Chess replay step and starting arrangement.

use crate::core::{Board, ReplayError, Side, Square};

use super::types::{ChessKind, ChessMove, ChessPiece};

/// The standard opening arrangement. Light occupies ranks 1-2.
///
/// Ids are minted rank by rank from a1, so Light's pieces get 0..16 and
/// Dark's 16..32.
#[must_use]
pub fn initial_board() -> Board<ChessPiece> {
    let mut board = Board::new();
    let rows = [
        (1, Side::Light, None),
        (2, Side::Light, Some(ChessKind::Pawn)),
        (7, Side::Dark, Some(ChessKind::Pawn)),
        (8, Side::Dark, None),
    ];
    for (rank, side, fill) in rows {
        for file in 1..=8u8 {
            let Some(square) = Square::new(file, rank) else {
                continue;
            };
            let kind = fill.unwrap_or(ChessKind::BACK_RANK[file as usize - 1]);
            let piece = ChessPiece::new(board.mint_id(), side, kind);
            board.replace(square, piece);
        }
    }
    board
}

/// Square of the piece a move captures, worked out from the board.
///
/// An occupied destination is captured directly. A pawn stepping diagonally
/// onto an empty square captures en passant, beside its origin.
#[must_use]
pub fn capture_square(board: &Board<ChessPiece>, mv: &ChessMove) -> Option<Square> {
    if !board.is_empty_at(mv.to) {
        return Some(mv.to);
    }
    if mv.piece.kind == ChessKind::Pawn && mv.from.file() != mv.to.file() {
        return Square::new(mv.to.file(), mv.from.rank());
    }
    None
}

/// Rook origin and destination for a castling king move.
#[must_use]
pub fn castling_rook_squares(mv: &ChessMove) -> Option<(Square, Square)> {
    if !mv.is_castling() {
        return None;
    }
    let df = mv.from.delta_to(mv.to).df;
    let corner_file = if df > 0 { 8 } else { 1 };
    let rook_from = Square::new(corner_file, mv.from.rank())?;
    let rook_to = mv.from.offset(df / 2, 0)?;
    Some((rook_from, rook_to))
}

/// Apply one recorded chess move.
///
/// Order: remove the captured piece, move the acting piece, then apply the
/// secondary effects (rook shift, promotion).
pub fn apply_move(board: &mut Board<ChessPiece>, mv: &ChessMove) -> Result<(), ReplayError> {
    let mover = board.get(mv.from).ok_or(ReplayError::MissingPiece(mv.from))?;
    if mover.id != mv.piece.id {
        return Err(ReplayError::PieceMismatch {
            square: mv.from,
            expected: mv.piece.id,
            found: mover.id,
        });
    }

    match (capture_square(board, mv), mv.captured) {
        (None, None) => {}
        (Some(square), Some(captured)) => {
            if mv.captured_square.is_some_and(|recorded| recorded != square) {
                return Err(ReplayError::CaptureMismatch(square));
            }
            board
                .take(square, captured.id)
                .map_err(|_| ReplayError::CaptureMismatch(square))?;
        }
        (Some(square), None) if square == mv.to => return Err(ReplayError::Occupied(square)),
        (Some(_), None) | (None, Some(_)) => {
            return Err(ReplayError::CaptureMismatch(mv.captured_square.unwrap_or(mv.to)));
        }
    }

    let piece = board.take(mv.from, mv.piece.id)?;
    match mv.promoted {
        Some(promoted) => board.place(mv.to, promoted)?,
        None => board.place(mv.to, piece)?,
    }

    if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
        let rook = board
            .remove(rook_from)
            .ok_or(ReplayError::MissingPiece(rook_from))?;
        board.place(rook_to, rook)?;
    }
    Ok(())
}
