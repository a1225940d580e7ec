//! Chess move legality.
//!
//! Moves are generated in two passes:
//! 1. Pseudo-legal moves from attack sets, pawn pushes, en passant and castling.
//! 2. Self-check filtering: each candidate is applied to a copy of the board
//!    with the replay step, and kept only if the mover's king is not attacked
//!    afterwards. The real board and history are never touched.

use crate::core::{Board, History, Side, Square, SquareSet};

use super::attack;
use super::replay;
use super::types::{ChessKind, ChessMove, ChessPiece, ChessStatus};

const KING_FILE: u8 = 5;

fn capture_of(board: &Board<ChessPiece>, piece: &ChessPiece, from: Square, to: Square) -> Option<ChessMove> {
    match board.get(to) {
        None => Some(ChessMove::quiet(*piece, from, to)),
        Some(target) if target.side != piece.side => Some(ChessMove {
            captured: Some(*target),
            captured_square: Some(to),
            ..ChessMove::quiet(*piece, from, to)
        }),
        Some(_) => None,
    }
}

/// Expand a pawn move onto the far rank into one move per promotion kind.
///
/// The promoted piece takes the board's next id, which is the id a session
/// mints when it commits the move.
fn push_pawn_move(board: &Board<ChessPiece>, mv: ChessMove, out: &mut Vec<ChessMove>) {
    if mv.to.rank() != mv.piece.side.far_rank() {
        out.push(mv);
        return;
    }
    let id = board.next_id();
    for kind in ChessKind::PROMOTIONS {
        out.push(ChessMove {
            promoted: Some(ChessPiece::new(id, mv.piece.side, kind)),
            ..mv
        });
    }
}

fn pawn_moves(
    board: &Board<ChessPiece>,
    history: &History<ChessMove>,
    piece: &ChessPiece,
    from: Square,
    out: &mut Vec<ChessMove>,
) {
    let forward = piece.side.forward();

    if let Some(one) = from.offset(0, forward).filter(|s| board.is_empty_at(*s)) {
        push_pawn_move(board, ChessMove::quiet(*piece, from, one), out);

        let start_rank = piece.side.home_rank() as i8 + forward;
        if from.rank() as i8 == start_rank {
            if let Some(two) = from.offset(0, 2 * forward).filter(|s| board.is_empty_at(*s)) {
                out.push(ChessMove::quiet(*piece, from, two));
            }
        }
    }

    for to in attack::pawn(piece.side, from) {
        if let Some(target) = board.get(to).filter(|t| t.side != piece.side) {
            let mv = ChessMove {
                captured: Some(*target),
                captured_square: Some(to),
                ..ChessMove::quiet(*piece, from, to)
            };
            push_pawn_move(board, mv, out);
        }
    }

    if let Some(mv) = en_passant(board, history, piece, from) {
        out.push(mv);
    }
}

/// En passant is available only right after an opposing pawn's two-square
/// push that landed beside this pawn.
#[must_use]
pub fn en_passant(
    board: &Board<ChessPiece>,
    history: &History<ChessMove>,
    piece: &ChessPiece,
    from: Square,
) -> Option<ChessMove> {
    if piece.kind != ChessKind::Pawn {
        return None;
    }
    let last = history.last()?;
    if !last.is_double_push() || last.piece.side == piece.side {
        return None;
    }
    let beside = last.to;
    if beside.rank() != from.rank() || from.delta_to(beside).df.abs() != 1 {
        return None;
    }
    let victim = board.get(beside).filter(|v| v.id == last.piece.id)?;
    let to = beside.offset(0, piece.side.forward())?;
    if !board.is_empty_at(to) {
        return None;
    }
    Some(ChessMove {
        captured: Some(*victim),
        captured_square: Some(beside),
        ..ChessMove::quiet(*piece, from, to)
    })
}

/// Whether anything in the history started on or landed on `square`.
fn ever_touched(history: &History<ChessMove>, square: Square) -> bool {
    history.iter().any(|mv| mv.touches(square))
}

/// Castling destinations for the king of `side` standing on `from`.
fn castling_moves(
    board: &Board<ChessPiece>,
    history: &History<ChessMove>,
    king: &ChessPiece,
    from: Square,
    out: &mut Vec<ChessMove>,
) {
    let home = king.side.home_rank();
    if from.rank() != home || from.file() != KING_FILE || ever_touched(history, from) {
        return;
    }
    let enemy = king.side.opponent();
    if attack::is_attacked(board, from, enemy) {
        return;
    }

    // (rook file, direction)
    for (rook_file, dir) in [(8u8, 1i8), (1u8, -1i8)] {
        let Some(rook_square) = Square::new(rook_file, home) else {
            continue;
        };
        let is_own_rook = board
            .get(rook_square)
            .is_some_and(|r| r.kind == ChessKind::Rook && r.side == king.side);
        if !is_own_rook || ever_touched(history, rook_square) {
            continue;
        }

        let between_clear = from
            .ray(crate::core::Delta::new(dir, 0))
            .take_while(|s| *s != rook_square)
            .all(|s| board.is_empty_at(s));
        if !between_clear {
            continue;
        }

        let (Some(transit), Some(dest)) = (from.offset(dir, 0), from.offset(2 * dir, 0)) else {
            continue;
        };
        if attack::is_attacked(board, transit, enemy) || attack::is_attacked(board, dest, enemy) {
            continue;
        }
        out.push(ChessMove::quiet(*king, from, dest));
    }
}

/// Moves of the piece on `from` ignoring self-check. Empty for an empty square.
#[must_use]
pub fn pseudo_legal_moves(
    board: &Board<ChessPiece>,
    history: &History<ChessMove>,
    from: Square,
) -> Vec<ChessMove> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    match piece.kind {
        ChessKind::Pawn => pawn_moves(board, history, piece, from, &mut out),
        kind => {
            for to in attack::attacks(board, from, piece) {
                if let Some(mv) = capture_of(board, piece, from, to) {
                    out.push(mv);
                }
            }
            if kind == ChessKind::King {
                castling_moves(board, history, piece, from, &mut out);
            }
        }
    }
    out
}

/// Whether applying `mv` leaves the mover's own king safe.
#[must_use]
pub fn keeps_king_safe(board: &Board<ChessPiece>, mv: &ChessMove) -> bool {
    let mut probe = board.clone();
    if replay::apply_move(&mut probe, mv).is_err() {
        return false;
    }
    !attack::in_check(&probe, mv.piece.side)
}

/// Legal moves of the piece on `from`, whichever side it belongs to.
#[must_use]
pub fn legal_moves_from(
    board: &Board<ChessPiece>,
    history: &History<ChessMove>,
    from: Square,
) -> Vec<ChessMove> {
    pseudo_legal_moves(board, history, from)
        .into_iter()
        .filter(|mv| keeps_king_safe(board, mv))
        .collect()
}

/// Every legal move of `side`.
#[must_use]
pub fn legal_moves(board: &Board<ChessPiece>, history: &History<ChessMove>, side: Side) -> Vec<ChessMove> {
    board
        .pieces_of(side)
        .flat_map(|(from, _)| legal_moves_from(board, history, from))
        .collect()
}

/// Whether `side` has at least one legal move. Stops at the first one found.
#[must_use]
pub fn has_legal_move(board: &Board<ChessPiece>, history: &History<ChessMove>, side: Side) -> bool {
    board.pieces_of(side).any(|(from, _)| {
        pseudo_legal_moves(board, history, from)
            .iter()
            .any(|mv| keeps_king_safe(board, mv))
    })
}

/// Destinations the piece on `from` may legally move to.
#[must_use]
pub fn valid_move_squares(board: &Board<ChessPiece>, history: &History<ChessMove>, from: Square) -> SquareSet {
    legal_moves_from(board, history, from)
        .iter()
        .map(|mv| mv.to)
        .collect()
}

/// Whether the piece on `from` may legally move to `to`.
#[must_use]
pub fn can_move(board: &Board<ChessPiece>, history: &History<ChessMove>, from: Square, to: Square) -> bool {
    valid_move_squares(board, history, from).contains(to)
}

/// Check / checkmate / stalemate report for `side`.
#[must_use]
pub fn status(board: &Board<ChessPiece>, history: &History<ChessMove>, side: Side) -> ChessStatus {
    let checked = attack::in_check(board, side);
    let can_move = has_legal_move(board, history, side);
    match (checked, can_move) {
        (false, true) => ChessStatus::Ok,
        (true, true) => ChessStatus::Check,
        (true, false) => ChessStatus::Checkmate,
        (false, false) => ChessStatus::Stalemate,
    }
}
