//! Checkers move legality.
//!
//! - Men move diagonally forward; kings in all four diagonal directions.
//! - Captures are mandatory: if any piece of the side to move can jump, only
//!   jumps are legal.
//! - After a jump, if the same piece can jump again, the turn continues with
//!   that piece alone, and only its jumps are legal.
//! - A man reaching the far rank is crowned as part of that move.

use crate::core::{Board, Delta, History, Side, Square, SquareSet};

use super::types::{CheckersMove, CheckersPiece, CheckersStatus};

/// Diagonal directions `piece` may move and capture in.
#[must_use]
pub fn directions(piece: &CheckersPiece) -> Vec<Delta> {
    let forward = piece.side.forward();
    Delta::DIAGONAL
        .into_iter()
        .filter(|d| piece.kinged || d.dr == forward)
        .collect()
}

fn crowns(piece: &CheckersPiece, to: Square) -> bool {
    !piece.kinged && to.rank() == piece.side.far_rank()
}

/// Jumps available to the piece on `from`.
#[must_use]
pub fn jumps_from(board: &Board<CheckersPiece>, from: Square) -> Vec<CheckersMove> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    directions(piece)
        .into_iter()
        .filter_map(|d| {
            let over = from.step(d)?;
            let to = from.step(d.scale(2)?)?;
            let victim = board.get(over).filter(|v| v.side != piece.side)?;
            board
                .is_empty_at(to)
                .then(|| CheckersMove::jump(*piece, from, to, crowns(piece, to), *victim))
        })
        .collect()
}

/// One-square steps available to the piece on `from`, ignoring the capture rule.
#[must_use]
pub fn steps_from(board: &Board<CheckersPiece>, from: Square) -> Vec<CheckersMove> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    directions(piece)
        .into_iter()
        .filter_map(|d| from.step(d))
        .filter(|to| board.is_empty_at(*to))
        .map(|to| CheckersMove::step(*piece, from, to, crowns(piece, to)))
        .collect()
}

/// Whether any piece of `side` can jump.
#[must_use]
pub fn side_can_capture(board: &Board<CheckersPiece>, side: Side) -> bool {
    board
        .pieces_of(side)
        .any(|(from, _)| !jumps_from(board, from).is_empty())
}

/// The square of the piece that must keep capturing, if the turn is mid-chain.
#[must_use]
pub fn continuing(history: &History<CheckersMove>) -> Option<Square> {
    history.last().filter(|mv| mv.skip).map(|mv| mv.to)
}

/// Every legal move of `side`.
#[must_use]
pub fn legal_moves(board: &Board<CheckersPiece>, history: &History<CheckersMove>, side: Side) -> Vec<CheckersMove> {
    if let Some(square) = continuing(history) {
        return jumps_from(board, square);
    }
    let jumps: Vec<_> = board
        .pieces_of(side)
        .flat_map(|(from, _)| jumps_from(board, from))
        .collect();
    if !jumps.is_empty() {
        return jumps;
    }
    board
        .pieces_of(side)
        .flat_map(|(from, _)| steps_from(board, from))
        .collect()
}

/// Legal moves of the piece on `from`, which must belong to `side`.
#[must_use]
pub fn legal_moves_from(
    board: &Board<CheckersPiece>,
    history: &History<CheckersMove>,
    side: Side,
    from: Square,
) -> Vec<CheckersMove> {
    if board.side_at(from) != Some(side) {
        return Vec::new();
    }
    if let Some(square) = continuing(history) {
        return if square == from { jumps_from(board, from) } else { Vec::new() };
    }
    if side_can_capture(board, side) {
        jumps_from(board, from)
    } else {
        steps_from(board, from)
    }
}

#[must_use]
pub fn valid_move_squares(
    board: &Board<CheckersPiece>,
    history: &History<CheckersMove>,
    side: Side,
    from: Square,
) -> SquareSet {
    legal_moves_from(board, history, side, from)
        .iter()
        .map(|mv| mv.to)
        .collect()
}

/// Origins of every legal move of `side`.
#[must_use]
pub fn movable_origins(board: &Board<CheckersPiece>, history: &History<CheckersMove>, side: Side) -> SquareSet {
    legal_moves(board, history, side).iter().map(|mv| mv.from).collect()
}

/// Whether the piece that just made `mv` must capture again on `board`, the
/// board after `mv`.
#[must_use]
pub fn must_continue(board: &Board<CheckersPiece>, mv: &CheckersMove) -> bool {
    mv.is_capture() && !jumps_from(board, mv.to).is_empty()
}

/// The continuation entry owed after the last entry, if that entry was a
/// capture whose piece can capture again.
#[must_use]
pub fn pending_continuation(board: &Board<CheckersPiece>, history: &History<CheckersMove>) -> Option<CheckersMove> {
    let last = history.last().filter(|mv| !mv.skip)?;
    if !must_continue(board, last) {
        return None;
    }
    let piece = board.get(last.to)?;
    Some(CheckersMove::continuation(*piece, last.to))
}

#[must_use]
pub fn status(board: &Board<CheckersPiece>, history: &History<CheckersMove>, side: Side) -> CheckersStatus {
    if continuing(history).is_some() {
        return CheckersStatus::Continuing;
    }
    if legal_moves(board, history, side).is_empty() {
        CheckersStatus::NoMoves
    } else {
        CheckersStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::replay::{apply_move, initial_board};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn board_with(pieces: &[(&str, Side, bool)]) -> Board<CheckersPiece> {
        let mut board = Board::new();
        for (name, side, kinged) in pieces {
            let mut piece = CheckersPiece::new(board.mint_id(), *side);
            piece.kinged = *kinged;
            board.place(sq(name), piece).unwrap();
        }
        board
    }

    fn set(names: &[&str]) -> SquareSet {
        names.iter().map(|n| sq(n)).collect()
    }

    #[test]
    fn test_opening_moves() {
        let board = initial_board();
        let history = History::new();
        assert_eq!(legal_moves(&board, &history, Side::Light).len(), 7);
        assert_eq!(
            movable_origins(&board, &history, Side::Light),
            set(&["a3", "c3", "e3", "g3"])
        );
        assert_eq!(valid_move_squares(&board, &history, Side::Light, sq("c3")), set(&["b4", "d4"]));
        assert!(valid_move_squares(&board, &history, Side::Dark, sq("c3")).is_empty());
    }

    #[test]
    fn test_men_only_move_forward() {
        let board = board_with(&[("d4", Side::Light, false), ("e5", Side::Dark, false)]);
        let history = History::new();
        // Capture is forced, so d4 may only jump.
        assert_eq!(valid_move_squares(&board, &history, Side::Light, sq("d4")), set(&["f6"]));
        assert_eq!(valid_move_squares(&board, &history, Side::Dark, sq("e5")), set(&["c3"]));
    }

    #[test]
    fn test_kings_move_backwards() {
        let board = board_with(&[("d4", Side::Light, true)]);
        let history = History::new();
        assert_eq!(
            valid_move_squares(&board, &history, Side::Light, sq("d4")),
            set(&["c3", "e3", "c5", "e5"])
        );
    }

    #[test]
    fn test_capture_is_mandatory_for_every_piece() {
        let board = board_with(&[
            ("a1", Side::Light, false),
            ("e3", Side::Light, false),
            ("f4", Side::Dark, false),
        ]);
        let history = History::new();
        assert!(valid_move_squares(&board, &history, Side::Light, sq("a1")).is_empty());
        assert_eq!(valid_move_squares(&board, &history, Side::Light, sq("e3")), set(&["g5"]));
    }

    #[test]
    fn test_jump_needs_empty_landing() {
        let board = board_with(&[
            ("c3", Side::Light, false),
            ("d4", Side::Dark, false),
            ("e5", Side::Dark, false),
        ]);
        let history = History::new();
        assert_eq!(valid_move_squares(&board, &history, Side::Light, sq("c3")), set(&["b4"]));
    }

    #[test]
    fn test_continuation_restricts_to_capturing_piece() {
        let mut board = board_with(&[
            ("a1", Side::Light, false),
            ("c3", Side::Light, false),
            ("d4", Side::Dark, false),
            ("f6", Side::Dark, false),
        ]);
        let mut history = History::new();

        let jump = legal_moves(&board, &history, Side::Light)[0];
        apply_move(&mut board, &jump).unwrap();
        history.push(jump);
        assert!(must_continue(&board, &jump));

        let entry = CheckersMove::continuation(*board.get(sq("e5")).unwrap(), sq("e5"));
        history.push(entry);

        assert_eq!(continuing(&history), Some(sq("e5")));
        assert_eq!(status(&board, &history, Side::Light), CheckersStatus::Continuing);
        assert_eq!(movable_origins(&board, &history, Side::Light), set(&["e5"]));
        assert!(valid_move_squares(&board, &history, Side::Light, sq("a1")).is_empty());
        assert_eq!(valid_move_squares(&board, &history, Side::Light, sq("e5")), set(&["g7"]));
    }

    #[test]
    fn test_crowning_flag() {
        let board = board_with(&[("b7", Side::Light, false), ("h8", Side::Dark, false)]);
        let history = History::new();
        let moves = legal_moves(&board, &history, Side::Light);
        assert!(moves.iter().all(|m| m.kinged));
    }

    #[test]
    fn test_no_pieces_means_no_moves() {
        let board = board_with(&[("b2", Side::Light, false)]);
        let history = History::new();
        assert_eq!(status(&board, &history, Side::Dark), CheckersStatus::NoMoves);
        assert_eq!(status(&board, &history, Side::Light), CheckersStatus::Ongoing);
    }

    #[test]
    fn test_blocked_side_has_no_moves() {
        let board = board_with(&[
            ("a1", Side::Light, false),
            ("b2", Side::Dark, false),
            ("c3", Side::Dark, false),
        ]);
        let history = History::new();
        assert_eq!(status(&board, &history, Side::Light), CheckersStatus::NoMoves);
    }
}
