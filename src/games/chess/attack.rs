//! Attack generation.
//!
//! "Attacked" means "a piece standing here could capture there". Pawns attack
//! their two forward diagonals only; their pushes are not attacks. Sliders trace
//! rays that stop at the first occupied square, which is included.

use crate::core::{Board, Delta, Side, Square, SquareSet};

use super::types::{ChessKind, ChessPiece};

fn steps(from: Square, deltas: &[Delta]) -> SquareSet {
    deltas.iter().filter_map(|d| from.step(*d)).collect()
}

fn rays(board: &Board<ChessPiece>, from: Square, deltas: &[Delta]) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for delta in deltas {
        for square in from.ray(*delta) {
            set.insert(square);
            if !board.is_empty_at(square) {
                break;
            }
        }
    }
    set
}

/// The two squares a pawn of `side` on `from` attacks.
#[must_use]
pub fn pawn(side: Side, from: Square) -> SquareSet {
    [-1, 1]
        .into_iter()
        .filter_map(|df| from.offset(df, side.forward()))
        .collect()
}

#[must_use]
pub fn knight(from: Square) -> SquareSet {
    steps(from, &Delta::KNIGHT_JUMPS)
}

#[must_use]
pub fn king(from: Square) -> SquareSet {
    steps(from, &Delta::KING_STEPS)
}

#[must_use]
pub fn bishop(board: &Board<ChessPiece>, from: Square) -> SquareSet {
    rays(board, from, &Delta::DIAGONAL)
}

#[must_use]
pub fn rook(board: &Board<ChessPiece>, from: Square) -> SquareSet {
    rays(board, from, &Delta::ORTHOGONAL)
}

#[must_use]
pub fn queen(board: &Board<ChessPiece>, from: Square) -> SquareSet {
    bishop(board, from) | rook(board, from)
}

/// Squares attacked by `piece` standing on `from`.
#[must_use]
pub fn attacks(board: &Board<ChessPiece>, from: Square, piece: &ChessPiece) -> SquareSet {
    match piece.kind {
        ChessKind::Pawn => pawn(piece.side, from),
        ChessKind::Knight => knight(from),
        ChessKind::Bishop => bishop(board, from),
        ChessKind::Rook => rook(board, from),
        ChessKind::Queen => queen(board, from),
        ChessKind::King => king(from),
    }
}

/// Whether any piece of `by` attacks `square`.
#[must_use]
pub fn is_attacked(board: &Board<ChessPiece>, square: Square, by: Side) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| attacks(board, from, piece).contains(square))
}

/// Where `side`'s king stands.
#[must_use]
pub fn king_square(board: &Board<ChessPiece>, side: Side) -> Option<Square> {
    board
        .pieces_of(side)
        .find(|(_, piece)| piece.kind == ChessKind::King)
        .map(|(square, _)| square)
}

/// Whether `side`'s king is attacked. A board without that king is never in check.
#[must_use]
pub fn in_check(board: &Board<ChessPiece>, side: Side) -> bool {
    king_square(board, side).is_some_and(|king| is_attacked(board, king, side.opponent()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::replay::initial_board;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn board_with(pieces: &[(&str, Side, ChessKind)]) -> Board<ChessPiece> {
        let mut board = Board::new();
        for (name, side, kind) in pieces {
            let piece = ChessPiece::new(board.mint_id(), *side, *kind);
            board.place(sq(name), piece).unwrap();
        }
        board
    }

    #[test]
    fn test_pawn_attacks_diagonals_only() {
        let set = pawn(Side::Light, sq("e4"));
        assert_eq!(set, [sq("d5"), sq("f5")].into_iter().collect());

        let edge = pawn(Side::Dark, sq("a7"));
        assert_eq!(edge, SquareSet::from_square(sq("b6")));
    }

    #[test]
    fn test_knight_in_corner() {
        assert_eq!(knight(sq("a1")).len(), 2);
        assert_eq!(knight(sq("d4")).len(), 8);
    }

    #[test]
    fn test_rays_stop_at_blocker_inclusive() {
        let board = board_with(&[
            ("d4", Side::Light, ChessKind::Rook),
            ("d6", Side::Dark, ChessKind::Pawn),
            ("b4", Side::Light, ChessKind::Pawn),
        ]);
        let set = rook(&board, sq("d4"));

        assert!(set.contains(sq("d5")));
        assert!(set.contains(sq("d6")));
        assert!(!set.contains(sq("d7")));
        assert!(set.contains(sq("c4")));
        assert!(set.contains(sq("b4")));
        assert!(!set.contains(sq("a4")));
        assert!(set.contains(sq("d1")));
        assert!(set.contains(sq("h4")));
    }

    #[test]
    fn test_opening_coverage() {
        let board = initial_board();

        // Every third-rank square is covered by a pawn or knight.
        for file in 1..=8 {
            assert!(is_attacked(&board, Square::new(file, 3).unwrap(), Side::Light));
        }
        assert!(!is_attacked(&board, sq("e4"), Side::Light));
        assert!(!in_check(&board, Side::Light));
        assert!(!in_check(&board, Side::Dark));
    }

    #[test]
    fn test_in_check() {
        let board = board_with(&[
            ("e1", Side::Light, ChessKind::King),
            ("e8", Side::Dark, ChessKind::Rook),
        ]);
        assert!(in_check(&board, Side::Light));
        assert_eq!(king_square(&board, Side::Light), Some(sq("e1")));
        assert!(!in_check(&board, Side::Dark));
    }

    #[test]
    fn test_blocked_check() {
        let board = board_with(&[
            ("e1", Side::Light, ChessKind::King),
            ("e2", Side::Light, ChessKind::Bishop),
            ("e8", Side::Dark, ChessKind::Queen),
        ]);
        assert!(!in_check(&board, Side::Light));
    }
}
