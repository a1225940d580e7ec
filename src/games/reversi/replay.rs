//! Reversi replay step and starting arrangement.

use crate::core::{Board, ReplayError, Side, Square};

use super::types::{Disc, ReversiMove};

/// The four center discs: Light on d4 and e5, Dark on d5 and e4.
#[must_use]
pub fn initial_board() -> Board<Disc> {
    let mut board = Board::new();
    let center = [
        ("d4", Side::Light),
        ("e4", Side::Dark),
        ("d5", Side::Dark),
        ("e5", Side::Light),
    ];
    for (name, side) in center {
        let Ok(square) = name.parse::<Square>() else {
            continue;
        };
        let disc = Disc::new(board.mint_id(), side);
        board.replace(square, disc);
    }
    board
}

/// Apply one recorded reversi entry. Skips change nothing.
pub fn apply_move(board: &mut Board<Disc>, mv: &ReversiMove) -> Result<(), ReplayError> {
    let ReversiMove::Place { disc, square, flanked } = mv else {
        return Ok(());
    };
    if !board.is_empty_at(*square) {
        return Err(ReplayError::Occupied(*square));
    }
    for target in flanked {
        let flippable = board.get(*target).filter(|d| d.side != disc.side).copied();
        let Some(current) = flippable else {
            return Err(ReplayError::NotFlankable(*target));
        };
        board.replace(*target, current.flipped());
    }
    board.place(*square, *disc)
}
