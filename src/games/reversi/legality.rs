//! Reversi placement legality.
//!
//! A placement on an empty square is legal when at least one of the eight
//! rays from it crosses one or more opposing discs and then reaches a disc of
//! the placing side. A ray that hits an empty square or the board edge first
//! flanks nothing.
//!
//! Each side may also make at most a fixed number of placements; a side that
//! has used them all cannot place.

use crate::core::{Board, Delta, History, Side, Square, SquareSet};

use super::types::{Disc, Flanked, ReversiMove, ReversiStatus};

/// Placements per side the 8x8 board admits beside the four starting discs.
pub const DEFAULT_PLACEMENT_CAP: u32 = (64 - 4) / 2;

/// Discs `side` would flank along one ray from `square`, nearest first.
fn flanked_along(board: &Board<Disc>, side: Side, square: Square, delta: Delta) -> Flanked {
    let mut run = Flanked::new();
    for next in square.ray(delta) {
        match board.side_at(next) {
            Some(s) if s == side => return run,
            Some(_) => run.push(next),
            None => break,
        }
    }
    Flanked::new()
}

/// Every disc `side` would flank by placing on `square`. Empty if the square
/// is occupied.
#[must_use]
pub fn flanked(board: &Board<Disc>, side: Side, square: Square) -> Flanked {
    if !board.is_empty_at(square) {
        return Flanked::new();
    }
    Delta::KING_STEPS
        .into_iter()
        .flat_map(|delta| flanked_along(board, side, square, delta))
        .collect()
}

/// Placements `side` has made so far.
#[must_use]
pub fn placements_made(history: &History<ReversiMove>, side: Side) -> u32 {
    history
        .iter()
        .filter(|mv| !mv.is_skip() && mv.side() == side)
        .count() as u32
}

/// Whether `side` has placements left under `cap`.
#[must_use]
pub fn under_cap(history: &History<ReversiMove>, side: Side, cap: u32) -> bool {
    placements_made(history, side) < cap
}

/// Every legal placement of `side`.
///
/// New discs take the board's next id, which is the id a session mints when
/// it records the placement.
#[must_use]
pub fn legal_placements(board: &Board<Disc>, history: &History<ReversiMove>, side: Side, cap: u32) -> Vec<ReversiMove> {
    if !under_cap(history, side, cap) {
        return Vec::new();
    }
    let disc = Disc::new(board.next_id(), side);
    Square::all()
        .filter_map(|square| {
            let flanked = flanked(board, side, square);
            (!flanked.is_empty()).then(|| ReversiMove::Place { disc, square, flanked })
        })
        .collect()
}

#[must_use]
pub fn valid_placements(board: &Board<Disc>, history: &History<ReversiMove>, side: Side, cap: u32) -> SquareSet {
    legal_placements(board, history, side, cap)
        .iter()
        .filter_map(ReversiMove::square)
        .collect()
}

/// Whether `side` has any legal placement. Stops at the first one found.
#[must_use]
pub fn can_place(board: &Board<Disc>, history: &History<ReversiMove>, side: Side, cap: u32) -> bool {
    under_cap(history, side, cap) && Square::all().any(|square| !flanked(board, side, square).is_empty())
}

/// The skip owed to the side to move: it cannot place, the last entry was
/// not already a skip, and the other side still has placements left under
/// the cap.
#[must_use]
pub fn pending_skip(board: &Board<Disc>, history: &History<ReversiMove>, side: Side, cap: u32) -> Option<ReversiMove> {
    if history.last().is_some_and(ReversiMove::is_skip)
        || !under_cap(history, side.opponent(), cap)
        || can_place(board, history, side, cap)
    {
        return None;
    }
    Some(ReversiMove::Skip { side })
}

/// Side with more discs, `None` on equal counts.
#[must_use]
pub fn leader(board: &Board<Disc>) -> Option<Side> {
    let count = board.count();
    match count[Side::Light].cmp(&count[Side::Dark]) {
        std::cmp::Ordering::Greater => Some(Side::Light),
        std::cmp::Ordering::Less => Some(Side::Dark),
        std::cmp::Ordering::Equal => None,
    }
}

/// The game is over when `side`, to move, cannot place and either the last
/// entry was a skip or the opponent cannot place either.
#[must_use]
pub fn status(board: &Board<Disc>, history: &History<ReversiMove>, side: Side, cap: u32) -> ReversiStatus {
    if can_place(board, history, side, cap) {
        return ReversiStatus::Ongoing;
    }
    let after_skip = history.last().is_some_and(ReversiMove::is_skip);
    if after_skip || !can_place(board, history, side.opponent(), cap) {
        ReversiStatus::Finished { winner: leader(board) }
    } else {
        ReversiStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::reversi::replay::initial_board;
    use crate::rules::GameStatus;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn board_with(discs: &[(&str, Side)]) -> Board<Disc> {
        let mut board = Board::new();
        for (name, side) in discs {
            let disc = Disc::new(board.mint_id(), *side);
            board.place(sq(name), disc).unwrap();
        }
        board
    }

    #[test]
    fn test_opening_placements() {
        let board = initial_board();
        let history = History::new();
        let light: SquareSet = ["c5", "d6", "e3", "f4"].iter().map(|n| sq(n)).collect();
        let dark: SquareSet = ["c4", "d3", "e6", "f5"].iter().map(|n| sq(n)).collect();
        assert_eq!(valid_placements(&board, &history, Side::Light, DEFAULT_PLACEMENT_CAP), light);
        assert_eq!(valid_placements(&board, &history, Side::Dark, DEFAULT_PLACEMENT_CAP), dark);
    }

    #[test]
    fn test_flank_stops_at_own_disc() {
        let board = initial_board();
        assert_eq!(flanked(&board, Side::Light, sq("d6")).as_slice(), &[sq("d5")]);
        assert!(flanked(&board, Side::Light, sq("d4")).is_empty());
    }

    #[test]
    fn test_run_off_board_flanks_nothing() {
        let board = board_with(&[("a1", Side::Light), ("b1", Side::Dark), ("c1", Side::Dark)]);
        assert!(flanked(&board, Side::Dark, sq("d1")).is_empty());
        assert_eq!(flanked(&board, Side::Light, sq("d1")).as_slice(), &[sq("c1"), sq("b1")]);

        let edge = board_with(&[("g1", Side::Dark), ("h1", Side::Dark)]);
        assert!(flanked(&edge, Side::Light, sq("f1")).is_empty());
    }

    #[test]
    fn test_gap_breaks_flank() {
        let board = board_with(&[("a1", Side::Light), ("c1", Side::Dark)]);
        assert!(flanked(&board, Side::Light, sq("d1")).is_empty());
    }

    #[test]
    fn test_multiple_directions() {
        let board = board_with(&[
            ("d4", Side::Dark),
            ("c4", Side::Light),
            ("e4", Side::Dark),
            ("f4", Side::Light),
            ("d3", Side::Dark),
            ("d2", Side::Light),
        ]);
        let mut squares: Vec<_> = flanked(&board, Side::Light, sq("d5")).into_iter().collect();
        squares.sort();
        assert_eq!(squares, vec![sq("d3"), sq("d4")]);
        assert_eq!(flanked(&board, Side::Light, sq("g4")).as_slice(), &[] as &[Square]);
    }

    #[test]
    fn test_cap_blocks_placements() {
        let board = initial_board();
        let history = History::new();
        assert!(legal_placements(&board, &history, Side::Light, 0).is_empty());
        assert!(!can_place(&board, &history, Side::Light, 0));
    }

    #[test]
    fn test_full_board_finishes() {
        let mut board = Board::new();
        for square in Square::all() {
            let side = if square.rank() <= 5 { Side::Light } else { Side::Dark };
            let disc = Disc::new(board.mint_id(), side);
            board.place(square, disc).unwrap();
        }
        let history = History::new();
        assert_eq!(
            status(&board, &history, Side::Light, DEFAULT_PLACEMENT_CAP),
            ReversiStatus::Finished {
                winner: Some(Side::Light)
            }
        );
    }

    #[test]
    fn test_opponent_able_means_ongoing() {
        // Light has nothing to flank, Dark does.
        let board = board_with(&[("a1", Side::Dark), ("b1", Side::Light)]);
        let history = History::new();
        assert!(!can_place(&board, &history, Side::Light, DEFAULT_PLACEMENT_CAP));
        assert!(can_place(&board, &history, Side::Dark, DEFAULT_PLACEMENT_CAP));
        assert_eq!(
            status(&board, &history, Side::Light, DEFAULT_PLACEMENT_CAP),
            ReversiStatus::Ongoing
        );

        let skipped: History<ReversiMove> = [ReversiMove::Skip { side: Side::Dark }].into_iter().collect();
        assert!(status(&board, &skipped, Side::Light, DEFAULT_PLACEMENT_CAP).is_terminal());
    }
}
