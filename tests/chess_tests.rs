//! Chess integration tests.
//!
//! These drive `ChessSession` through whole sequences of moves and check the
//! derived board, identities, special moves and game-ending states.

use tabletop_rules::core::{Board, History, MoveError, SavedGame, SessionConfig, Side, Square};
use tabletop_rules::games::chess::{ChessKind, ChessPiece, ChessSession, ChessStatus, PlayOutcome};
use tabletop_rules::rules::{GameResult, Rules};
use tabletop_rules::ChessRules;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play_all(session: &mut ChessSession, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        session
            .play(sq(from), sq(to))
            .unwrap_or_else(|e| panic!("{from}-{to}: {e}"));
    }
}

/// A session starting from a hand-built position, Light to move.
fn session_from(pieces: &[(&str, Side, ChessKind)]) -> ChessSession {
    let mut board = Board::new();
    for (name, side, kind) in pieces {
        let piece = ChessPiece::new(board.mint_id(), *side, *kind);
        board.place(sq(name), piece).unwrap();
    }
    let saved = SavedGame::new(board, &History::new());
    ChessSession::from_saved(&saved, SessionConfig::default()).unwrap()
}

// =============================================================================
// Captures and Identity
// =============================================================================

/// Test that a pawn capture leaves the capturing pawn, with its identity, on
/// the destination.
#[test]
fn test_pawn_capture_keeps_identity() {
    let mut session = ChessSession::new();
    let c2_pawn = *session.board().get(sq("c2")).unwrap();
    let d7_pawn = *session.board().get(sq("d7")).unwrap();

    play_all(&mut session, &[("c2", "c4"), ("d7", "d5"), ("c4", "d5")]);

    let board = session.board();
    assert_eq!(board.get(sq("d5")), Some(&c2_pawn));
    assert!(board.is_empty_at(sq("c4")));
    assert!(board.is_empty_at(sq("c2")));
    assert_eq!(board.find(d7_pawn.id), None);
    assert_eq!(board.len(), 31);

    let last = session.history().last().unwrap();
    assert_eq!(last.captured, Some(d7_pawn));
}

/// Test that captured ids are never handed out again.
#[test]
fn test_promotion_id_is_fresh() {
    let mut session = ChessSession::new();
    play_all(
        &mut session,
        &[
            ("h2", "h4"),
            ("g7", "g5"),
            ("h4", "g5"),
            ("a7", "a6"),
            ("g5", "g6"),
            ("a6", "a5"),
            ("g6", "h7"),
            ("a5", "a4"),
        ],
    );
    session.play_promoting(sq("h7"), sq("g8"), ChessKind::Queen).unwrap();

    let queen = session.board().get(sq("g8")).unwrap();
    assert_eq!(queen.id.raw(), 32);
    assert!(session
        .board()
        .pieces()
        .filter(|(_, p)| p.id == queen.id)
        .count()
        == 1);
}

// =============================================================================
// En Passant
// =============================================================================

/// Test that en passant is available right after a double push and removes
/// the pushed pawn.
#[test]
fn test_en_passant_capture() {
    let mut session = ChessSession::new();
    play_all(&mut session, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);

    assert!(session.can_move(sq("e5"), sq("d6")));
    play_all(&mut session, &[("e5", "d6")]);

    assert!(session.board().is_empty_at(sq("d5")));
    assert_eq!(session.board().get(sq("d6")).unwrap().kind, ChessKind::Pawn);
    assert!(session.history().last().unwrap().is_en_passant());
}

/// Test that en passant is illegal when the opposing pawn arrived with
/// single steps.
#[test]
fn test_en_passant_illegal_after_single_push() {
    let mut session = ChessSession::new();
    play_all(&mut session, &[("e2", "e4"), ("d7", "d6"), ("e4", "e5"), ("d6", "d5")]);

    assert!(!session.can_move(sq("e5"), sq("d6")));
    assert!(matches!(
        session.play(sq("e5"), sq("d6")),
        Err(MoveError::Illegal { .. })
    ));
}

// =============================================================================
// Castling
// =============================================================================

const ITALIAN: [(&str, &str); 6] = [
    ("e2", "e4"),
    ("e7", "e5"),
    ("g1", "f3"),
    ("b8", "c6"),
    ("f1", "c4"),
    ("g8", "f6"),
];

/// Test that kingside castling moves the rook beside the king.
#[test]
fn test_kingside_castling() {
    let mut session = ChessSession::new();
    play_all(&mut session, &ITALIAN);

    assert!(session.can_move(sq("e1"), sq("g1")));
    play_all(&mut session, &[("e1", "g1")]);

    let board = session.board();
    assert_eq!(board.get(sq("g1")).unwrap().kind, ChessKind::King);
    assert_eq!(board.get(sq("f1")).unwrap().kind, ChessKind::Rook);
    assert!(board.is_empty_at(sq("h1")));
    assert!(board.is_empty_at(sq("e1")));
}

/// Test that undoing a castle restores king and rook.
#[test]
fn test_undo_castling() {
    let mut session = ChessSession::new();
    play_all(&mut session, &ITALIAN);
    let before = session.board().clone();

    play_all(&mut session, &[("e1", "g1")]);
    session.undo();
    assert_eq!(session.board(), &before);
}

/// Test that a king that has moved and come back may not castle.
#[test]
fn test_no_castling_after_king_moved() {
    let mut session = ChessSession::new();
    play_all(&mut session, &ITALIAN);
    play_all(&mut session, &[("e1", "e2"), ("a7", "a6"), ("e2", "e1"), ("a6", "a5")]);

    assert!(!session.can_move(sq("e1"), sq("g1")));
}

// =============================================================================
// Game End
// =============================================================================

/// Test the fastest checkmate.
#[test]
fn test_fools_mate() {
    let mut session = ChessSession::new();
    play_all(&mut session, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
    assert_eq!(session.status(), ChessStatus::Ok);

    play_all(&mut session, &[("d8", "h4")]);
    assert_eq!(session.status(), ChessStatus::Checkmate);
    assert_eq!(session.result(), Some(GameResult::Winner(Side::Dark)));
    assert!(session.movable_origins().is_empty());
}

/// Test that check with an escape is only check.
#[test]
fn test_check_is_not_mate() {
    let mut session = ChessSession::new();
    play_all(&mut session, &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")]);

    assert_eq!(session.status(), ChessStatus::Check);
    assert_eq!(session.movable_origins(), [sq("g7")].into_iter().collect());
    assert_eq!(session.valid_move_squares(sq("g7")), [sq("g6")].into_iter().collect());
}

/// Test stalemate from a hand-built position.
#[test]
fn test_stalemate() {
    let session = session_from(&[
        ("a1", Side::Light, ChessKind::King),
        ("b3", Side::Dark, ChessKind::Queen),
        ("h8", Side::Dark, ChessKind::King),
    ]);
    assert_eq!(session.status(), ChessStatus::Stalemate);
    assert_eq!(session.result(), Some(GameResult::Draw));
}

// =============================================================================
// Promotion
// =============================================================================

/// Test that the opponent sees the pre-move board while a promotion is
/// pending, and the post-move board after it commits.
#[test]
fn test_pending_promotion_is_invisible() {
    let mut session = session_from(&[
        ("b7", Side::Light, ChessKind::Pawn),
        ("e1", Side::Light, ChessKind::King),
        ("h2", Side::Dark, ChessKind::King),
    ]);

    assert_eq!(session.play(sq("b7"), sq("b8")).unwrap(), PlayOutcome::PromotionPending);
    assert!(session.board().is_empty_at(sq("b8")));
    assert_eq!(session.history().len(), 0);
    assert_eq!(session.status_for(Side::Dark), ChessStatus::Ok);

    session.promote(ChessKind::Queen).unwrap();
    // The queen on b8 guards h2 along the diagonal.
    assert_eq!(session.status(), ChessStatus::Check);
}

/// Test that a cancelled promotion leaves no trace.
#[test]
fn test_cancel_promotion() {
    let mut session = session_from(&[
        ("b7", Side::Light, ChessKind::Pawn),
        ("e1", Side::Light, ChessKind::King),
        ("h2", Side::Dark, ChessKind::King),
    ]);
    let before = session.board().clone();

    session.play(sq("b7"), sq("b8")).unwrap();
    assert!(session.cancel_promotion().is_some());
    assert_eq!(session.board(), &before);
    assert!(!session.can_undo());
    assert_eq!(session.promote(ChessKind::Rook), Err(MoveError::NoPendingPromotion));
}

// =============================================================================
// Persistence
// =============================================================================

/// Test that a JSON round trip replays to the same board.
#[test]
fn test_json_round_trip() {
    let mut session = ChessSession::new();
    play_all(&mut session, &ITALIAN);
    play_all(&mut session, &[("e1", "g1")]);

    let json = session.to_saved().to_json().unwrap();
    let saved = SavedGame::from_json(&json).unwrap();
    let restored = ChessSession::from_saved(&saved, SessionConfig::default()).unwrap();

    assert_eq!(restored.board(), session.board());
    assert_eq!(
        ChessRules.compute_state(saved.moves.iter(), &saved.initial).unwrap(),
        *session.board()
    );
}

/// Test that reset returns to the opening position.
#[test]
fn test_reset() {
    let mut session = ChessSession::new();
    play_all(&mut session, &ITALIAN);
    session.reset();

    assert!(!session.can_undo());
    assert_eq!(session.board(), &ChessRules.initial_board());
    assert_eq!(session.side_to_move(), Side::Light);
}
