//! Rules trait for game implementations.
//!
//! Games implement `Rules` to define:
//! - The fixed starting arrangement
//! - How a recorded move changes a board (the replay step)
//! - Which moves the side to move may make
//! - When the game is over
//!
//! The trait is implemented by independent modules, one per game. Nothing
//! dispatches over games at runtime.

use std::fmt::Debug;

use crate::core::{Board, History, Piece, ReplayError, Side};

/// Terminal-state report of a game.
pub trait GameStatus: Copy + PartialEq + Debug {
    /// Whether the game is over.
    fn is_terminal(&self) -> bool;

    /// Winner of a finished game, given the side that would be to move.
    ///
    /// Returns `None` while the game continues and for draws.
    fn winner(&self, side_to_move: Side) -> Option<Side>;
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Rules trait.
///
/// ## Implementation Notes
///
/// - `apply_move` is the replay step. It must be deterministic and must not
///   mint piece ids; ids travel inside the move.
/// - `legal_moves` returns moves a player may choose. Auxiliary entries that
///   sessions synthesize (continuations, skips) are never listed; they come
///   from `pending_auxiliary` instead.
/// - `status` must only report a terminal state when no legal move exists.
pub trait Rules {
    type Piece: Piece;
    type Move: Clone + PartialEq + Debug;
    type Status: GameStatus;

    /// The fixed starting arrangement.
    fn initial_board(&self) -> Board<Self::Piece>;

    /// Apply one recorded move to `board`.
    fn apply_move(
        &self,
        board: &mut Board<Self::Piece>,
        mv: &Self::Move,
    ) -> Result<(), ReplayError>;

    /// Every move the side to move may choose.
    fn legal_moves(&self, board: &Board<Self::Piece>, history: &History<Self::Move>)
        -> Vec<Self::Move>;

    /// Terminal-state report for the side to move.
    fn status(&self, board: &Board<Self::Piece>, history: &History<Self::Move>) -> Self::Status;

    /// Whether `mv` is an auxiliary entry synthesized by a session rather than
    /// chosen by a player.
    fn is_auxiliary(&self, _mv: &Self::Move) -> bool {
        false
    }

    /// The auxiliary entry a session records next in this position, if any.
    ///
    /// Sessions append exactly this entry, and history validation accepts an
    /// auxiliary entry only where it equals this one.
    fn pending_auxiliary(&self, _board: &Board<Self::Piece>, _history: &History<Self::Move>) -> Option<Self::Move> {
        None
    }

    /// Side to move. Every recorded entry counts, auxiliary ones included.
    fn side_to_move(&self, history: &History<Self::Move>) -> Side {
        history.side_to_move()
    }

    /// Derive the board reached by playing `moves` in order from `base`.
    ///
    /// This is the single source of truth for "what the board looks like now".
    fn compute_state<'a, I>(&self, moves: I, base: &Board<Self::Piece>) -> Result<Board<Self::Piece>, ReplayError>
    where
        I: IntoIterator<Item = &'a Self::Move>,
        Self::Move: 'a,
    {
        let mut board = base.clone();
        for mv in moves {
            self.apply_move(&mut board, mv)?;
        }
        Ok(board)
    }

    /// Final result, if the game is over.
    fn result(&self, board: &Board<Self::Piece>, history: &History<Self::Move>) -> Option<GameResult> {
        let status = self.status(board, history);
        if !status.is_terminal() {
            return None;
        }
        Some(match status.winner(self.side_to_move(history)) {
            Some(side) => GameResult::Winner(side),
            None => GameResult::Draw,
        })
    }
}
