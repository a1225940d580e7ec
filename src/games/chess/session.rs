//! Chess session controller.
//!
//! A session owns the move history and the boards derived from it. Players
//! act through [`ChessSession::play`]; everything else is a query.
//!
//! ## Promotion
//!
//! Moving a pawn onto the far rank is a two-phase commit. `play` parks the
//! move in a pending slot outside the history and returns
//! [`PlayOutcome::PromotionPending`]. While it is parked, every query sees
//! the board from before the pawn moved, and further moves are refused.
//! [`ChessSession::promote`] commits it with the chosen kind;
//! [`ChessSession::cancel_promotion`] (or `undo`) discards it.
//!
//! ## Example
//!
//! ```
//! use tabletop_rules::games::chess::{ChessSession, PlayOutcome};
//!
//! let mut session = ChessSession::new();
//! let e2 = "e2".parse().unwrap();
//! let e4 = "e4".parse().unwrap();
//! assert!(session.can_move(e2, e4));
//! assert_eq!(session.play(e2, e4).unwrap(), PlayOutcome::Moved);
//! session.undo();
//! assert!(!session.can_undo());
//! ```

use tracing::{debug, instrument, warn};

use crate::core::{
    Board, History, MoveError, SavedGame, SessionConfig, Side, Square, SquareSet, MemoCache,
};
use crate::rules::{GameResult, GameStatus, Rules, Timeline};

use super::legality;
use super::rules::ChessRules;
use super::types::{ChessKind, ChessMove, ChessPiece, ChessStatus};

/// A saved chess game.
pub type SavedChess = SavedGame<ChessPiece, ChessMove>;

/// What `play` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The move is recorded and the turn has passed.
    Moved,
    /// A pawn reached the far rank; call `promote` with a piece kind.
    PromotionPending,
}

/// One chess game in progress.
#[derive(Clone, Debug)]
pub struct ChessSession {
    rules: ChessRules,
    timeline: Timeline<ChessPiece, ChessMove>,
    config: SessionConfig,
    pending: Option<ChessMove>,
    destinations: MemoCache<Square, SquareSet>,
    statuses: MemoCache<Side, ChessStatus>,
}

impl Default for ChessSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessSession {
    /// A new game from the standard arrangement.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        let rules = ChessRules;
        Self::from_timeline(Timeline::new(rules.initial_board()), config)
    }

    fn from_timeline(timeline: Timeline<ChessPiece, ChessMove>, config: SessionConfig) -> Self {
        Self {
            rules: ChessRules,
            timeline,
            destinations: MemoCache::new(config.memoize),
            statuses: MemoCache::new(config.memoize),
            pending: None,
            config,
        }
    }

    /// Rebuild a session by replaying a saved game.
    ///
    /// Refuses a history that does not replay onto its starting board, and,
    /// with `validate_history`, one containing a move that was not legal.
    pub fn from_saved(saved: &SavedChess, config: SessionConfig) -> Result<Self, MoveError> {
        let timeline = Timeline::replay(&ChessRules, saved.initial.clone(), &saved.moves, config.validate_history)
            .map_err(|err| {
                warn!(%err, "saved chess game failed to replay");
                err
            })?;
        Ok(Self::from_timeline(timeline, config))
    }

    /// The starting board and committed moves. A pending promotion is not saved.
    #[must_use]
    pub fn to_saved(&self) -> SavedChess {
        SavedGame::new(self.timeline.base().clone(), self.timeline.history())
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board<ChessPiece> {
        self.timeline.board()
    }

    #[must_use]
    pub fn history(&self) -> &History<ChessMove> {
        self.timeline.history()
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.rules.side_to_move(self.history())
    }

    /// The move waiting for a promotion kind, if any.
    #[must_use]
    pub fn pending_promotion(&self) -> Option<&ChessMove> {
        self.pending.as_ref()
    }

    /// Legal destinations for the piece on `from`.
    ///
    /// Empty unless `from` holds a piece of the side to move.
    #[must_use]
    pub fn valid_move_squares(&self, from: Square) -> SquareSet {
        if self.board().side_at(from) != Some(self.side_to_move()) {
            return SquareSet::EMPTY;
        }
        self.destinations
            .get_or_compute(from, || legality::valid_move_squares(self.board(), self.history(), from))
    }

    #[must_use]
    pub fn can_move(&self, from: Square, to: Square) -> bool {
        self.valid_move_squares(from).contains(to)
    }

    /// Squares holding a piece of the side to move that has a legal move.
    #[must_use]
    pub fn movable_origins(&self) -> SquareSet {
        self.board()
            .pieces_of(self.side_to_move())
            .map(|(square, _)| square)
            .filter(|square| !self.valid_move_squares(*square).is_empty())
            .collect()
    }

    /// Check / checkmate / stalemate for the side to move.
    #[must_use]
    pub fn status(&self) -> ChessStatus {
        self.status_for(self.side_to_move())
    }

    /// Check / checkmate / stalemate for `side` on the current board.
    #[must_use]
    pub fn status_for(&self, side: Side) -> ChessStatus {
        self.statuses
            .get_or_compute(side, || legality::status(self.board(), self.history(), side))
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        let status = self.status();
        if !status.is_terminal() {
            return None;
        }
        Some(match status.winner(self.side_to_move()) {
            Some(side) => GameResult::Winner(side),
            None => GameResult::Draw,
        })
    }

    /// Move the piece on `from` to `to`.
    #[instrument(skip(self), fields(side = %self.side_to_move()))]
    pub fn play(&mut self, from: Square, to: Square) -> Result<PlayOutcome, MoveError> {
        let mv = self.find_move(from, to)?;
        if mv.is_promotion() {
            debug!(%from, %to, "promotion pending");
            self.pending = Some(ChessMove { promoted: None, ..mv });
            return Ok(PlayOutcome::PromotionPending);
        }
        self.commit(mv)?;
        Ok(PlayOutcome::Moved)
    }

    /// Move and promote in one call. A move that does not promote ignores `kind`.
    #[instrument(skip(self), fields(side = %self.side_to_move()))]
    pub fn play_promoting(&mut self, from: Square, to: Square, kind: ChessKind) -> Result<(), MoveError> {
        let mv = self.find_move(from, to)?;
        if mv.is_promotion() {
            let promoted = self.promoted_piece(&mv, kind)?;
            self.commit(ChessMove {
                promoted: Some(promoted),
                ..mv
            })
        } else {
            self.commit(mv)
        }
    }

    /// Finish a pending promotion with `kind`.
    #[instrument(skip(self))]
    pub fn promote(&mut self, kind: ChessKind) -> Result<(), MoveError> {
        let mv = self.pending.ok_or(MoveError::NoPendingPromotion)?;
        let promoted = self.promoted_piece(&mv, kind)?;
        self.commit(ChessMove {
            promoted: Some(promoted),
            ..mv
        })?;
        self.pending = None;
        Ok(())
    }

    /// Discard a pending promotion. Returns the discarded move.
    pub fn cancel_promotion(&mut self) -> Option<ChessMove> {
        let mv = self.pending.take()?;
        debug!(from = %mv.from, to = %mv.to, "promotion cancelled");
        Some(mv)
    }

    /// Whether there is anything to undo, a pending promotion included.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.pending.is_some() || !self.timeline.is_empty()
    }

    /// Take back the pending promotion, or else the last move. No-op when
    /// there is nothing to take back.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Option<ChessMove> {
        if let Some(mv) = self.cancel_promotion() {
            return Some(mv);
        }
        let mv = self.timeline.pop()?;
        self.invalidate();
        debug!(from = %mv.from, to = %mv.to, "move undone");
        Some(mv)
    }

    /// Back to the starting board.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.pending = None;
        self.timeline.clear();
        self.invalidate();
        debug!("game reset");
    }

    fn find_move(&self, from: Square, to: Square) -> Result<ChessMove, MoveError> {
        if self.pending.is_some() {
            return Err(MoveError::PromotionPending);
        }
        if self.status().is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.can_move(from, to) {
            return Err(MoveError::Illegal { from, to });
        }
        legality::legal_moves_from(self.board(), self.history(), from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(MoveError::Illegal { from, to })
    }

    fn promoted_piece(&self, mv: &ChessMove, kind: ChessKind) -> Result<ChessPiece, MoveError> {
        if !kind.is_promotion_target() {
            return Err(MoveError::InvalidPromotion);
        }
        Ok(ChessPiece::new(self.board().next_id(), mv.piece.side, kind))
    }

    fn commit(&mut self, mv: ChessMove) -> Result<(), MoveError> {
        self.timeline.push(&self.rules, mv)?;
        self.invalidate();
        debug!(
            piece = %mv.piece.id,
            from = %mv.from,
            to = %mv.to,
            capture = mv.is_capture(),
            "move recorded"
        );
        Ok(())
    }

    fn invalidate(&self) {
        self.destinations.clear();
        self.statuses.clear();
    }
}
