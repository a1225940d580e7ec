//! Checkers session controller.
//!
//! ## Multi-capture turns
//!
//! When a jump leaves the same piece with another capture, the session
//! appends a continuation entry after it and reports
//! [`PlayOutcome::Continuing`]. Until the chain ends, only that piece may
//! move. `undo` takes back the whole turn, every jump of the chain included.

use tracing::{debug, instrument, warn};

use crate::core::{
    Board, History, MemoCache, MoveError, SavedGame, SessionConfig, Side, Square, SquareSet,
};
use crate::rules::{GameResult, GameStatus, Rules, Timeline};

use super::legality;
use super::rules::CheckersRules;
use super::types::{CheckersMove, CheckersPiece, CheckersStatus};

/// A saved checkers game.
pub type SavedCheckers = SavedGame<CheckersPiece, CheckersMove>;

/// What `play` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The turn passed to the opponent.
    TurnPassed,
    /// The piece now on this square must capture again.
    Continuing(Square),
}

/// One checkers game in progress.
#[derive(Clone, Debug)]
pub struct CheckersSession {
    rules: CheckersRules,
    timeline: Timeline<CheckersPiece, CheckersMove>,
    config: SessionConfig,
    destinations: MemoCache<Square, SquareSet>,
    statuses: MemoCache<Side, CheckersStatus>,
}

impl Default for CheckersSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckersSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        let rules = CheckersRules;
        Self::from_timeline(Timeline::new(rules.initial_board()), config)
    }

    fn from_timeline(timeline: Timeline<CheckersPiece, CheckersMove>, config: SessionConfig) -> Self {
        Self {
            rules: CheckersRules,
            timeline,
            destinations: MemoCache::new(config.memoize),
            statuses: MemoCache::new(config.memoize),
            config,
        }
    }

    /// Rebuild a session by replaying a saved game.
    pub fn from_saved(saved: &SavedCheckers, config: SessionConfig) -> Result<Self, MoveError> {
        let timeline = Timeline::replay(&CheckersRules, saved.initial.clone(), &saved.moves, config.validate_history)
            .map_err(|err| {
                warn!(%err, "saved checkers game failed to replay");
                err
            })?;
        Ok(Self::from_timeline(timeline, config))
    }

    #[must_use]
    pub fn to_saved(&self) -> SavedCheckers {
        SavedGame::new(self.timeline.base().clone(), self.timeline.history())
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board<CheckersPiece> {
        self.timeline.board()
    }

    #[must_use]
    pub fn history(&self) -> &History<CheckersMove> {
        self.timeline.history()
    }

    /// Side to move. Continuation entries count, so it stays with the
    /// capturing side through a chain.
    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.rules.side_to_move(self.history())
    }

    /// Square of the piece that must keep capturing, if mid-chain.
    #[must_use]
    pub fn continuing(&self) -> Option<Square> {
        legality::continuing(self.history())
    }

    #[must_use]
    pub fn valid_move_squares(&self, from: Square) -> SquareSet {
        let side = self.side_to_move();
        self.destinations.get_or_compute(from, || {
            legality::valid_move_squares(self.board(), self.history(), side, from)
        })
    }

    #[must_use]
    pub fn can_move(&self, from: Square, to: Square) -> bool {
        self.valid_move_squares(from).contains(to)
    }

    /// Squares the side to move may move a piece from.
    #[must_use]
    pub fn movable_origins(&self) -> SquareSet {
        legality::movable_origins(self.board(), self.history(), self.side_to_move())
    }

    #[must_use]
    pub fn status(&self) -> CheckersStatus {
        let side = self.side_to_move();
        self.statuses
            .get_or_compute(side, || legality::status(self.board(), self.history(), side))
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.status()
            .winner(self.side_to_move())
            .map(GameResult::Winner)
    }

    /// Move the piece on `from` to `to`.
    #[instrument(skip(self), fields(side = %self.side_to_move()))]
    pub fn play(&mut self, from: Square, to: Square) -> Result<PlayOutcome, MoveError> {
        if self.status().is_terminal() {
            return Err(MoveError::GameOver);
        }
        if let Some(square) = self.continuing().filter(|s| *s != from) {
            return Err(MoveError::MustContinue(square));
        }
        let mv = legality::legal_moves_from(self.board(), self.history(), self.side_to_move(), from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(MoveError::Illegal { from, to })?;

        self.timeline.push(&self.rules, mv)?;
        self.invalidate();
        debug!(piece = %mv.piece.id, capture = mv.is_capture(), kinged = mv.kinged, "move recorded");

        let Some(continuation) = self.rules.pending_auxiliary(self.board(), self.history()) else {
            return Ok(PlayOutcome::TurnPassed);
        };
        self.timeline.push(&self.rules, continuation)?;
        self.invalidate();
        debug!(%to, "capture continues");
        Ok(PlayOutcome::Continuing(to))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.timeline.is_empty()
    }

    /// Take back the last turn. Returns the removed entries, oldest first;
    /// empty when there is nothing to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Vec<CheckersMove> {
        let mut removed = Vec::new();
        while let Some(mv) = self.timeline.pop() {
            removed.push(mv);
            let chained = mv.skip || self.history().last().is_some_and(|prev| prev.skip);
            if !chained {
                break;
            }
        }
        if !removed.is_empty() {
            self.invalidate();
            debug!(entries = removed.len(), "turn undone");
        }
        removed.reverse();
        removed
    }

    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.timeline.clear();
        self.invalidate();
        debug!("game reset");
    }

    fn invalidate(&self) {
        self.destinations.clear();
        self.statuses.clear();
    }
}
