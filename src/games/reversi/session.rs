//! Reversi session controller.
//!
//! Players never pass by hand. After a placement, if the opponent has no
//! legal placement while the mover still has placements left under the cap,
//! the session records a skip for the opponent and the mover goes again.
//! `undo` takes back the last placement together with that skip. A game
//! loaded in a position where the side to move cannot place gets its skip
//! recorded on load.

use tracing::{debug, instrument, warn};

use crate::core::{Board, History, MemoCache, MoveError, SavedGame, SessionConfig, Side, SideMap, Square, SquareSet};
use crate::rules::{GameResult, GameStatus, Rules, Timeline};

use super::legality;
use super::rules::ReversiRules;
use super::types::{Disc, ReversiMove, ReversiStatus};

/// A saved reversi game.
pub type SavedReversi = SavedGame<Disc, ReversiMove>;

/// What `place` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The turn passed to the opponent.
    Placed,
    /// The opponent could not place and was skipped; the mover goes again.
    OpponentSkipped,
}

/// One reversi game in progress.
#[derive(Clone, Debug)]
pub struct ReversiSession {
    rules: ReversiRules,
    timeline: Timeline<Disc, ReversiMove>,
    config: SessionConfig,
    placements: MemoCache<Side, SquareSet>,
    statuses: MemoCache<Side, ReversiStatus>,
}

impl Default for ReversiSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReversiSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(ReversiRules::default(), SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_rules(ReversiRules::default(), config)
    }

    /// A new game under `rules`, for a non-default placement cap.
    #[must_use]
    pub fn with_rules(rules: ReversiRules, config: SessionConfig) -> Self {
        Self::from_timeline(rules, Timeline::new(rules.initial_board()), config)
    }

    fn from_timeline(rules: ReversiRules, timeline: Timeline<Disc, ReversiMove>, config: SessionConfig) -> Self {
        Self {
            rules,
            timeline,
            placements: MemoCache::new(config.memoize),
            statuses: MemoCache::new(config.memoize),
            config,
        }
    }

    /// Rebuild a session by replaying a saved game under `rules`.
    ///
    /// If the side to move in the loaded position cannot place while the game
    /// goes on, its skip is recorded straight away.
    pub fn from_saved(saved: &SavedReversi, rules: ReversiRules, config: SessionConfig) -> Result<Self, MoveError> {
        let timeline = Timeline::replay(&rules, saved.initial.clone(), &saved.moves, config.validate_history)
            .map_err(|err| {
                warn!(%err, "saved reversi game failed to replay");
                err
            })?;
        let mut session = Self::from_timeline(rules, timeline, config);
        if !session.status().is_terminal() {
            session.skip_if_stuck()?;
        }
        Ok(session)
    }

    #[must_use]
    pub fn to_saved(&self) -> SavedReversi {
        SavedGame::new(self.timeline.base().clone(), self.timeline.history())
    }

    #[must_use]
    pub fn rules(&self) -> &ReversiRules {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board<Disc> {
        self.timeline.board()
    }

    #[must_use]
    pub fn history(&self) -> &History<ReversiMove> {
        self.timeline.history()
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.rules.side_to_move(self.history())
    }

    /// Squares the side to move may place on.
    #[must_use]
    pub fn valid_placements(&self) -> SquareSet {
        self.valid_placements_for(self.side_to_move())
    }

    /// Squares `side` could place on in the current position.
    #[must_use]
    pub fn valid_placements_for(&self, side: Side) -> SquareSet {
        self.placements.get_or_compute(side, || {
            legality::valid_placements(self.board(), self.history(), side, self.rules.placement_cap())
        })
    }

    #[must_use]
    pub fn can_place(&self, square: Square) -> bool {
        self.valid_placements().contains(square)
    }

    /// Discs `side_to_move` would flank by placing on `square`.
    #[must_use]
    pub fn flanked(&self, square: Square) -> Vec<Square> {
        legality::flanked(self.board(), self.side_to_move(), square).into_vec()
    }

    /// Disc count per side.
    #[must_use]
    pub fn score(&self) -> SideMap<u32> {
        self.board().count()
    }

    #[must_use]
    pub fn status(&self) -> ReversiStatus {
        let side = self.side_to_move();
        self.statuses.get_or_compute(side, || {
            legality::status(self.board(), self.history(), side, self.rules.placement_cap())
        })
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

    /// Place a disc of the side to move on `square`.
    #[instrument(skip(self), fields(side = %self.side_to_move()))]
    pub fn place(&mut self, square: Square) -> Result<PlayOutcome, MoveError> {
        if self.status().is_terminal() {
            return Err(MoveError::GameOver);
        }
        let mover = self.side_to_move();
        let mv = legality::legal_placements(self.board(), self.history(), mover, self.rules.placement_cap())
            .into_iter()
            .find(|mv| mv.square() == Some(square))
            .ok_or(MoveError::IllegalPlacement(square))?;

        self.timeline.push(&self.rules, mv)?;
        self.invalidate();
        debug!(%square, "disc placed");

        if self.skip_if_stuck()? {
            Ok(PlayOutcome::OpponentSkipped)
        } else {
            Ok(PlayOutcome::Placed)
        }
    }

    /// Whether any placement has been recorded.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history().iter().any(|mv| !mv.is_skip())
    }

    /// Take back the last placement and any skip recorded after it. Returns
    /// the removed entries, oldest first.
    ///
    /// A skip recorded on load, before any placement, is never taken back.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Vec<ReversiMove> {
        let mut removed = Vec::new();
        if !self.can_undo() {
            return removed;
        }
        while let Some(mv) = self.timeline.pop() {
            let skip = mv.is_skip();
            removed.push(mv);
            if !skip {
                break;
            }
        }
        if !removed.is_empty() {
            self.invalidate();
            debug!(entries = removed.len(), "placement undone");
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

    // Records the skip owed to the side to move, if any.
    fn skip_if_stuck(&mut self) -> Result<bool, MoveError> {
        let Some(skip) = self.rules.pending_auxiliary(self.board(), self.history()) else {
            return Ok(false);
        };
        let skipped = self.side_to_move();
        self.timeline.push(&self.rules, skip)?;
        self.invalidate();
        debug!(side = %skipped, "side skipped");
        Ok(true)
    }

    fn invalidate(&self) {
        self.placements.clear();
        self.statuses.clear();
    }
}
