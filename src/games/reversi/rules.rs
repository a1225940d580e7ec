//! `Rules` implementation for reversi.

use serde::{Deserialize, Serialize};

use crate::core::{Board, History, ReplayError};
use crate::rules::Rules;

use super::legality::{self, DEFAULT_PLACEMENT_CAP};
use super::replay;
use super::types::{Disc, ReversiMove, ReversiStatus};

/// Reversi rules with a per-side placement cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversiRules {
    placement_cap: u32,
}

impl Default for ReversiRules {
    fn default() -> Self {
        Self {
            placement_cap: DEFAULT_PLACEMENT_CAP,
        }
    }
}

impl ReversiRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit each side to `cap` placements.
    #[must_use]
    pub fn with_placement_cap(mut self, cap: u32) -> Self {
        self.placement_cap = cap;
        self
    }

    #[must_use]
    pub fn placement_cap(&self) -> u32 {
        self.placement_cap
    }
}

impl Rules for ReversiRules {
    type Piece = Disc;
    type Move = ReversiMove;
    type Status = ReversiStatus;

    fn initial_board(&self) -> Board<Disc> {
        replay::initial_board()
    }

    fn apply_move(&self, board: &mut Board<Disc>, mv: &ReversiMove) -> Result<(), ReplayError> {
        replay::apply_move(board, mv)
    }

    fn legal_moves(&self, board: &Board<Disc>, history: &History<ReversiMove>) -> Vec<ReversiMove> {
        legality::legal_placements(board, history, self.side_to_move(history), self.placement_cap)
    }

    fn status(&self, board: &Board<Disc>, history: &History<ReversiMove>) -> ReversiStatus {
        legality::status(board, history, self.side_to_move(history), self.placement_cap)
    }

    fn is_auxiliary(&self, mv: &ReversiMove) -> bool {
        mv.is_skip()
    }

    fn pending_auxiliary(&self, board: &Board<Disc>, history: &History<ReversiMove>) -> Option<ReversiMove> {
        legality::pending_skip(board, history, self.side_to_move(history), self.placement_cap)
    }
}
