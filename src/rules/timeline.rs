//! History plus the boards it derives.
//!
//! A `Timeline` owns a base arrangement, the move history and one board per
//! history prefix. Each board is produced by the replay step from the one
//! before it, so `board()` always equals `compute_state(history, base)`.
//! Boards are persistent maps, so keeping every prefix costs little and undo
//! becomes plain truncation.

use crate::core::{Board, History, Piece, ReplayError};

use super::engine::Rules;

#[derive(Clone, Debug)]
pub struct Timeline<P: Clone, M: Clone> {
    history: History<M>,
    // snapshots[i] is the board after the first i moves; never empty.
    snapshots: Vec<Board<P>>,
}

impl<P: Piece, M: Clone> Timeline<P, M> {
    /// A timeline with no moves.
    #[must_use]
    pub fn new(base: Board<P>) -> Self {
        Self {
            history: History::new(),
            snapshots: vec![base],
        }
    }

    /// Replay `moves` from `base`.
    ///
    /// With `validate`, every player move must also have been legal when it
    /// was made, and every auxiliary entry must be the one the rules call for
    /// at that point.
    pub fn replay<R>(rules: &R, base: Board<P>, moves: &[M], validate: bool) -> Result<Self, ReplayError>
    where
        R: Rules<Piece = P, Move = M>,
        M: PartialEq + std::fmt::Debug,
    {
        let mut timeline = Self::new(base);
        for (index, mv) in moves.iter().enumerate() {
            if validate && !timeline.accepts(rules, mv) {
                return Err(ReplayError::IllegalMove { index });
            }
            timeline.push(rules, mv.clone())?;
        }
        Ok(timeline)
    }

    fn accepts<R>(&self, rules: &R, mv: &M) -> bool
    where
        R: Rules<Piece = P, Move = M>,
        M: PartialEq + std::fmt::Debug,
    {
        if rules.is_auxiliary(mv) {
            rules.pending_auxiliary(self.board(), &self.history).as_ref() == Some(mv)
        } else {
            rules.legal_moves(self.board(), &self.history).contains(mv)
        }
    }

    /// The starting arrangement.
    #[must_use]
    pub fn base(&self) -> &Board<P> {
        &self.snapshots[0]
    }

    /// The board after every recorded move.
    #[must_use]
    pub fn board(&self) -> &Board<P> {
        &self.snapshots[self.snapshots.len() - 1]
    }

    #[must_use]
    pub fn history(&self) -> &History<M> {
        &self.history
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Apply `mv` and record it. On error nothing changes.
    pub fn push<R>(&mut self, rules: &R, mv: M) -> Result<(), ReplayError>
    where
        R: Rules<Piece = P, Move = M>,
    {
        let mut next = self.board().clone();
        rules.apply_move(&mut next, &mv)?;
        self.history.push(mv);
        self.snapshots.push(next);
        Ok(())
    }

    /// Drop the last move.
    pub fn pop(&mut self) -> Option<M> {
        let mv = self.history.pop()?;
        self.snapshots.pop();
        Some(mv)
    }

    /// Drop every move.
    pub fn clear(&mut self) {
        self.history.clear();
        self.snapshots.truncate(1);
    }
}
