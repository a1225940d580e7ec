//! Checkers (English draughts).
//!
//! Men move and capture diagonally forward, kings in every diagonal direction.
//! Captures are mandatory and chain: a piece that can keep jumping must.

pub mod legality;
pub mod replay;
pub mod rules;
pub mod session;
pub mod types;

pub use rules::CheckersRules;
pub use session::{CheckersSession, PlayOutcome, SavedCheckers};
pub use types::{CheckersMove, CheckersPiece, CheckersStatus};
