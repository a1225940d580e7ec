//! Reversi.
//!
//! Light moves first from the standard four-disc center. Passing is automatic:
//! a side with no placement is skipped by the session.

pub mod legality;
pub mod replay;
pub mod rules;
pub mod session;
pub mod types;

pub use legality::DEFAULT_PLACEMENT_CAP;
pub use rules::ReversiRules;
pub use session::{PlayOutcome, ReversiSession, SavedReversi};
pub use types::{Disc, Flanked, ReversiMove, ReversiStatus};
