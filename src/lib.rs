//! # tabletop-rules
//!
//! Rule engines for Chess, Checkers and Reversi built on event sourcing.
//!
//! ## Design Principles
//!
//! 1. **History Is the State**: A game's board is never edited directly. It is
//!    derived by replaying an ordered move history onto a fixed starting
//!    arrangement, so undo is truncation and saving a game means saving its
//!    moves.
//!
//! 2. **Stable Identity**: Every piece carries a `PieceId` that survives moves,
//!    recoloring and crowning, and is never reused after capture.
//!
//! 3. **Queries Never Fail**: Asking whether a move is legal answers `false`
//!    for empty origins, friendly destinations and off-board squares. Errors
//!    are reserved for refused moves and corrupted histories.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Boards and histories use `im`, so the
//!   board after every history prefix is kept and legality probing clones
//!   boards in O(1).
//!
//! - **One Trait, No Dispatch**: Each game implements `Rules` in its own
//!   module. Sessions are concrete per game.
//!
//! ## Modules
//!
//! - `core`: Squares, sides, piece ids, boards, history, config, persistence
//! - `rules`: The `Rules` trait and `Timeline`
//! - `games`: Chess, checkers and reversi
//!
//! ## Example
//!
//! ```
//! use tabletop_rules::games::reversi::{PlayOutcome, ReversiSession};
//! use tabletop_rules::Side;
//!
//! let mut session = ReversiSession::new();
//! let d6 = "d6".parse().unwrap();
//! assert_eq!(session.place(d6).unwrap(), PlayOutcome::Placed);
//! assert_eq!(session.side_to_move(), Side::Dark);
//! assert_eq!(session.score()[Side::Light], 4);
//! ```

pub mod core;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Square, SquareSet, Delta, Side, SideMap,
    PieceId, Board, Piece, History,
    SessionConfig, SavedGame,
    CodecError, MoveError, ReplayError, SquareParseError,
};

pub use crate::rules::{GameResult, GameStatus, Rules, Timeline};

pub use crate::games::chess::{ChessRules, ChessSession};
pub use crate::games::checkers::{CheckersRules, CheckersSession};
pub use crate::games::reversi::{ReversiRules, ReversiSession};
