//! Core engine types: geometry, sides, piece identity, boards, history,
//! configuration, persistence and errors.
//!
//! Everything here is game-agnostic. The three games build their pieces,
//! moves and rules on top of these types.

pub mod geometry;
pub mod side;
pub mod entity;
pub mod board;
pub mod history;
pub mod cache;
pub mod config;
pub mod codec;
pub mod error;

pub use geometry::{Delta, Ray, Square, SquareSet, BOARD_SIZE, SQUARE_COUNT};
pub use side::{Side, SideMap};
pub use entity::{IdAllocator, PieceId};
pub use board::{Board, Piece};
pub use history::History;
pub use cache::MemoCache;
pub use config::SessionConfig;
pub use codec::SavedGame;
pub use error::{CodecError, MoveError, ReplayError, SquareParseError};
