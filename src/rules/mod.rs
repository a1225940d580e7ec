//! Rules trait for game implementations.
//!
//! Games implement `Rules` to define:
//! - Their starting arrangement and replay step
//! - Legal moves for the side to move
//! - Terminal conditions
//!
//! Sessions call into `Rules` but never interpret game-specific concepts
//! directly. A `Timeline` keeps a history together with the boards it derives.

pub mod engine;
pub mod timeline;

pub use engine::{GameResult, GameStatus, Rules};
pub use timeline::Timeline;
