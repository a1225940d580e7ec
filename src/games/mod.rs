//! Game implementations.
//!
//! Each game is self-contained: pieces and moves, the replay step, legality,
//! a `Rules` implementation and a session controller.

pub mod checkers;
pub mod chess;
pub mod reversi;
