//! Blocky engine library.
//!
//! Exposes the board tree, goals, move search, turn orchestration, and
//! protocol modules for use by integration tests and the binary entry points.

pub mod board;
pub mod engine;
pub mod game;
pub mod goal;
pub mod player;
pub mod protocol;
pub mod search;
pub mod selfplay;
