//! Text protocol handling.
//!
//! This module implements the line-based command parser driven by the
//! presentation layer, and the compact board notation used to exchange
//! board trees.

pub mod notation;
pub mod parser;

pub use notation::{encode, parse, NotationError};
pub use parser::{parse_command, Command};
