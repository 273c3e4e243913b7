//! Board representation.
//!
//! Contains the quadtree node, its colors and quadrant slots, the flattened
//! unit-cell grid, and the action set that transforms the tree.

pub mod action;
pub mod color;
pub mod grid;
pub mod node;
pub mod quadrant;

pub use action::{Action, ActionParseError};
pub use color::{Color, PALETTE};
pub use grid::Grid;
pub use node::{BoardNode, Content};
pub use quadrant::{Quadrant, ALL_QUADRANTS};
