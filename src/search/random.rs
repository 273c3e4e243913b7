//! Uniform-random strategy.

use rand::Rng;

use super::{sample_point, Move};
use crate::board::{Action, BoardNode};

/// Samples points until one resolves to a node, then pairs it with a random
/// tree action. No trial is run and nothing is scored.
pub fn random_move(board: &BoardNode, attempts: usize, rng: &mut impl Rng) -> Option<Move> {
    for _ in 0..attempts {
        let (x, y, level) = sample_point(board, rng);
        if board.locate(x, y, level).is_some() {
            return Some(Move {
                x,
                y,
                level,
                action: Action::random(rng),
                score: None,
            });
        }
    }
    None
}
