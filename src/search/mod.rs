//! Move search for automated players.
//!
//! Each strategy inspects the live board, runs its trials on private clones,
//! and returns the single move it wants played. None of them mutate the live
//! board; the game commits the chosen move so it can be undone.

pub mod exhaustive;
pub mod random;
pub mod sampled;

use rand::Rng;
use serde::Serialize;

use crate::board::{Action, BoardNode};
use crate::goal::Goal;

pub use exhaustive::exhaustive_search;
pub use random::random_move;
pub use sampled::sampled_search;

/// Point samples tried by the random strategy before giving up.
pub const RANDOM_ATTEMPTS: usize = 30;

/// Trials run by the single-action sampled search.
pub const SAMPLED_TRIALS: usize = 12;

/// Point samples tried by the exhaustive-action search.
pub const EXHAUSTIVE_SAMPLES: usize = 60;

/// A chosen move: the node at (`x`, `y`, `level`) and the action to apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub x: u32,
    pub y: u32,
    pub level: u8,
    pub action: Action,
    /// Goal score of the trial board, when the strategy scored one.
    pub score: Option<u32>,
}

impl Move {
    /// Applies this move to `board`. Fails if the node is gone or the action is invalid there.
    pub fn apply(&self, board: &mut BoardNode, rng: &mut impl Rng) -> bool {
        self.action.apply(board.locate_mut(self.x, self.y, self.level), rng)
    }
}

/// How a player picks moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// Moves arrive from the presentation layer.
    Human,
    /// A random action on a random node.
    Random { attempts: usize },
    /// Best of `trials` random (node, action) trials.
    Sampled { trials: usize },
    /// Every action on each of `samples` random nodes; best overall.
    Exhaustive { samples: usize },
}

impl Strategy {
    pub const fn random() -> Self {
        Strategy::Random { attempts: RANDOM_ATTEMPTS }
    }

    pub const fn sampled() -> Self {
        Strategy::Sampled { trials: SAMPLED_TRIALS }
    }

    pub const fn exhaustive() -> Self {
        Strategy::Exhaustive { samples: EXHAUSTIVE_SAMPLES }
    }

    pub const fn is_automated(&self) -> bool {
        !matches!(self, Strategy::Human)
    }

    /// Short label used in player names.
    pub const fn label(&self) -> &'static str {
        match self {
            Strategy::Human => "Human",
            Strategy::Random { .. } => "Random AI",
            Strategy::Sampled { .. } => "Smart AI",
            Strategy::Exhaustive { .. } => "Exhaustive AI",
        }
    }

    /// Chooses a move for `goal` on `board`. Humans always return `None`.
    pub fn choose(&self, board: &BoardNode, goal: &Goal, rng: &mut impl Rng) -> Option<Move> {
        match *self {
            Strategy::Human => None,
            Strategy::Random { attempts } => random_move(board, attempts, rng),
            Strategy::Sampled { trials } => sampled_search(board, goal, trials, rng),
            Strategy::Exhaustive { samples } => exhaustive_search(board, goal, samples, rng),
        }
    }
}

/// Samples a level in `0..=max_depth` and a point inside `board`, in that order.
pub(crate) fn sample_point(board: &BoardNode, rng: &mut impl Rng) -> (u32, u32, u8) {
    let level = rng.gen_range(0..=board.max_depth());
    let x = rng.gen_range(board.x()..board.x() + board.size());
    let y = rng.gen_range(board.y()..board.y() + board.size());
    (x, y, level)
}

/// True if `score` beats the running best. Earlier moves win ties.
pub(crate) fn improves(best: &Option<Move>, score: u32) -> bool {
    match best.and_then(|m| m.score) {
        Some(s) => score > s,
        None => true,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::board::Color;
    use crate::goal::GoalKind;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Depth-1 board where unsmashing the root is the only way to a 4-cell blob.
    pub(crate) fn unsmash_wins() -> (BoardNode, Goal) {
        let mut board = BoardNode::new_root(64, 1, Color::Gray);
        board.subdivide_with([
            Color::RealRed,
            Color::PacificPoint,
            Color::OldOlive,
            Color::RealRed,
        ]);
        (board, Goal::new(GoalKind::Blob, Color::RealRed))
    }

    #[test]
    fn sample_point_stays_on_board() {
        let mut rng = SmallRng::seed_from_u64(1);
        let board = BoardNode::new_root(48, 3, Color::Gray);
        for _ in 0..200 {
            let (x, y, level) = sample_point(&board, &mut rng);
            assert!(board.contains(x, y));
            assert!(level <= 3);
        }
    }

    #[test]
    fn improves_keeps_first_on_ties() {
        let m = Move {
            x: 0,
            y: 0,
            level: 0,
            action: Action::Smash,
            score: Some(3),
        };
        assert!(improves(&None, 0));
        assert!(!improves(&Some(m), 3));
        assert!(improves(&Some(m), 4));
    }

    #[test]
    fn human_never_chooses() {
        let mut rng = SmallRng::seed_from_u64(2);
        let (board, goal) = unsmash_wins();
        assert_eq!(Strategy::Human.choose(&board, &goal, &mut rng), None);
        assert!(!Strategy::Human.is_automated());
    }

    #[test]
    fn strategies_leave_live_board_untouched() {
        let (board, goal) = unsmash_wins();
        let before = board.clone();
        for strategy in [
            Strategy::random(),
            Strategy::Sampled { trials: 100 },
            Strategy::exhaustive(),
        ] {
            let mut rng = SmallRng::seed_from_u64(3);
            let chosen = strategy.choose(&board, &goal, &mut rng);
            assert!(chosen.is_some(), "{} found no move", strategy.label());
            assert_eq!(board, before);
        }
    }

    #[test]
    fn same_seed_same_move() {
        let (board, goal) = unsmash_wins();
        for strategy in [Strategy::random(), Strategy::sampled(), Strategy::exhaustive()] {
            let a = strategy.choose(&board, &goal, &mut SmallRng::seed_from_u64(17));
            let b = strategy.choose(&board, &goal, &mut SmallRng::seed_from_u64(17));
            assert_eq!(a, b);
        }
    }
}
