//! Players and their public summaries.

use serde::Serialize;

use crate::board::BoardNode;
use crate::goal::Goal;
use crate::search::Strategy;

/// A seat in the game: a goal and the strategy that picks its moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// 1-based seat number.
    pub id: usize,
    pub name: String,
    pub goal: Goal,
    pub strategy: Strategy,
}

impl Player {
    pub fn new(id: usize, goal: Goal, strategy: Strategy) -> Self {
        Player {
            id,
            name: format!("{} {}", strategy.label(), id),
            goal,
            strategy,
        }
    }

    pub fn score(&self, board: &BoardNode) -> u32 {
        self.goal.score_board(board)
    }
}

/// What the presentation layer shows for each player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub goal: String,
    pub score: u32,
}
