//! Goal scoring.
//!
//! A goal pairs a target color with a scoring rule over the flattened
//! board. Scores are pure functions of (grid, target).

pub(crate) mod blob;
pub(crate) mod diagonal;
pub(crate) mod perimeter;

use rand::Rng;
use serde::Serialize;

use crate::board::{BoardNode, Color, Grid};

pub use blob::blob_score;
pub use diagonal::diagonal_score;
pub use perimeter::perimeter_score;

/// The scoring rule of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GoalKind {
    /// Largest 4-connected region of the target color.
    Blob,
    /// Target-colored border cells, corners counted twice.
    Perimeter,
    /// Target-colored cells on both diagonals.
    Diagonal,
}

pub const ALL_GOAL_KINDS: [GoalKind; 3] = [GoalKind::Blob, GoalKind::Perimeter, GoalKind::Diagonal];

impl GoalKind {
    pub fn random(rng: &mut impl Rng) -> GoalKind {
        ALL_GOAL_KINDS[rng.gen_range(0..ALL_GOAL_KINDS.len())]
    }

    pub const fn name(self) -> &'static str {
        match self {
            GoalKind::Blob => "Blob Goal",
            GoalKind::Perimeter => "Perimeter Goal",
            GoalKind::Diagonal => "Diagonal Goal",
        }
    }
}

/// A player's objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Goal {
    pub kind: GoalKind,
    pub target: Color,
}

impl Goal {
    pub fn new(kind: GoalKind, target: Color) -> Self {
        Goal { kind, target }
    }

    /// Scores a flattened grid.
    pub fn score(&self, grid: &Grid) -> u32 {
        match self.kind {
            GoalKind::Blob => blob_score(grid, self.target),
            GoalKind::Perimeter => perimeter_score(grid, self.target),
            GoalKind::Diagonal => diagonal_score(grid, self.target),
        }
    }

    /// Flattens `board` and scores it.
    pub fn score_board(&self, board: &BoardNode) -> u32 {
        self.score(&board.flatten())
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Human-readable description naming the target color.
    pub fn description(&self) -> String {
        match self.kind {
            GoalKind::Blob => format!(
                "Blob goal: create the largest connected blob of {}",
                self.target.name()
            ),
            GoalKind::Perimeter => format!(
                "Perimeter goal: put the most {} on the outer edge (corners count twice)",
                self.target.name()
            ),
            GoalKind::Diagonal => format!(
                "Diagonal goal: put the most {} on both diagonals",
                self.target.name()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_board_scores() {
        let grid = Grid::filled(4, Color::RealRed);
        assert_eq!(Goal::new(GoalKind::Blob, Color::RealRed).score(&grid), 16);
        assert_eq!(Goal::new(GoalKind::Perimeter, Color::RealRed).score(&grid), 16);
        assert_eq!(Goal::new(GoalKind::Diagonal, Color::RealRed).score(&grid), 8);
        for kind in ALL_GOAL_KINDS {
            assert_eq!(Goal::new(kind, Color::OldOlive).score(&grid), 0);
        }
    }

    #[test]
    fn score_board_flattens() {
        let board = BoardNode::new_root(64, 2, Color::PacificPoint);
        let goal = Goal::new(GoalKind::Blob, Color::PacificPoint);
        assert_eq!(goal.score_board(&board), 16);
    }

    #[test]
    fn description_names_target() {
        let goal = Goal::new(GoalKind::Diagonal, Color::DaffodilDelight);
        assert!(goal.description().contains("Daffodil Delight"));
        assert_eq!(goal.name(), "Diagonal Goal");
    }
}
