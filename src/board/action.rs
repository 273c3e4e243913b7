//! Board actions.
//!
//! Every action except `Undo` maps onto one tree operation. `Undo` rewinds
//! the turn history and is handled by the game, never by the tree.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use super::node::BoardNode;

/// A named board transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    Smash,
    Unsmash,
    SwapVertical,
    SwapHorizontal,
    RotateClockwise,
    RotateCounterclockwise,
    Undo,
}

/// Error returned when an action name is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown action '{0}'")]
pub struct ActionParseError(pub String);

impl Action {
    /// Every action, including `Undo`.
    pub const ALL: [Action; 7] = [
        Action::Smash,
        Action::Unsmash,
        Action::SwapVertical,
        Action::SwapHorizontal,
        Action::RotateClockwise,
        Action::RotateCounterclockwise,
        Action::Undo,
    ];

    /// The actions that transform the tree. Search strategies choose from these.
    pub const TREE_ACTIONS: [Action; 6] = [
        Action::Smash,
        Action::Unsmash,
        Action::SwapVertical,
        Action::SwapHorizontal,
        Action::RotateClockwise,
        Action::RotateCounterclockwise,
    ];

    /// Returns the protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Action::Smash => "smash",
            Action::Unsmash => "unsmash",
            Action::SwapVertical => "swapv",
            Action::SwapHorizontal => "swaph",
            Action::RotateClockwise => "rotcw",
            Action::RotateCounterclockwise => "rotccw",
            Action::Undo => "undo",
        }
    }

    /// Picks a uniformly random tree action.
    pub fn random(rng: &mut impl Rng) -> Action {
        Self::TREE_ACTIONS[rng.gen_range(0..Self::TREE_ACTIONS.len())]
    }

    /// Applies this action to `target`. An absent target, or `Undo`, reports failure.
    ///
    /// Geometry is re-derived for the whole target subtree on success.
    pub fn apply(self, target: Option<&mut BoardNode>, rng: &mut impl Rng) -> bool {
        let Some(node) = target else {
            return false;
        };
        let applied = match self {
            Action::Smash => node.subdivide(rng),
            Action::Unsmash => node.merge(),
            Action::SwapVertical => node.swap(true),
            Action::SwapHorizontal => node.swap(false),
            Action::RotateClockwise => node.rotate(true),
            Action::RotateCounterclockwise => node.rotate(false),
            Action::Undo => false,
        };
        if applied {
            node.relocate();
        }
        applied
    }

    /// The action that exactly reverses this one, if any.
    ///
    /// Smash and Unsmash lose information and have no inverse.
    pub const fn inverse(self) -> Option<Action> {
        match self {
            Action::SwapVertical => Some(Action::SwapVertical),
            Action::SwapHorizontal => Some(Action::SwapHorizontal),
            Action::RotateClockwise => Some(Action::RotateCounterclockwise),
            Action::RotateCounterclockwise => Some(Action::RotateClockwise),
            Action::Smash | Action::Unsmash | Action::Undo => None,
        }
    }

    /// Applies the inverse of this action. Fails when no inverse exists.
    pub fn apply_inverse(self, target: Option<&mut BoardNode>, rng: &mut impl Rng) -> bool {
        match self.inverse() {
            Some(inverse) => inverse.apply(target, rng),
            None => false,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| ActionParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::color::Color;
    use crate::board::node::tests::{assert_invariants, known_board};
    use crate::board::quadrant::Quadrant;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn name_roundtrip() {
        for a in Action::ALL {
            assert_eq!(a.name().parse::<Action>(), Ok(a));
        }
        assert_eq!(
            "flip".parse::<Action>(),
            Err(ActionParseError("flip".to_string()))
        );
    }

    #[test]
    fn absent_target_fails() {
        let mut rng = SmallRng::seed_from_u64(0);
        for a in Action::ALL {
            assert!(!a.apply(None, &mut rng));
        }
    }

    #[test]
    fn undo_is_not_a_tree_operation() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut board = known_board();
        let before = board.clone();
        assert!(!Action::Undo.apply(Some(&mut board), &mut rng));
        assert_eq!(board, before);
        assert!(!Action::TREE_ACTIONS.contains(&Action::Undo));
    }

    #[test]
    fn apply_dispatches_to_tree() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut board = known_board();
        assert!(Action::SwapVertical.apply(Some(&mut board), &mut rng));
        assert_eq!(
            board.child(Quadrant::UpperRight).unwrap().color(),
            Some(Color::DaffodilDelight)
        );
        assert!(Action::Smash.apply(board.locate_mut(10, 10, 1), &mut rng));
        assert!(board.child(Quadrant::UpperLeft).unwrap().has_children());
        assert!(Action::Unsmash.apply(board.locate_mut(10, 10, 1), &mut rng));
        assert!(board.child(Quadrant::UpperLeft).unwrap().is_leaf());
        assert_invariants(&board);
    }

    #[test]
    fn inverses_restore_the_board() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut board = known_board();
        board.child_mut(Quadrant::LowerLeft).unwrap().subdivide(&mut rng);
        for a in [
            Action::SwapVertical,
            Action::SwapHorizontal,
            Action::RotateClockwise,
            Action::RotateCounterclockwise,
        ] {
            let before = board.clone();
            assert!(a.apply(Some(&mut board), &mut rng));
            assert!(a.apply_inverse(Some(&mut board), &mut rng));
            assert_eq!(board, before, "{} then inverse", a);
        }
    }

    #[test]
    fn smash_has_no_inverse() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut board = known_board();
        assert_eq!(Action::Smash.inverse(), None);
        assert_eq!(Action::Unsmash.inverse(), None);
        assert!(!Action::Smash.apply_inverse(Some(&mut board), &mut rng));
    }
}
