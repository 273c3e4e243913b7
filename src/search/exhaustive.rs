//! Exhaustive-action sampled search.
//!
//! For each sampled point that resolves to a node on the live board, every
//! tree action is tried on a fresh clone and scored. The best (point, level,
//! action) across all samples wins. If no trial succeeds at all, a uniform
//! random move is returned instead.

use rand::Rng;

use super::{improves, random_move, sample_point, Move, RANDOM_ATTEMPTS};
use crate::board::{Action, BoardNode};
use crate::goal::Goal;

pub fn exhaustive_search(
    board: &BoardNode,
    goal: &Goal,
    samples: usize,
    rng: &mut impl Rng,
) -> Option<Move> {
    let mut best: Option<Move> = None;
    let mut trials = 0usize;

    for _ in 0..samples {
        let (x, y, level) = sample_point(board, rng);
        if board.locate(x, y, level).is_none() {
            continue;
        }
        for action in Action::TREE_ACTIONS {
            let mut trial = board.clone();
            if !action.apply(trial.locate_mut(x, y, level), rng) {
                continue;
            }
            trials += 1;
            let score = goal.score_board(&trial);
            if improves(&best, score) {
                best = Some(Move {
                    x,
                    y,
                    level,
                    action,
                    score: Some(score),
                });
            }
        }
    }

    match best {
        Some(m) => {
            log::debug!(
                "exhaustive search: {} at ({}, {}) level {} scores {:?} after {} trials",
                m.action,
                m.x,
                m.y,
                m.level,
                m.score,
                trials
            );
            Some(m)
        }
        None => {
            log::debug!("exhaustive search: no trial succeeded, falling back to random");
            random_move(board, RANDOM_ATTEMPTS, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::goal::GoalKind;
    use crate::search::tests::unsmash_wins;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn finds_the_winning_unsmash() {
        let (board, goal) = unsmash_wins();
        let mut rng = SmallRng::seed_from_u64(21);
        let m = exhaustive_search(&board, &goal, 60, &mut rng).unwrap();
        assert_eq!(m.action, Action::Unsmash);
        assert_eq!(m.level, 0);
        assert_eq!(m.score, Some(4));
    }

    #[test]
    fn score_never_below_any_single_trial() {
        let mut rng = SmallRng::seed_from_u64(22);
        let mut board = BoardNode::new_root(128, 3, Color::OldOlive);
        board.subdivide(&mut rng);
        let goal = Goal::new(GoalKind::Perimeter, Color::OldOlive);
        let m = exhaustive_search(&board, &goal, 60, &mut rng).unwrap();
        let best = m.score.unwrap();
        for action in [Action::RotateClockwise, Action::SwapVertical, Action::Unsmash] {
            let mut trial = board.clone();
            assert!(action.apply(Some(&mut trial), &mut rng));
            assert!(goal.score_board(&trial) <= best);
        }
    }

    #[test]
    fn falls_back_to_random_when_nothing_applies() {
        let board = BoardNode::new_root(64, 0, Color::RealRed);
        let goal = Goal::new(GoalKind::Blob, Color::RealRed);
        let mut rng = SmallRng::seed_from_u64(23);
        let m = exhaustive_search(&board, &goal, 60, &mut rng).unwrap();
        assert_eq!(m.score, None);
        assert_eq!(m.level, 0);
    }
}
