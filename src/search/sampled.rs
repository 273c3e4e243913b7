//! Single-action sampled search.
//!
//! Each trial clones the live board, picks a random node and a random tree
//! action, applies it to the clone, and scores the result. The best trial
//! is returned. Trials whose node is missing or whose action is invalid on
//! that node are skipped.

use rand::Rng;

use super::{improves, sample_point, Move};
use crate::board::{Action, BoardNode};
use crate::goal::Goal;

pub fn sampled_search(
    board: &BoardNode,
    goal: &Goal,
    trials: usize,
    rng: &mut impl Rng,
) -> Option<Move> {
    let mut best: Option<Move> = None;

    for _ in 0..trials {
        let mut trial = board.clone();
        let (x, y, level) = sample_point(board, rng);
        if trial.locate(x, y, level).is_none() {
            continue;
        }
        let action = Action::random(rng);
        if !action.apply(trial.locate_mut(x, y, level), rng) {
            continue;
        }
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

    if let Some(m) = &best {
        log::debug!(
            "sampled search: {} at ({}, {}) level {} scores {:?}",
            m.action,
            m.x,
            m.y,
            m.level,
            m.score
        );
    }
    best
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
    fn reported_score_is_the_best_trial() {
        let (board, goal) = unsmash_wins();
        let mut rng = SmallRng::seed_from_u64(12);
        let m = sampled_search(&board, &goal, 200, &mut rng).unwrap();
        // 200 trials reach the root unsmash with near certainty.
        assert_eq!(m.action, Action::Unsmash);
        assert_eq!(m.level, 0);
        assert_eq!(m.score, Some(4));
    }

    #[test]
    fn committed_move_reproduces_score() {
        let (mut board, goal) = unsmash_wins();
        let mut rng = SmallRng::seed_from_u64(13);
        let m = sampled_search(&board, &goal, 50, &mut rng).unwrap();
        if m.action != Action::Smash {
            assert!(m.apply(&mut board, &mut rng));
            assert_eq!(Some(goal.score_board(&board)), m.score);
        }
    }

    #[test]
    fn no_valid_trial_means_no_move() {
        let board = BoardNode::new_root(64, 0, Color::RealRed);
        let goal = Goal::new(GoalKind::Blob, Color::RealRed);
        let mut rng = SmallRng::seed_from_u64(14);
        assert_eq!(sampled_search(&board, &goal, 12, &mut rng), None);
    }
}
