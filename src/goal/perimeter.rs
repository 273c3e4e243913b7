//! Border scoring.

use crate::board::{Color, Grid};

/// Counts target cells on the border once each, plus one more for each of
/// the four corner positions holding the target.
///
/// On a 1x1 grid the single cell is one border cell and all four corners.
pub fn perimeter_score(grid: &Grid, target: Color) -> u32 {
    let n = grid.side();
    if n == 0 {
        return 0;
    }
    let last = n - 1;
    let hit = |row: usize, col: usize| u32::from(grid.get(row, col) == target);

    let mut score = 0;
    for i in 0..n {
        score += hit(0, i);
        if last > 0 {
            score += hit(last, i);
        }
    }
    for i in 1..last {
        score += hit(i, 0) + hit(i, last);
    }

    score + hit(0, 0) + hit(0, last) + hit(last, 0) + hit(last, last)
}
