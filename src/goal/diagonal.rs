//! Diagonal scoring.

use crate::board::{Color, Grid};

/// Counts target cells on the main diagonal and on the anti-diagonal.
/// The center of an odd-sized grid lies on both and counts twice.
pub fn diagonal_score(grid: &Grid, target: Color) -> u32 {
    let n = grid.side();
    (0..n)
        .map(|i| u32::from(grid.get(i, i) == target) + u32::from(grid.get(i, n - 1 - i) == target))
        .sum()
}
