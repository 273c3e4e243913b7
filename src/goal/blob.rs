//! Connected-region scoring.
//!
//! Runs a depth-first flood fill from every unvisited target cell and keeps
//! the largest component. Each cell is visited at most once per pass.

use crate::board::{Color, Grid};

/// Size of the largest 4-connected group of `target` cells.
pub fn blob_score(grid: &Grid, target: Color) -> u32 {
    let n = grid.side();
    let mut visited = vec![false; n * n];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut best = 0u32;

    for row in 0..n {
        for col in 0..n {
            if visited[row * n + col] || grid.get(row, col) != target {
                continue;
            }
            visited[row * n + col] = true;
            stack.push((row, col));
            let mut size = 0u32;

            while let Some((r, c)) = stack.pop() {
                size += 1;
                let neighbors = [
                    (r.wrapping_sub(1), c),
                    (r + 1, c),
                    (r, c.wrapping_sub(1)),
                    (r, c + 1),
                ];
                for (nr, nc) in neighbors {
                    if nr >= n || nc >= n {
                        continue;
                    }
                    let idx = nr * n + nc;
                    if !visited[idx] && grid.get(nr, nc) == target {
                        visited[idx] = true;
                        stack.push((nr, nc));
                    }
                }
            }

            best = best.max(size);
        }
    }

    best
}
