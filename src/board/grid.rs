//! Flattened unit-cell grid.
//!
//! The renderer and the goal scorers both consume this form. Storage is
//! row-major: `get(row, col)` reads `cells[row * side + col]`.

use super::color::Color;

/// A square grid of unit-cell colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Creates a grid with every cell set to `fill`.
    pub fn filled(side: usize, fill: Color) -> Self {
        Grid {
            side,
            cells: vec![fill; side * side],
        }
    }

    /// Builds a grid from explicit rows. Returns `None` unless the rows form a square.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Option<Self> {
        let side = rows.len();
        if rows.iter().any(|r| r.len() != side) {
            return None;
        }
        Some(Grid {
            side,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Color {
        self.cells[row * self.side + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        self.cells[row * self.side + col] = color;
    }

    /// Fills the square of side `size` whose top-left cell is (`row`, `col`).
    pub fn fill_square(&mut self, row: usize, col: usize, size: usize, color: Color) {
        for r in row..row + size {
            let start = r * self.side + col;
            self.cells[start..start + size].fill(color);
        }
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.side.max(1))
    }

    /// Renders each row as a string of color codes.
    pub fn render_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.code()).collect())
            .collect()
    }

    /// Counts cells of the given color.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }
}
