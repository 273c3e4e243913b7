//! Tile colors.
//!
//! The playable palette has four colors. Gray is the neutral color a merge
//! falls back to when no direct child is a leaf; subdivision never produces it.

use rand::Rng;
use serde::Serialize;

/// A unit-cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    PacificPoint,
    RealRed,
    OldOlive,
    DaffodilDelight,
    Gray,
}

/// The playable palette, in goal-assignment order.
pub const PALETTE: [Color; 4] = [
    Color::PacificPoint,
    Color::RealRed,
    Color::OldOlive,
    Color::DaffodilDelight,
];

impl Color {
    /// Returns the single-character code used by the board notation.
    pub const fn code(self) -> char {
        match self {
            Color::PacificPoint => 'p',
            Color::RealRed => 'r',
            Color::OldOlive => 'o',
            Color::DaffodilDelight => 'd',
            Color::Gray => 'g',
        }
    }

    /// Parses a color from its single-character code.
    pub fn from_code(c: char) -> Option<Color> {
        match c {
            'p' => Some(Color::PacificPoint),
            'r' => Some(Color::RealRed),
            'o' => Some(Color::OldOlive),
            'd' => Some(Color::DaffodilDelight),
            'g' => Some(Color::Gray),
            _ => None,
        }
    }

    /// Returns the display name shown next to a player's goal.
    pub const fn name(self) -> &'static str {
        match self {
            Color::PacificPoint => "Pacific Point",
            Color::RealRed => "Real Red",
            Color::OldOlive => "Old Olive",
            Color::DaffodilDelight => "Daffodil Delight",
            Color::Gray => "Gray",
        }
    }

    /// RGB triple for renderers.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::PacificPoint => (1, 128, 181),
            Color::RealRed => (199, 44, 58),
            Color::OldOlive => (138, 151, 71),
            Color::DaffodilDelight => (255, 211, 92),
            Color::Gray => (128, 128, 128),
        }
    }

    /// Picks a uniformly random playable color.
    pub fn random(rng: &mut impl Rng) -> Color {
        PALETTE[rng.gen_range(0..PALETTE.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn code_roundtrip() {
        for c in PALETTE.iter().copied().chain(std::iter::once(Color::Gray)) {
            assert_eq!(Color::from_code(c.code()), Some(c));
        }
        assert_eq!(Color::from_code('x'), None);
    }

    #[test]
    fn random_never_yields_gray() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            assert_ne!(Color::random(&mut rng), Color::Gray);
        }
    }
}
