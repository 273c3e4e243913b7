//! Child slots of a subdivided node.

/// One of the four fixed child slots. Children are stored in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

/// All quadrants in storage order.
pub const ALL_QUADRANTS: [Quadrant; 4] = [
    Quadrant::UpperRight,
    Quadrant::UpperLeft,
    Quadrant::LowerLeft,
    Quadrant::LowerRight,
];

impl Quadrant {
    /// Index into a node's child array.
    pub const fn index(self) -> usize {
        match self {
            Quadrant::UpperRight => 0,
            Quadrant::UpperLeft => 1,
            Quadrant::LowerLeft => 2,
            Quadrant::LowerRight => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Quadrant> {
        ALL_QUADRANTS.get(index).copied()
    }

    /// Offset of this quadrant's top-left corner from the parent's, in units
    /// of the child's side length.
    pub const fn offset(self) -> (u32, u32) {
        match self {
            Quadrant::UpperRight => (1, 0),
            Quadrant::UpperLeft => (0, 0),
            Quadrant::LowerLeft => (0, 1),
            Quadrant::LowerRight => (1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for q in ALL_QUADRANTS {
            assert_eq!(Quadrant::from_index(q.index()), Some(q));
        }
        assert_eq!(Quadrant::from_index(4), None);
    }

    #[test]
    fn offsets_are_distinct() {
        let mut seen: Vec<(u32, u32)> = ALL_QUADRANTS.iter().map(|q| q.offset()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
