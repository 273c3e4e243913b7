//! Quadtree board nodes.
//!
//! A node is a square region of the board. A leaf holds a single color; an
//! internal node owns exactly four children stored in quadrant order
//! (upper-right, upper-left, lower-left, lower-right). Holding the color and
//! the children in one enum keeps "color iff leaf" true by construction.
//!
//! Structural operations report failure with `false` and leave the node
//! untouched. Swap and rotate reassign which subtree sits in which slot and
//! then re-derive every descendant's stored geometry through `relocate`.

use rand::Rng;

use super::color::Color;
use super::grid::Grid;
use super::quadrant::{Quadrant, ALL_QUADRANTS};

/// Contents of a node: a color or four owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Leaf(Color),
    Split(Box<[BoardNode; 4]>),
}

/// A square region of the board.
///
/// Cloning deep-copies the whole subtree; a clone shares no node with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardNode {
    x: u32,
    y: u32,
    size: u32,
    level: u8,
    max_depth: u8,
    content: Content,
}

impl BoardNode {
    /// Creates an unsubdivided root at the origin.
    pub fn new_root(size: u32, max_depth: u8, color: Color) -> Self {
        BoardNode {
            x: 0,
            y: 0,
            size,
            level: 0,
            max_depth,
            content: Content::Leaf(color),
        }
    }

    /// Creates a root with a random palette color.
    pub fn random_root(size: u32, max_depth: u8, rng: &mut impl Rng) -> Self {
        Self::new_root(size, max_depth, Color::random(rng))
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[inline]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, Content::Leaf(_))
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.is_leaf()
    }

    /// The node's color, present iff it is a leaf.
    pub fn color(&self) -> Option<Color> {
        match self.content {
            Content::Leaf(c) => Some(c),
            Content::Split(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[BoardNode; 4]> {
        match &self.content {
            Content::Leaf(_) => None,
            Content::Split(children) => Some(children),
        }
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&BoardNode> {
        self.children().map(|c| &c[quadrant.index()])
    }

    pub fn child_mut(&mut self, quadrant: Quadrant) -> Option<&mut BoardNode> {
        match &mut self.content {
            Content::Leaf(_) => None,
            Content::Split(children) => Some(&mut children[quadrant.index()]),
        }
    }

    /// Recolors a leaf. Returns false on an internal node.
    pub fn set_color(&mut self, color: Color) -> bool {
        match &mut self.content {
            Content::Leaf(c) => {
                *c = color;
                true
            }
            Content::Split(_) => false,
        }
    }

    /// Returns true if (`x`, `y`) lies inside this node's half-open region.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.size
            && (y - self.y) < self.size
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.content {
            Content::Leaf(_) => 1,
            Content::Split(children) => children.iter().map(|c| c.leaf_count()).sum(),
        }
    }

    /// Deepest level reached anywhere in this subtree.
    pub fn depth(&self) -> u8 {
        match &self.content {
            Content::Leaf(_) => self.level,
            Content::Split(children) => children
                .iter()
                .map(|c| c.depth())
                .max()
                .unwrap_or(self.level),
        }
    }

    /// Splits a leaf into four children with random palette colors.
    ///
    /// Fails if the node already has children or sits at the maximum depth.
    pub fn subdivide(&mut self, rng: &mut impl Rng) -> bool {
        if !self.can_subdivide() {
            return false;
        }
        let colors = [
            Color::random(rng),
            Color::random(rng),
            Color::random(rng),
            Color::random(rng),
        ];
        self.subdivide_with(colors)
    }

    /// Splits a leaf into four children with the given colors, in quadrant order.
    pub fn subdivide_with(&mut self, colors: [Color; 4]) -> bool {
        if !self.can_subdivide() {
            return false;
        }
        let half = self.size / 2;
        let children = ALL_QUADRANTS.map(|q| {
            let (dx, dy) = q.offset();
            BoardNode {
                x: self.x + dx * half,
                y: self.y + dy * half,
                size: half,
                level: self.level + 1,
                max_depth: self.max_depth,
                content: Content::Leaf(colors[q.index()]),
            }
        });
        self.content = Content::Split(Box::new(children));
        true
    }

    fn can_subdivide(&self) -> bool {
        self.is_leaf() && self.level < self.max_depth
    }

    /// Collapses an internal node into a leaf colored by the majority of its
    /// direct leaf children. Deeper descendants are discarded unseen.
    ///
    /// Ties go to the color encountered first in quadrant order. If no direct
    /// child is a leaf the node becomes gray.
    pub fn merge(&mut self) -> bool {
        let color = match &self.content {
            Content::Leaf(_) => return false,
            Content::Split(children) => majority_leaf_color(children.as_slice()),
        };
        self.content = Content::Leaf(color);
        true
    }

    /// Mirrors the four direct children across an axis.
    ///
    /// Vertical exchanges upper and lower rows; horizontal exchanges left and
    /// right columns. Grandchildren keep their own arrangement.
    pub fn swap(&mut self, vertical: bool) -> bool {
        let Content::Split(children) = &mut self.content else {
            return false;
        };
        let ur = Quadrant::UpperRight.index();
        let ul = Quadrant::UpperLeft.index();
        let ll = Quadrant::LowerLeft.index();
        let lr = Quadrant::LowerRight.index();
        if vertical {
            children.swap(ur, lr);
            children.swap(ul, ll);
        } else {
            children.swap(ur, ul);
            children.swap(ll, lr);
        }
        self.relocate();
        true
    }

    /// Rotates this node and every descendant a quarter turn.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.rotate_slots(clockwise) {
            return false;
        }
        self.relocate();
        true
    }

    /// Descendants first, then this level's slots.
    fn rotate_slots(&mut self, clockwise: bool) -> bool {
        let Content::Split(children) = &mut self.content else {
            return false;
        };
        for child in children.iter_mut() {
            child.rotate_slots(clockwise);
        }
        // Slots are [UR, UL, LL, LR]. Clockwise moves UL->UR, LL->UL, LR->LL, UR->LR.
        if clockwise {
            children.rotate_left(1);
        } else {
            children.rotate_right(1);
        }
        true
    }

    /// Recomputes position, size, and level of every descendant from this
    /// node's own geometry.
    pub fn relocate(&mut self) {
        let (x, y, size, level, max_depth) = (self.x, self.y, self.size, self.level, self.max_depth);
        let Content::Split(children) = &mut self.content else {
            return;
        };
        let half = size / 2;
        for (q, child) in ALL_QUADRANTS.iter().zip(children.iter_mut()) {
            let (dx, dy) = q.offset();
            child.x = x + dx * half;
            child.y = y + dy * half;
            child.size = half;
            child.level = level + 1;
            child.max_depth = max_depth;
            child.relocate();
        }
    }

    /// Returns the node at exactly `level` whose region contains (`x`, `y`).
    ///
    /// Returns `None` when the point is outside this node, or when a leaf is
    /// reached above the requested level.
    pub fn locate(&self, x: u32, y: u32, level: u8) -> Option<&BoardNode> {
        if !self.contains(x, y) || level < self.level {
            return None;
        }
        if self.level == level {
            return Some(self);
        }
        self.children()?
            .iter()
            .find(|c| c.contains(x, y))
            .and_then(|c| c.locate(x, y, level))
    }

    /// Mutable counterpart of [`BoardNode::locate`].
    pub fn locate_mut(&mut self, x: u32, y: u32, level: u8) -> Option<&mut BoardNode> {
        if !self.contains(x, y) || level < self.level {
            return None;
        }
        if self.level == level {
            return Some(self);
        }
        match &mut self.content {
            Content::Leaf(_) => None,
            Content::Split(children) => children
                .iter_mut()
                .find(|c| c.contains(x, y))
                .and_then(|c| c.locate_mut(x, y, level)),
        }
    }

    /// Side length of this node's flattened grid, in unit cells.
    pub fn grid_side(&self) -> usize {
        1usize << (self.max_depth - self.level)
    }

    /// Renders this subtree into a grid of `2^(max_depth - level)` unit cells a side.
    pub fn flatten(&self) -> Grid {
        let side = self.grid_side();
        let mut grid = Grid::filled(side, Color::Gray);
        self.fill(&mut grid, 0, 0, side);
        grid
    }

    fn fill(&self, grid: &mut Grid, row: usize, col: usize, side: usize) {
        match &self.content {
            Content::Leaf(color) => grid.fill_square(row, col, side, *color),
            Content::Split(children) => {
                let half = side / 2;
                for (q, child) in ALL_QUADRANTS.iter().zip(children.iter()) {
                    let (dx, dy) = q.offset();
                    child.fill(grid, row + dy as usize * half, col + dx as usize * half, half);
                }
            }
        }
    }
}

/// Majority color among the leaf nodes in `children`, first-seen on ties.
fn majority_leaf_color(children: &[BoardNode]) -> Color {
    let mut counts: Vec<(Color, usize)> = Vec::with_capacity(children.len());
    for color in children.iter().filter_map(|c| c.color()) {
        match counts.iter_mut().find(|(c, _)| *c == color) {
            Some((_, n)) => *n += 1,
            None => counts.push((color, 1)),
        }
    }
    let mut best: Option<(Color, usize)> = None;
    for (color, n) in counts {
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((color, n));
        }
    }
    best.map_or(Color::Gray, |(c, _)| c)
}
