//! Compact text notation for board trees.
//!
//! A leaf is written as its color code (`p r o d g`). A split node is
//! written as `(` followed by its four children in UR, UL, LL, LR order and
//! a closing `)`. The root's size and maximum depth travel separately.
//!
//! Example: `(rp(prod)d)` is a root whose lower-left child is split again.

use crate::board::{BoardNode, Color, Content, ALL_QUADRANTS};

/// Errors that can occur while parsing board notation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty board notation")]
    Empty,

    #[error("invalid color code '{0}' at position {1}")]
    InvalidColor(char, usize),

    #[error("unexpected end of notation, expected {0} more child(ren)")]
    Truncated(usize),

    #[error("expected ')' at position {0}")]
    MissingClose(usize),

    #[error("split at position {pos} exceeds max depth {max_depth}")]
    TooDeep { pos: usize, max_depth: u8 },

    #[error("trailing characters after position {0}")]
    Trailing(usize),

    #[error("board size {size} is not divisible by 2^{max_depth}")]
    BadSize { size: u32, max_depth: u8 },
}

/// Encodes a board tree into notation.
pub fn encode(node: &BoardNode) -> String {
    let mut out = String::with_capacity(node.leaf_count() * 2);
    encode_into(node, &mut out);
    out
}

fn encode_into(node: &BoardNode, out: &mut String) {
    match node.content() {
        Content::Leaf(color) => out.push(color.code()),
        Content::Split(children) => {
            out.push('(');
            for child in children.iter() {
                encode_into(child, out);
            }
            out.push(')');
        }
    }
}

/// Parses notation into a root of side `size` at the origin.
pub fn parse(text: &str, size: u32, max_depth: u8) -> Result<BoardNode, NotationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NotationError::Empty);
    }
    if max_depth >= 32 || size == 0 || size % (1u32 << max_depth) != 0 {
        return Err(NotationError::BadSize { size, max_depth });
    }

    let chars: Vec<char> = text.chars().collect();
    let mut root = BoardNode::new_root(size, max_depth, Color::Gray);
    let mut pos = 0;
    parse_into(&chars, &mut pos, &mut root)?;
    if pos != chars.len() {
        return Err(NotationError::Trailing(pos));
    }
    Ok(root)
}

fn parse_into(chars: &[char], pos: &mut usize, node: &mut BoardNode) -> Result<(), NotationError> {
    let Some(&c) = chars.get(*pos) else {
        return Err(NotationError::Truncated(1));
    };
    *pos += 1;

    if c != '(' {
        let color = Color::from_code(c).ok_or(NotationError::InvalidColor(c, *pos - 1))?;
        node.set_color(color);
        return Ok(());
    }

    if !node.subdivide_with([Color::Gray; 4]) {
        return Err(NotationError::TooDeep {
            pos: *pos - 1,
            max_depth: node.max_depth(),
        });
    }
    for (i, q) in ALL_QUADRANTS.into_iter().enumerate() {
        if *pos >= chars.len() {
            return Err(NotationError::Truncated(4 - i));
        }
        if let Some(child) = node.child_mut(q) {
            parse_into(chars, pos, child)?;
        }
    }
    match chars.get(*pos) {
        Some(')') => {
            *pos += 1;
            Ok(())
        }
        _ => Err(NotationError::MissingClose(*pos)),
    }
}
