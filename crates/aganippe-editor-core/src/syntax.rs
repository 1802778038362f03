//! Conditional visibility of markdown syntax.
//!
//! Markup characters (like `**`, `#`, `` ` ``) are folded away unless the
//! cursor is editing inside the span they delimit (Obsidian-style editing).

use std::ops::Range;

use crate::token::Token;
use crate::types::{Block, Cursor};

/// Display state of a markup fragment.
///
/// This is the semantic decision only. `ClassNames::class_for` maps it to
/// the presentation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Cursor is inside the span, markers are shown (grayed).
    Revealed,
    /// Markers are folded out of view.
    Hidden,
    /// The markup is invalid, e.g. an unknown emoji name.
    Warning,
}

/// Half-open interval overlap: `a.start < b.end && b.start < a.end`.
///
/// Touching intervals (`a.end == b.start`) do not overlap.
pub fn ranges_conflict(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Check whether the cursor overlaps `token` inside `block`.
///
/// Always false when the cursor is absent, has no range, or sits in another block.
pub fn is_conflicted(block: &Block, token: &Token, cursor: Option<&Cursor>) -> bool {
    let Some(cursor) = cursor else {
        return false;
    };
    if !cursor.is_in(&block.key) {
        return false;
    }
    match cursor.selection() {
        Some(range) => ranges_conflict(&token.range, &range),
        None => false,
    }
}

/// Decide how a token's markers are displayed.
///
/// An inherited visibility from an enclosing emphasis/strong wins outright,
/// so nested markers follow their parent instead of being evaluated alone.
pub fn resolve_visibility(
    outer: Option<Visibility>,
    block: &Block,
    token: &Token,
    cursor: Option<&Cursor>,
) -> Visibility {
    if let Some(outer) = outer {
        return outer;
    }
    if is_conflicted(block, token, cursor) {
        Visibility::Revealed
    } else {
        Visibility::Hidden
    }
}
