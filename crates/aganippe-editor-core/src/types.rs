//! Core document types: blocks and the cursor.
//!
//! Both are owned by the editor and handed to the renderer on every pass.
//! The renderer only ever borrows them.

use std::ops::Range;

use smol_str::SmolStr;

/// Structural kind of a block. Determines the element tag it renders to.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    #[default]
    Paragraph,
    /// Heading level, clamped to 1..=6 when rendered.
    Heading(u8),
    BlockQuote,
    OrderedList,
    UnorderedList,
    ListItem,
    CodeBlock,
    /// Generic container with no markdown meaning of its own.
    Container,
}

impl BlockKind {
    /// Element tag used for this block's node.
    pub fn tag(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "p",
            BlockKind::Heading(level) => match level {
                0 | 1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            BlockKind::BlockQuote => "blockquote",
            BlockKind::OrderedList => "ol",
            BlockKind::UnorderedList => "ul",
            BlockKind::ListItem => "li",
            BlockKind::CodeBlock => "pre",
            BlockKind::Container => "div",
        }
    }
}

/// A node in the document tree.
///
/// A block is either a container (non-empty `children`) or a leaf holding raw
/// markdown in `text`. When `children` is non-empty, `text` is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Globally unique key, stable across renders. Becomes the element id.
    pub key: SmolStr,
    pub kind: BlockKind,
    pub children: Vec<Block>,
    /// Raw markdown source, only meaningful for leaves.
    pub text: String,
}

impl Block {
    /// Create a leaf block holding raw markdown text.
    pub fn leaf(key: impl Into<SmolStr>, kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            children: Vec::new(),
            text: text.into(),
        }
    }

    /// Create a container block.
    pub fn container(key: impl Into<SmolStr>, kind: BlockKind, children: Vec<Block>) -> Self {
        Self {
            key: key.into(),
            kind,
            children,
            text: String::new(),
        }
    }

    /// Shorthand for a paragraph leaf.
    pub fn paragraph(key: impl Into<SmolStr>, text: impl Into<String>) -> Self {
        Self::leaf(key, BlockKind::Paragraph, text)
    }

    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Cursor position owned by the editor.
///
/// `range` holds `[start, end)` char offsets into the text of the block named
/// by `key`. It is `None` when there is no active selection. The fields are
/// public, so a range may arrive reversed; read it through `selection`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub key: SmolStr,
    pub range: Option<Range<usize>>,
}

impl Cursor {
    /// Create a cursor spanning `range` inside block `key`.
    ///
    /// A reversed range is normalized so that `start <= end`.
    pub fn new(key: impl Into<SmolStr>, range: Range<usize>) -> Self {
        let range = range.start.min(range.end)..range.start.max(range.end);
        Self {
            key: key.into(),
            range: Some(range),
        }
    }

    /// Create a collapsed cursor (caret) at `offset`.
    pub fn collapsed(key: impl Into<SmolStr>, offset: usize) -> Self {
        Self::new(key, offset..offset)
    }

    /// A cursor that names a block but has no selection.
    pub fn detached(key: impl Into<SmolStr>) -> Self {
        Self {
            key: key.into(),
            range: None,
        }
    }

    /// The selected range with `start <= end`, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.range
            .as_ref()
            .map(|r| r.start.min(r.end)..r.start.max(r.end))
    }

    /// Check whether the cursor is collapsed to a single position.
    pub fn is_collapsed(&self) -> bool {
        self.range.as_ref().is_some_and(|r| r.start == r.end)
    }

    /// Check whether this cursor sits inside the block with `key`.
    pub fn is_in(&self, key: &str) -> bool {
        self.key == key
    }
}
