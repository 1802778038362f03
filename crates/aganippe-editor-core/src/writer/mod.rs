//! Block rendering: maps the block tree to a virtual node tree.
//!
//! Containers recurse into their child blocks. Leaves are tokenized and
//! handed to the `InlineRenderer`.

mod inline;


pub use inline::InlineRenderer;

use crate::config::ClassNames;
use crate::render::{EmojiDictionary, Tokenizer};
use crate::token::TokenError;
use crate::types::{Block, Cursor};
use crate::vdom::{Element, VNode};

/// Recursive block renderer.
///
/// Generic over:
/// - `T`: Tokenizer for leaf text
/// - `D`: Emoji dictionary (defaults to none)
pub struct BlockRenderer<T, D = ()> {
    tokenizer: T,
    emoji: D,
    classes: ClassNames,
}

impl<T: Tokenizer> BlockRenderer<T, ()> {
    /// Create a renderer that knows no emoji.
    pub fn new(tokenizer: T) -> Self {
        Self {
            tokenizer,
            emoji: (),
            classes: ClassNames::default(),
        }
    }
}

impl<T: Tokenizer, D: EmojiDictionary> BlockRenderer<T, D> {
    /// Swap in an emoji dictionary.
    pub fn with_emoji<D2: EmojiDictionary>(self, emoji: D2) -> BlockRenderer<T, D2> {
        BlockRenderer {
            tokenizer: self.tokenizer,
            emoji,
            classes: self.classes,
        }
    }

    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }

    /// Render a block and everything below it.
    ///
    /// The node is tagged by the block kind and carries the block key as its
    /// id, so the patch engine can match it across renders.
    pub fn render_block(&self, block: &Block, cursor: Option<&Cursor>) -> Result<VNode, TokenError> {
        let children = if block.is_container() {
            block
                .children
                .iter()
                .map(|child| self.render_block(child, cursor))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            self.render_leaf(block, cursor)?
        };

        Ok(Element::new(block.kind.tag())
            .with_id(block.key.clone())
            .with_class(self.classes.paragraph.clone())
            .with_children(children)
            .into())
    }

    /// Render the inline content of a leaf block.
    ///
    /// Empty text renders as a single line break placeholder.
    pub fn render_leaf(&self, block: &Block, cursor: Option<&Cursor>) -> Result<Vec<VNode>, TokenError> {
        if block.text.is_empty() {
            return Ok(vec![Element::new("br").into()]);
        }

        let tokens = self.tokenizer.tokenize(&block.text)?;
        tracing::trace!(
            target: "aganippe::render",
            block = %block.key,
            tokens = tokens.len(),
            "render_leaf"
        );

        let inline = InlineRenderer::new(block, cursor, &self.emoji, &self.classes);
        let mut children = Vec::with_capacity(tokens.len());
        for token in &tokens {
            inline.render_into(token, None, &mut children);
        }
        Ok(children)
    }
}
