//! Inline token rendering.
//!
//! Each token becomes one or more nodes. Results are always spliced into the
//! parent's children, never nested, so token order is preserved.

use smol_str::SmolStr;

use crate::config::ClassNames;
use crate::render::EmojiDictionary;
use crate::syntax::{Visibility, resolve_visibility};
use crate::token::{Token, TokenKind};
use crate::types::{Block, Cursor};
use crate::vdom::{Element, VNode};

/// Renders the inline tokens of a single leaf block.
///
/// Generic over:
/// - `D`: Emoji dictionary (defaults to none)
pub struct InlineRenderer<'a, D = ()> {
    block: &'a Block,
    cursor: Option<&'a Cursor>,
    emoji: &'a D,
    classes: &'a ClassNames,
}

impl<'a, D: EmojiDictionary> InlineRenderer<'a, D> {
    pub fn new(
        block: &'a Block,
        cursor: Option<&'a Cursor>,
        emoji: &'a D,
        classes: &'a ClassNames,
    ) -> Self {
        Self {
            block,
            cursor,
            emoji,
            classes,
        }
    }

    /// Render one token. `outer` is the visibility inherited from an
    /// enclosing emphasis/strong, `None` at the top level.
    pub fn render(&self, token: &Token, outer: Option<Visibility>) -> Vec<VNode> {
        let mut out = Vec::new();
        self.render_into(token, outer, &mut out);
        out
    }

    /// Render one token, appending its nodes to `out`.
    pub fn render_into(&self, token: &Token, outer: Option<Visibility>, out: &mut Vec<VNode>) {
        tracing::trace!(
            target: "aganippe::inline",
            block = %self.block.key,
            kind = %token.kind,
            range = ?token.range,
            inherited = ?outer,
            "render_token"
        );

        match token.kind {
            TokenKind::Text => out.push(VNode::text(token.content.clone())),
            TokenKind::HorizontalRule | TokenKind::HeaderMarker | TokenKind::BackslashEscape => {
                let class = self.class_for(self.visibility(outer, token));
                out.push(self.marker(class, &token.marker));
            }
            TokenKind::CodeFenceInfo => {
                // Fences stay visible regardless of the cursor.
                out.push(self.marker(self.classes.revealed.clone(), &token.marker));
                out.push(
                    Element::new("a")
                        .with_class(self.classes.language.clone())
                        .with_prop("href", "#")
                        .with_text(token.content.clone())
                        .into(),
                );
            }
            TokenKind::InlineCode => {
                let class = self.class_for(self.visibility(outer, token));
                out.push(self.marker(class.clone(), &token.marker));
                out.push(Element::new("code").with_text(token.content.clone()).into());
                out.push(self.marker(class, &token.marker));
            }
            TokenKind::Emoji => self.render_emoji(token, outer, out),
            TokenKind::Emphasis => self.render_wrapper("em", token, outer, out),
            TokenKind::Strong => self.render_wrapper("strong", token, outer, out),
        }
    }

    fn render_emoji(&self, token: &Token, outer: Option<Visibility>, out: &mut Vec<VNode>) {
        let visibility = self.visibility(outer, token);
        let body = Element::new("a").with_text(token.content.clone());

        let (class, body) = match self.emoji.lookup(&token.content) {
            Some(emoji) => {
                let class = self.class_for(visibility);
                let body = body
                    .with_class(class.clone())
                    .with_class(self.classes.emoji_marked.clone())
                    .with_data("emoji", emoji.glyph);
                (class, body)
            }
            None => {
                tracing::trace!(
                    target: "aganippe::inline",
                    content = %token.content,
                    "unknown emoji"
                );
                // Invalid emoji always warn, markers included.
                let class = self.class_for(Visibility::Warning);
                let body = body
                    .with_class(class.clone())
                    .with_class(self.classes.emoji_marked.clone());
                (class, body)
            }
        };

        out.push(self.marker(class.clone(), &token.marker));
        out.push(body.into());
        out.push(self.marker(class, &token.marker));
    }

    fn render_wrapper(
        &self,
        tag: &'static str,
        token: &Token,
        outer: Option<Visibility>,
        out: &mut Vec<VNode>,
    ) {
        let visibility = self.visibility(outer, token);
        let class = self.class_for(visibility);

        let mut inner = Vec::with_capacity(token.children.len());
        for child in &token.children {
            self.render_into(child, Some(visibility), &mut inner);
        }

        out.push(self.marker(class.clone(), &token.marker));
        out.push(Element::new(tag).with_children(inner).into());
        out.push(self.marker(class, &token.marker));
    }

    fn visibility(&self, outer: Option<Visibility>, token: &Token) -> Visibility {
        resolve_visibility(outer, self.block, token, self.cursor)
    }

    fn class_for(&self, visibility: Visibility) -> SmolStr {
        self.classes.class_for(visibility).clone()
    }

    /// Anchor holding a literal markup delimiter.
    fn marker(&self, class: SmolStr, marker: &str) -> VNode {
        Element::new("a")
            .with_class(class)
            .with_prop("href", "#")
            .with_text(marker)
            .into()
    }
}
