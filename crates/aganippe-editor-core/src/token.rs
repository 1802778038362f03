//! Inline tokens produced by a tokenizer for one leaf block.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

/// Kind of inline markup a token represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain text, rendered without a wrapper.
    Text,
    /// Leading `#` run of a heading.
    HeaderMarker,
    /// `---`, `***` and friends.
    HorizontalRule,
    /// `\` before an escaped character.
    BackslashEscape,
    /// `` `code` ``
    InlineCode,
    /// Opening fence plus info string of a code block.
    CodeFenceInfo,
    /// `:name:`
    Emoji,
    /// `*text*` / `_text_`
    Emphasis,
    /// `**text**` / `__text__`
    Strong,
}

impl TokenKind {
    /// Canonical vocabulary name, as tokenizers report it.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Text => "text",
            TokenKind::HeaderMarker => "header",
            TokenKind::HorizontalRule => "hr",
            TokenKind::BackslashEscape => "backslash",
            TokenKind::InlineCode => "inline_code",
            TokenKind::CodeFenceInfo => "code_fence",
            TokenKind::Emoji => "emoji",
            TokenKind::Emphasis => "em",
            TokenKind::Strong => "strong",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older tokenizers spell a couple of these differently.
        match s {
            "text" => Ok(TokenKind::Text),
            "header" | "header_marker" => Ok(TokenKind::HeaderMarker),
            "hr" => Ok(TokenKind::HorizontalRule),
            "backslash" | "backlash" => Ok(TokenKind::BackslashEscape),
            "inline_code" => Ok(TokenKind::InlineCode),
            "code_fence" | "code_fense" => Ok(TokenKind::CodeFenceInfo),
            "emoji" => Ok(TokenKind::Emoji),
            "em" | "emphasis" => Ok(TokenKind::Emphasis),
            "strong" => Ok(TokenKind::Strong),
            other => Err(TokenError::UnknownKind(SmolStr::new(other))),
        }
    }
}

/// Errors raised while producing tokens.
///
/// These indicate that the tokenizer and renderer disagree on the token
/// vocabulary. They are not recoverable at the rendering layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TokenError {
    /// The tokenizer reported a type the renderer has no handler for.
    #[error("unknown token type `{0}`")]
    UnknownKind(SmolStr),

    /// The tokenizer failed for its own reasons.
    #[error("tokenizer failed: {0}")]
    Tokenizer(String),
}

/// One unit of inline markup within a leaf block's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal delimiter, e.g. `**`. May be empty.
    pub marker: SmolStr,
    /// Payload text. May be empty.
    pub content: SmolStr,
    /// `[start, end)` offsets into the owning block's text.
    pub range: Range<usize>,
    /// Nested tokens, only meaningful for emphasis and strong.
    pub children: Vec<Token>,
}

impl Token {
    /// Create a token with no children.
    pub fn new(
        kind: TokenKind,
        marker: impl Into<SmolStr>,
        content: impl Into<SmolStr>,
        range: Range<usize>,
    ) -> Self {
        Self {
            kind,
            marker: marker.into(),
            content: content.into(),
            range,
            children: Vec::new(),
        }
    }

    /// Plain text token.
    pub fn text(content: impl Into<SmolStr>, range: Range<usize>) -> Self {
        Self::new(TokenKind::Text, "", content, range)
    }

    /// Build a token from a tokenizer-reported type name.
    pub fn from_raw(
        kind: &str,
        marker: impl Into<SmolStr>,
        content: impl Into<SmolStr>,
        range: Range<usize>,
    ) -> Result<Self, TokenError> {
        Ok(Self::new(kind.parse()?, marker, content, range))
    }

    /// Attach nested tokens.
    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }
}
