//! Rendering traits for the editor.
//!
//! These traits abstract over external concerns during rendering:
//! - Splitting a block's raw text into inline tokens
//! - Resolving emoji names to glyphs
//!
//! Implementations are provided by the consuming application.

use crate::emoji::Emoji;
use crate::token::{Token, TokenError};

/// Splits the raw markdown of a leaf block into inline tokens.
///
/// Tokens must come back in source order with ranges relative to `text`.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, TokenError>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Result<Vec<Token>, TokenError>,
{
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, TokenError> {
        self(text)
    }
}

/// Looks up emoji by their markdown spelling.
pub trait EmojiDictionary {
    /// Resolve `text` (e.g. `:smile:`) to an emoji.
    ///
    /// Returns `None` for unknown names, which renders as a warning.
    fn lookup(&self, text: &str) -> Option<Emoji>;
}

/// Unit type implementation - no emoji are known.
impl EmojiDictionary for () {
    fn lookup(&self, _text: &str) -> Option<Emoji> {
        None
    }
}

impl<T: EmojiDictionary> EmojiDictionary for &T {
    fn lookup(&self, text: &str) -> Option<Emoji> {
        (*self).lookup(text)
    }
}

impl<T: EmojiDictionary> EmojiDictionary for Option<T> {
    fn lookup(&self, text: &str) -> Option<Emoji> {
        self.as_ref().and_then(|d| d.lookup(text))
    }
}
