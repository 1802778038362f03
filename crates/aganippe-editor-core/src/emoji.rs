//! Emoji descriptors and a simple name → glyph table.

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::render::EmojiDictionary;

/// A resolved emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    /// Short name without colons, e.g. `smile`.
    pub name: SmolStr,
    /// Glyph placed in the `data-emoji` attribute.
    pub glyph: SmolStr,
}

impl Emoji {
    pub fn new(name: impl Into<SmolStr>, glyph: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            glyph: glyph.into(),
        }
    }
}

/// In-memory emoji dictionary keyed by short name.
///
/// Lookups accept the name with or without surrounding colons, so both
/// `smile` and `:smile:` resolve.
#[derive(Debug, Clone, Default)]
pub struct EmojiTable {
    entries: HashMap<SmolStr, SmolStr>,
}

impl EmojiTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<SmolStr>, glyph: impl Into<SmolStr>) {
        let name = name.into();
        let key = SmolStr::new(strip_colons(&name));
        self.entries.insert(key, glyph.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, G> FromIterator<(N, G)> for EmojiTable
where
    N: Into<SmolStr>,
    G: Into<SmolStr>,
{
    fn from_iter<I: IntoIterator<Item = (N, G)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, glyph) in iter {
            table.insert(name, glyph);
        }
        table
    }
}

impl EmojiDictionary for EmojiTable {
    fn lookup(&self, text: &str) -> Option<Emoji> {
        let name = strip_colons(text.trim());
        if name.is_empty() {
            return None;
        }
        self.entries
            .get_key_value(name)
            .map(|(name, glyph)| Emoji::new(name.clone(), glyph.clone()))
    }
}

fn strip_colons(text: &str) -> &str {
    let text = text.strip_prefix(':').unwrap_or(text);
    text.strip_suffix(':').unwrap_or(text)
}
