//! aganippe-editor-core: block/token rendering with markdown folding.
//!
//! This crate provides:
//! - `Block` / `Cursor` / `Token` - the document and inline token model
//! - `syntax` - cursor conflict detection and marker visibility
//! - `writer` - the recursive block renderer and inline token renderer
//! - `vdom` - the virtual node tree produced by a render pass
//! - `patch` - tree diffing plus an in-memory live tree
//! - `RenderSession` - the orchestrator that renders, patches and restores the cursor
//!
//! Tokenizing, emoji lookup, patching and selection restoration are external
//! concerns, consumed through the traits in `render`, `patch` and `platform`.

pub mod config;
pub mod emoji;
pub mod error;
pub mod patch;
pub mod platform;
pub mod render;
pub mod session;
pub mod syntax;
pub mod token;
pub mod types;
pub mod vdom;
pub mod writer;

pub use config::{ClassNames, RenderConfig};
pub use emoji::{Emoji, EmojiTable};
pub use error::{ConfigError, RenderError};
pub use patch::{LiveTree, Mutation, NodePath, PatchEngine, PatchError, diff};
pub use platform::{PlatformError, SelectionRestorer};
pub use render::{EmojiDictionary, Tokenizer};
pub use session::{Baseline, RenderReport, RenderSession};
pub use smol_str::SmolStr;
pub use syntax::{Visibility, is_conflicted, ranges_conflict, resolve_visibility};
pub use token::{Token, TokenError, TokenKind};
pub use types::{Block, BlockKind, Cursor};
pub use vdom::{Element, VNode};
pub use writer::{BlockRenderer, InlineRenderer};
