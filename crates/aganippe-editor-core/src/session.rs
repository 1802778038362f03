//! Render orchestration.
//!
//! A `RenderSession` owns the only baseline tree. Each `render` builds a new
//! tree for the whole document, patches the live structure from the
//! baseline to the new tree, keeps the new tree as the next baseline, and
//! puts the cursor back.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::patch::PatchEngine;
use crate::platform::SelectionRestorer;
use crate::render::{EmojiDictionary, Tokenizer};
use crate::types::{Block, Cursor};
use crate::vdom::{Element, VNode};
use crate::writer::BlockRenderer;

/// The previously rendered tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Baseline {
    /// Nothing rendered yet. The next render diffs against the live structure.
    #[default]
    Uninitialized,
    /// Tree produced by the last successful render.
    Ready(VNode),
}

impl Baseline {
    pub fn is_ready(&self) -> bool {
        matches!(self, Baseline::Ready(_))
    }

    pub fn tree(&self) -> Option<&VNode> {
        match self {
            Baseline::Ready(tree) => Some(tree),
            Baseline::Uninitialized => None,
        }
    }
}

/// Outcome of a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// Mutations the patch engine applied.
    pub applied: usize,
    /// Whether selection restoration ran.
    pub cursor_restored: bool,
}

/// Top-level renderer for one editor instance.
///
/// Generic over:
/// - `P`: Patch engine owning the live structure
/// - `S`: Selection restorer, targeting the engine's element handles
/// - `T`: Tokenizer for leaf text
/// - `D`: Emoji dictionary
///
/// `render` takes `&mut self`, so renders are serialized and never overlap.
pub struct RenderSession<P, S, T, D = ()>
where
    P: PatchEngine,
    S: SelectionRestorer<Target = P::Element>,
{
    engine: P,
    restorer: S,
    renderer: BlockRenderer<T, D>,
    config: RenderConfig,
    baseline: Baseline,
}

impl<P, S, T, D> RenderSession<P, S, T, D>
where
    P: PatchEngine,
    S: SelectionRestorer<Target = P::Element>,
    T: Tokenizer,
    D: EmojiDictionary,
{
    /// Create a session over a mounted engine.
    ///
    /// The renderer's class names are replaced by those in `config`.
    pub fn new(engine: P, restorer: S, renderer: BlockRenderer<T, D>, config: RenderConfig) -> Self {
        let renderer = renderer.with_classes(config.classes.clone());
        Self {
            engine,
            restorer,
            renderer,
            config,
            baseline: Baseline::Uninitialized,
        }
    }

    pub fn engine(&self) -> &P {
        &self.engine
    }

    pub fn restorer(&self) -> &S {
        &self.restorer
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Forget the baseline, e.g. after the live structure was remounted.
    ///
    /// The next render diffs against the live structure again.
    pub fn reset(&mut self) {
        self.baseline = Baseline::Uninitialized;
    }

    /// Build the tree for `blocks` without touching the live structure.
    pub fn build_tree(&self, blocks: &[Block], cursor: Option<&Cursor>) -> Result<VNode, RenderError> {
        let children = blocks
            .iter()
            .map(|block| self.renderer.render_block(block, cursor))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Element::new("div")
            .with_id(self.config.editor_id.clone())
            .with_class(self.config.root_class.clone())
            .with_children(children)
            .into())
    }

    /// Render `blocks`, patch the live structure and restore the cursor.
    ///
    /// If building or patching fails, the baseline is left untouched.
    pub fn render(&mut self, blocks: &[Block], cursor: Option<&Cursor>) -> Result<RenderReport, RenderError> {
        let new_tree = self.build_tree(blocks, cursor)?;

        let applied = match &self.baseline {
            Baseline::Ready(old) => self.engine.patch(old, &new_tree)?,
            Baseline::Uninitialized => {
                tracing::debug!(
                    target: "aganippe::render",
                    "no baseline, diffing against live structure"
                );
                let live = self.engine.to_tree();
                self.engine.patch(&live, &new_tree)?
            }
        };

        tracing::debug!(
            target: "aganippe::render",
            blocks = blocks.len(),
            applied,
            "render"
        );

        self.baseline = Baseline::Ready(new_tree);

        let cursor_restored = self.restore_cursor(cursor)?;
        Ok(RenderReport {
            applied,
            cursor_restored,
        })
    }

    fn restore_cursor(&mut self, cursor: Option<&Cursor>) -> Result<bool, RenderError> {
        let Some(cursor) = cursor else {
            return Ok(false);
        };
        let Some(range) = cursor.selection() else {
            return Ok(false);
        };
        let Some(target) = self.engine.find_element(&cursor.key) else {
            tracing::debug!(
                target: "aganippe::render",
                key = %cursor.key,
                "cursor block not rendered, skipping restore"
            );
            return Ok(false);
        };

        self.restorer.restore(range, &target)?;
        Ok(true)
    }
}
