//! Tree diffing and patch application.
//!
//! `diff` computes the mutations that turn one virtual tree into another.
//! `LiveTree` is an in-memory live structure those mutations are applied
//! to, standing in for a real DOM. Anything implementing `PatchEngine` can
//! replace it.

use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;
use thiserror::Error;

use crate::vdom::{Element, VNode};

/// Child indices leading from the root to a node. Empty means the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

/// A single change to a live structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Swap the node at `path` for a new one.
    Replace { path: NodePath, node: VNode },
    SetText { path: NodePath, text: SmolStr },
    SetClasses { path: NodePath, classes: Vec<SmolStr> },
    SetProp { path: NodePath, name: SmolStr, value: SmolStr },
    RemoveProp { path: NodePath, name: SmolStr },
    SetData { path: NodePath, name: SmolStr, value: SmolStr },
    RemoveData { path: NodePath, name: SmolStr },
    /// Insert `node` as child `index` of the element at `parent`.
    Insert { parent: NodePath, index: usize, node: VNode },
    /// Remove child `index` of the element at `parent`.
    Remove { parent: NodePath, index: usize },
}

/// Errors raised while applying mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PatchError {
    /// No node exists at the path.
    #[error("no node at {0}")]
    InvalidPath(NodePath),

    /// The mutation needs an element but found text, or the reverse.
    #[error("node at {0} has the wrong kind for this mutation")]
    KindMismatch(NodePath),

    /// Child index past the end of the parent's children.
    #[error("child index {index} out of bounds under {parent}")]
    IndexOutOfBounds { parent: NodePath, index: usize },
}

/// Applies a new virtual tree to a live structure.
pub trait PatchEngine {
    /// Handle to a live element, handed to selection restoration.
    type Element;

    /// Read the live structure back as a virtual tree.
    ///
    /// Used as the diff baseline for the very first render.
    fn to_tree(&self) -> VNode;

    /// Bring the live structure from `old` to `new`.
    ///
    /// Returns the number of mutations applied.
    fn patch(&mut self, old: &VNode, new: &VNode) -> Result<usize, PatchError>;

    /// Find the live element whose id is `key`.
    fn find_element(&self, key: &str) -> Option<Self::Element>;
}

impl<P: PatchEngine> PatchEngine for &mut P {
    type Element = P::Element;

    fn to_tree(&self) -> VNode {
        (**self).to_tree()
    }

    fn patch(&mut self, old: &VNode, new: &VNode) -> Result<usize, PatchError> {
        (**self).patch(old, new)
    }

    fn find_element(&self, key: &str) -> Option<Self::Element> {
        (**self).find_element(key)
    }
}

/// Compute the mutations that turn `old` into `new`.
///
/// Children are matched by position. Nodes with the same identity (tag and
/// id, or both text) are patched in place, anything else is replaced.
/// Equal trees produce no mutations.
pub fn diff(old: &VNode, new: &VNode) -> Vec<Mutation> {
    let mut out = Vec::new();
    diff_node(old, new, NodePath::root(), &mut out);
    tracing::trace!(target: "aganippe::patch", mutations = out.len(), "diff");
    out
}

fn diff_node(old: &VNode, new: &VNode, path: NodePath, out: &mut Vec<Mutation>) {
    match (old, new) {
        (VNode::Text(a), VNode::Text(b)) => {
            if a != b {
                out.push(Mutation::SetText {
                    path,
                    text: b.clone(),
                });
            }
        }
        (VNode::Element(a), VNode::Element(b)) if old.same_identity(new) => {
            diff_element(a, b, path, out);
        }
        _ => out.push(Mutation::Replace {
            path,
            node: new.clone(),
        }),
    }
}

fn diff_element(old: &Element, new: &Element, path: NodePath, out: &mut Vec<Mutation>) {
    if old.classes != new.classes {
        out.push(Mutation::SetClasses {
            path: path.clone(),
            classes: new.classes.clone(),
        });
    }

    diff_map(&old.props, &new.props, |name, value| match value {
        Some(value) => out.push(Mutation::SetProp {
            path: path.clone(),
            name,
            value,
        }),
        None => out.push(Mutation::RemoveProp {
            path: path.clone(),
            name,
        }),
    });

    diff_map(&old.dataset, &new.dataset, |name, value| match value {
        Some(value) => out.push(Mutation::SetData {
            path: path.clone(),
            name,
            value,
        }),
        None => out.push(Mutation::RemoveData {
            path: path.clone(),
            name,
        }),
    });

    let common = old.children.len().min(new.children.len());
    for index in 0..common {
        diff_node(&old.children[index], &new.children[index], path.child(index), out);
    }
    for (index, node) in new.children.iter().enumerate().skip(common) {
        out.push(Mutation::Insert {
            parent: path.clone(),
            index,
            node: node.clone(),
        });
    }
    // Highest index first so earlier removals don't shift later ones.
    for index in (common..old.children.len()).rev() {
        out.push(Mutation::Remove {
            parent: path.clone(),
            index,
        });
    }
}

/// Report changed/added entries as `Some(value)`, removed ones as `None`.
fn diff_map(
    old: &BTreeMap<SmolStr, SmolStr>,
    new: &BTreeMap<SmolStr, SmolStr>,
    mut emit: impl FnMut(SmolStr, Option<SmolStr>),
) {
    for (name, value) in new {
        if old.get(name) != Some(value) {
            emit(name.clone(), Some(value.clone()));
        }
    }
    for name in old.keys() {
        if !new.contains_key(name) {
            emit(name.clone(), None);
        }
    }
}

/// In-memory live structure.
///
/// Holds the "real" tree that mutations are applied to, the way a browser
/// holds the DOM. Element handles are `NodePath`s into this tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveTree {
    root: VNode,
    applied: usize,
}

impl LiveTree {
    /// Mount a live structure with `root` as its container.
    pub fn mount(root: impl Into<VNode>) -> Self {
        Self {
            root: root.into(),
            applied: 0,
        }
    }

    pub fn root(&self) -> &VNode {
        &self.root
    }

    /// Total mutations applied since mount.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Node at `path`, if any.
    pub fn get(&self, path: &NodePath) -> Option<&VNode> {
        let mut node = &self.root;
        for &index in &path.0 {
            node = node.children().get(index)?;
        }
        Some(node)
    }

    /// Depth-first search for the element with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<NodePath> {
        fn walk(node: &VNode, id: &str, path: NodePath) -> Option<NodePath> {
            let el = node.as_element()?;
            if el.id.as_deref() == Some(id) {
                return Some(path);
            }
            el.children
                .iter()
                .enumerate()
                .find_map(|(index, child)| walk(child, id, path.child(index)))
        }
        walk(&self.root, id, NodePath::root())
    }

    /// Apply mutations in order, all or nothing.
    ///
    /// The batch runs against a copy of the tree. On the first failure the
    /// live tree and the applied count are left exactly as they were.
    pub fn apply(&mut self, mutations: &[Mutation]) -> Result<(), PatchError> {
        let mut staged = self.root.clone();
        for mutation in mutations {
            apply_one(&mut staged, mutation)?;
        }
        self.root = staged;
        self.applied += mutations.len();
        Ok(())
    }
}

fn apply_one(root: &mut VNode, mutation: &Mutation) -> Result<(), PatchError> {
    match mutation {
        Mutation::Replace { path, node } => {
            *node_mut(root, path)? = node.clone();
        }
        Mutation::SetText { path, text } => match node_mut(root, path)? {
            VNode::Text(current) => *current = text.clone(),
            VNode::Element(_) => return Err(PatchError::KindMismatch(path.clone())),
        },
        Mutation::SetClasses { path, classes } => {
            element_mut(root, path)?.classes = classes.clone();
        }
        Mutation::SetProp { path, name, value } => {
            element_mut(root, path)?
                .props
                .insert(name.clone(), value.clone());
        }
        Mutation::RemoveProp { path, name } => {
            element_mut(root, path)?.props.remove(name);
        }
        Mutation::SetData { path, name, value } => {
            element_mut(root, path)?
                .dataset
                .insert(name.clone(), value.clone());
        }
        Mutation::RemoveData { path, name } => {
            element_mut(root, path)?.dataset.remove(name);
        }
        Mutation::Insert {
            parent,
            index,
            node,
        } => {
            let el = element_mut(root, parent)?;
            if *index > el.children.len() {
                return Err(PatchError::IndexOutOfBounds {
                    parent: parent.clone(),
                    index: *index,
                });
            }
            el.children.insert(*index, node.clone());
        }
        Mutation::Remove { parent, index } => {
            let el = element_mut(root, parent)?;
            if *index >= el.children.len() {
                return Err(PatchError::IndexOutOfBounds {
                    parent: parent.clone(),
                    index: *index,
                });
            }
            el.children.remove(*index);
        }
    }
    Ok(())
}

fn node_mut<'a>(root: &'a mut VNode, path: &NodePath) -> Result<&'a mut VNode, PatchError> {
    let mut node = root;
    for &index in &path.0 {
        node = match node {
            VNode::Element(el) => el
                .children
                .get_mut(index)
                .ok_or_else(|| PatchError::InvalidPath(path.clone()))?,
            VNode::Text(_) => return Err(PatchError::InvalidPath(path.clone())),
        };
    }
    Ok(node)
}

fn element_mut<'a>(root: &'a mut VNode, path: &NodePath) -> Result<&'a mut Element, PatchError> {
    match node_mut(root, path)? {
        VNode::Element(el) => Ok(el),
        VNode::Text(_) => Err(PatchError::KindMismatch(path.clone())),
    }
}

impl PatchEngine for LiveTree {
    type Element = NodePath;

    fn to_tree(&self) -> VNode {
        self.root.clone()
    }

    fn patch(&mut self, old: &VNode, new: &VNode) -> Result<usize, PatchError> {
        let mutations = diff(old, new);
        self.apply(&mutations)?;
        tracing::debug!(
            target: "aganippe::patch",
            applied = mutations.len(),
            total = self.applied,
            "patched live tree"
        );
        Ok(mutations.len())
    }

    fn find_element(&self, key: &str) -> Option<NodePath> {
        self.find_by_id(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(id: &str, text: &str) -> VNode {
        Element::new("p")
            .with_id(id)
            .with_class("ag-paragraph")
            .with_text(text)
            .into()
    }

    fn root(children: Vec<VNode>) -> VNode {
        Element::new("div")
            .with_id("ag-editor-id")
            .with_children(children)
            .into()
    }

    #[test]
    fn test_equal_trees_have_no_mutations() {
        let tree = root(vec![para("b1", "one"), para("b2", "two")]);
        assert!(diff(&tree, &tree.clone()).is_empty());
    }

    #[test]
    fn test_text_change() {
        let old = root(vec![para("b1", "one")]);
        let new = root(vec![para("b1", "uno")]);
        assert_eq!(
            diff(&old, &new),
            vec![Mutation::SetText {
                path: NodePath(vec![0, 0]),
                text: "uno".into(),
            }]
        );
    }

    #[test]
    fn test_identity_change_replaces() {
        let old = root(vec![para("b1", "one")]);
        let new = root(vec![para("b9", "one")]);
        assert_eq!(
            diff(&old, &new),
            vec![Mutation::Replace {
                path: NodePath(vec![0]),
                node: para("b9", "one"),
            }]
        );
    }

    #[test]
    fn test_class_prop_and_data_changes() {
        let old: VNode = Element::new("a")
            .with_class("ag-hide")
            .with_prop("href", "#")
            .with_data("emoji", "😄")
            .into();
        let new: VNode = Element::new("a").with_class("ag-gray").into();

        let mutations = diff(&old, &new);
        assert_eq!(
            mutations,
            vec![
                Mutation::SetClasses {
                    path: NodePath::root(),
                    classes: vec!["ag-gray".into()],
                },
                Mutation::RemoveProp {
                    path: NodePath::root(),
                    name: "href".into(),
                },
                Mutation::RemoveData {
                    path: NodePath::root(),
                    name: "emoji".into(),
                },
            ]
        );
    }

    #[test]
    fn test_insert_and_remove_children() {
        let short = root(vec![para("b1", "one")]);
        let long = root(vec![para("b1", "one"), para("b2", "two"), para("b3", "three")]);

        let grow = diff(&short, &long);
        assert_eq!(grow.len(), 2);
        assert!(matches!(grow[0], Mutation::Insert { index: 1, .. }));
        assert!(matches!(grow[1], Mutation::Insert { index: 2, .. }));

        let shrink = diff(&long, &short);
        assert_eq!(
            shrink,
            vec![
                Mutation::Remove {
                    parent: NodePath::root(),
                    index: 2,
                },
                Mutation::Remove {
                    parent: NodePath::root(),
                    index: 1,
                },
            ]
        );
    }

    #[test]
    fn test_live_tree_converges() {
        let old = root(vec![para("b1", "one"), para("b2", "two"), para("b3", "three")]);
        let new = root(vec![
            para("b1", "ONE"),
            Element::new("h1").with_id("b2").with_text("two").into(),
        ]);

        let mut live = LiveTree::mount(old.clone());
        let applied = live.patch(&old, &new).unwrap();
        assert_eq!(live.root(), &new);
        assert_eq!(live.applied(), applied);
        assert!(diff(live.root(), &new).is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let tree = root(vec![
            para("b1", "one"),
            Element::new("blockquote")
                .with_id("b2")
                .with_child(para("b3", "nested"))
                .into(),
        ]);
        let live = LiveTree::mount(tree);

        assert_eq!(live.find_element("ag-editor-id"), Some(NodePath::root()));
        assert_eq!(live.find_element("b3"), Some(NodePath(vec![1, 0])));
        assert_eq!(live.find_element("missing"), None);

        let path = live.find_by_id("b3").unwrap();
        assert_eq!(live.get(&path).map(|n| n.text_content()), Some("nested".to_string()));
    }

    #[test]
    fn test_apply_invalid_path() {
        let mut live = LiveTree::mount(root(vec![]));
        let err = live
            .apply(&[Mutation::SetText {
                path: NodePath(vec![3]),
                text: "x".into(),
            }])
            .unwrap_err();
        assert_eq!(err, PatchError::InvalidPath(NodePath(vec![3])));
        assert_eq!(err.to_string(), "no node at /3");
    }

    #[test]
    fn test_failed_batch_leaves_tree_untouched() {
        let tree = root(vec![para("b1", "one")]);
        let mut live = LiveTree::mount(tree.clone());

        let err = live
            .apply(&[
                Mutation::SetText {
                    path: NodePath(vec![0, 0]),
                    text: "changed".into(),
                },
                Mutation::Remove {
                    parent: NodePath::root(),
                    index: 4,
                },
            ])
            .unwrap_err();
        assert!(matches!(err, PatchError::IndexOutOfBounds { index: 4, .. }));
        assert_eq!(live.root(), &tree);
        assert_eq!(live.applied(), 0);

        // The untouched tree still lines up with the caller's baseline.
        let next = root(vec![para("b1", "two")]);
        live.patch(&tree, &next).unwrap();
        assert_eq!(live.root(), &next);
        assert_eq!(live.applied(), 1);
    }

    #[test]
    fn test_apply_kind_mismatch_and_bounds() {
        let mut live = LiveTree::mount(root(vec![para("b1", "one")]));

        let err = live
            .apply(&[Mutation::SetClasses {
                path: NodePath(vec![0, 0]),
                classes: vec![],
            }])
            .unwrap_err();
        assert_eq!(err, PatchError::KindMismatch(NodePath(vec![0, 0])));

        let err = live
            .apply(&[Mutation::Remove {
                parent: NodePath::root(),
                index: 5,
            }])
            .unwrap_err();
        assert!(matches!(err, PatchError::IndexOutOfBounds { index: 5, .. }));
    }
}
