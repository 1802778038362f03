//! Virtual node tree produced by a render pass.
//!
//! A render builds a fresh tree every time. The previous tree is only kept
//! as the baseline for diffing.

use std::collections::BTreeMap;
use std::fmt;

use markdown_weaver_escape::{StrWrite, escape_html};
use smol_str::SmolStr;

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// A node in the virtual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    Text(SmolStr),
    Element(Element),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: SmolStr,
    /// Element id. Block nodes carry the block key here.
    pub id: Option<SmolStr>,
    pub classes: Vec<SmolStr>,
    /// Element properties such as `href`.
    pub props: BTreeMap<SmolStr, SmolStr>,
    /// `data-*` attributes, keyed without the prefix.
    pub dataset: BTreeMap<SmolStr, SmolStr>,
    pub children: Vec<VNode>,
}

impl Element {
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            props: BTreeMap::new(),
            dataset: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<SmolStr>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a class. Duplicates are ignored.
    pub fn with_class(mut self, class: impl Into<SmolStr>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn with_prop(mut self, name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_data(mut self, name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.dataset.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = VNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set a single text child, replacing any existing children.
    pub fn with_text(mut self, text: impl Into<SmolStr>) -> Self {
        self.children = vec![VNode::Text(text.into())];
        self
    }

    /// Selector in `tag#id.class1.class2` form.
    pub fn selector(&self) -> String {
        let mut selector = self.tag.to_string();
        if let Some(id) = &self.id {
            selector.push('#');
            selector.push_str(id);
        }
        for class in &self.classes {
            selector.push('.');
            selector.push_str(class);
        }
        selector
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag.as_str())
    }
}

impl From<Element> for VNode {
    fn from(element: Element) -> Self {
        VNode::Element(element)
    }
}

impl VNode {
    pub fn text(text: impl Into<SmolStr>) -> Self {
        VNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            VNode::Element(el) => Some(el),
            VNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(text) => Some(text),
            VNode::Element(_) => None,
        }
    }

    /// Identity used for matching nodes across renders.
    ///
    /// Text matches text. Elements match when tag and id agree.
    pub fn same_identity(&self, other: &VNode) -> bool {
        match (self, other) {
            (VNode::Text(_), VNode::Text(_)) => true,
            (VNode::Element(a), VNode::Element(b)) => a.tag == b.tag && a.id == b.id,
            _ => false,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element(el) => &el.children,
            VNode::Text(_) => &[],
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text(text) => out.push_str(text),
            VNode::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialize to escaped HTML. Same output as `Display`.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

/// Adapts a formatter to the escape helpers' writer trait.
struct HtmlWriter<'a, 'b>(&'a mut fmt::Formatter<'b>);

impl StrWrite for HtmlWriter<'_, '_> {
    type Error = fmt::Error;

    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.0.write_fmt(args)
    }
}

fn write_node(w: &mut HtmlWriter<'_, '_>, node: &VNode) -> fmt::Result {
    match node {
        VNode::Text(text) => escape_html(&mut *w, text),
        VNode::Element(el) => {
            w.write_str("<")?;
            w.write_str(&el.tag)?;
            if let Some(id) = &el.id {
                write_attr(w, "id", id)?;
            }
            if !el.classes.is_empty() {
                write_attr(w, "class", &el.classes.join(" "))?;
            }
            for (name, value) in &el.props {
                write_attr(w, name, value)?;
            }
            for (name, value) in &el.dataset {
                write_attr(w, &format!("data-{}", name), value)?;
            }
            w.write_str(">")?;
            if el.is_void() {
                return Ok(());
            }
            for child in &el.children {
                write_node(w, child)?;
            }
            w.write_str("</")?;
            w.write_str(&el.tag)?;
            w.write_str(">")
        }
    }
}

fn write_attr(w: &mut HtmlWriter<'_, '_>, name: &str, value: &str) -> fmt::Result {
    w.write_str(" ")?;
    w.write_str(name)?;
    w.write_str("=\"")?;
    escape_html(&mut *w, value)?;
    w.write_str("\"")
}

impl fmt::Display for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(&mut HtmlWriter(f), self)
    }
}
