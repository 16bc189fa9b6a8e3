//! Element nodes for the widget render tree
//!
//! A [`Node`] is a small DOM-like element: a tag, string attributes, inline
//! style declarations, optional text and child nodes. Widgets build their
//! encapsulated trees out of nodes and hosts read them back for rendering.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::layout::Rect;

/// Unique identifier of a node
pub type NodeId = usize;

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// A node in the UI tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier for this node
    id: NodeId,

    /// Element tag name
    tag: String,

    /// Node attributes
    attributes: BTreeMap<String, String>,

    /// Inline style declarations
    styles: BTreeMap<String, String>,

    /// Text content (rendered before children)
    text: Option<String>,

    /// Child nodes
    children: Vec<Node>,

    /// Bounds assigned by the host's layout pass
    bounds: Rect,
}

impl Node {
    /// Create a new element node
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            bounds: Rect::zero(),
        }
    }

    /// Builder: set the class attribute
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.set_class_name(class_name);
        self
    }

    /// Builder: set an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: set an inline style declaration
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(property, value);
        self
    }

    /// Builder: set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: append a child
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Get the node's ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(name.into(), value.into())
    }

    /// Remove an attribute, returning the previous value
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Get attributes
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn class_name(&self) -> &str {
        self.attribute("class").unwrap_or_default()
    }

    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.set_attribute("class", class_name);
    }

    /// Classes of this node in declaration order
    pub fn class_list(&self) -> Vec<&str> {
        self.class_name().split_whitespace().collect()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == class)
    }

    /// Get an inline style value
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.styles.insert(property.into(), value.into());
    }

    /// Serialized `style` attribute, if any declarations are set
    pub fn inline_style(&self) -> Option<String> {
        if self.styles.is_empty() {
            return None;
        }
        let declarations: Vec<String> = self
            .styles
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect();
        Some(declarations.join(" "))
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get a reference to the node's children
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Append a child node and return its ID
    pub fn append_child(&mut self, child: Node) -> NodeId {
        let id = child.id;
        self.children.push(child);
        id
    }

    /// Remove a direct child by ID
    ///
    /// Returns `None` when no such child exists, so repeated removals are
    /// harmless.
    pub fn remove_child(&mut self, id: NodeId) -> Option<Node> {
        let index = self.children.iter().position(|child| child.id == id)?;
        Some(self.children.remove(index))
    }

    /// Remove every direct child carrying `class`, returning how many were removed
    pub fn remove_children_with_class(&mut self, class: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|child| !child.has_class(class));
        before - self.children.len()
    }

    /// Depth-first search for a node by ID
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Depth-first search for a node by ID (mutable)
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Depth-first search for the first node carrying `class`
    pub fn find_by_class(&self, class: &str) -> Option<&Node> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_class(class))
    }

    /// Count nodes carrying `class` in this subtree
    pub fn count_class(&self, class: &str) -> usize {
        let own = usize::from(self.has_class(class));
        own + self
            .children
            .iter()
            .map(|child| child.count_class(class))
            .sum::<usize>()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Render this subtree as HTML markup
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub(crate) fn write_html(&self, out: &mut String) {
        self.write_open_tag(out);
        if let Some(text) = &self.text {
            if self.is_raw_text() {
                out.push_str(text);
            } else {
                out.push_str(&escape(text));
            }
        }
        for child in &self.children {
            child.write_html(out);
        }
        self.write_close_tag(out);
    }

    pub(crate) fn write_open_tag(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape(value));
            }
        }
        if let Some(style) = self.inline_style() {
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        out.push('>');
    }

    pub(crate) fn write_close_tag(&self, out: &mut String) {
        let _ = write!(out, "</{}>", self.tag);
    }

    fn is_raw_text(&self) -> bool {
        matches!(self.tag.as_str(), "style" | "script")
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
