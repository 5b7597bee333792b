//! Labelled document tree.
//!
//! Workbook and data source documents are read into a small owned tree of
//! [`Node`] values. The extractors only need a handful of operations on it:
//!
//! - direct-child and descendant selection by tag
//! - attribute-equality predicates (no path language, no quoting rules)
//! - attribute reads with a defined empty default
//! - text content reads
//!
//! ```text
//! Node
//! ├── tag: String
//! ├── attributes: IndexMap<String, String>  (document order)
//! ├── text: String                          (text before the first child)
//! ├── tail: String                          (text after the end tag)
//! └── children: Vec<Node>
//! ```

mod reader;
mod writer;


use indexmap::IndexMap;

pub use reader::parse_tree;
pub use writer::write_tree;

/// A single element of a parsed document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attributes: IndexMap<String, String>,
    text: String,
    tail: String,
    children: Vec<Node>,
}

impl Node {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text content before the first child element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text following this element's end tag, up to the next sibling.
    pub fn tail(&self) -> &str {
        &self.tail
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ── Attribute access ────────────────────────────────────────────

    /// Read an attribute, returning the empty string when it is absent.
    pub fn attr(&self, name: &str) -> &str {
        self.attr_opt(name).unwrap_or("")
    }

    pub fn attr_opt(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Read an attribute by local name, ignoring any namespace prefix.
    ///
    /// `attr_local("ui-builder")` matches both `user:ui-builder` and a bare
    /// `ui-builder` left behind by namespace repair.
    pub fn attr_local(&self, local: &str) -> &str {
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == local)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Does this element carry `name` with exactly `value`?
    pub fn attr_is(&self, name: &str, value: &str) -> bool {
        self.attr_opt(name) == Some(value)
    }

    // ── Navigation ──────────────────────────────────────────────────

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Direct children with the given tag, in document order.
    pub fn children_named<'a, 't>(
        &'a self,
        tag: &'t str,
    ) -> impl Iterator<Item = &'a Node> + use<'a, 't> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn has_child(&self, tag: &str) -> bool {
        self.child(tag).is_some()
    }

    /// All descendants in document (pre-)order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Descendants with the given tag, in document order.
    pub fn descendants_named<'a, 't>(
        &'a self,
        tag: &'t str,
    ) -> impl Iterator<Item = &'a Node> + use<'a, 't> {
        self.descendants().filter(move |n| n.tag == tag)
    }

    /// First descendant with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|n| n.tag == tag)
    }

    /// First descendant matching `predicate`.
    pub fn find_descendant<P>(&self, mut predicate: P) -> Option<&Node>
    where
        P: FnMut(&Node) -> bool,
    {
        self.descendants().find(|n| predicate(n))
    }

    /// Follow a chain of direct-child tags, collecting every match.
    ///
    /// `select(&["layout-options", "caption", "run"])` is the equivalent of
    /// the relative path `./layout-options/caption/run`.
    pub fn select<'a>(&'a self, path: &[&str]) -> Vec<&'a Node> {
        let mut current: Vec<&'a Node> = vec![self];
        for &segment in path {
            current = current
                .into_iter()
                .flat_map(|n| n.children.iter().filter(move |c| c.tag == segment))
                .collect();
        }
        current
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        match self.children.last_mut() {
            Some(last) => last.tail.push_str(text),
            None => self.text.push_str(text),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Read `name` from a possibly absent node, defaulting to the empty string.
pub fn attr<'a>(node: Option<&'a Node>, name: &str) -> &'a str {
    node.map(|n| n.attr(name)).unwrap_or("")
}

/// Strip a `prefix:` from a qualified name.
pub fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map(|(_, local)| local)
        .unwrap_or(qualified)
}

/// Pre-order iterator over a node's descendants.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    if !node.children.is_empty() {
                        self.stack.push(node.children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
