//! XML → [`Node`] tree reader.

use std::collections::HashSet;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::Node;
use crate::interchange::DocumentError;

/// Parse a complete XML document into its root [`Node`].
///
/// Namespace prefixes on element and attribute names are kept verbatim, but
/// every prefix must have been declared by an enclosing `xmlns:` attribute.
/// An undeclared prefix is reported as an XML error so callers can attempt
/// namespace repair.
pub fn parse_tree(input: &str) -> Result<Node, DocumentError> {
    TreeReader::default().read(input)
}

#[derive(Default)]
struct TreeReader {
    /// Open elements, innermost last.
    stack: Vec<Node>,
    /// Prefixes declared at each open element.
    scopes: Vec<Vec<String>>,
    root: Option<Node>,
}

impl TreeReader {
    fn read(mut self, input: &str) -> Result<Node, DocumentError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let node = self.open_element(e)?;
                    self.stack.push(node);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = self.open_element(e)?;
                    self.scopes.pop();
                    self.attach(node)?;
                }
                Ok(Event::End(_)) => {
                    let node = self
                        .stack
                        .pop()
                        .ok_or_else(|| DocumentError::xml("Unexpected end tag"))?;
                    self.scopes.pop();
                    self.attach(node)?;
                }
                Ok(Event::Text(ref t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| DocumentError::xml(format!("Text error: {e}")))?;
                    if let Some(open) = self.stack.last_mut() {
                        open.push_text(&text);
                    }
                }
                Ok(Event::CData(ref c)) => {
                    if let Some(open) = self.stack.last_mut() {
                        open.push_text(&String::from_utf8_lossy(c));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DocumentError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                // declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(DocumentError::xml(format!(
                "Unclosed element <{}> at end of document",
                open.tag()
            )));
        }
        self.root
            .ok_or_else(|| DocumentError::xml("Document has no root element"))
    }

    fn open_element(&mut self, e: &BytesStart<'_>) -> Result<Node, DocumentError> {
        let tag = std::str::from_utf8(e.name().as_ref())
            .map_err(|e| DocumentError::xml(format!("Invalid tag name: {e}")))?
            .to_string();

        let mut node = Node::new(tag.clone());
        let mut declared = Vec::new();
        for attr_result in e.attributes() {
            let attr =
                attr_result.map_err(|e| DocumentError::xml(format!("Attribute error: {e}")))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| DocumentError::xml(format!("Attribute key error: {e}")))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| DocumentError::xml(format!("Attribute value error: {e}")))?
                .to_string();
            if let Some(prefix) = key.strip_prefix("xmlns:") {
                declared.push(prefix.to_string());
            }
            node.set_attr(key, value);
        }
        self.scopes.push(declared);

        self.check_prefix(&tag)?;
        let keys: Vec<String> = node.attributes().map(|(k, _)| k.to_string()).collect();
        for key in keys {
            if key != "xmlns" && !key.starts_with("xmlns:") {
                self.check_prefix(&key)?;
            }
        }
        Ok(node)
    }

    fn check_prefix(&self, qualified: &str) -> Result<(), DocumentError> {
        let Some((prefix, _)) = qualified.split_once(':') else {
            return Ok(());
        };
        if prefix == "xml" || self.in_scope().contains(prefix) {
            return Ok(());
        }
        Err(DocumentError::xml(format!(
            "Undeclared namespace prefix `{prefix}` in `{qualified}`"
        )))
    }

    fn in_scope(&self) -> HashSet<&str> {
        self.scopes
            .iter()
            .flat_map(|scope| scope.iter().map(String::as_str))
            .collect()
    }

    fn attach(&mut self, node: Node) -> Result<(), DocumentError> {
        match self.stack.last_mut() {
            Some(parent) => parent.push_child(node),
            None if self.root.is_none() => self.root = Some(node),
            None => return Err(DocumentError::xml("Multiple root elements")),
        }
        Ok(())
    }
}
