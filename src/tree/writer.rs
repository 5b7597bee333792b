//! [`Node`] tree → XML writer.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::Node;
use crate::interchange::DocumentError;

/// Serialize a tree as a UTF-8 XML document with a declaration.
///
/// Text and tails are written back unchanged, so a document that was read
/// with [`super::parse_tree`] keeps its original whitespace.
pub fn write_tree(root: &Node) -> Result<Vec<u8>, DocumentError> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new(&mut buffer);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| DocumentError::xml(format!("Write error: {e}")))?;
    writer
        .write_event(Event::Text(BytesText::new("\n")))
        .map_err(|e| DocumentError::xml(format!("Write error: {e}")))?;
    write_node(&mut writer, root)?;

    let mut output = buffer.into_inner();
    output.push(b'\n');
    Ok(output)
}

fn write_node<W: std::io::Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), DocumentError> {
    let mut start = BytesStart::new(node.tag());
    for (key, value) in node.attributes() {
        start.push_attribute((key, value));
    }

    if node.is_leaf() && node.text().is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| DocumentError::xml(format!("Write error: {e}")))?;
    } else {
        writer
            .write_event(Event::Start(start))
            .map_err(|e| DocumentError::xml(format!("Write error: {e}")))?;
        write_text(writer, node.text())?;
        for child in node.children() {
            write_node(writer, child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(node.tag())))
            .map_err(|e| DocumentError::xml(format!("Write error: {e}")))?;
    }
    write_text(writer, node.tail())
}

fn write_text<W: std::io::Write>(writer: &mut Writer<W>, text: &str) -> Result<(), DocumentError> {
    if text.is_empty() {
        return Ok(());
    }
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| DocumentError::xml(format!("Write error: {e}")))
}
