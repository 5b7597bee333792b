//! Document ingestion for Tableau workbooks and data sources.
//!
//! Four container shapes are accepted:
//!
//! - **twb** - workbook XML
//! - **tds** - data source XML
//! - **twbx** - packaged workbook (ZIP with a `.twb` entry)
//! - **tdsx** - packaged data source (ZIP with a `.tds` entry)
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │  .twb / .tds │     │ .twbx / .tdsx│
//! └──────┬───────┘     └──────┬───────┘
//!        │                    │ read_archive
//!        ▼                    ▼
//! ┌──────────────────────────────────────┐
//! │ parse_document                        │
//! │  - parse_tree                         │
//! │  - on failure: repair_namespaces,     │
//! │    parse_tree again                   │
//! └──────────────────────────────────────┘
//!        │
//!        ▼
//!   LoadedDocument { tree, raw_text, entry }
//! ```

mod archive;
mod error;

use std::path::Path;

pub use archive::{DOCUMENT_EXTENSIONS, is_archive, read_archive, rewrite_archive, save_document};
pub use error::{DocumentError, Result};

use crate::tree::{Node, parse_tree};

/// Namespace prefixes emitted by some data model documents without a
/// matching `xmlns:` declaration.
const BROKEN_PREFIXES: &[(&str, &str)] = &[(" user:", " ")];

/// File extensions accepted as input.
pub fn supported_extensions() -> &'static [&'static str] {
    &["twb", "twbx", "tds", "tdsx"]
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| supported_extensions().contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// A parsed document together with its raw XML text.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub tree: Node,
    /// The document XML as read, used by style-guide validation.
    pub raw_text: String,
    /// Name of the document entry when it came from an archive.
    pub entry: Option<String>,
}

/// Open a workbook or data source from disk, packaged or not.
pub fn open_document(path: &Path) -> Result<LoadedDocument> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::info!("Opening {name}");
    open_document_bytes(&bytes, &name)
}

/// Open a workbook or data source from an in-memory upload.
pub fn open_document_bytes(bytes: &[u8], name: &str) -> Result<LoadedDocument> {
    if is_archive(bytes) {
        return read_archive(bytes, name);
    }
    let raw_text = String::from_utf8(bytes.to_vec())
        .map_err(|e| DocumentError::MalformedDocument(format!("{name}: not UTF-8: {e}")))?;
    let tree = parse_document(&raw_text)?;
    Ok(LoadedDocument {
        tree,
        raw_text,
        entry: None,
    })
}

/// Parse document text, retrying once after namespace repair.
pub fn parse_document(text: &str) -> Result<Node> {
    match parse_tree(text) {
        Ok(tree) => Ok(tree),
        Err(first) => {
            tracing::debug!("Parse failed ({first}), retrying with namespace repair");
            parse_tree(&repair_namespaces(text))
                .map_err(|e| DocumentError::MalformedDocument(e.to_string()))
        }
    }
}

/// Remove undeclared namespace prefixes so the document parses.
pub fn repair_namespaces(text: &str) -> String {
    BROKEN_PREFIXES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_repairs_namespace() {
        let text = "<datasource name='x'><column user:auto-column='numrec' name='[n]'/></datasource>";
        let tree = parse_document(text).unwrap();
        let column = tree.child("column").unwrap();
        assert_eq!(column.attr("auto-column"), "numrec");
    }

    #[test]
    fn test_parse_document_malformed_is_fatal() {
        let err = parse_document("<workbook><datasources></workbook>").unwrap_err();
        assert!(matches!(err, DocumentError::MalformedDocument(_)));
    }

    #[test]
    fn test_declared_prefix_needs_no_repair() {
        let text = "<workbook xmlns:user='u'><group user:ui-builder='filter-group'/></workbook>";
        let tree = parse_document(text).unwrap();
        assert_eq!(tree.child("group").unwrap().attr("user:ui-builder"), "filter-group");
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("Sales.twbx")));
        assert!(is_supported(Path::new("dir/Sales.TDS")));
        assert!(!is_supported(Path::new("Sales.xlsx")));
        assert!(!is_supported(Path::new("Sales")));
    }

    #[test]
    fn test_open_document_bytes_plain() {
        let loaded = open_document_bytes(b"<datasource name='a'/>", "a.tds").unwrap();
        assert_eq!(loaded.tree.tag(), "datasource");
        assert_eq!(loaded.raw_text, "<datasource name='a'/>");
        assert!(loaded.entry.is_none());
    }
}
