//! Packaged workbook (`.twbx`) and data source (`.tdsx`) support.
//!
//! Packaged files are ZIP archives holding the `.twb`/`.tds` XML document
//! next to extracts and images:
//!
//! ```text
//! Sales.twbx (ZIP archive)
//! ├── Sales.twb              # workbook document
//! ├── Data/
//! │   └── Extracts/
//! │       └── sales.hyper
//! └── Image/
//!     └── logo.png
//! ```
//!
//! Only entries with a `twb` or `tds` extension are candidates; cache entries
//! inside the archive can also be valid XML and are skipped.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{DocumentError, LoadedDocument, Result, parse_document};
use crate::tree::{Node, write_tree};

/// Extensions of the document entry inside a packaged file.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["twb", "tds"];

/// Quick check for the ZIP local file header magic.
pub fn is_archive(input: &[u8]) -> bool {
    input.len() >= 4 && &input[0..4] == b"PK\x03\x04"
}

fn has_document_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| DOCUMENT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Read the first `twb`/`tds` entry of an archive that parses.
pub fn read_archive(input: &[u8], archive_name: &str) -> Result<LoadedDocument> {
    let mut archive = ZipArchive::new(Cursor::new(input))
        .map_err(|e| DocumentError::archive(format!("Failed to open archive: {e}")))?;

    let candidates: Vec<String> = (0..archive.len())
        .filter_map(|i| {
            let file = archive.by_index(i).ok()?;
            let name = file.name().to_string();
            (!file.is_dir() && has_document_extension(&name)).then_some(name)
        })
        .collect();

    for entry in candidates {
        let mut file = archive
            .by_name(&entry)
            .map_err(|e| DocumentError::archive(format!("Failed to read {entry}: {e}")))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| DocumentError::archive(format!("Failed to read {entry}: {e}")))?;

        let Ok(raw_text) = String::from_utf8(bytes) else {
            tracing::debug!("Skipping {entry}: not UTF-8");
            continue;
        };
        match parse_document(&raw_text) {
            Ok(tree) => {
                return Ok(LoadedDocument {
                    tree,
                    raw_text,
                    entry: Some(entry),
                });
            }
            Err(e) => tracing::debug!("Skipping {entry}: {e}"),
        }
    }

    Err(DocumentError::NoDocumentInArchive(archive_name.to_string()))
}

/// Rebuild `container` with its document entry replaced by `tree`.
///
/// Every other entry is copied as-is. Directory entries are not written,
/// which is what Tableau Desktop and Server expect of a packaged file.
pub fn rewrite_archive(container: &[u8], entry: &str, tree: &Node) -> Result<Vec<u8>> {
    let mut source = ZipArchive::new(Cursor::new(container))
        .map_err(|e| DocumentError::archive(format!("Failed to open archive: {e}")))?;
    let document = write_tree(tree)?;

    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for i in 0..source.len() {
        let mut file = source
            .by_index(i)
            .map_err(|e| DocumentError::archive(format!("Failed to read entry {i}: {e}")))?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        zip.start_file(name.as_str(), options)
            .map_err(|e| DocumentError::archive(format!("Failed to create {name}: {e}")))?;
        if name == entry {
            zip.write_all(&document)
                .map_err(|e| DocumentError::archive(format!("Failed to write {name}: {e}")))?;
        } else {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|e| DocumentError::archive(format!("Failed to read {name}: {e}")))?;
            zip.write_all(&bytes)
                .map_err(|e| DocumentError::archive(format!("Failed to write {name}: {e}")))?;
        }
    }

    zip.finish()
        .map_err(|e| DocumentError::archive(format!("Failed to finalize archive: {e}")))?;
    Ok(buffer.into_inner())
}

/// Save `tree` next to (or over) `container`.
///
/// Plain documents are written as XML; packaged files are rebuilt with the
/// document entry replaced.
pub fn save_document(tree: &Node, container: &Path, new_path: Option<&Path>) -> Result<()> {
    let target = new_path.unwrap_or(container);
    let existing = std::fs::read(container)?;

    if is_archive(&existing) {
        let name = container.display().to_string();
        let loaded = read_archive(&existing, &name)?;
        let entry = loaded
            .entry
            .ok_or_else(|| DocumentError::NoDocumentInArchive(name.clone()))?;
        let rebuilt = rewrite_archive(&existing, &entry, tree)?;
        std::fs::write(target, rebuilt)?;
    } else {
        std::fs::write(target, write_tree(tree)?)?;
    }
    tracing::info!("Saved {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_is_archive() {
        assert!(is_archive(b"PK\x03\x04rest of zip..."));
        assert!(!is_archive(b"<workbook/>"));
        assert!(!is_archive(b"PK"));
    }

    #[test]
    fn test_read_archive_skips_non_documents() {
        let bytes = build_archive(&[
            ("Data/cache.xml", "<cache/>"),
            ("broken.twb", "<workbook>"),
            ("Sales.twb", "<workbook><datasources/></workbook>"),
        ]);
        let loaded = read_archive(&bytes, "Sales.twbx").unwrap();
        assert_eq!(loaded.entry.as_deref(), Some("Sales.twb"));
        assert_eq!(loaded.tree.tag(), "workbook");
    }

    #[test]
    fn test_read_archive_without_document() {
        let bytes = build_archive(&[("readme.txt", "hello")]);
        let err = read_archive(&bytes, "empty.twbx").unwrap_err();
        assert!(matches!(err, DocumentError::NoDocumentInArchive(_)));
    }

    #[test]
    fn test_rewrite_archive_replaces_document_only() {
        let bytes = build_archive(&[
            ("Sales.twb", "<workbook/>"),
            ("Image/logo.png", "not really a png"),
        ]);
        let tree = Node::new("workbook").with_attr("version", "18.1");
        let rebuilt = rewrite_archive(&bytes, "Sales.twb", &tree).unwrap();

        let loaded = read_archive(&rebuilt, "Sales.twbx").unwrap();
        assert_eq!(loaded.tree.attr("version"), "18.1");

        let mut archive = ZipArchive::new(Cursor::new(rebuilt)).unwrap();
        let mut logo = String::new();
        archive
            .by_name("Image/logo.png")
            .unwrap()
            .read_to_string(&mut logo)
            .unwrap();
        assert_eq!(logo, "not really a png");
    }
}
