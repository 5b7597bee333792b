//! Error types for document ingestion and report emission.

use thiserror::Error;

/// Errors that can occur while loading, saving, or documenting a workbook.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// XML parsing or serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error (for `.twbx` / `.tdsx`).
    #[error("Archive error: {0}")]
    Archive(String),

    /// The archive holds no parseable `.twb` or `.tds` entry.
    #[error("No workbook or data source found in archive {0}")]
    NoDocumentInArchive(String),

    /// The document could not be parsed, even after namespace repair.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Spreadsheet or JSON report could not be produced.
    #[error("Report error: {0}")]
    Report(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive(message.into())
    }

    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn report(message: impl Into<String>) -> Self {
        Self::Report(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = DocumentError> = std::result::Result<T, E>;
