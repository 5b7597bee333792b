//! # tabdoc-base
//!
//! Core library for documenting Tableau workbooks and data sources:
//! connections, tables, fields, calculations, sets, worksheet field usage,
//! and dashboard objects, with calculated-field references resolved into
//! readable formulas.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! document    → classify a document, run extractors, build report sheets
//!   ↓
//! extract     → per-entity extractors and flat record types
//!   ↓
//! resolve     → bounded fixed-point reference resolution
//!   ↓
//! interchange → .twb/.tds/.twbx/.tdsx loading and saving, errors
//!   ↓
//! tree        → labelled XML tree and attribute access
//!   ↓
//! base        → diagnostics
//! ```
//!
//! `report`, `style`, and `config` sit beside `document` and feed it or
//! consume its output.

// ============================================================================
// MODULES (dependency order: base → tree → interchange → resolve → extract → document)
// ============================================================================

/// Foundation types: diagnostics raised while documenting
pub mod base;

/// Labelled document tree, XML reader and writer
pub mod tree;

/// Document loading and saving: plain and packaged files, namespace repair
pub mod interchange;

/// Reference resolution inside calculated-field formulas
pub mod resolve;

/// Entity extractors and record types
pub mod extract;

/// Document classification and aggregation
pub mod document;

/// Report emitters: spreadsheet and JSON
pub mod report;

/// Style-guide loading and the validator hook
pub mod style;

/// JSON run configuration
pub mod config;

// Re-export commonly needed items
pub use base::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use document::{DocumentKind, WorkbookDocumentation};
pub use extract::{ExtractOptions, ExtractionResult, Record};
pub use interchange::{DocumentError, LoadedDocument, Result, open_document, save_document};
pub use report::{JsonReport, ReportEmitter, ReportFormat, Sheet, XlsxReport};
pub use tree::Node;
