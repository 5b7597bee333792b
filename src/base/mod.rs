//! Foundation types shared by every stage of documentation.
//!
//! - [`Diagnostics`] - recoverable conditions raised during extraction
//!
//! This module has NO dependencies on other tabdoc modules.

mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
