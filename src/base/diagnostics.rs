//! Diagnostics: recoverable conditions met while documenting a workbook.
//!
//! Nothing in here stops extraction. Each entry is also logged through
//! `tracing` at the level matching its severity, so callers that only look
//! at logs see the same information.

use std::fmt;

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Info,
    Hint,
}

/// What kind of condition was met.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A `datasources`, `worksheets`, or `dashboards` section is absent.
    MissingSection,
    /// Formula resolution ran out of passes before reaching a fixed point.
    UnresolvedReference,
    /// More than one combinator `groupfilter` classified the same set.
    AmbiguousSet,
    /// The secondary dashboard filter lookup found nothing.
    BestEffortLookupFailure,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::MissingSection => Severity::Info,
            DiagnosticKind::UnresolvedReference | DiagnosticKind::AmbiguousSet => {
                Severity::Warning
            }
            DiagnosticKind::BestEffortLookupFailure => Severity::Hint,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::MissingSection => "missing section",
            DiagnosticKind::UnresolvedReference => "unresolved reference",
            DiagnosticKind::AmbiguousSet => "ambiguous set",
            DiagnosticKind::BestEffortLookupFailure => "lookup failure",
        }
    }
}

/// A single diagnostic message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The data source, worksheet, or dashboard the message is about.
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.kind.as_str(), self.subject, self.message)
    }
}

/// Collected diagnostics for one document, in the order they were raised.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn push(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            subject: subject.into(),
            message: message.into(),
        };
        match diagnostic.severity() {
            Severity::Warning => tracing::warn!("{diagnostic}"),
            Severity::Info => tracing::info!("{diagnostic}"),
            Severity::Hint => tracing::debug!("{diagnostic}"),
        }
        self.entries.push(diagnostic);
    }

    pub fn missing_section(&mut self, section: &str) {
        self.push(
            DiagnosticKind::MissingSection,
            section,
            format!("No {section} found"),
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity() == Severity::Warning)
    }
}
