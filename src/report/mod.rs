//! Report emission.
//!
//! Extraction output is handed over as a list of [`Sheet`]s: a display name,
//! a header row, and string rows. Emitters turn that list into a file.
//!
//! - [`XlsxReport`] - one spreadsheet tab per sheet, bold header row
//! - [`JsonReport`] - one JSON object keyed by sheet name

mod json;
mod xlsx;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use json::JsonReport;
pub use xlsx::XlsxReport;

use crate::extract::Record;
use crate::interchange::Result;
use crate::style::StyleFinding;

/// One named table of report output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    /// Header row. Empty when the sheet has no rows.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn from_records<'a, R, I>(name: impl Into<String>, records: I) -> Self
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let rows: Vec<Vec<String>> = records
            .into_iter()
            .map(|record| record.values().into_iter().map(str::to_string).collect())
            .collect();
        let columns = if rows.is_empty() {
            Vec::new()
        } else {
            R::COLUMNS.iter().map(|c| c.to_string()).collect()
        };
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Style findings take their columns from the first finding.
    pub fn from_findings(name: impl Into<String>, findings: &[StyleFinding]) -> Self {
        let columns: Vec<String> = findings
            .first()
            .map(|first| first.fields.keys().cloned().collect())
            .unwrap_or_default();
        let rows = findings
            .iter()
            .map(|finding| {
                columns
                    .iter()
                    .map(|column| finding.fields.get(column).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Turns sheets into the bytes of an output file.
pub trait ReportEmitter {
    fn emit(&self, sheets: &[Sheet]) -> Result<Vec<u8>>;

    /// File name suffix appended to the input's stem.
    fn default_suffix(&self) -> &'static str;
}

/// Output file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Json,
}

impl ReportFormat {
    pub fn emitter(self) -> Box<dyn ReportEmitter> {
        match self {
            ReportFormat::Xlsx => Box::new(XlsxReport),
            ReportFormat::Json => Box::new(JsonReport),
        }
    }
}

/// `<out_dir>/<input stem><suffix>`.
pub fn output_path(input: &Path, out_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_dir.join(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Connection;

    #[test]
    fn test_output_path() {
        let path = output_path(
            Path::new("/data/Sales Overview.twbx"),
            Path::new("/out"),
            XlsxReport.default_suffix(),
        );
        assert_eq!(path, PathBuf::from("/out/Sales Overview Documentation.xlsx"));
    }

    #[test]
    fn test_sheet_from_records() {
        let connections = vec![Connection {
            datasource: "Sales".to_string(),
            connection: "sales".to_string(),
            class: "postgres".to_string(),
        }];
        let sheet = Sheet::from_records("Connections", &connections);
        assert_eq!(sheet.columns, vec!["datasource", "connection", "type"]);
        assert_eq!(sheet.rows, vec![vec!["Sales", "sales", "postgres"]]);
    }

    #[test]
    fn test_empty_sheet_has_no_header() {
        let sheet = Sheet::from_records::<Connection, _>("Connections", &[]);
        assert!(sheet.is_empty());
        assert!(sheet.columns.is_empty());
    }

    #[test]
    fn test_sheet_from_findings() {
        let findings = vec![
            StyleFinding::new()
                .with_field("worksheet", "Overview")
                .with_field("issue", "font"),
            StyleFinding::new().with_field("issue", "color"),
        ];
        let sheet = Sheet::from_findings("Style validation", &findings);
        assert_eq!(sheet.columns, vec!["worksheet", "issue"]);
        assert_eq!(sheet.rows[1], vec!["", "color"]);
    }
}
