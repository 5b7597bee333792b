//! Run configuration, read from a JSON file.
//!
//! ```json
//! {
//!   "input": "workbooks/",
//!   "output_dir": "docs/",
//!   "output_suffix": " Documentation.xlsx",
//!   "max_resolve_passes": 50,
//!   "format": "xlsx"
//! }
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::extract::ExtractOptions;
use crate::interchange::{DocumentError, Result};
use crate::report::ReportFormat;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumenterConfig {
    /// A workbook, a data source, or a directory of them.
    pub input: Option<PathBuf>,
    /// Where reports are written. Defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    /// Appended to the input file stem. Defaults to the format's suffix.
    pub output_suffix: Option<String>,
    pub max_resolve_passes: Option<usize>,
    pub format: ReportFormat,
}

impl DocumenterConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| DocumentError::config(e.to_string()))?;
        if config.max_resolve_passes == Some(0) {
            return Err(DocumentError::config("max_resolve_passes must be at least 1"));
        }
        Ok(config)
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
            .map_err(|e| DocumentError::config(format!("{}: {e}", path.display())))
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_resolve_passes: self.max_resolve_passes,
        }
    }

    /// Suffix for report file names, falling back to the format's default.
    pub fn suffix(&self) -> String {
        self.output_suffix
            .clone()
            .unwrap_or_else(|| self.format.emitter().default_suffix().to_string())
    }
}
