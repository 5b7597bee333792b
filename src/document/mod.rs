//! Document model: classify a parsed document and run the extractors.
//!
//! ```text
//! root tag == "datasource"   → Datasource: extract the root itself
//! anything else              → Workbook:
//!     first <datasources>    → each direct <datasource>
//!     first <worksheets>     → each direct <worksheet>
//!     first <dashboards>     → each direct <dashboard>
//! ```
//!
//! A missing section is recorded as a diagnostic and leaves its lists empty.

use std::path::Path;

use crate::base::Diagnostics;
use crate::extract::{
    ExtractOptions, ExtractionResult, extract_dashboard, extract_datasource, extract_worksheet,
};
use crate::interchange::{LoadedDocument, Result, open_document};
use crate::report::Sheet;
use crate::style::{StyleFinding, StyleGuide, StyleValidator};
use crate::tree::Node;

/// Shape of the input document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// A stand-alone data source (`.tds`).
    Datasource,
    /// A workbook (`.twb`), or any other root.
    Workbook,
}

impl DocumentKind {
    pub fn classify(root: &Node) -> Self {
        if root.tag() == "datasource" {
            DocumentKind::Datasource
        } else {
            DocumentKind::Workbook
        }
    }
}

/// Everything documented about one workbook or data source.
#[derive(Clone, Debug)]
pub struct WorkbookDocumentation {
    kind: DocumentKind,
    result: ExtractionResult,
    styles: Vec<StyleFinding>,
}

impl WorkbookDocumentation {
    /// Document an already parsed tree.
    pub fn from_tree(root: &Node, options: &ExtractOptions) -> Self {
        let kind = DocumentKind::classify(root);
        let mut result = ExtractionResult::new();

        match kind {
            DocumentKind::Datasource => extract_datasource(&mut result, root, options),
            DocumentKind::Workbook => {
                match root.find("datasources") {
                    Some(datasources) => {
                        for datasource in datasources.children_named("datasource") {
                            extract_datasource(&mut result, datasource, options);
                        }
                    }
                    None => result.diagnostics.missing_section("data sources"),
                }
                match root.find("worksheets") {
                    Some(worksheets) => {
                        for worksheet in worksheets.children_named("worksheet") {
                            extract_worksheet(&mut result, worksheet, options);
                        }
                    }
                    None => result.diagnostics.missing_section("worksheets"),
                }
                match root.find("dashboards") {
                    Some(dashboards) => {
                        for dashboard in dashboards.children_named("dashboard") {
                            extract_dashboard(&mut result, root, dashboard);
                        }
                    }
                    None => result.diagnostics.missing_section("dashboards"),
                }
            }
        }

        Self {
            kind,
            result,
            styles: Vec::new(),
        }
    }

    pub fn from_loaded(loaded: &LoadedDocument, options: &ExtractOptions) -> Self {
        Self::from_tree(&loaded.tree, options)
    }

    /// Open and document a file. A document that fails to parse is an error.
    pub fn open(path: &Path, options: &ExtractOptions) -> Result<Self> {
        let loaded = open_document(path)?;
        tracing::info!("Starting to process {}", path.display());
        Ok(Self::from_loaded(&loaded, options))
    }

    /// Run a style validator over the document's raw text.
    pub fn validate_styles(
        &mut self,
        guide: &StyleGuide,
        validator: &dyn StyleValidator,
        raw_text: &str,
    ) {
        self.styles = validator.validate(guide, raw_text);
        tracing::info!("Found {} style findings", self.styles.len());
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn result(&self) -> &ExtractionResult {
        &self.result
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.result.diagnostics
    }

    pub fn style_findings(&self) -> &[StyleFinding] {
        &self.styles
    }

    /// Report sheets in emission order. Worksheet and dashboard sheets are
    /// only produced for workbooks.
    pub fn sheets(&self) -> Vec<Sheet> {
        let r = &self.result;
        let mut sheets = vec![
            Sheet::from_records("Connections", &r.connections),
            Sheet::from_records("Parameters", &r.parameters),
            Sheet::from_records("Tables", &r.tables),
            Sheet::from_records("Custom SQL", &r.custom_sql_queries),
            Sheet::from_records("Columns", &r.columns),
            Sheet::from_records("Calculations", &r.calculations),
            Sheet::from_records("Sets", &r.sets),
            Sheet::from_findings("Style validation", &self.styles),
        ];

        if self.kind == DocumentKind::Workbook {
            sheets.extend([
                Sheet::from_records("Worksheet Captions", &r.worksheet_captions),
                Sheet::from_records("Worksheet Columns", &r.worksheet_columns),
                Sheet::from_records(
                    "Worksheet Dimensions",
                    r.worksheet_columns.iter().filter(|u| u.role == "dimension"),
                ),
                Sheet::from_records(
                    "Worksheet Measures",
                    r.worksheet_columns.iter().filter(|u| u.role == "measure"),
                ),
                Sheet::from_records("Dashboard Objects", &r.dashboard_objects),
            ]);
        }
        sheets
    }
}
