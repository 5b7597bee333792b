//! Style-guide validation hook.
//!
//! A style guide is a JSON object of rules. Checking a workbook against it is
//! left to a [`StyleValidator`] supplied by the caller; this module only
//! loads the guide and carries the findings into the report.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::interchange::{DocumentError, Result};

/// Documentation key that style guides carry alongside their rules.
const README_KEY: &str = "_README";

/// Parsed style-guide rules, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleGuide {
    rules: IndexMap<String, Value>,
}

impl StyleGuide {
    /// Parse a style guide from JSON text.
    ///
    /// The top level must be an object. Its `_README` entry is dropped.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut rules: IndexMap<String, Value> = serde_json::from_str(text).map_err(|e| {
            DocumentError::json(format!(
                "Invalid style guide: {e}. Check for double quotes and matching brackets."
            ))
        })?;
        rules.shift_remove(README_KEY);
        Ok(Self { rules })
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn rules(&self) -> &IndexMap<String, Value> {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&Value> {
        self.rules.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One row of style validation output. The validator picks the columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleFinding {
    pub fields: IndexMap<String, String>,
}

impl StyleFinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }
}

/// Checks a document's raw XML text against a style guide.
pub trait StyleValidator {
    fn validate(&self, guide: &StyleGuide, raw_text: &str) -> Vec<StyleFinding>;
}

impl<F> StyleValidator for F
where
    F: Fn(&StyleGuide, &str) -> Vec<StyleFinding>,
{
    fn validate(&self, guide: &StyleGuide, raw_text: &str) -> Vec<StyleFinding> {
        self(guide, raw_text)
    }
}
