//! JSON report: `{ "<sheet>": [ { "<column>": "<value>", .. }, .. ], .. }`.

use indexmap::IndexMap;

use super::{ReportEmitter, Sheet};
use crate::interchange::{DocumentError, Result};

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonReport;

impl ReportEmitter for JsonReport {
    fn emit(&self, sheets: &[Sheet]) -> Result<Vec<u8>> {
        let document: IndexMap<&str, Vec<IndexMap<&str, &str>>> = sheets
            .iter()
            .map(|sheet| {
                let rows = sheet
                    .rows
                    .iter()
                    .map(|row| {
                        sheet
                            .columns
                            .iter()
                            .map(String::as_str)
                            .zip(row.iter().map(String::as_str))
                            .collect()
                    })
                    .collect();
                (sheet.name.as_str(), rows)
            })
            .collect();

        let mut bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| DocumentError::json(e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn default_suffix(&self) -> &'static str {
        " Documentation.json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_keeps_column_order() {
        let sheets = vec![
            Sheet {
                name: "Worksheet Captions".to_string(),
                columns: vec!["worksheet".to_string(), "caption".to_string()],
                rows: vec![vec!["Overview".to_string(), "Sales by region".to_string()]],
            },
            Sheet {
                name: "Dashboard Objects".to_string(),
                ..Sheet::default()
            },
        ];
        let bytes = JsonReport.emit(&sheets).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["Worksheet Captions"][0]["caption"], "Sales by region");
        assert_eq!(value["Dashboard Objects"], serde_json::json!([]));
        assert!(text.find("\"worksheet\"").unwrap() < text.find("\"caption\"").unwrap());
    }
}
