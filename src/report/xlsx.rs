//! Spreadsheet report via `rust_xlsxwriter`.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::{ReportEmitter, Sheet};
use crate::interchange::{DocumentError, Result};

/// Longest text a spreadsheet cell accepts, in characters.
const MAX_CELL_CHARS: usize = 32_767;

/// Writes one worksheet per sheet, header row in bold.
#[derive(Clone, Copy, Debug, Default)]
pub struct XlsxReport;

impl ReportEmitter for XlsxReport {
    fn emit(&self, sheets: &[Sheet]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(xlsx_error)?;
            write_row(worksheet, 0, &sheet.columns, Some(&header))?;
            for (index, row) in sheet.rows.iter().enumerate() {
                let row_num = u32::try_from(index + 1)
                    .map_err(|_| DocumentError::report(format!("{}: too many rows", sheet.name)))?;
                write_row(worksheet, row_num, row, None)?;
            }
            tracing::debug!("Wrote {} rows to {}", sheet.rows.len(), sheet.name);
        }

        workbook.save_to_buffer().map_err(xlsx_error)
    }

    fn default_suffix(&self) -> &'static str {
        " Documentation.xlsx"
    }
}

fn write_row(worksheet: &mut Worksheet, row: u32, values: &[String], format: Option<&Format>) -> Result<()> {
    for (index, value) in values.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        let col = u16::try_from(index)
            .map_err(|_| DocumentError::report(format!("too many columns in row {row}")))?;
        let text = truncate_cell(value);
        let written = match format {
            Some(format) => worksheet.write_string_with_format(row, col, text, format),
            None => worksheet.write_string(row, col, text),
        };
        written.map_err(xlsx_error)?;
    }
    Ok(())
}

/// Cut text to the cell limit on a character boundary.
fn truncate_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            tracing::warn!("Cell text truncated to {MAX_CELL_CHARS} characters");
            &value[..end]
        }
        None => value,
    }
}

fn xlsx_error(e: XlsxError) -> DocumentError {
    DocumentError::report(e.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut text = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_emit_sheets_in_order() {
        let sheets = vec![
            Sheet {
                name: "Connections".to_string(),
                columns: vec!["datasource".to_string(), "connection".to_string(), "type".to_string()],
                rows: vec![vec!["Sales".to_string(), "sales".to_string(), "postgres".to_string()]],
            },
            Sheet {
                name: "Parameters".to_string(),
                ..Sheet::default()
            },
        ];
        let bytes = XlsxReport.emit(&sheets).unwrap();

        let workbook = read_entry(&bytes, "xl/workbook.xml");
        let connections = workbook.find("name=\"Connections\"").unwrap();
        let parameters = workbook.find("name=\"Parameters\"").unwrap();
        assert!(connections < parameters);

        let strings = read_entry(&bytes, "xl/sharedStrings.xml");
        assert!(strings.contains("postgres"));
        assert!(strings.contains("datasource"));
    }

    #[test]
    fn test_truncate_cell() {
        let long = "é".repeat(MAX_CELL_CHARS + 5);
        assert_eq!(truncate_cell(&long).chars().count(), MAX_CELL_CHARS);
        assert_eq!(truncate_cell("short"), "short");
    }
}
