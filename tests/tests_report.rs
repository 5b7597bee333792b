//! Report emission for whole documents.

#[path = "helpers/mod.rs"]
mod helpers;

use std::io::{Cursor, Read};

use helpers::workbook_fixtures::{POSTGRES_DATASOURCE, SALES_WORKBOOK};
use rstest::rstest;
use tabdoc::interchange::parse_document;
use tabdoc::report::output_path;
use tabdoc::{ExtractOptions, ReportFormat, WorkbookDocumentation};
use tempfile::TempDir;

fn document(text: &str) -> WorkbookDocumentation {
    let tree = parse_document(text).unwrap();
    WorkbookDocumentation::from_tree(&tree, &ExtractOptions::default())
}

fn sheet_names_in_xlsx(bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut workbook = String::new();
    archive
        .by_name("xl/workbook.xml")
        .unwrap()
        .read_to_string(&mut workbook)
        .unwrap();
    workbook
        .split("<sheet ")
        .skip(1)
        .filter_map(|sheet| {
            let start = sheet.find("name=\"")? + "name=\"".len();
            let end = start + sheet[start..].find('"')?;
            Some(sheet[start..end].to_string())
        })
        .collect()
}

#[rstest]
#[case(POSTGRES_DATASOURCE, 8)]
#[case(SALES_WORKBOOK, 13)]
fn test_xlsx_has_one_tab_per_sheet(#[case] text: &str, #[case] tabs: usize) {
    let doc = document(text);
    let bytes = ReportFormat::Xlsx.emitter().emit(&doc.sheets()).unwrap();

    let names = sheet_names_in_xlsx(&bytes);
    assert_eq!(names.len(), tabs);
    assert_eq!(names[0], "Connections");
    assert_eq!(names[7], "Style validation");
}

#[test]
fn test_workbook_report_written_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Sales.twb");
    std::fs::write(&input, SALES_WORKBOOK).unwrap();

    let doc = WorkbookDocumentation::open(&input, &ExtractOptions::default()).unwrap();
    let emitter = ReportFormat::Xlsx.emitter();
    let out_file = output_path(&input, dir.path(), emitter.default_suffix());
    std::fs::write(&out_file, emitter.emit(&doc.sheets()).unwrap()).unwrap();

    assert_eq!(out_file.file_name().unwrap(), "Sales Documentation.xlsx");
    let names = sheet_names_in_xlsx(&std::fs::read(&out_file).unwrap());
    assert_eq!(
        &names[8..],
        &[
            "Worksheet Captions",
            "Worksheet Columns",
            "Worksheet Dimensions",
            "Worksheet Measures",
            "Dashboard Objects",
        ]
    );
}

#[test]
fn test_json_report_content() {
    let doc = document(SALES_WORKBOOK);
    let bytes = ReportFormat::Json.emitter().emit(&doc.sheets()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["Connections"][0]["type"], "postgres");
    assert_eq!(value["Calculations"][1]["calc_renamed"], "[Double Margin] + 1");
    assert_eq!(value["Worksheet Dimensions"].as_array().unwrap().len(), 1);
    assert_eq!(value["Worksheet Measures"].as_array().unwrap().len(), 3);
    assert_eq!(value["Style validation"], serde_json::json!([]));
    assert_eq!(value["Dashboard Objects"][1]["dashboard_object"], "Pick a region");
}
