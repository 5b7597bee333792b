//! Worksheet extractors: field usage and captions.

use super::context::{ExtractOptions, join_runs};
use super::types::{Calculation, WorksheetCaption, WorksheetColumn};
use crate::base::Diagnostics;
use crate::resolve::resolve_worksheet_columns;
use crate::tree::{Node, attr};

/// Mis-encoded bullet left in some caption runs.
const CAPTION_ARTIFACT: &str = "Ã†";

/// Field type as declared on a `column`: `ordinal` → continuous, `nominal` → discrete.
pub fn normalize_field_type(raw: &str) -> &str {
    match raw {
        "ordinal" => "continuous",
        "nominal" => "discrete",
        other => other,
    }
}

/// Field type as declared on a `column-instance`.
///
/// Only `quantitative` and `nominal` are recognized; anything else keeps
/// the type already derived from the column.
pub fn normalize_instance_type<'a>(raw: &str, current: &'a str) -> &'a str {
    match raw {
        "quantitative" => "continuous",
        "nominal" => "discrete",
        _ => current,
    }
}

/// Caption of the data source named `name`, as declared inside the worksheet.
fn worksheet_datasource_caption<'a>(worksheet: &'a Node, name: &'a str) -> Option<&'a str> {
    worksheet
        .descendants_named("datasources")
        .flat_map(|datasources| datasources.children_named("datasource"))
        .filter(|datasource| datasource.attr_is("name", name))
        .filter_map(|datasource| datasource.attr_opt("caption"))
        .last()
}

pub(super) fn extract_worksheet_columns(
    usages: &mut Vec<WorksheetColumn>,
    calculations: &[Calculation],
    diagnostics: &mut Diagnostics,
    options: &ExtractOptions,
    worksheet: &Node,
) {
    let worksheet_name = worksheet.attr("name");
    let start = usages.len();

    for dependencies in worksheet.descendants_named("datasource-dependencies") {
        let declared = dependencies.attr("datasource");
        let datasource = worksheet_datasource_caption(worksheet, declared).unwrap_or(declared);

        for column in dependencies.children_named("column") {
            let name = column.attr("name");
            let mut role = column.attr("role");
            let mut column_type = normalize_field_type(column.attr("type"));
            let mut computation = "";

            let instances = dependencies
                .children_named("column-instance")
                .filter(|instance| instance.attr_is("column", name));
            for instance in instances {
                computation = instance.attr("derivation");
                let raw_type = instance.attr("type");
                if !raw_type.is_empty() {
                    column_type = normalize_instance_type(raw_type, column_type);
                }
                if computation != "None" {
                    role = "measure";
                }
            }

            usages.push(WorksheetColumn {
                worksheet: worksheet_name.to_string(),
                datasource: datasource.to_string(),
                caption: column.attr("caption").to_string(),
                name: name.to_string(),
                role: role.to_string(),
                datatype: column.attr("datatype").to_string(),
                column_type: column_type.to_string(),
                calculation: attr(column.find("calculation"), "formula").to_string(),
                computation: computation.to_string(),
                ..WorksheetColumn::default()
            });
        }
    }

    resolve_worksheet_columns(
        &mut usages[start..],
        calculations,
        options.max_resolve_passes,
        diagnostics,
    );
    tracing::info!("Found {} columns in {worksheet_name}", usages.len() - start);
}

pub(super) fn extract_worksheet_captions(captions: &mut Vec<WorksheetCaption>, worksheet: &Node) {
    let worksheet_name = worksheet.attr("name");
    let caption = join_runs(
        worksheet
            .select(&["layout-options", "caption", "formatted-text", "run"])
            .into_iter()
            .map(|run| run.text().replace(CAPTION_ARTIFACT, "")),
    );

    let found = !caption.is_empty();
    if found {
        captions.push(WorksheetCaption {
            worksheet: worksheet_name.to_string(),
            caption,
        });
    }
    tracing::info!("Found {} captions in {worksheet_name}", usize::from(found));
}
