//! Field extractors: parameters, plain columns, and calculations.
//!
//! All three are `column` children of the data source:
//!
//! | kind        | selected by                                          |
//! |-------------|------------------------------------------------------|
//! | parameter   | data source has `hasconnection='false'`              |
//! | column      | no `calculation` child and no `aliases` child        |
//! | calculation | has a `caption` attribute and a `calculation` child  |

use super::context::{ExtractionContext, collect_runs};
use super::types::{Calculation, Column, Parameter};
use crate::base::Diagnostics;
use crate::resolve::resolve_calculations;
use crate::tree::{Node, attr};

pub(super) fn extract_parameters(
    parameters: &mut Vec<Parameter>,
    ctx: &ExtractionContext<'_>,
    datasource: &Node,
) {
    if datasource.attr_is("hasconnection", "false") {
        for column in datasource.children_named("column") {
            parameters.push(Parameter {
                datasource: ctx.datasource.clone(),
                caption: column.attr("caption").to_string(),
                value: column.attr("value").to_string(),
                datatype: column.attr("datatype").to_string(),
                param_type: column.attr("type").to_string(),
                role: column.attr("role").to_string(),
                name: column.attr("name").to_string(),
                description: collect_runs(column),
            });
        }
    }
    tracing::info!("Found {} parameters", parameters.len());
}

pub(super) fn extract_columns(columns: &mut Vec<Column>, ctx: &ExtractionContext<'_>, datasource: &Node) {
    for column in datasource.children_named("column") {
        if column.has_child("calculation") || column.has_child("aliases") {
            continue;
        }
        let key = column.attr("name");
        let (table, physical) = physical_mapping(datasource, key);
        columns.push(Column {
            datasource: ctx.datasource.clone(),
            key: key.to_string(),
            table,
            column: physical,
            caption: column.attr("caption").to_string(),
            datatype: column.attr("datatype").to_string(),
            hidden: column.attr("hidden").to_string(),
            description: collect_runs(column),
        });
    }
    tracing::info!("Found {} columns", columns.len());
}

/// Look up `connection/cols/map[@key=key]` and split `[Table].[Column]`.
///
/// Missing mappings give two empty strings.
fn physical_mapping(datasource: &Node, key: &str) -> (String, String) {
    let mapping = datasource
        .descendants_named("connection")
        .flat_map(|connection| connection.select(&["cols", "map"]))
        .find(|map| map.attr_is("key", key));

    let Some(mapping) = mapping else {
        return (String::new(), String::new());
    };
    split_table_column(mapping.attr("value"))
}

pub(super) fn split_table_column(value: &str) -> (String, String) {
    match value.split_once("].[") {
        Some((table, column)) => (format!("{table}]"), format!("[{column}")),
        None => (value.to_string(), String::new()),
    }
}

pub(super) fn extract_calculations(
    calculations: &mut Vec<Calculation>,
    diagnostics: &mut Diagnostics,
    ctx: &ExtractionContext<'_>,
    datasource: &Node,
) {
    let calculated = datasource
        .children_named("column")
        .filter(|column| column.has_attr("caption") && column.has_child("calculation"));

    for column in calculated {
        calculations.push(Calculation {
            datasource: ctx.datasource.clone(),
            caption: column.attr("caption").to_string(),
            name: column.attr("name").to_string(),
            role: column.attr("role").to_string(),
            calculation_type: column.attr("type").to_string(),
            hidden: column.attr("hidden").to_string(),
            datatype: column.attr("datatype").to_string(),
            default_format: column.attr("default-format").to_string(),
            calculation: attr(column.child("calculation"), "formula").to_string(),
            description: collect_runs(column),
            ..Calculation::default()
        });
    }

    // Parameters stay as `[caption]`; other calculations expand to their formula.
    resolve_calculations(calculations, ctx.options.max_resolve_passes, diagnostics);

    tracing::info!("Found {} calculations", calculations.len());
}
