//! Dashboard extractor.
//!
//! Every named `zone` below a dashboard becomes one object. Zones without a
//! `type` attribute are worksheets; zones with one are filters, legends, or
//! text boxes and are all reported as filters.

use super::types::{DashboardObject, ZoneKind};
use crate::base::{DiagnosticKind, Diagnostics};
use crate::tree::Node;

const MEASURE_NAMES_FIELD: &str = "[:Measure Names]";
const MEASURE_NAMES: &str = "Measure Names";

pub(super) fn extract_dashboard_objects(
    objects: &mut Vec<DashboardObject>,
    diagnostics: &mut Diagnostics,
    document: &Node,
    dashboard: &Node,
) {
    let dashboard_name = dashboard.attr("name");
    let start = objects.len();

    for zone in dashboard.descendants_named("zone") {
        let Some(zone_name) = zone.attr_opt("name") else {
            continue;
        };

        let (object, kind) = if zone.has_attr("type") {
            (filter_name(document, zone, zone_name, diagnostics), ZoneKind::Filter)
        } else {
            (zone_name.to_string(), ZoneKind::Worksheet)
        };

        objects.push(DashboardObject {
            dashboard: dashboard_name.to_string(),
            dashboard_object: object,
            object_type: kind.as_str().to_string(),
        });
    }
    tracing::info!("Found {} objects in {dashboard_name}", objects.len() - start);
}

/// Display name of a filter zone.
///
/// A quick-filter style rule formatting the zone's field wins. Without one,
/// the field is traced back to its column on the zone's worksheet.
fn filter_name(document: &Node, zone: &Node, zone_name: &str, diagnostics: &mut Diagnostics) -> String {
    let param = zone.attr("param");
    let style_format = document
        .descendants_named("style-rule")
        .filter(|rule| rule.attr_is("element", "quick-filter"))
        .flat_map(|rule| rule.children_named("format"))
        .find(|format| format.attr_is("field", param));

    if let Some(format) = style_format {
        return format.attr_opt("value").unwrap_or(zone_name).to_string();
    }

    match worksheet_field_caption(document, zone_name, param) {
        Some(caption) => caption.to_string(),
        None => {
            diagnostics.push(
                DiagnosticKind::BestEffortLookupFailure,
                zone_name,
                format!("no column found for filter field {param}"),
            );
            zone_name.to_string()
        }
    }
}

/// Find the caption of the column a filter zone's `param` refers to.
///
/// `param` looks like `[datasource].[instance]`. The instance is looked up
/// among the `column-instance` entries of the worksheet named like the zone.
pub(super) fn worksheet_field_caption<'a>(
    document: &'a Node,
    worksheet_name: &str,
    param: &'a str,
) -> Option<&'a str> {
    let field = param.split("].").nth(1)?;
    if field == MEASURE_NAMES_FIELD {
        return Some(MEASURE_NAMES);
    }

    let worksheet = document
        .descendants_named("worksheet")
        .find(|worksheet| worksheet.attr_is("name", worksheet_name))?;

    let dependencies = worksheet
        .select(&["table", "view", "datasource-dependencies"])
        .into_iter()
        .find(|block| {
            block
                .children_named("column-instance")
                .any(|instance| instance.attr_is("name", field))
        })?;

    let column_name = dependencies
        .children_named("column-instance")
        .find(|instance| instance.attr_is("name", field) && instance.has_attr("column"))?
        .attr("column");

    let column = dependencies
        .children_named("column")
        .find(|column| column.attr_is("name", column_name))?;

    Some(column.attr_opt("caption").unwrap_or(column_name))
}
