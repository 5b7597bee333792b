//! Table and custom SQL extractors.
//!
//! Both walk every `relation` below the data source, at any depth (joins
//! and unions nest relations inside each other).

use super::context::ExtractionContext;
use super::types::{CustomSqlQuery, Table};
use crate::tree::Node;

/// Relations the document creates for its own bookkeeping.
const EXTRACT_RELATION: &str = "Extract";
const SQLPROXY_RELATION: &str = "sqlproxy";

fn relations_of_type<'a>(datasource: &'a Node, kind: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
    datasource
        .descendants_named("relation")
        .filter(move |relation| relation.attr_is("type", kind))
}

pub(super) fn extract_tables(tables: &mut Vec<Table>, ctx: &ExtractionContext<'_>, datasource: &Node) {
    for relation in relations_of_type(datasource, "table") {
        let name = relation.attr("name");
        if name == EXTRACT_RELATION || name == SQLPROXY_RELATION {
            continue;
        }
        tables.push(Table {
            datasource: ctx.datasource.clone(),
            connection: relation.attr("connection").to_string(),
            name: name.to_string(),
            table: relation.attr("table").to_string(),
        });
    }
    tracing::info!("Found {} tables", tables.len());
}

pub(super) fn extract_custom_sql(
    queries: &mut Vec<CustomSqlQuery>,
    ctx: &ExtractionContext<'_>,
    datasource: &Node,
) {
    for relation in relations_of_type(datasource, "text") {
        if relation.attr("name") == EXTRACT_RELATION {
            continue;
        }
        queries.push(CustomSqlQuery {
            datasource: ctx.datasource.clone(),
            connection: format!(
                "{},{},{}",
                relation.attr("connection"),
                relation.attr("name"),
                relation.text()
            ),
        });
    }
    tracing::info!("Found {} custom SQL queries", queries.len());
}
