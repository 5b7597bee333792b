//! Connection extractor.
//!
//! Two shapes exist and use disjoint attributes:
//!
//! ```xml
//! <!-- federated -->
//! <connection class='federated'>
//!   <named-connections>
//!     <named-connection caption='sales-db' name='postgres.0x1'>
//!       <connection class='postgres' dbname='sales' />
//!     </named-connection>
//!   </named-connections>
//! </connection>
//!
//! <!-- simple -->
//! <connection class='sqlproxy' dbname='Sales' />
//! ```

use super::context::ExtractionContext;
use super::types::Connection;
use crate::tree::Node;

pub(super) fn extract_connections(
    connections: &mut Vec<Connection>,
    ctx: &ExtractionContext<'_>,
    datasource: &Node,
) {
    for connection in datasource.children_named("connection") {
        match connection.child("named-connections") {
            Some(named) if !named.is_leaf() => {
                for named_connection in named.children_named("named-connection") {
                    let name = match named_connection.attr("caption") {
                        "" => named_connection.attr("name"),
                        caption => caption,
                    };
                    for inner in named_connection.children_named("connection") {
                        connections.push(Connection {
                            datasource: ctx.datasource.clone(),
                            connection: name.to_string(),
                            class: inner.attr("class").to_string(),
                        });
                    }
                }
            }
            _ => connections.push(Connection {
                datasource: ctx.datasource.clone(),
                connection: connection.attr("dbname").to_string(),
                class: connection.attr("class").to_string(),
            }),
        }
    }
    tracing::info!("Found {} connections", connections.len());
}

/// Is any connection of this data source a single-table Excel connection?
pub(super) fn is_excel_direct(datasource: &Node) -> bool {
    datasource.children_named("connection").any(|connection| {
        connection.attr_is("class", "excel-direct")
            || connection
                .select(&["named-connections", "named-connection", "connection"])
                .iter()
                .any(|inner| inner.attr_is("class", "excel-direct"))
    })
}
