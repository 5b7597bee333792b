//! Entity extraction from workbook and data source trees.
//!
//! Each extractor walks one kind of subtree and appends flat records to an
//! [`ExtractionResult`]. Nothing is ever removed or reordered once appended;
//! the resolver only fills in the resolved-text fields afterwards.
//!
//! ## Key Types
//!
//! - [`ExtractionResult`] - every record list plus the [`Diagnostics`] raised
//! - [`ExtractOptions`] - tunables for a run (resolver pass cap)
//! - [`Record`] - flat row with fixed column order, one per report line
//!
//! ## Order
//!
//! ```text
//! datasource  → connections, parameters, calculations, custom SQL,
//!               tables, sets, columns (unless excel-direct)
//! worksheet   → field usage (resolved), captions
//! dashboard   → zones
//! ```

mod context;
mod extract_connection;
mod extract_dashboard;
mod extract_field;
mod extract_relation;
mod extract_set;
mod extract_worksheet;
mod types;


pub use context::{ExtractOptions, datasource_display_name};
pub use extract_worksheet::{normalize_field_type, normalize_instance_type};
pub use types::{
    Calculation, Column, Connection, CustomSqlQuery, DashboardObject, ExtractionResult, Parameter,
    Record, SetDefinition, SetKind, Table, WorksheetCaption, WorksheetColumn, ZoneKind,
};

use crate::base::Diagnostics;
use crate::tree::Node;
use context::ExtractionContext;

/// Run every data source extractor over one `datasource` element.
///
/// Calculations are resolved against everything extracted so far, so data
/// sources processed later can still expand references into earlier ones.
pub fn extract_datasource(result: &mut ExtractionResult, datasource: &Node, options: &ExtractOptions) {
    let ctx = ExtractionContext::for_datasource(datasource, options);
    tracing::debug!("Extracting data source {}", ctx.datasource);

    extract_connection::extract_connections(&mut result.connections, &ctx, datasource);
    extract_field::extract_parameters(&mut result.parameters, &ctx, datasource);
    extract_field::extract_calculations(
        &mut result.calculations,
        &mut result.diagnostics,
        &ctx,
        datasource,
    );
    extract_relation::extract_custom_sql(&mut result.custom_sql_queries, &ctx, datasource);
    extract_relation::extract_tables(&mut result.tables, &ctx, datasource);
    extract_set::extract_sets(&mut result.sets, &mut result.diagnostics, &ctx, datasource);

    if extract_connection::is_excel_direct(datasource) {
        tracing::info!("Skipping columns of Excel data source {}", ctx.datasource);
    } else {
        extract_field::extract_columns(&mut result.columns, &ctx, datasource);
    }
}

/// Extract field usage and captions from one `worksheet` element.
///
/// Should run after every data source so formulas resolve fully.
pub fn extract_worksheet(result: &mut ExtractionResult, worksheet: &Node, options: &ExtractOptions) {
    extract_worksheet::extract_worksheet_columns(
        &mut result.worksheet_columns,
        &result.calculations,
        &mut result.diagnostics,
        options,
        worksheet,
    );
    extract_worksheet::extract_worksheet_captions(&mut result.worksheet_captions, worksheet);
}

/// Extract the objects placed on one `dashboard` element.
///
/// `document` is the whole workbook; filter names are looked up in its
/// style rules and worksheets.
pub fn extract_dashboard(result: &mut ExtractionResult, document: &Node, dashboard: &Node) {
    extract_dashboard::extract_dashboard_objects(
        &mut result.dashboard_objects,
        &mut result.diagnostics,
        document,
        dashboard,
    );
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
