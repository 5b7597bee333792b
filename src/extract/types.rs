//! Record types produced by extraction.
//!
//! Every record is a flat row. Field order is the column order of the
//! report sheet, and the first field always names the owning data source,
//! worksheet, or dashboard.

use std::fmt;

use crate::base::Diagnostics;

/// A flat, ordered row that can be emitted as one line of a report sheet.
pub trait Record {
    /// Column headers, in display order.
    const COLUMNS: &'static [&'static str];

    /// Cell values, in the same order as [`Record::COLUMNS`].
    fn values(&self) -> Vec<&str>;
}

macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident => $column:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: String,
            )*
        }

        impl Record for $name {
            const COLUMNS: &'static [&'static str] = &[$($column),*];

            fn values(&self) -> Vec<&str> {
                vec![$(self.$field.as_str()),*]
            }
        }
    };
}

record! {
    /// One connection of a data source (federated connections yield one per named connection).
    pub struct Connection {
        datasource => "datasource",
        connection => "connection",
        /// Connection class, e.g. `postgres` or `excel-direct`.
        class => "type",
    }
}

record! {
    /// A physical table relation.
    pub struct Table {
        datasource => "datasource",
        connection => "connection",
        name => "name",
        table => "table",
    }
}

record! {
    /// A custom SQL relation.
    pub struct CustomSqlQuery {
        datasource => "datasource",
        /// `connection,name,sql text`
        connection => "connection",
    }
}

record! {
    /// A parameter, modeled by the document as a column of a connectionless data source.
    pub struct Parameter {
        datasource => "datasource",
        caption => "caption",
        value => "value",
        datatype => "datatype",
        param_type => "type",
        role => "role",
        name => "name",
        description => "description",
    }
}

record! {
    /// A plain (non-calculated) field with its physical mapping.
    pub struct Column {
        datasource => "datasource",
        key => "key",
        table => "table",
        column => "column",
        caption => "caption",
        datatype => "datatype",
        hidden => "hidden",
        description => "description",
    }
}

record! {
    /// A calculated field.
    pub struct Calculation {
        datasource => "datasource",
        caption => "caption",
        name => "name",
        role => "role",
        calculation_type => "calculation_type",
        hidden => "hidden",
        datatype => "datatype",
        default_format => "default_format",
        /// Formula exactly as written in the document.
        calculation => "calculation",
        description => "description",
        /// Formula with every known reference expanded.
        calc_resolved => "calc_resolved",
        /// Formula with every known reference replaced by `[caption]`.
        calc_renamed => "calc_renamed",
    }
}

record! {
    /// A set defined with the filter-group grammar.
    pub struct SetDefinition {
        datasource => "datasource",
        caption => "caption",
        name => "name",
        element => "element",
        set_type => "type",
        condition_calculation => "condition_calculation",
        number => "number",
        end => "end",
        direction => "direction",
        /// Member values joined with `|`.
        members => "members",
        expression => "expression",
        description => "description",
    }
}

record! {
    /// One use of a field on a worksheet.
    pub struct WorksheetColumn {
        worksheet => "worksheet",
        datasource => "datasource",
        caption => "caption",
        name => "name",
        role => "role",
        datatype => "datatype",
        column_type => "type",
        calculation => "calculation",
        computation => "computation",
        calc_resolved => "calc_resolved",
        name_resolved => "name_resolved",
    }
}

record! {
    pub struct WorksheetCaption {
        worksheet => "worksheet",
        caption => "caption",
    }
}

record! {
    /// A worksheet or filter placed on a dashboard.
    pub struct DashboardObject {
        dashboard => "dashboard",
        dashboard_object => "dashboard_object",
        object_type => "type",
    }
}

/// Classification of a set, decided by its combinator `groupfilter`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetKind {
    ManualSelection,
    CombinedSet,
    Condition,
    TopN,
}

impl SetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SetKind::ManualSelection => "manual selection",
            SetKind::CombinedSet => "combined set",
            SetKind::Condition => "condition",
            SetKind::TopN => "top N",
        }
    }
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a dashboard zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneKind {
    Worksheet,
    Filter,
}

impl ZoneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneKind::Worksheet => "worksheet",
            ZoneKind::Filter => "filter",
        }
    }
}

/// Everything extracted from one document.
#[derive(Clone, Debug, Default)]
pub struct ExtractionResult {
    pub connections: Vec<Connection>,
    pub tables: Vec<Table>,
    pub custom_sql_queries: Vec<CustomSqlQuery>,
    pub parameters: Vec<Parameter>,
    pub columns: Vec<Column>,
    pub calculations: Vec<Calculation>,
    pub sets: Vec<SetDefinition>,
    pub worksheet_columns: Vec<WorksheetColumn>,
    pub worksheet_captions: Vec<WorksheetCaption>,
    pub dashboard_objects: Vec<DashboardObject>,
    pub diagnostics: Diagnostics,
}
