//! Render-time formatting for the table, chart and export
//!
//! Values are stored unrounded; precision is applied only here.

use serde::Serialize;

use crate::material::{Column, MaterialRecord, DISPLAY_COLUMNS};
use crate::store::RecordSet;

/// File name offered for the CSV download
pub const EXPORT_FILE_NAME: &str = "Plywood Price Comparison.csv";

/// How a column's value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnFormat {
    Text,
    /// Clickable URL
    Link,
    /// `%.2f €`
    Currency,
    /// `%d mm`
    Millimeters,
    /// `%.4f m²`
    SquareMeters,
    /// Shortest number form
    Plain,
}

/// Label and format of one table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub format: ColumnFormat,
}

/// Table header configuration for a column
pub fn column_spec(column: Column) -> ColumnSpec {
    let (label, format) = match column {
        Column::ProductIdentifier => ("Product", ColumnFormat::Text),
        Column::PricePerQm => ("Price/m²", ColumnFormat::Currency),
        Column::Qm => ("Square Meter", ColumnFormat::SquareMeters),
        Column::PricePerUnit => ("Price/Unit", ColumnFormat::Currency),
        Column::Width => ("Width in mm", ColumnFormat::Millimeters),
        Column::Length => ("Length in mm", ColumnFormat::Millimeters),
        Column::Height => ("Height in mm", ColumnFormat::Millimeters),
        Column::Amount => ("Amount", ColumnFormat::Plain),
        Column::Price => ("Price", ColumnFormat::Currency),
        Column::Link => ("Product URL", ColumnFormat::Link),
    };
    ColumnSpec {
        key: column.key(),
        label,
        format,
    }
}

/// Column specs in table view order
pub fn display_columns() -> Vec<ColumnSpec> {
    DISPLAY_COLUMNS.iter().map(|c| column_spec(*c)).collect()
}

/// Render one cell of a record
pub fn format_cell(column: Column, record: &MaterialRecord) -> String {
    let spec = column_spec(column);
    match (spec.format, record.number(column)) {
        (ColumnFormat::Currency, Some(v)) => format!("{:.2} €", v),
        (ColumnFormat::Millimeters, Some(v)) => format!("{:.0} mm", v.trunc()),
        (ColumnFormat::SquareMeters, Some(v)) => format!("{:.4} m²", v),
        _ => record.cell(column),
    }
}

/// Render a record in table view order
pub fn format_row(record: &MaterialRecord) -> Vec<String> {
    DISPLAY_COLUMNS
        .iter()
        .map(|c| format_cell(*c, record))
        .collect()
}

/// One bar of the price-per-m² chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub product_identifier: String,
    pub price_per_qm: f64,
}

/// Price per m² by product, in file order
pub fn chart_series(set: &RecordSet) -> Vec<ChartPoint> {
    set.records()
        .iter()
        .map(|r| ChartPoint {
            product_identifier: r.product_identifier.clone(),
            price_per_qm: r.price_per_qm,
        })
        .collect()
}
