//! Material record model and column layout
//!
//! One record per price quote. The CSV backing file stores the columns in
//! [`CANONICAL_COLUMNS`] order; the table view shows them in
//! [`DISPLAY_COLUMNS`] order.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::calculator::{calculate, PriceBreakdown};

/// Columns of a material record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Width,
    Length,
    Height,
    Amount,
    Price,
    Link,
    ProductIdentifier,
    Qm,
    PricePerUnit,
    PricePerQm,
}

/// Column order of the backing file and of exports
pub const CANONICAL_COLUMNS: [Column; 10] = [
    Column::Width,
    Column::Length,
    Column::Height,
    Column::Amount,
    Column::Price,
    Column::Link,
    Column::ProductIdentifier,
    Column::Qm,
    Column::PricePerUnit,
    Column::PricePerQm,
];

/// Column order of the table view
pub const DISPLAY_COLUMNS: [Column; 10] = [
    Column::ProductIdentifier,
    Column::PricePerQm,
    Column::Qm,
    Column::PricePerUnit,
    Column::Width,
    Column::Length,
    Column::Height,
    Column::Amount,
    Column::Price,
    Column::Link,
];

impl Column {
    /// CSV header name
    pub fn key(self) -> &'static str {
        match self {
            Column::Width => "width",
            Column::Length => "length",
            Column::Height => "height",
            Column::Amount => "amount",
            Column::Price => "price",
            Column::Link => "link",
            Column::ProductIdentifier => "product_identifier",
            Column::Qm => "qm",
            Column::PricePerUnit => "price_per_unit",
            Column::PricePerQm => "price_per_qm",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw form input for one price quote
///
/// Built fresh for every "Calculate and Save" request. Missing fields
/// default to zero or empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialInput {
    /// in mm
    pub width: f64,
    /// in mm
    pub length: f64,
    /// in mm
    pub height: f64,
    pub amount: f64,
    /// Total price paid for `amount` units
    pub price: f64,
    pub link: String,
    pub product_identifier: String,
}

/// One stored price quote with its derived prices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub width: f64,
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub length: f64,
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub height: f64,
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub amount: f64,
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub price: f64,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub product_identifier: String,
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub qm: f64,
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub price_per_unit: f64,
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub price_per_qm: f64,
    /// Cells of non-canonical columns, keyed by header name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl MaterialRecord {
    /// Build a record from form input, deriving the computed prices
    pub fn from_input(input: &MaterialInput) -> Self {
        let breakdown = calculate(input);
        Self::with_breakdown(input, &breakdown)
    }

    /// Build a record from form input and an already computed breakdown
    pub fn with_breakdown(input: &MaterialInput, breakdown: &PriceBreakdown) -> Self {
        Self {
            width: input.width,
            length: input.length,
            height: input.height,
            amount: input.amount,
            price: input.price,
            link: input.link.clone(),
            product_identifier: input.product_identifier.clone(),
            qm: breakdown.qm,
            price_per_unit: breakdown.price_per_unit,
            price_per_qm: breakdown.price_per_qm,
            extra: BTreeMap::new(),
        }
    }

    /// Numeric value of a column, `None` for the text columns
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::Width => Some(self.width),
            Column::Length => Some(self.length),
            Column::Height => Some(self.height),
            Column::Amount => Some(self.amount),
            Column::Price => Some(self.price),
            Column::Qm => Some(self.qm),
            Column::PricePerUnit => Some(self.price_per_unit),
            Column::PricePerQm => Some(self.price_per_qm),
            Column::Link | Column::ProductIdentifier => None,
        }
    }

    /// Raw CSV text of a column
    ///
    /// Numbers use their shortest round-trip form, so `600.0` is written
    /// as `600` and re-reading yields the same value.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Link => self.link.clone(),
            Column::ProductIdentifier => self.product_identifier.clone(),
            numeric => self
                .number(numeric)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    /// Cell of a non-canonical column, empty when the record has none
    pub fn extra_cell(&self, header: &str) -> String {
        self.extra.get(header).cloned().unwrap_or_default()
    }

    /// All cells in canonical column order
    pub fn to_cells(&self) -> Vec<String> {
        CANONICAL_COLUMNS.iter().map(|c| self.cell(*c)).collect()
    }
}

/// Empty numeric cells (rows added in the table editor) read as zero
fn zero_if_empty<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_display_is_header_key() {
        assert_eq!(Column::PricePerQm.to_string(), "price_per_qm");
        assert_eq!(Column::ProductIdentifier.to_string(), "product_identifier");
    }

    #[test]
    fn test_display_order_covers_all_columns() {
        for column in CANONICAL_COLUMNS {
            assert!(DISPLAY_COLUMNS.contains(&column), "{} not displayed", column);
        }
    }

    #[test]
    fn test_cell_uses_shortest_number_form() {
        let record = MaterialRecord {
            width: 600.0,
            price: 49.5,
            link: "https://example.com/p1".to_string(),
            ..Default::default()
        };
        assert_eq!(record.cell(Column::Width), "600");
        assert_eq!(record.cell(Column::Price), "49.5");
        assert_eq!(record.cell(Column::Qm), "0");
        assert_eq!(record.cell(Column::Link), "https://example.com/p1");
    }

    #[test]
    fn test_extra_cells_serialize_only_when_present() {
        let mut record = MaterialRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("extra").is_none());

        record.extra.insert("notes".to_string(), "from supplier A".to_string());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["extra"]["notes"], "from supplier A");
        assert_eq!(record.extra_cell("notes"), "from supplier A");
        assert_eq!(record.extra_cell("color"), "");
    }

    #[test]
    fn test_from_input_copies_raw_fields() {
        let input = MaterialInput {
            width: 600.0,
            length: 400.0,
            height: 18.0,
            amount: 10.0,
            price: 50.0,
            link: "u".to_string(),
            product_identifier: "p1".to_string(),
        };
        let record = MaterialRecord::from_input(&input);
        assert_eq!(record.height, 18.0);
        assert_eq!(record.link, "u");
        assert_eq!(record.product_identifier, "p1");
        assert_eq!(record.price_per_unit, 5.0);
    }

    #[test]
    fn test_input_missing_fields_default() {
        let input: MaterialInput =
            serde_json::from_str(r#"{"product_identifier": "birch 18mm", "price": 12.5}"#).unwrap();
        assert_eq!(input.width, 0.0);
        assert_eq!(input.amount, 0.0);
        assert_eq!(input.link, "");
        assert_eq!(input.price, 12.5);
    }
}
