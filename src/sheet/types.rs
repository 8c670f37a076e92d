//! Wire types for the Smartsheet REST API.
//!
//! Only the fields this tool reads or writes are modeled; everything
//! else in the service's responses is ignored by serde.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A sheet as returned by the get-sheet operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// A column descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct Column {
    pub id: i64,
    pub title: String,
}

/// An existing row with its cells.
#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    pub id: i64,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

/// One cell of an existing row.
///
/// The service stores a raw `value` and, for formatted columns, a
/// separate `displayValue`; either may be absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub column_id: i64,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub display_value: Option<String>,
}

impl Cell {
    /// The cell's effective value: the raw value when present and
    /// non-null, else the display value as a string.
    #[must_use]
    pub fn effective_value(&self) -> Option<Value> {
        match &self.value {
            Some(v) if !v.is_null() => Some(v.clone()),
            _ => self.display_value.clone().map(Value::String),
        }
    }
}

/// A row to insert, appended at the bottom of the sheet.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRow {
    pub to_bottom: bool,
    pub cells: Vec<NewCell>,
}

/// A cell payload for inserts and updates.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCell {
    pub column_id: i64,
    pub value: Value,
}

/// A targeted patch of an existing row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RowPatch {
    pub id: i64,
    pub cells: Vec<NewCell>,
}
