//! Row index: snapshot of sheet rows keyed by (issue number, title).
//!
//! The index is built in full before reconciliation starts and never
//! mutated afterwards. Rows missing either key cell (malformed or
//! foreign rows) are skipped: they are neither updated nor allowed to
//! block a later insert with the same key.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::github::IssueRecord;
use crate::sheet::schema::ColumnMap;
use crate::sheet::types::{Cell, Row};

/// The number half of a row key.
///
/// The sheet may store an issue number as a number cell or as text;
/// both normalize to `Int` when parseable so `42`, `42.0` and `"42"`
/// land on the same key. Unparseable values keep their text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumberKey {
    Int(i64),
    Text(String),
}

impl NumberKey {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Self::Int(i);
                }
                // Number cells come back as floats; 42.0 is still issue 42.
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 9.0e18 => Self::Int(f as i64),
                    _ => Self::Text(n.to_string()),
                }
            }
            Value::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Int)
            }
            other => Self::Text(other.to_string()),
        }
    }
}

/// Composite natural key for one sheet row.
///
/// If an issue's title changes upstream, the old row keys differently
/// and becomes an orphan; the issue re-inserts under the new title.
/// Orphan cleanup is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub number: NumberKey,
    pub title: String,
}

impl RowKey {
    /// Key under which `issue` would be found in the index.
    #[must_use]
    pub fn for_issue(issue: &IssueRecord) -> Self {
        Self {
            number: NumberKey::Int(issue.number),
            title: issue.title.clone(),
        }
    }
}

/// What the index knows about one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub row_id: i64,
    pub status: String,
}

/// Snapshot mapping row keys to row id and current status.
pub type RowIndex = HashMap<RowKey, RowEntry>;

/// Build the row index from the sheet's current rows.
///
/// Later rows win on duplicate keys; with this tool as the only writer
/// of the managed columns, duplicates do not arise.
#[must_use]
pub fn build_index(rows: &[Row], columns: &ColumnMap) -> RowIndex {
    let mut index = RowIndex::with_capacity(rows.len());

    for row in rows {
        let Some(number) = cell_value(row, columns.issue_number) else {
            debug!(row_id = row.id, "skipping row without issue number");
            continue;
        };
        let Some(title) = cell_value(row, columns.title) else {
            debug!(row_id = row.id, "skipping row without title");
            continue;
        };

        let status = cell_value(row, columns.status)
            .map(|v| value_text(&v))
            .unwrap_or_default();

        index.insert(
            RowKey {
                number: NumberKey::from_value(&number),
                title: value_text(&title),
            },
            RowEntry {
                row_id: row.id,
                status,
            },
        );
    }

    index
}

fn cell_value(row: &Row, column_id: i64) -> Option<Value> {
    row.cells
        .iter()
        .find(|c| c.column_id == column_id)
        .and_then(Cell::effective_value)
}

/// Render a cell value as the text it carries.
///
/// Strings stay as-is; integral floats drop the trailing `.0` so a
/// numeric Title cell compares equal to the issue's title text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && n.as_i64().is_none() && f.abs() < 9.0e18 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
