//! Batched plan execution.
//!
//! Splits the plan into fixed-size request batches and issues them
//! sequentially: every insert batch, then every update batch. The two
//! phases have no cross-dependency (updates only target rows that were
//! in the pre-run index), so this ordering is for diagnosability, not
//! correctness. The first failed batch aborts the run with a
//! [`Error::Write`] carrying how many rows earlier batches committed.

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::error::{Error, Result, WritePhase};
use crate::github::IssueRecord;
use crate::sheet::schema::ColumnMap;
use crate::sheet::types::{NewCell, NewRow, RowPatch};
use crate::sheet::{SheetService, WriteFailure};

use super::plan::{StatusUpdate, SyncPlan};

/// Rows per insert/update request, sized to the service's payload limit.
pub const DEFAULT_BATCH_SIZE: usize = 300;

/// Final per-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Rows inserted for issues not previously on the sheet.
    pub inserted: usize,
    /// Rows whose status cell was patched.
    pub updated: usize,
}

impl SyncStats {
    /// Total rows written.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.inserted + self.updated
    }

    /// True when the run wrote nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Row payload for one issue: exactly the three managed cells.
fn insert_row(issue: &IssueRecord, columns: &ColumnMap) -> NewRow {
    NewRow {
        to_bottom: true,
        cells: vec![
            NewCell {
                column_id: columns.issue_number,
                value: json!(issue.number),
            },
            NewCell {
                column_id: columns.title,
                value: json!(issue.title),
            },
            NewCell {
                column_id: columns.status,
                value: json!(issue.state),
            },
        ],
    }
}

/// Patch payload: the row id and only the Status cell.
fn status_patch(update: &StatusUpdate, columns: &ColumnMap) -> RowPatch {
    RowPatch {
        id: update.row_id,
        cells: vec![NewCell {
            column_id: columns.status,
            value: json!(update.status),
        }],
    }
}

fn write_error(
    failure: WriteFailure,
    phase: WritePhase,
    batch: usize,
    committed: usize,
) -> Error {
    Error::Write {
        phase,
        batch,
        status: failure.status,
        message: failure.message,
        committed,
    }
}

/// Execute the plan against the sheet.
///
/// # Errors
///
/// Returns [`Error::Write`] on the first failed batch; the error
/// reports the rows already committed by earlier batches, since those
/// writes cannot be rolled back.
pub async fn apply<S: SheetService>(
    service: &S,
    sheet_id: &str,
    plan: &SyncPlan,
    columns: &ColumnMap,
    batch_size: usize,
) -> Result<SyncStats> {
    let mut committed = 0usize;

    for (batch, chunk) in plan.to_insert.chunks(batch_size).enumerate() {
        let rows: Vec<NewRow> = chunk.iter().map(|i| insert_row(i, columns)).collect();
        service
            .add_rows(sheet_id, &rows)
            .await
            .map_err(|f| write_error(f, WritePhase::Insert, batch + 1, committed))?;
        committed += chunk.len();
        info!(batch = batch + 1, rows = chunk.len(), "inserted row batch");
    }

    for (batch, chunk) in plan.to_update.chunks(batch_size).enumerate() {
        let patches: Vec<RowPatch> = chunk.iter().map(|u| status_patch(u, columns)).collect();
        service
            .update_rows(sheet_id, &patches)
            .await
            .map_err(|f| write_error(f, WritePhase::Update, batch + 1, committed))?;
        committed += chunk.len();
        info!(batch = batch + 1, rows = chunk.len(), "updated row batch");
    }

    Ok(SyncStats {
        inserted: plan.to_insert.len(),
        updated: plan.to_update.len(),
    })
}
