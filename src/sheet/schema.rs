//! Managed-column discovery and creation.
//!
//! The synchronizer owns exactly three columns on the target sheet:
//! Issue Number, Title, and Status. [`ensure_columns`] maps their
//! display names to service-assigned ids, creating any that are
//! missing. Reruns reuse existing columns, so the operation is
//! idempotent.

use tracing::info;

use super::SheetService;
use crate::error::Result;

/// Display name of the issue-number column.
pub const COL_ISSUE_NUMBER: &str = "Issue Number";
/// Display name of the title column.
pub const COL_TITLE: &str = "Title";
/// Display name of the status column.
pub const COL_STATUS: &str = "Status";

/// Service-assigned ids of the three managed columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub issue_number: i64,
    pub title: i64,
    pub status: i64,
}

/// Ensure the managed columns exist and return their ids.
///
/// Reads the sheet's column set once, reuses columns whose display name
/// matches exactly, and appends the rest after the current last index.
///
/// # Errors
///
/// Returns [`crate::Error::Fetch`] if the sheet cannot be read and
/// [`crate::Error::Schema`] if a column create fails or its response
/// shape is unrecognized.
pub async fn ensure_columns<S: SheetService>(service: &S, sheet_id: &str) -> Result<ColumnMap> {
    let sheet = service.get_sheet(sheet_id, false).await?;
    let mut next_index = sheet.columns.len();

    let mut ids = [0_i64; 3];
    for (slot, title) in ids.iter_mut().zip([COL_ISSUE_NUMBER, COL_TITLE, COL_STATUS]) {
        if let Some(existing) = sheet.columns.iter().find(|c| c.title == title) {
            *slot = existing.id;
            continue;
        }
        let created = service.add_column(sheet_id, title, next_index).await?;
        info!(column_id = created.id, title, "created missing column");
        next_index += 1;
        *slot = created.id;
    }

    let [issue_number, title, status] = ids;
    Ok(ColumnMap {
        issue_number,
        title,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::mock::MockSheet;
    use crate::sheet::types::{Column, Sheet};

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn creates_all_columns_on_empty_sheet() {
        let mock = MockSheet::with_sheet(Sheet::default());
        let map = block_on(ensure_columns(&mock, "1")).unwrap();

        assert_eq!(
            *mock.add_column_calls.borrow(),
            vec![COL_ISSUE_NUMBER, COL_TITLE, COL_STATUS]
        );
        // Appended at indexes 0, 1, 2 -> distinct ids from the mock.
        assert_ne!(map.issue_number, map.title);
        assert_ne!(map.title, map.status);
    }

    #[test]
    fn reuses_existing_columns_by_exact_title() {
        let sheet = Sheet {
            columns: vec![
                Column {
                    id: 11,
                    title: COL_ISSUE_NUMBER.into(),
                },
                Column {
                    id: 12,
                    title: "Assignee".into(),
                },
                Column {
                    id: 13,
                    title: COL_STATUS.into(),
                },
            ],
            rows: vec![],
        };
        let mock = MockSheet::with_sheet(sheet);
        let map = block_on(ensure_columns(&mock, "1")).unwrap();

        assert_eq!(map.issue_number, 11);
        assert_eq!(map.status, 13);
        // Only Title was missing; it goes after the current last column.
        assert_eq!(*mock.add_column_calls.borrow(), vec![COL_TITLE]);
        assert_eq!(mock.created_columns.borrow()[0].id, 1003);
        assert_eq!(map.title, 1003);
    }

    #[test]
    fn rerun_with_full_schema_creates_nothing() {
        let sheet = Sheet {
            columns: vec![
                Column {
                    id: 1,
                    title: COL_ISSUE_NUMBER.into(),
                },
                Column {
                    id: 2,
                    title: COL_TITLE.into(),
                },
                Column {
                    id: 3,
                    title: COL_STATUS.into(),
                },
            ],
            rows: vec![],
        };
        let mock = MockSheet::with_sheet(sheet);
        let map = block_on(ensure_columns(&mock, "1")).unwrap();

        assert!(mock.add_column_calls.borrow().is_empty());
        assert_eq!(
            map,
            ColumnMap {
                issue_number: 1,
                title: 2,
                status: 3
            }
        );
    }
}
