//! Reconciliation planning.
//!
//! Pure decision engine: given the fetched issues and the row index,
//! classify each issue as an insert, a status patch, or a no-op. The
//! index is read-only during planning, so the plan is deterministic
//! for a given (issues, index) pair regardless of how it is consumed.

use crate::github::IssueRecord;

use super::index::{RowIndex, RowKey};

/// A targeted status patch for one existing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub row_id: i64,
    pub status: String,
}

/// The work one run has decided to do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncPlan {
    /// Issues with no matching row; inserted with their state as status.
    pub to_insert: Vec<IssueRecord>,
    /// Rows whose status cell no longer matches the issue state.
    pub to_update: Vec<StatusUpdate>,
}

impl SyncPlan {
    /// True when the sheet already reflects upstream.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_update.is_empty()
    }
}

/// Decide inserts and updates for `issues` against the `index` snapshot.
///
/// Status comparison is case-insensitive: a sheet `Open` matches an
/// upstream `open` and produces no update. Two issues sharing a number
/// but not a title are distinct keys and both insert.
#[must_use]
pub fn build_plan(issues: &[IssueRecord], index: &RowIndex) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for issue in issues {
        match index.get(&RowKey::for_issue(issue)) {
            None => plan.to_insert.push(issue.clone()),
            Some(entry) if !entry.status.eq_ignore_ascii_case(&issue.state) => {
                plan.to_update.push(StatusUpdate {
                    row_id: entry.row_id,
                    status: issue.state.clone(),
                });
            }
            Some(_) => {}
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::index::{NumberKey, RowEntry};

    fn issue(number: i64, title: &str, state: &str) -> IssueRecord {
        IssueRecord {
            number,
            title: title.into(),
            state: state.into(),
        }
    }

    fn index_of(entries: &[(i64, &str, i64, &str)]) -> RowIndex {
        entries
            .iter()
            .map(|(number, title, row_id, status)| {
                (
                    RowKey {
                        number: NumberKey::Int(*number),
                        title: (*title).to_string(),
                    },
                    RowEntry {
                        row_id: *row_id,
                        status: (*status).to_string(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn unknown_issue_becomes_an_insert() {
        let plan = build_plan(&[issue(7, "Add docs", "open")], &RowIndex::new());
        assert_eq!(plan.to_insert, vec![issue(7, "Add docs", "open")]);
        assert!(plan.to_update.is_empty());
    }

    #[test]
    fn changed_status_becomes_a_targeted_update() {
        let index = index_of(&[(42, "Fix crash", 1, "open")]);
        let plan = build_plan(&[issue(42, "Fix crash", "closed")], &index);

        assert!(plan.to_insert.is_empty());
        assert_eq!(
            plan.to_update,
            vec![StatusUpdate {
                row_id: 1,
                status: "closed".into()
            }]
        );
    }

    #[test]
    fn equal_status_is_a_no_op() {
        let index = index_of(&[(42, "Fix crash", 1, "open")]);
        let plan = build_plan(&[issue(42, "Fix crash", "open")], &index);
        assert!(plan.is_empty());
    }

    #[test]
    fn status_comparison_is_case_insensitive() {
        let index = index_of(&[(42, "Fix crash", 1, "Open")]);
        let plan = build_plan(&[issue(42, "Fix crash", "open")], &index);
        assert!(plan.is_empty());
    }

    #[test]
    fn changed_title_keys_as_a_new_row() {
        // The old row becomes an orphan; cleanup is out of scope.
        let index = index_of(&[(42, "Old title", 1, "open")]);
        let plan = build_plan(&[issue(42, "New title", "open")], &index);
        assert_eq!(plan.to_insert.len(), 1);
        assert!(plan.to_update.is_empty());
    }

    #[test]
    fn same_number_different_titles_both_insert() {
        let issues = [issue(5, "First wording", "open"), issue(5, "Second wording", "open")];
        let plan = build_plan(&issues, &RowIndex::new());
        assert_eq!(plan.to_insert.len(), 2);
    }

    #[test]
    fn second_run_against_updated_index_is_empty() {
        let issues = [issue(7, "Add docs", "open"), issue(42, "Fix crash", "closed")];

        let first = build_plan(&issues, &index_of(&[(42, "Fix crash", 1, "open")]));
        assert_eq!(first.to_insert.len(), 1);
        assert_eq!(first.to_update.len(), 1);

        // Index as it would look after the first run's writes landed.
        let second = build_plan(
            &issues,
            &index_of(&[(42, "Fix crash", 1, "closed"), (7, "Add docs", 2, "open")]),
        );
        assert!(second.is_empty());
    }

    #[test]
    fn planning_leaves_the_index_untouched() {
        let index = index_of(&[(42, "Fix crash", 1, "open")]);
        let issues = [issue(42, "Fix crash", "closed"), issue(7, "Add docs", "open")];

        let first = build_plan(&issues, &index);
        let again = build_plan(&issues, &index);
        assert_eq!(first, again);
        assert_eq!(index.len(), 1);
    }
}
