//! Sync engine: index building, reconciliation, batched writes.
//!
//! One run is a straight-line sequence with no cross-run state:
//!
//! 1. Ensure the managed columns exist ([`crate::sheet::ensure_columns`])
//! 2. Fetch all issues from the tracker (once; the single result feeds
//!    both logging and row building)
//! 3. Read the sheet's rows and build the key index ([`index`])
//! 4. Plan inserts and status patches ([`plan`])
//! 5. Apply the plan in batches ([`writer`])
//!
//! Everything runs sequentially on the caller's runtime; a failure at
//! any step aborts the run with the stage's error category.

pub mod index;
pub mod plan;
pub mod writer;

pub use index::{RowIndex, build_index};
pub use plan::{StatusUpdate, SyncPlan, build_plan};
pub use writer::{DEFAULT_BATCH_SIZE, SyncStats, apply};

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::github::IssueSource;
use crate::sheet::{SheetClient, SheetService, ensure_columns};

/// Run one sync pass.
///
/// With `dry_run` set the plan is computed and reported but nothing is
/// written; the returned stats are the would-be counts.
///
/// # Errors
///
/// Propagates the failing stage's error; see [`crate::Error`].
pub async fn run(config: &Config) -> Result<SyncStats> {
    let sheets = SheetClient::new(&config.sheet_token);
    let columns = ensure_columns(&sheets, &config.sheet_id).await?;

    let issues = IssueSource::new(&config.github_token, &config.repo)
        .fetch_all()
        .await?;
    info!(count = issues.len(), repo = %config.repo, "fetched issues");

    let sheet = sheets.get_sheet(&config.sheet_id, true).await?;
    let index = build_index(&sheet.rows, &columns);
    info!(rows = index.len(), "indexed existing rows");

    let plan = build_plan(&issues, &index);
    info!(
        to_insert = plan.to_insert.len(),
        to_update = plan.to_update.len(),
        "reconciliation plan ready"
    );

    if config.dry_run {
        return Ok(SyncStats {
            inserted: plan.to_insert.len(),
            updated: plan.to_update.len(),
        });
    }

    apply(&sheets, &config.sheet_id, &plan, &columns, config.batch_size).await
}
