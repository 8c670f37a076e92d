//! Smartsheet capability.
//!
//! - [`types`] - wire types shared by the client and the sync engine
//! - [`client`] - HTTP implementation against the REST API
//! - [`schema`] - managed-column discovery and creation
//!
//! The [`SheetService`] trait is the seam between the sync engine and
//! the transport, so the engine's batching and schema logic can be
//! exercised against an in-memory recording implementation in tests.

pub mod client;
pub mod schema;
pub mod types;

pub use client::SheetClient;
pub use schema::{ColumnMap, ensure_columns};
pub use types::{Cell, Column, NewCell, NewRow, Row, RowPatch, Sheet};

use crate::error::Result;

/// A failed insert or update request.
///
/// Carries only transport facts; the writer layers on batch position
/// and committed-row counts when converting to [`crate::Error::Write`].
#[derive(Debug, Clone)]
pub struct WriteFailure {
    /// HTTP status of the failed request (0 when the transport itself failed).
    pub status: u16,
    /// Response body or transport error text.
    pub message: String,
}

/// Operations the synchronizer consumes from the spreadsheet service.
pub trait SheetService {
    /// Read the sheet; with `include_rows` the response carries every row.
    fn get_sheet(
        &self,
        sheet_id: &str,
        include_rows: bool,
    ) -> impl std::future::Future<Output = Result<Sheet>>;

    /// Append a column named `title` at position `index`.
    fn add_column(
        &self,
        sheet_id: &str,
        title: &str,
        index: usize,
    ) -> impl std::future::Future<Output = Result<Column>>;

    /// Insert a batch of rows.
    fn add_rows(
        &self,
        sheet_id: &str,
        rows: &[NewRow],
    ) -> impl std::future::Future<Output = std::result::Result<(), WriteFailure>>;

    /// Patch a batch of existing rows by identifier.
    fn update_rows(
        &self,
        sheet_id: &str,
        rows: &[RowPatch],
    ) -> impl std::future::Future<Output = std::result::Result<(), WriteFailure>>;
}
