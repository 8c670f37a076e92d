//! Error types for sheetsync.
//!
//! Provides structured error handling with:
//! - A category per failure stage (config, fetch, schema, write)
//! - Category-based exit codes (2=config, 3=fetch, 4=schema, 5=write)
//! - Recovery hints where an actionable suggestion exists
//!
//! Write failures additionally report how many rows earlier batches
//! had already committed, since Smartsheet offers no rollback.

use thiserror::Error;

/// Result type alias for sheetsync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which half of the write phase a failed batch belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    /// A create-rows request.
    Insert,
    /// An update-rows request.
    Update,
}

impl std::fmt::Display for WritePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Errors that can occur during a sync run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error(
        "Write error: {phase} batch {batch} failed with HTTP {status}: {message} \
         ({committed} rows committed by earlier batches)"
    )]
    Write {
        phase: WritePhase,
        /// 1-based batch number within its phase.
        batch: usize,
        /// HTTP status of the failed request.
        status: u16,
        /// Response body or transport error text.
        message: String,
        /// Rows applied by successful batches across both phases.
        committed: usize,
    },
}

impl Error {
    /// Category-based exit code (2-5).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Fetch(_) => 3,
            Self::Schema(_) => 4,
            Self::Write { .. } => 5,
        }
    }

    /// Recovery hint for the operator.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(msg) => {
                if msg.contains("GITHUB_TOKEN") {
                    Some("Export GITHUB_TOKEN or pass --github-token".to_string())
                } else if msg.contains("SMARTSHEET_ACCESS_TOKEN") {
                    Some("Export SMARTSHEET_ACCESS_TOKEN or pass --sheet-token".to_string())
                } else if msg.contains("SMARTSHEET_SHEET_ID") {
                    Some("Export SMARTSHEET_SHEET_ID or pass --sheet-id".to_string())
                } else {
                    None
                }
            }
            Self::Write { committed, .. } => Some(format!(
                "{committed} rows were already written and are not rolled back. \
                 Rerunning after the failure is resolved is safe: rows already \
                 present are matched by (number, title) and skipped or patched."
            )),
            Self::Fetch(_) | Self::Schema(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(Error::Config("x".into()).exit_code(), 2);
        assert_eq!(Error::Fetch("x".into()).exit_code(), 3);
        assert_eq!(Error::Schema("x".into()).exit_code(), 4);
        let write = Error::Write {
            phase: WritePhase::Insert,
            batch: 1,
            status: 500,
            message: "boom".into(),
            committed: 0,
        };
        assert_eq!(write.exit_code(), 5);
    }

    #[test]
    fn write_error_reports_committed_rows() {
        let err = Error::Write {
            phase: WritePhase::Update,
            batch: 2,
            status: 503,
            message: "service unavailable".into(),
            committed: 600,
        };
        let text = err.to_string();
        assert!(text.contains("update batch 2"));
        assert!(text.contains("HTTP 503"));
        assert!(text.contains("600 rows committed"));
        assert!(err.hint().unwrap().contains("600 rows"));
    }

    #[test]
    fn config_hint_names_the_missing_variable() {
        let err = Error::Config("GITHUB_TOKEN is not set".into());
        assert!(err.hint().unwrap().contains("GITHUB_TOKEN"));
        assert!(Error::Fetch("x".into()).hint().is_none());
    }
}
