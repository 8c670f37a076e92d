//! Run configuration.
//!
//! All external inputs are resolved here once, before any network call.
//! The resulting [`Config`] is passed by reference into each component;
//! nothing else in the crate reads the environment.

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Validated configuration for one sync run.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub API token.
    pub github_token: String,
    /// Smartsheet API token.
    pub sheet_token: String,
    /// Identifier of the target sheet.
    pub sheet_id: String,
    /// Repository whose issues are mirrored, as `owner/name`.
    pub repo: String,
    /// Maximum rows per insert/update request.
    pub batch_size: usize,
    /// When set, stop after planning and report would-be counts.
    pub dry_run: bool,
}

impl Config {
    /// Resolve configuration from parsed CLI arguments.
    ///
    /// clap has already merged environment variables into the optional
    /// fields; this step only enforces presence and sanity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required credential or identifier
    /// is missing or the batch size is zero.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let github_token = require(cli.github_token.as_deref(), "GITHUB_TOKEN")?;
        let sheet_token = require(cli.sheet_token.as_deref(), "SMARTSHEET_ACCESS_TOKEN")?;
        let sheet_id = require(cli.sheet_id.as_deref(), "SMARTSHEET_SHEET_ID")?;

        if cli.batch_size == 0 {
            return Err(Error::Config("batch size must be at least 1".into()));
        }
        if !cli.repo.contains('/') {
            return Err(Error::Config(format!(
                "repository must be given as owner/name, got '{}'",
                cli.repo
            )));
        }

        Ok(Self {
            github_token,
            sheet_token,
            sheet_id,
            repo: cli.repo.clone(),
            batch_size: cli.batch_size,
            dry_run: cli.dry_run,
        })
    }
}

fn require(value: Option<&str>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(Error::Config(format!("{name} is not set"))),
    }
}
