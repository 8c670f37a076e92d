//! GitHub issue source.
//!
//! Fetches every issue (open and closed) from one repository via the
//! REST v3 issues endpoint and normalizes them into [`IssueRecord`]s.
//! The endpoint interleaves pull requests with issues; entries carrying
//! a `pull_request` key are filtered out.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

const GITHUB_API: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;

/// A normalized issue as fetched from the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    /// The tracker's issue number.
    pub number: i64,
    /// Issue title, part of the reconciliation key.
    pub title: String,
    /// Tracker-defined state, e.g. `open` or `closed`.
    pub state: String,
}

/// Raw issue shape from the REST API.
///
/// `pull_request` is only present on pull requests.
#[derive(Debug, Deserialize)]
struct RawIssue {
    number: i64,
    title: String,
    state: String,
    pull_request: Option<serde_json::Value>,
}

/// Issue source bound to one repository.
pub struct IssueSource {
    client: reqwest::Client,
    token: String,
    repo: String,
    base_url: String,
}

impl IssueSource {
    /// Create an issue source for `repo` (`owner/name`).
    #[must_use]
    pub fn new(token: &str, repo: &str) -> Self {
        Self::with_base_url(token, repo, GITHUB_API)
    }

    /// Create an issue source against a custom API root.
    #[must_use]
    pub fn with_base_url(token: &str, repo: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.to_string(),
            repo: repo.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch all issues regardless of state, in API order.
    ///
    /// Paginates until a short or empty page. Pull requests are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on transport failures, non-2xx responses,
    /// or an unparseable response body.
    pub async fn fetch_all(&self) -> Result<Vec<IssueRecord>> {
        let mut issues = Vec::new();
        let mut page = 1usize;

        loop {
            let url = format!(
                "{}/repos/{}/issues?state=all&per_page={PAGE_SIZE}&page={page}",
                self.base_url, self.repo
            );

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .header("Accept", "application/vnd.github+json")
                // GitHub rejects requests without a User-Agent.
                .header("User-Agent", concat!("sheetsync/", env!("CARGO_PKG_VERSION")))
                .send()
                .await
                .map_err(|e| Error::Fetch(format!("GitHub request failed: {e}")))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Fetch(format!(
                    "GitHub API error ({status}) for {}: {body}",
                    self.repo
                )));
            }

            let batch: Vec<RawIssue> = response
                .json()
                .await
                .map_err(|e| Error::Fetch(format!("Failed to parse GitHub response: {e}")))?;
            let batch_len = batch.len();

            for raw in batch {
                if raw.pull_request.is_some() {
                    continue;
                }
                debug!(number = raw.number, state = %raw.state, title = %raw.title, "fetched issue");
                issues.push(IssueRecord {
                    number: raw.number,
                    title: raw.title,
                    state: raw.state,
                });
            }

            if batch_len < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(issues)
    }
}
