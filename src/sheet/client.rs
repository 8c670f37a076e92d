//! HTTP client for the Smartsheet REST API.
//!
//! Implements [`SheetService`] over reqwest with bearer-token auth.
//! Every call is a single blocking await; retries, if wanted, belong
//! to a wrapping transport, not here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Column, NewRow, RowPatch, Sheet};
use super::{SheetService, WriteFailure};
use crate::error::{Error, Result};

const SMARTSHEET_API: &str = "https://api.smartsheet.com/2.0";

/// Column type permissive enough to hold both numbers and text.
const COLUMN_TYPE: &str = "TEXT_NUMBER";

/// Smartsheet REST client.
pub struct SheetClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateColumnRequest<'a> {
    title: &'a str,
    #[serde(rename = "type")]
    column_type: &'a str,
    index: usize,
}

/// Create-column response envelope.
///
/// The service has been observed returning the created column directly,
/// wrapped under a `result` key, or as the first element of a `result`
/// list. Decoded as an explicit variant set; anything else is a
/// [`Error::Schema`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreateColumnResponse {
    Wrapped { result: Column },
    WrappedList { result: Vec<Column> },
    Direct(Column),
}

impl CreateColumnResponse {
    fn into_column(self) -> Option<Column> {
        match self {
            Self::Wrapped { result } | Self::Direct(result) => Some(result),
            Self::WrappedList { result } => result.into_iter().next(),
        }
    }
}

impl SheetClient {
    /// Create a client against the public API.
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, SMARTSHEET_API)
    }

    /// Create a client against a custom API root.
    #[must_use]
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn check_write_response(
        response: std::result::Result<reqwest::Response, reqwest::Error>,
    ) -> std::result::Result<(), WriteFailure> {
        let response = response.map_err(|e| WriteFailure {
            status: 0,
            message: format!("request failed: {e}"),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(WriteFailure {
            status: status.as_u16(),
            message: body,
        })
    }
}

impl SheetService for SheetClient {
    async fn get_sheet(&self, sheet_id: &str, include_rows: bool) -> Result<Sheet> {
        let mut url = format!("{}/sheets/{sheet_id}", self.base_url);
        if include_rows {
            url.push_str("?include=all");
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Sheet read failed for sheet {sheet_id}: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Fetch(format!(
                "Sheet service error ({status}) reading sheet {sheet_id}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to parse sheet {sheet_id}: {e}")))
    }

    async fn add_column(&self, sheet_id: &str, title: &str, index: usize) -> Result<Column> {
        let url = format!("{}/sheets/{sheet_id}/columns", self.base_url);
        let request = CreateColumnRequest {
            title,
            column_type: COLUMN_TYPE,
            index,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::Schema(format!(
                    "Column create request failed for sheet {sheet_id}: {e}"
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Schema(format!(
                "Column create failed ({status}) for '{title}' on sheet {sheet_id}: {body}"
            )));
        }

        let envelope: CreateColumnResponse = response.json().await.map_err(|e| {
            Error::Schema(format!(
                "Unrecognized column create response for '{title}': {e}"
            ))
        })?;

        let column = envelope.into_column().ok_or_else(|| {
            Error::Schema(format!("Column create response for '{title}' held no column"))
        })?;
        debug!(column_id = column.id, title, "created column");
        Ok(column)
    }

    async fn add_rows(
        &self,
        sheet_id: &str,
        rows: &[NewRow],
    ) -> std::result::Result<(), WriteFailure> {
        let url = format!("{}/sheets/{sheet_id}/rows", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(rows)
            .send()
            .await;
        Self::check_write_response(response).await
    }

    async fn update_rows(
        &self,
        sheet_id: &str,
        rows: &[RowPatch],
    ) -> std::result::Result<(), WriteFailure> {
        let url = format!("{}/sheets/{sheet_id}/rows", self.base_url);
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(rows)
            .send()
            .await;
        Self::check_write_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_response_direct_shape() {
        let body = r#"{"id": 77, "title": "Status", "type": "TEXT_NUMBER"}"#;
        let envelope: CreateColumnResponse = serde_json::from_str(body).unwrap();
        let column = envelope.into_column().unwrap();
        assert_eq!(column.id, 77);
    }

    #[test]
    fn column_response_wrapped_shape() {
        let body = r#"{"message": "SUCCESS", "resultCode": 0,
                       "result": {"id": 78, "title": "Status"}}"#;
        let envelope: CreateColumnResponse = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_column().unwrap().id, 78);
    }

    #[test]
    fn column_response_wrapped_list_shape() {
        let body = r#"{"message": "SUCCESS", "resultCode": 0,
                       "result": [{"id": 79, "title": "Status"}, {"id": 80, "title": "Extra"}]}"#;
        let envelope: CreateColumnResponse = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_column().unwrap().id, 79);
    }

    #[test]
    fn column_response_empty_list_holds_no_column() {
        let body = r#"{"result": []}"#;
        let envelope: CreateColumnResponse = serde_json::from_str(body).unwrap();
        assert!(envelope.into_column().is_none());
    }

    #[test]
    fn column_response_garbage_is_rejected() {
        let body = r#"{"message": "SUCCESS", "resultCode": 0}"#;
        assert!(serde_json::from_str::<CreateColumnResponse>(body).is_err());
    }
}
