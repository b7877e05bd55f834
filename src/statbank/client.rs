//! HTTP client for the upstream Statistikbank API.

use anyhow::Result;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::error::StatbankError;
use super::models::{DataQuery, Lang, SubjectsQuery, TablesQuery};
use crate::server::metrics;

pub const DEFAULT_BASE_URL: &str = "https://api.statbank.dk/v1";

/// A raw upstream data response: body bytes and content type, passed
/// through to the caller unchanged.
#[derive(Debug, Clone)]
pub struct DataPayload {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Client for the Statistikbank endpoints. All calls POST a JSON request
/// body, which is how the upstream API takes its parameters.
pub struct StatbankClient {
    client: reqwest::Client,
    base_url: String,
}

impl StatbankClient {
    /// # Arguments
    /// * `base_url` - Base URL of the upstream API (e.g., "https://api.statbank.dk/v1")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the subject hierarchy.
    pub async fn subjects(&self, query: &SubjectsQuery) -> Result<Value, StatbankError> {
        self.post_json("subjects", query.to_payload()).await
    }

    /// Fetch a single subject by code. Returns `None` when upstream answers
    /// a well-formed filtered query with no matching subject.
    pub async fn subject(
        &self,
        subject_id: &str,
        lang: Lang,
    ) -> Result<Option<Value>, StatbankError> {
        let query = SubjectsQuery {
            subjects: vec![subject_id.to_string()],
            lang,
            ..Default::default()
        };
        let hierarchy = self.subjects(&query).await?;

        let found = hierarchy.as_array().and_then(|subjects| {
            subjects
                .iter()
                .find(|subject| {
                    subject
                        .get("id")
                        .and_then(Value::as_str)
                        .map(|id| id.eq_ignore_ascii_case(subject_id))
                        .unwrap_or(false)
                })
                .cloned()
        });

        Ok(found)
    }

    /// Fetch table summaries.
    pub async fn tables(&self, query: &TablesQuery) -> Result<Value, StatbankError> {
        self.post_json("tables", query.to_payload()).await
    }

    /// Fetch a table's variable/value-code catalog.
    pub async fn table_info(&self, table_id: &str, lang: Lang) -> Result<Value, StatbankError> {
        let payload = json!({ "table": table_id, "format": "JSON", "lang": lang });
        self.post_json("tableinfo", payload).await
    }

    /// Fetch data in the query's requested format. The response body and
    /// content type come from upstream unchanged.
    pub async fn data(
        &self,
        table_id: &str,
        query: &DataQuery,
    ) -> Result<DataPayload, StatbankError> {
        self.post("data", query.to_payload(table_id)).await
    }

    async fn post(&self, endpoint: &str, payload: Value) -> Result<DataPayload, StatbankError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("POST {} {}", url, payload);

        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        metrics::record_upstream_request(endpoint, status.as_u16());

        if status.is_client_error() {
            return Err(StatbankError::UpstreamClient {
                status: status.as_u16(),
                content_type,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        if status.is_server_error() {
            return Err(StatbankError::UpstreamServer {
                status: status.as_u16(),
                content_type,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(DataPayload { content_type, body })
    }

    async fn post_json(&self, endpoint: &str, payload: Value) -> Result<Value, StatbankError> {
        let response = self.post(endpoint, payload).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
