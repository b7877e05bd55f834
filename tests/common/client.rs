//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per adapter endpoint. When routes or
//! request formats change, update only this file.

use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

use super::constants::REQUEST_TIMEOUT_SECS;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /statbank/subjects
    ///
    /// `query` is the raw query string, e.g. "?lang=en" (empty for none).
    pub async fn get_subjects(&self, query: &str) -> Response {
        self.client
            .get(format!("{}/statbank/subjects{}", self.base_url, query))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /statbank/subjects/{subject_id}
    pub async fn get_subject(&self, subject_id: &str) -> Response {
        self.client
            .get(format!(
                "{}/statbank/subjects/{}",
                self.base_url, subject_id
            ))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /statbank/tables
    pub async fn get_tables(&self, query: &str) -> Response {
        self.client
            .get(format!("{}/statbank/tables{}", self.base_url, query))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /statbank/tableinfo/{table_id}
    pub async fn get_tableinfo(&self, table_id: &str) -> Response {
        self.client
            .get(format!(
                "{}/statbank/tableinfo/{}",
                self.base_url, table_id
            ))
            .send()
            .await
            .expect("Request failed")
    }

    /// POST /statbank/data/{table_id}
    pub async fn post_data(&self, table_id: &str, query: &str, body: Option<Value>) -> Response {
        let mut request = self
            .client
            .post(format!(
                "{}/statbank/data/{}{}",
                self.base_url, table_id, query
            ));
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.expect("Request failed")
    }
}
