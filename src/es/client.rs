use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::EsTransport;
use crate::error::AgentError;

#[derive(Debug, Clone)]
pub struct EsClient {
    base_url: String,
    client: Client,
}

impl EsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Ořízni trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, url: String, request: RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        Self::handle_response(url, response).await
    }

    async fn handle_response(url: String, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {}", url))?;

        Self::parse_body(url, status, body)
    }

    /// Cokoliv jiného než 200 je chyba
    fn parse_body(url: String, status: StatusCode, body: String) -> Result<Value> {
        if status != StatusCode::OK {
            return Err(AgentError::UnexpectedStatus {
                url,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            anyhow::Error::from(AgentError::InvalidResponse {
                url,
                reason: e.to_string(),
            })
        })
    }
}

#[async_trait]
impl EsTransport for EsClient {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    async fn put_raw(&self, path: &str, body: String) -> Result<Value> {
        let url = self.url(path);
        let request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send(url, request).await
    }

    async fn post_ndjson(&self, path: &str, body: String) -> Result<Value> {
        let url = self.url(path);
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body);
        self.send(url, request).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
