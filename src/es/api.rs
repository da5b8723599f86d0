use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::EsTransport;
use crate::error::AgentError;

/// Odpověď `GET /`
#[derive(Debug, Deserialize)]
pub struct RootInfo {
    #[serde(default)]
    pub cluster_name: Option<String>,
    pub cluster_uuid: String,
    #[serde(default)]
    pub version: Option<VersionInfo>,
}

#[derive(Debug, Deserialize)]
pub struct VersionInfo {
    pub number: String,
}

/// Odpověď `GET /_nodes/stats`
#[derive(Debug, Deserialize)]
pub struct NodesStatsResponse {
    pub cluster_name: String,
    pub nodes: BTreeMap<String, RawNodeStats>,
}

/// Statistiky jednoho nodu tak, jak je vrací Elasticsearch
#[derive(Debug, Clone, Deserialize)]
pub struct RawNodeStats {
    pub name: String,
    pub host: String,
    pub transport_address: String,
    pub ip: Value,
    pub roles: Vec<String>,
    /// Zbytek nodu - metrické subtree (indices, os, jvm, ...) a cokoliv dalšího
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

/// Odpověď bulk API
#[derive(Debug, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub took: u64,
    pub items: Vec<BulkItem>,
}

#[derive(Debug, Deserialize)]
pub struct BulkItem {
    #[serde(default)]
    pub index: Option<BulkItemResult>,
}

#[derive(Debug, Deserialize)]
pub struct BulkItemResult {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub status: u16,
    #[serde(default)]
    pub error: Option<Value>,
}

fn parse<T: DeserializeOwned>(base_url: &str, path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        anyhow::Error::from(AgentError::InvalidResponse {
            url: format!("{}/{}", base_url, path),
            reason: e.to_string(),
        })
    })
}

/// Typované Elasticsearch API nad libovolným transportem
#[async_trait]
pub trait EsApi: EsTransport {
    /// Získá root info (cluster UUID, verze)
    async fn root_info(&self) -> Result<RootInfo> {
        let value = self.get_json("").await?;
        parse(self.base_url(), "", value)
    }

    /// Získá cluster health jako surový JSON objekt
    async fn cluster_health(&self) -> Result<Map<String, Value>> {
        let path = "_cluster/health";
        match self.get_json(path).await? {
            Value::Object(map) => Ok(map),
            other => Err(AgentError::InvalidResponse {
                url: format!("{}/{}", self.base_url(), path),
                reason: format!("expected JSON object, got {}", other),
            }
            .into()),
        }
    }

    /// Získá statistiky všech nodů
    async fn nodes_stats(&self) -> Result<NodesStatsResponse> {
        let path = "_nodes/stats";
        let value = self.get_json(path).await?;
        parse(self.base_url(), path, value)
    }

    /// Vytvoří nebo přepíše index template (legacy `_template` API)
    async fn put_template(&self, name: &str, body: String) -> Result<()> {
        let path = format!("_template/{}", name);
        self.put_raw(&path, body).await?;
        Ok(())
    }

    /// Pošle bulk payload do daného indexu
    async fn bulk(&self, index: &str, payload: String) -> Result<BulkResponse> {
        let path = format!("{}/_bulk", index);
        let value = self.post_ndjson(&path, payload).await?;
        parse(self.base_url(), &path, value)
    }
}

impl<T: EsTransport + ?Sized> EsApi for T {}
