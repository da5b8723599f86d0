pub mod api;
pub mod client;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use api::EsApi;
pub use client::EsClient;

/// HTTP vrstva nad Elasticsearch clusterem
///
/// Collector, provisioner i publisher pracují jen přes tento trait, takže je
/// lze v testech pustit proti in-memory implementaci.
#[async_trait]
pub trait EsTransport: Send + Sync {
    /// GET s JSON odpovědí
    async fn get_json(&self, path: &str) -> Result<Value>;

    /// PUT s textovým (JSON) tělem
    async fn put_raw(&self, path: &str, body: String) -> Result<Value>;

    /// POST s newline-delimited tělem (bulk API)
    async fn post_ndjson(&self, path: &str, body: String) -> Result<Value>;

    fn base_url(&self) -> &str;
}
