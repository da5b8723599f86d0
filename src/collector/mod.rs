use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::es::{EsApi, EsTransport};
use crate::models::MonitoringDocument;
use crate::shaper::{shape_cluster_health, shape_node_stats};

/// Zjistí UUID zdrojového clusteru (jednou při startu)
pub async fn discover_cluster_uuid<T: EsTransport + ?Sized>(source: &T) -> Result<String> {
    let info = source
        .root_info()
        .await
        .context("Failed to discover cluster UUID")?;

    tracing::info!(
        "Monitoring cluster {} ({}), version {}",
        info.cluster_name.as_deref().unwrap_or("-"),
        info.cluster_uuid,
        info.version.as_ref().map(|v| v.number.as_str()).unwrap_or("-")
    );

    Ok(info.cluster_uuid)
}

/// Stahuje health a node stats ze zdrojového clusteru
pub struct Collector<T> {
    source: T,
    cluster_uuid: String,
}

impl<T: EsTransport> Collector<T> {
    pub fn new(source: T, cluster_uuid: String) -> Self {
        Self {
            source,
            cluster_uuid,
        }
    }

    /// Jeden sběr: node stats dokumenty následované cluster health dokumentem
    pub async fn collect(&self, now: DateTime<Utc>) -> Result<Vec<MonitoringDocument>> {
        let health = self
            .source
            .cluster_health()
            .await
            .context("Failed to fetch cluster health")?;

        let stats = self
            .source
            .nodes_stats()
            .await
            .context("Failed to fetch node stats")?;

        tracing::debug!(
            "Fetched stats for {} nodes of cluster {}",
            stats.nodes.len(),
            stats.cluster_name
        );

        let node_docs = shape_node_stats(stats, &self.cluster_uuid, now)?;
        let health_docs = shape_cluster_health(health, now);
        if let Some(doc) = health_docs.first() {
            tracing::debug!("Cluster status: {:?} ({})", doc.status, doc.status_code);
        }

        Ok(node_docs
            .into_iter()
            .map(MonitoringDocument::from)
            .chain(health_docs.into_iter().map(MonitoringDocument::from))
            .collect())
    }
}
