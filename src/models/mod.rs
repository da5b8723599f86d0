pub mod health;
pub mod node;

use serde::Serialize;

pub use health::{color_to_level, ClusterHealthDocument, ClusterStatus};
pub use node::{MetricSubtree, NodeStats, NodeStatsDocument, SourceNode};

/// Dokument určený k zápisu do monitorovacího indexu
///
/// Serializuje se bez tagu, typ nese až bulk action řádek (`_type`).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MonitoringDocument {
    ClusterHealth(ClusterHealthDocument),
    NodeStats(NodeStatsDocument),
}

impl MonitoringDocument {
    /// Hodnota `_type` v bulk action metadatech
    pub fn doc_type(&self) -> &'static str {
        match self {
            MonitoringDocument::ClusterHealth(_) => "cluster_health",
            MonitoringDocument::NodeStats(_) => "node_stats",
        }
    }
}

impl From<ClusterHealthDocument> for MonitoringDocument {
    fn from(doc: ClusterHealthDocument) -> Self {
        MonitoringDocument::ClusterHealth(doc)
    }
}

impl From<NodeStatsDocument> for MonitoringDocument {
    fn from(doc: NodeStatsDocument) -> Self {
        MonitoringDocument::NodeStats(doc)
    }
}
