use serde::Serialize;
use serde_json::{Map, Value};

/// Metrické subtree, které se z `_nodes/stats` přenáší do dokumentu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSubtree {
    Indices,
    Os,
    Process,
    Jvm,
    ThreadPool,
    Fs,
    Transport,
    Http,
    Script,
    Ingest,
}

impl MetricSubtree {
    /// Klíč v odpovědi i ve výsledném dokumentu
    pub fn as_str(self) -> &'static str {
        match self {
            MetricSubtree::Indices => "indices",
            MetricSubtree::Os => "os",
            MetricSubtree::Process => "process",
            MetricSubtree::Jvm => "jvm",
            MetricSubtree::ThreadPool => "thread_pool",
            MetricSubtree::Fs => "fs",
            MetricSubtree::Transport => "transport",
            MetricSubtree::Http => "http",
            MetricSubtree::Script => "script",
            MetricSubtree::Ingest => "ingest",
        }
    }
}

/// Popis nodu, ze kterého statistiky pochází
#[derive(Debug, Clone, Serialize)]
pub struct SourceNode {
    pub uuid: String,
    pub host: String,
    pub transport_address: String,
    pub ip: Value,
    pub name: String,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeStats {
    pub node_id: String,
    pub node_master: bool,
    pub node_roles: Vec<String>,
    pub mlockall: bool, // kvůli kompatibilitě se schématem monitoringu
    pub indices: Value,
    pub os: Value,
    pub process: Value,
    pub jvm: Value,
    pub thread_pool: Value,
    pub fs: Value,
    pub transport: Value,
    pub http: Value,
    pub script: Value,
    pub ingest: Value,
}

impl NodeStats {
    #[cfg(test)]
    pub fn subtree(&self, subtree: MetricSubtree) -> &Value {
        match subtree {
            MetricSubtree::Indices => &self.indices,
            MetricSubtree::Os => &self.os,
            MetricSubtree::Process => &self.process,
            MetricSubtree::Jvm => &self.jvm,
            MetricSubtree::ThreadPool => &self.thread_pool,
            MetricSubtree::Fs => &self.fs,
            MetricSubtree::Transport => &self.transport,
            MetricSubtree::Http => &self.http,
            MetricSubtree::Script => &self.script,
            MetricSubtree::Ingest => &self.ingest,
        }
    }

    pub fn subtree_mut(&mut self, subtree: MetricSubtree) -> &mut Value {
        match subtree {
            MetricSubtree::Indices => &mut self.indices,
            MetricSubtree::Os => &mut self.os,
            MetricSubtree::Process => &mut self.process,
            MetricSubtree::Jvm => &mut self.jvm,
            MetricSubtree::ThreadPool => &mut self.thread_pool,
            MetricSubtree::Fs => &mut self.fs,
            MetricSubtree::Transport => &mut self.transport,
            MetricSubtree::Http => &mut self.http,
            MetricSubtree::Script => &mut self.script,
            MetricSubtree::Ingest => &mut self.ingest,
        }
    }
}

/// Dokument `node_stats` - jeden za node a cyklus
#[derive(Debug, Clone, Serialize)]
pub struct NodeStatsDocument {
    pub timestamp: String,
    pub cluster_name: String,
    pub cluster_uuid: String,
    pub source_node: SourceNode,
    pub node_stats: NodeStats,
}
