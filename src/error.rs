use std::path::PathBuf;

use thiserror::Error;

/// Chyby agenta, které volající rozlišují (zbytek jde přes anyhow)
#[derive(Debug, Error)]
pub enum AgentError {
    /// Elasticsearch vrátil jiný než úspěšný status
    #[error("Unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// Node v `_nodes/stats` nemá některý ze sbíraných subtree
    #[error("Node {node_id} is missing required stats subtree `{subtree}`")]
    MissingSubtree { node_id: String, subtree: &'static str },

    /// Odpověď nemá očekávaný tvar
    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("Failed to read templates from {}: {source}", .path.display())]
    TemplateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AgentError {
    /// HTTP status, pokud jde o chybu odpovědi
    pub fn status(&self) -> Option<u16> {
        match self {
            AgentError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
