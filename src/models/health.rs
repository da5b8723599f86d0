use serde::Serialize;
use serde_json::{Map, Value};

/// Stav clusteru podle `_cluster/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    Green,
    Yellow,
    Red,
    Unknown,
}

impl ClusterStatus {
    /// Převede barvu z Elasticsearch na stav, neznámá nebo chybějící je `Unknown`
    pub fn from_color(color: Option<&str>) -> Self {
        match color {
            Some("green") => ClusterStatus::Green,
            Some("yellow") => ClusterStatus::Yellow,
            Some("red") => ClusterStatus::Red,
            _ => ClusterStatus::Unknown,
        }
    }

    /// Číselná úroveň 0-3 (čím vyšší, tím horší)
    pub fn level(self) -> u8 {
        match self {
            ClusterStatus::Green => 0,
            ClusterStatus::Yellow => 1,
            ClusterStatus::Red => 2,
            ClusterStatus::Unknown => 3,
        }
    }
}

pub fn color_to_level(color: Option<&str>) -> u8 {
    ClusterStatus::from_color(color).level()
}

/// Jeden snapshot cluster health za cyklus
#[derive(Debug, Clone, Serialize)]
pub struct ClusterHealthDocument {
    pub timestamp: String,
    /// Odvozeno ze surového `status`, který zůstává ve `fields`
    #[serde(skip)]
    pub status: ClusterStatus,
    pub status_code: u8,
    /// Pole z `_cluster/health` beze změny, včetně `status`
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
