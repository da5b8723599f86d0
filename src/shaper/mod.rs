//! Převod surových odpovědí zdrojového clusteru na monitorovací dokumenty.
//!
//! Čisté funkce bez I/O; čas cyklu a UUID clusteru dostávají parametrem.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::AgentError;
use crate::es::api::{NodesStatsResponse, RawNodeStats};
use crate::models::{
    color_to_level, ClusterHealthDocument, ClusterStatus, MetricSubtree, NodeStats,
    NodeStatsDocument, SourceNode,
};
use crate::utils::format_timestamp;

/// Pole odstraňovaná z node stats před odesláním
///
/// Cesty, které v dané verzi Elasticsearch neexistují, se tiše přeskočí.
pub const PRUNED_FIELDS: &[(MetricSubtree, &[&str])] = &[
    (MetricSubtree::Os, &["timestamp"]),
    (MetricSubtree::Process, &["timestamp"]),
    (MetricSubtree::Jvm, &["timestamp"]),
    (MetricSubtree::Jvm, &["mem", "pools"]),
    (MetricSubtree::Jvm, &["buffer_pools"]),
    (MetricSubtree::Jvm, &["classes"]),
    (MetricSubtree::Jvm, &["uptime_in_millis"]),
    (MetricSubtree::Indices, &["segments", "file_sizes"]),
    (MetricSubtree::Fs, &["timestamp"]),
    (MetricSubtree::Fs, &["data"]),
    (MetricSubtree::Ingest, &["pipelines"]),
];

/// Smaže vnořené pole na dané cestě a vrátí jeho hodnotu
///
/// Chybějící mezilehlý klíč nebo ne-objekt na cestě je no-op.
pub fn delete_path(value: &mut Value, path: &[&str]) -> Option<Value> {
    let (last, parents) = path.split_last()?;

    let mut current = value;
    for key in parents {
        current = current.as_object_mut()?.get_mut(*key)?;
    }

    current.as_object_mut()?.remove(*last)
}

/// Cluster health -> právě jeden dokument
pub fn shape_cluster_health(
    mut raw: Map<String, Value>,
    now: DateTime<Utc>,
) -> Vec<ClusterHealthDocument> {
    let color = raw.get("status").and_then(Value::as_str);
    let status = ClusterStatus::from_color(color);
    let status_code = color_to_level(color);
    // timestamp a status_code nese dokument explicitně
    raw.remove("timestamp");
    raw.remove("status_code");

    vec![ClusterHealthDocument {
        timestamp: format_timestamp(now),
        status,
        status_code,
        fields: raw,
    }]
}

/// Node stats -> jeden dokument za každý node
///
/// Node bez některého ze sbíraných subtree shodí celý cyklus.
pub fn shape_node_stats(
    raw: NodesStatsResponse,
    cluster_uuid: &str,
    now: DateTime<Utc>,
) -> Result<Vec<NodeStatsDocument>, AgentError> {
    // Vlastní čas místo timestampu nodu, aby dokumenty z cyklu seděly k sobě
    let timestamp = format_timestamp(now);
    let cluster_name = raw.cluster_name;

    raw.nodes
        .into_iter()
        .map(|(node_id, node)| {
            let RawNodeStats {
                name,
                host,
                transport_address,
                ip,
                roles,
                metrics,
            } = node;

            let node_stats = build_node_stats(&node_id, roles, metrics)?;
            Ok(NodeStatsDocument {
                timestamp: timestamp.clone(),
                cluster_name: cluster_name.clone(),
                cluster_uuid: cluster_uuid.to_string(),
                source_node: SourceNode {
                    uuid: node_id,
                    host,
                    transport_address,
                    ip,
                    name,
                    attributes: Map::new(),
                },
                node_stats,
            })
        })
        .collect()
}

fn build_node_stats(
    node_id: &str,
    roles: Vec<String>,
    mut metrics: Map<String, Value>,
) -> Result<NodeStats, AgentError> {
    let mut take = |subtree: MetricSubtree| {
        metrics
            .remove(subtree.as_str())
            .ok_or_else(|| AgentError::MissingSubtree {
                node_id: node_id.to_string(),
                subtree: subtree.as_str(),
            })
    };

    let mut stats = NodeStats {
        node_id: node_id.to_string(),
        node_master: roles.iter().any(|role| role == "master"),
        mlockall: true,
        indices: take(MetricSubtree::Indices)?,
        os: take(MetricSubtree::Os)?,
        process: take(MetricSubtree::Process)?,
        jvm: take(MetricSubtree::Jvm)?,
        thread_pool: take(MetricSubtree::ThreadPool)?,
        fs: take(MetricSubtree::Fs)?,
        transport: take(MetricSubtree::Transport)?,
        http: take(MetricSubtree::Http)?,
        script: take(MetricSubtree::Script)?,
        ingest: take(MetricSubtree::Ingest)?,
        node_roles: roles,
    };

    for (subtree, path) in PRUNED_FIELDS {
        delete_path(stats.subtree_mut(*subtree), path);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn node_json(roles: &[&str]) -> Value {
        json!({
            "name": "node-1",
            "host": "10.0.0.1",
            "transport_address": "10.0.0.1:9300",
            "ip": "10.0.0.1",
            "roles": roles,
            "timestamp": 1704067200000u64,
            "indices": {"docs": {"count": 10}, "segments": {"count": 3, "file_sizes": {"tim": 1}}},
            "os": {"timestamp": 1, "cpu": {"percent": 5}},
            "process": {"timestamp": 1, "open_file_descriptors": 100},
            "jvm": {
                "timestamp": 1,
                "uptime_in_millis": 1000,
                "mem": {"heap_used_in_bytes": 42, "pools": {"young": {}}},
                "buffer_pools": {},
                "classes": {"current_loaded_count": 1},
                "gc": {}
            },
            "thread_pool": {"bulk": {"queue": 0}},
            "fs": {"timestamp": 1, "total": {"total_in_bytes": 100}, "data": [{"path": "/data"}]},
            "transport": {"rx_count": 1},
            "http": {"current_open": 2},
            "script": {"compilations": 0},
            "ingest": {"total": {"count": 0}, "pipelines": {"p1": {}}}
        })
    }

    fn nodes_response(nodes: Value) -> NodesStatsResponse {
        serde_json::from_value(json!({"cluster_name": "c1", "nodes": nodes})).unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_delete_path() {
        let mut value = json!({"jvm": {"mem": {"pools": 1, "heap": 2}}});
        assert_eq!(delete_path(&mut value, &["jvm", "mem", "pools"]), Some(json!(1)));
        assert_eq!(value, json!({"jvm": {"mem": {"heap": 2}}}));
    }

    #[test]
    fn test_delete_path_missing_is_noop() {
        let mut value = json!({"jvm": {"mem": 5}});
        let before = value.clone();

        assert_eq!(delete_path(&mut value, &["jvm", "classes"]), None);
        assert_eq!(delete_path(&mut value, &["indices", "segments", "file_sizes"]), None);
        // mezilehlá hodnota není objekt
        assert_eq!(delete_path(&mut value, &["jvm", "mem", "pools"]), None);
        assert_eq!(delete_path(&mut value, &[]), None);
        assert_eq!(value, before);

        let mut not_object = json!(null);
        assert_eq!(delete_path(&mut not_object, &["timestamp"]), None);
    }

    #[test]
    fn test_shape_cluster_health() {
        let raw = json!({
            "cluster_name": "c1",
            "status": "yellow",
            "number_of_nodes": 3,
            "unassigned_shards": 2
        });
        let docs = shape_cluster_health(raw.as_object().unwrap().clone(), fixed_now());

        assert_eq!(docs.len(), 1);
        let doc = serde_json::to_value(&docs[0]).unwrap();
        assert_eq!(doc["status"], "yellow");
        assert_eq!(doc["status_code"], 1);
        assert_eq!(doc["timestamp"], "2024-01-01T00:00:00.000Z");
        assert_eq!(doc["cluster_name"], "c1");
        assert_eq!(doc["number_of_nodes"], 3);
        assert_eq!(doc["unassigned_shards"], 2);
    }

    #[test]
    fn test_shape_cluster_health_keeps_raw_status() {
        let raw = json!({"cluster_name": "c1", "status": "GREEN"});
        let docs = shape_cluster_health(raw.as_object().unwrap().clone(), fixed_now());

        assert_eq!(docs[0].status, ClusterStatus::Unknown);
        let doc = serde_json::to_value(&docs[0]).unwrap();
        assert_eq!(doc["status"], "GREEN");
        assert_eq!(doc["status_code"], 3);
    }

    #[test]
    fn test_shape_cluster_health_without_status() {
        let docs = shape_cluster_health(Map::new(), fixed_now());
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].status, ClusterStatus::Unknown);
        assert_eq!(docs[0].status_code, 3);
        let doc = serde_json::to_value(&docs[0]).unwrap();
        assert!(doc.get("status").is_none());
    }

    #[test]
    fn test_shape_node_stats_master_role() {
        let raw = nodes_response(json!({"abc": node_json(&["data", "master"])}));
        let docs = shape_node_stats(raw, "uuid-1", fixed_now()).unwrap();

        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert!(doc.node_stats.node_master);
        assert!(doc.node_stats.mlockall);
        assert_eq!(doc.node_stats.node_roles, vec!["data", "master"]);
        assert_eq!(doc.node_stats.node_id, "abc");
        assert_eq!(doc.cluster_uuid, "uuid-1");
        assert_eq!(doc.cluster_name, "c1");
        assert_eq!(doc.timestamp, "2024-01-01T00:00:00.000Z");
        assert_eq!(doc.source_node.uuid, "abc");
        assert_eq!(doc.source_node.transport_address, "10.0.0.1:9300");
        assert!(doc.source_node.attributes.is_empty());
    }

    #[test]
    fn test_shape_node_stats_non_master() {
        let raw = nodes_response(json!({"n1": node_json(&["data", "ingest"])}));
        let docs = shape_node_stats(raw, "uuid-1", fixed_now()).unwrap();
        assert!(!docs[0].node_stats.node_master);
    }

    #[test]
    fn test_shape_node_stats_prunes_fields() {
        let raw = nodes_response(json!({
            "a": node_json(&["master"]),
            "b": node_json(&["data"])
        }));
        let docs = shape_node_stats(raw, "uuid-1", fixed_now()).unwrap();
        assert_eq!(docs.len(), 2);

        for doc in &docs {
            for (subtree, path) in PRUNED_FIELDS {
                let mut value = doc.node_stats.subtree(*subtree).clone();
                assert_eq!(
                    delete_path(&mut value, path),
                    None,
                    "{}.{} should be pruned",
                    subtree.as_str(),
                    path.join(".")
                );
            }

            // zbytek zůstává
            assert_eq!(doc.node_stats.jvm["mem"]["heap_used_in_bytes"], 42);
            assert_eq!(doc.node_stats.indices["segments"]["count"], 3);
            assert_eq!(doc.node_stats.fs["total"]["total_in_bytes"], 100);
            assert_eq!(doc.node_stats.ingest["total"]["count"], 0);
        }
    }

    #[test]
    fn test_shape_node_stats_tolerates_absent_pruned_fields() {
        let mut node = node_json(&["data"]);
        node["jvm"] = json!({"mem": 1});
        node["indices"] = json!({});
        node["ingest"] = json!({});

        let raw = nodes_response(json!({"a": node}));
        let docs = shape_node_stats(raw, "uuid-1", fixed_now()).unwrap();
        assert_eq!(docs[0].node_stats.jvm, json!({"mem": 1}));
        assert_eq!(docs[0].node_stats.indices, json!({}));
    }

    #[test]
    fn test_shape_node_stats_missing_subtree_fails() {
        let mut node = node_json(&["data"]);
        node.as_object_mut().unwrap().remove("script");

        let raw = nodes_response(json!({"ok": node_json(&["data"]), "broken": node}));
        let err = shape_node_stats(raw, "uuid-1", fixed_now()).unwrap_err();

        match err {
            AgentError::MissingSubtree { node_id, subtree } => {
                assert_eq!(node_id, "broken");
                assert_eq!(subtree, "script");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_node_document_serialization_shape() {
        let raw = nodes_response(json!({"abc": node_json(&["master"])}));
        let docs = shape_node_stats(raw, "uuid-1", fixed_now()).unwrap();
        let doc = serde_json::to_value(&docs[0]).unwrap();

        assert_eq!(doc["source_node"]["name"], "node-1");
        assert_eq!(doc["node_stats"]["node_master"], true);
        assert_eq!(doc["node_stats"]["thread_pool"]["bulk"]["queue"], 0);
        assert!(doc["node_stats"]["jvm"].get("classes").is_none());
        assert!(doc["node_stats"].get("timestamp").is_none());
    }
}
