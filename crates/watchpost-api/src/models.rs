// Backend wire types
//
// Shapes of the two JSON documents the backend serves. Field names match
// the wire exactly; unknown fields (`recent_alerts`, `msg_type`,
// `event_id`, `monotonic_ns`, ...) are ignored.

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── /api/status ──────────────────────────────────────────────────────

/// Body of `GET /api/status`.
///
/// Both maps default to empty when absent or falsy (`null`, `false`, `0`,
/// `""`). Map order is the order keys appeared in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Aggregate counters keyed by metric name. Values are expected to be
    /// numbers or strings; core validates that.
    #[serde(default, deserialize_with = "falsy_as_default")]
    pub metrics: IndexMap<String, serde_json::Value>,
    /// Per-node status keyed by node id.
    #[serde(default, deserialize_with = "falsy_as_default")]
    pub nodes: IndexMap<String, NodeStatus>,
}

/// One entry of the `nodes` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStatus {
    /// `OK`, `DEGRADED`, `FAILED`, or anything else the backend invents.
    pub health: String,
    pub uptime_s: f64,
    /// Seconds since the backend last heard from this node.
    pub last_seen_age_s: f64,
    pub last_sequence_number: u64,
}

// ── /api/alerts ──────────────────────────────────────────────────────

/// Body of `GET /api/alerts`. A falsy body is an empty feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AlertFeed {
    #[serde(deserialize_with = "falsy_as_default")]
    pub alerts: Vec<CentralAlert>,
}

/// One element of the `GET /api/alerts` array (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralAlert {
    pub timestamp_utc: String,
    pub alert_id: String,
    pub source_node_id: String,
    pub classification: String,
    pub processing_latency_ms: f64,
}

/// `null`, `false`, `0` and `""`.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn falsy_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy(&value) {
        return Ok(T::default());
    }
    T::deserialize(value).map_err(D::Error::custom)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_preserves_metric_order() {
        let payload: StatusPayload = serde_json::from_value(json!({
            "metrics": { "zeta": 1, "alpha": "x", "mid": 2.5 },
            "nodes": {}
        }))
        .unwrap();

        let keys: Vec<&str> = payload.metrics.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn status_missing_or_null_sections_are_empty() {
        let empty: StatusPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.metrics.is_empty());
        assert!(empty.nodes.is_empty());

        let nulls: StatusPayload =
            serde_json::from_value(json!({ "metrics": null, "nodes": null })).unwrap();
        assert!(nulls.metrics.is_empty());
        assert!(nulls.nodes.is_empty());
    }

    #[test]
    fn status_falsy_sections_are_empty() {
        let payload: StatusPayload =
            serde_json::from_value(json!({ "metrics": false, "nodes": 0 })).unwrap();
        assert!(payload.metrics.is_empty());
        assert!(payload.nodes.is_empty());

        let payload: StatusPayload = serde_json::from_value(json!({ "metrics": "" })).unwrap();
        assert!(payload.metrics.is_empty());
    }

    #[test]
    fn status_truthy_non_map_is_rejected() {
        let result: Result<StatusPayload, _> = serde_json::from_value(json!({ "nodes": true }));
        assert!(result.is_err());
    }

    #[test]
    fn alert_feed_falsy_bodies_are_empty() {
        for body in ["null", "false", "0", "0.0", "\"\""] {
            let feed: AlertFeed = serde_json::from_str(body).unwrap();
            assert!(feed.alerts.is_empty(), "body {body}");
        }
    }

    #[test]
    fn alert_feed_rejects_truthy_scalars() {
        assert!(serde_json::from_str::<AlertFeed>("1").is_err());
        assert!(serde_json::from_str::<AlertFeed>("\"x\"").is_err());
    }

    #[test]
    fn status_ignores_extra_fields() {
        let payload: StatusPayload = serde_json::from_value(json!({
            "nodes": {
                "node-1": {
                    "health": "OK",
                    "uptime_s": 12,
                    "last_seen_age_s": 0.25,
                    "last_sequence_number": 40
                }
            },
            "recent_alerts": []
        }))
        .unwrap();

        let node = &payload.nodes["node-1"];
        assert_eq!(node.health, "OK");
        assert!((node.uptime_s - 12.0).abs() < f64::EPSILON);
        assert_eq!(node.last_sequence_number, 40);
    }

    #[test]
    fn node_with_non_numeric_uptime_is_rejected() {
        let result: Result<StatusPayload, _> = serde_json::from_value(json!({
            "nodes": {
                "node-1": {
                    "health": "OK",
                    "uptime_s": "soon",
                    "last_seen_age_s": 0.1,
                    "last_sequence_number": 1
                }
            }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn alert_ignores_wire_only_fields() {
        let alert: CentralAlert = serde_json::from_value(json!({
            "msg_type": "CentralAlert",
            "alert_id": "0f9e8d7c-6b5a-4000-8000-000000000001",
            "event_id": "evt-1",
            "source_node_id": "node-3",
            "timestamp_utc": "2024-05-01T12:00:00.123Z",
            "monotonic_ns": 123_456_789_u64,
            "classification": "HIGH",
            "processing_latency_ms": 21.0
        }))
        .unwrap();

        assert_eq!(alert.source_node_id, "node-3");
        assert_eq!(alert.classification, "HIGH");
    }
}
