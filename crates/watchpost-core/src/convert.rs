// ── Wire → domain conversion ──
//
// Validation pass between decoding and rendering. serde has already
// enforced field types for nodes and alerts; metric values arrive as raw
// JSON and are checked here. Any violation fails the whole cycle, so the
// render phase only ever sees well-formed data.

use watchpost_api::{CentralAlert, NodeStatus, StatusPayload};

use crate::error::CoreError;
use crate::model::{AlertRecord, Health, MetricValue, MetricsSnapshot, NodeRecord, Nodes};

impl From<NodeStatus> for NodeRecord {
    fn from(raw: NodeStatus) -> Self {
        Self {
            health: Health::from(raw.health),
            uptime_s: raw.uptime_s,
            last_seen_age_s: raw.last_seen_age_s,
            last_sequence_number: raw.last_sequence_number,
        }
    }
}

impl From<CentralAlert> for AlertRecord {
    fn from(raw: CentralAlert) -> Self {
        Self {
            timestamp_utc: raw.timestamp_utc,
            alert_id: raw.alert_id,
            source_node_id: raw.source_node_id,
            classification: raw.classification,
            processing_latency_ms: raw.processing_latency_ms,
        }
    }
}

impl TryFrom<(String, serde_json::Value)> for MetricValue {
    type Error = CoreError;

    fn try_from((name, value): (String, serde_json::Value)) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Number(n) => Ok(Self::Number(n)),
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            other => Err(CoreError::MalformedPayload {
                endpoint: "status",
                message: format!("metric `{name}` is neither a number nor a string: {other}"),
            }),
        }
    }
}

/// Split a status payload into validated metrics and nodes.
pub fn status_to_domain(payload: StatusPayload) -> Result<(MetricsSnapshot, Nodes), CoreError> {
    let metrics = payload
        .metrics
        .into_iter()
        .map(|(name, value)| -> Result<(String, MetricValue), CoreError> {
            let parsed = MetricValue::try_from((name.clone(), value))?;
            Ok((name, parsed))
        })
        .collect::<Result<MetricsSnapshot, CoreError>>()?;

    let nodes = payload
        .nodes
        .into_iter()
        .map(|(id, raw)| (id, NodeRecord::from(raw)))
        .collect();

    Ok((metrics, nodes))
}

pub fn alerts_to_domain(alerts: Vec<CentralAlert>) -> Vec<AlertRecord> {
    alerts.into_iter().map(AlertRecord::from).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::HealthClass;

    #[test]
    fn status_converts_in_payload_order() {
        let payload: StatusPayload = serde_json::from_value(json!({
            "metrics": { "b": 2, "a": "two" },
            "nodes": {
                "node-9": {
                    "health": "FAILED",
                    "uptime_s": 1.0,
                    "last_seen_age_s": 4.0,
                    "last_sequence_number": 3
                }
            }
        }))
        .unwrap();

        let (metrics, nodes) = status_to_domain(payload).unwrap();

        let names: Vec<&str> = metrics.keys().map(String::as_str).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(metrics["a"], MetricValue::Text("two".into()));
        assert_eq!(nodes["node-9"].health, Health::Failed);
        assert_eq!(nodes["node-9"].health.style_class(), HealthClass::Failed);
    }

    #[test]
    fn non_scalar_metric_is_rejected() {
        let payload: StatusPayload = serde_json::from_value(json!({
            "metrics": { "ok": 1, "nested": { "x": 1 } }
        }))
        .unwrap();

        let err = status_to_domain(payload).unwrap_err();
        assert!(
            matches!(err, CoreError::MalformedPayload { endpoint: "status", ref message } if message.contains("nested")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn alerts_keep_order_and_fields() {
        let alerts = alerts_to_domain(vec![
            CentralAlert {
                timestamp_utc: "t1".into(),
                alert_id: "id-1".into(),
                source_node_id: "node-1".into(),
                classification: "LOW".into(),
                processing_latency_ms: 1.0,
            },
            CentralAlert {
                timestamp_utc: "t2".into(),
                alert_id: "id-2".into(),
                source_node_id: "node-2".into(),
                classification: "HIGH".into(),
                processing_latency_ms: 2.0,
            },
        ]);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].alert_id, "id-1");
        assert_eq!(alerts[1].classification, "HIGH");
    }
}
