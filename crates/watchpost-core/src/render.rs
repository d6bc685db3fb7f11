// ── Render phase ──
//
// Pure functions from a gathered snapshot to display rows. Every string a
// panel draws is produced here, so the front end only lays rows out and
// maps style classes to colors.

use crate::cycle::Gathered;
use crate::model::metric::format_number;
use crate::model::{AlertRecord, HealthClass, MetricsSnapshot, Nodes};

/// Characters of the alert id kept for display.
pub const ALERT_ID_DISPLAY_LEN: usize = 8;
/// Suffix marking a truncated alert id.
pub const TRUNCATION_MARKER: &str = "...";

/// One metric card: name and value, both verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

/// One row of the nodes table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub id: String,
    pub health: String,
    pub health_class: HealthClass,
    /// Seconds, one fractional digit.
    pub uptime: String,
    /// Seconds, two fractional digits.
    pub last_seen_age: String,
    pub last_sequence: String,
}

/// One row of the alerts table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRow {
    pub timestamp: String,
    pub short_id: String,
    pub source_node: String,
    pub classification: String,
    /// `class-` + lowercased classification.
    pub classification_class: String,
    /// Milliseconds, one fractional digit.
    pub latency: String,
}

/// The three views produced by one successful cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedViews {
    pub metrics: Vec<MetricCard>,
    pub nodes: Vec<NodeRow>,
    pub alerts: Vec<AlertRow>,
}

impl RenderedViews {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.nodes.is_empty() && self.alerts.is_empty()
    }
}

/// Render all three views from one gathered snapshot.
pub fn render(gathered: &Gathered) -> RenderedViews {
    RenderedViews {
        metrics: render_metrics(&gathered.metrics),
        nodes: render_nodes(&gathered.nodes),
        alerts: render_alerts(&gathered.alerts),
    }
}

/// One card per metric, in snapshot order.
pub fn render_metrics(metrics: &MetricsSnapshot) -> Vec<MetricCard> {
    metrics
        .iter()
        .map(|(name, value)| MetricCard {
            label: name.clone(),
            value: value.to_string(),
        })
        .collect()
}

/// One row per node, sorted by id (byte-wise, so `node-10` < `node-2`).
pub fn render_nodes(nodes: &Nodes) -> Vec<NodeRow> {
    let mut ids: Vec<&String> = nodes.keys().collect();
    ids.sort();

    ids.into_iter()
        .filter_map(|id| nodes.get(id).map(|node| (id, node)))
        .map(|(id, node)| NodeRow {
            id: id.clone(),
            health: node.health.to_string(),
            health_class: node.health.style_class(),
            uptime: to_fixed(node.uptime_s, 1),
            last_seen_age: to_fixed(node.last_seen_age_s, 2),
            last_sequence: node.last_sequence_number.to_string(),
        })
        .collect()
}

/// One row per alert, newest first (exact reverse of backend order).
pub fn render_alerts(alerts: &[AlertRecord]) -> Vec<AlertRow> {
    alerts
        .iter()
        .rev()
        .map(|alert| AlertRow {
            timestamp: alert.timestamp_utc.clone(),
            short_id: short_alert_id(&alert.alert_id),
            source_node: alert.source_node_id.clone(),
            classification: alert.classification.clone(),
            classification_class: classification_class(&alert.classification),
            latency: to_fixed(alert.processing_latency_ms, 1),
        })
        .collect()
}

/// Magnitudes at or above this skip fixed-point formatting.
const FIXED_POINT_LIMIT: f64 = 1e21;

/// Fixed-point form with `digits` fractional digits.
///
/// Values exactly halfway between two candidates round away from zero
/// (`0.25` -> `"0.3"`, `1.125` -> `"1.13"`), where `{:.N}` would pick the
/// even digit. Everything else rounds to nearest.
pub fn to_fixed(value: f64, digits: u8) -> String {
    if !value.is_finite() || value.abs() >= FIXED_POINT_LIMIT {
        return format_number(value);
    }
    let precision = usize::from(digits);
    if value == 0.0 {
        return format!("{:.precision$}", 0.0_f64);
    }

    let magnitude = value.abs();
    let nudged = if is_halfway(magnitude, digits) {
        // Next float up: no longer a tie, and still rounds to the upper candidate.
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{nudged:.precision$}")
}

/// `true` when `magnitude * 10^digits` ends in exactly `.5`.
///
/// That holds only if `magnitude * 2^(digits + 1)` is an odd integer; the
/// power-of-two scaling is exact.
fn is_halfway(magnitude: f64, digits: u8) -> bool {
    let scaled = magnitude * 2_f64.powi(i32::from(digits) + 1);
    scaled.fract() == 0.0 && (scaled / 2.0).fract() != 0.0
}

/// First eight characters plus the truncation marker.
pub fn short_alert_id(alert_id: &str) -> String {
    let mut short: String = alert_id.chars().take(ALERT_ID_DISPLAY_LEN).collect();
    short.push_str(TRUNCATION_MARKER);
    short
}

pub fn classification_class(classification: &str) -> String {
    format!("class-{}", classification.to_lowercase())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Health, MetricValue, NodeRecord};

    fn node(health: &str, uptime_s: f64, last_seen_age_s: f64, seq: u64) -> NodeRecord {
        NodeRecord {
            health: Health::from(health),
            uptime_s,
            last_seen_age_s,
            last_sequence_number: seq,
        }
    }

    fn alert(id: &str, classification: &str) -> AlertRecord {
        AlertRecord {
            timestamp_utc: format!("2024-05-01T12:00:00.000Z#{id}"),
            alert_id: id.into(),
            source_node_id: "node-1".into(),
            classification: classification.into(),
            processing_latency_ms: 21.0,
        }
    }

    // ── Metrics ─────────────────────────────────────────────────────

    #[test]
    fn metrics_follow_snapshot_order() {
        let mut metrics = MetricsSnapshot::new();
        metrics.insert("sensor.events".into(), MetricValue::from(12_u64));
        metrics.insert("mode".into(), MetricValue::from("live"));

        let cards = render_metrics(&metrics);

        assert_eq!(
            cards,
            vec![
                MetricCard {
                    label: "sensor.events".into(),
                    value: "12".into()
                },
                MetricCard {
                    label: "mode".into(),
                    value: "live".into()
                },
            ]
        );
    }

    #[test]
    fn empty_metrics_render_nothing() {
        assert!(render_metrics(&MetricsSnapshot::new()).is_empty());
    }

    // ── Nodes ───────────────────────────────────────────────────────

    #[test]
    fn nodes_sort_lexicographically() {
        let mut nodes = Nodes::new();
        nodes.insert("node-9".into(), node("OK", 1.0, 0.0, 1));
        nodes.insert("node-2".into(), node("OK", 1.0, 0.0, 1));
        nodes.insert("node-10".into(), node("OK", 1.0, 0.0, 1));

        let ids: Vec<String> = render_nodes(&nodes).into_iter().map(|r| r.id).collect();

        assert_eq!(ids, ["node-10", "node-2", "node-9"]);
    }

    #[test]
    fn node_columns_are_formatted() {
        let mut nodes = Nodes::new();
        nodes.insert("node-1".into(), node("DEGRADED", 5.0, 1.2345, 9_001));

        let rows = render_nodes(&nodes);

        assert_eq!(
            rows,
            vec![NodeRow {
                id: "node-1".into(),
                health: "DEGRADED".into(),
                health_class: HealthClass::Degraded,
                uptime: "5.0".into(),
                last_seen_age: "1.23".into(),
                last_sequence: "9001".into(),
            }]
        );
    }

    #[test]
    fn halfway_values_round_up() {
        let mut nodes = Nodes::new();
        nodes.insert("node-1".into(), node("OK", 0.25, 1.125, 1));
        nodes.insert("node-2".into(), node("OK", 2.75, 0.375, 1));

        let rows = render_nodes(&nodes);

        assert_eq!(
            (rows[0].uptime.as_str(), rows[0].last_seen_age.as_str()),
            ("0.3", "1.13")
        );
        assert_eq!(
            (rows[1].uptime.as_str(), rows[1].last_seen_age.as_str()),
            ("2.8", "0.38")
        );
    }

    #[test]
    fn to_fixed_matches_fixed_point_rules() {
        // Not exact ties in binary: the nearest candidate wins.
        assert_eq!(to_fixed(0.15, 1), "0.1");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        // Exact ties round away from zero.
        assert_eq!(to_fixed(0.625, 2), "0.63");
        assert_eq!(to_fixed(-0.25, 1), "-0.3");
        assert_eq!(to_fixed(2.5, 0), "3");
        // Zero has no sign; tiny negatives keep theirs.
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(-0.04, 1), "-0.0");
        assert_eq!(to_fixed(1e21, 1), "1e+21");
    }

    #[test]
    fn node_health_classes() {
        let mut nodes = Nodes::new();
        nodes.insert("a".into(), node("OK", 0.0, 0.0, 0));
        nodes.insert("b".into(), node("FAILED", 0.0, 0.0, 0));
        nodes.insert("c".into(), node("UNKNOWN", 0.0, 0.0, 0));
        nodes.insert("d".into(), node("", 0.0, 0.0, 0));

        let classes: Vec<&str> = render_nodes(&nodes)
            .iter()
            .map(|r| match r.health_class {
                HealthClass::Ok => "health-ok",
                HealthClass::Failed => "health-failed",
                HealthClass::Degraded => "health-degraded",
            })
            .collect();

        assert_eq!(
            classes,
            ["health-ok", "health-failed", "health-degraded", "health-degraded"]
        );
    }

    #[test]
    fn empty_nodes_render_nothing() {
        assert!(render_nodes(&Nodes::new()).is_empty());
    }

    // ── Alerts ──────────────────────────────────────────────────────

    #[test]
    fn alerts_render_newest_first() {
        let alerts = vec![alert("A", "LOW"), alert("B", "LOW"), alert("C", "LOW")];

        let ids: Vec<String> = render_alerts(&alerts)
            .into_iter()
            .map(|r| r.short_id)
            .collect();

        assert_eq!(ids, ["C...", "B...", "A..."]);
    }

    #[test]
    fn alerts_are_not_deduplicated() {
        let alerts = vec![alert("same-id-1", "LOW"), alert("same-id-1", "HIGH")];

        let rows = render_alerts(&alerts);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].classification, "HIGH");
        assert_eq!(rows[1].classification, "LOW");
    }

    #[test]
    fn alert_columns_are_formatted() {
        let mut record = alert("abcdef1234567", "CRITICAL");
        record.processing_latency_ms = 20.04;

        let rows = render_alerts(&[record]);

        assert_eq!(
            rows,
            vec![AlertRow {
                timestamp: "2024-05-01T12:00:00.000Z#abcdef1234567".into(),
                short_id: "abcdef12...".into(),
                source_node: "node-1".into(),
                classification: "CRITICAL".into(),
                classification_class: "class-critical".into(),
                latency: "20.0".into(),
            }]
        );
    }

    #[test]
    fn halfway_latency_rounds_up() {
        let mut record = alert("abc", "LOW");
        record.processing_latency_ms = 12.25;

        assert_eq!(render_alerts(&[record])[0].latency, "12.3");
    }

    #[test]
    fn short_ids_keep_at_most_eight_chars() {
        assert_eq!(short_alert_id("12345678"), "12345678...");
        assert_eq!(short_alert_id("123"), "123...");
        assert_eq!(short_alert_id(""), "...");
    }

    #[test]
    fn empty_alerts_render_nothing() {
        assert!(render_alerts(&[]).is_empty());
    }

    // ── Whole snapshot ──────────────────────────────────────────────

    #[test]
    fn rendering_is_idempotent() {
        let mut gathered = Gathered::default();
        gathered
            .metrics
            .insert("alerts".into(), MetricValue::from(3_u64));
        gathered
            .nodes
            .insert("node-1".into(), node("OK", 10.26, 0.004, 7));
        gathered.alerts.push(alert("0123456789", "MEDIUM"));

        let first = render(&gathered);
        let second = render(&gathered);

        assert_eq!(first, second);
        assert_eq!(first.metrics.len(), 1);
        assert_eq!(first.nodes[0].uptime, "10.3");
        assert_eq!(first.nodes[0].last_seen_age, "0.00");
    }

    #[test]
    fn empty_snapshot_renders_empty_views() {
        assert!(render(&Gathered::default()).is_empty());
    }
}
