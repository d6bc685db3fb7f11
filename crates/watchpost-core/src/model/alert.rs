// ── Alert feed ──

/// An alert raised by the backend's classifier.
///
/// Alerts arrive oldest first; the dashboard shows them newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    /// ISO-8601, displayed exactly as received.
    pub timestamp_utc: String,
    /// Globally unique, opaque.
    pub alert_id: String,
    /// Refers to a node id, but the node need not be present.
    pub source_node_id: String,
    /// Backend-defined set, e.g. `LOW` / `MEDIUM` / `HIGH`.
    pub classification: String,
    pub processing_latency_ms: f64,
}
