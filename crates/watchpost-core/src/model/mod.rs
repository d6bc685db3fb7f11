// ── Dashboard domain model ──
//
// Typed, validated forms of what one refresh cycle fetched. Nothing here
// outlives a cycle: each successful cycle replaces the whole set.

pub mod alert;
pub mod connectivity;
pub mod metric;
pub mod node;

// ── Re-exports ──────────────────────────────────────────────────────

pub use alert::AlertRecord;
pub use connectivity::ConnectivityState;
pub use metric::{MetricValue, MetricsSnapshot};
pub use node::{Health, HealthClass, NodeRecord, Nodes};
