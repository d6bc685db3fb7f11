// watchpost-core: Refresh loop, explicit view state, and renderers between
// watchpost-api and the dashboard front end.

pub mod config;
pub mod convert;
pub mod cycle;
pub mod error;
pub mod model;
pub mod monitor;
pub mod render;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::MonitorConfig;
pub use cycle::{CycleReport, Gathered};
pub use error::CoreError;
pub use monitor::Monitor;
pub use render::{AlertRow, MetricCard, NodeRow, RenderedViews};
pub use store::{ViewState, ViewStore};
pub use stream::ViewStream;

pub use model::{
    AlertRecord, ConnectivityState, Health, HealthClass, MetricValue, MetricsSnapshot, NodeRecord,
    Nodes,
};
