// ── Gather phase ──
//
// One refresh cycle is two phases: gather both sources concurrently and
// join, then hand the combined result to the pure render phase. The join
// is all-or-nothing: either both reads succeed and decode, or the whole
// cycle fails.

use tracing::debug;
use watchpost_api::BackendClient;

use crate::convert::{alerts_to_domain, status_to_domain};
use crate::error::CoreError;
use crate::model::{AlertRecord, ConnectivityState, MetricsSnapshot, Nodes};

/// Everything one successful cycle fetched, validated.
///
/// Metrics and nodes always come from the same status response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gathered {
    pub metrics: MetricsSnapshot,
    pub nodes: Nodes,
    /// Oldest first, as served.
    pub alerts: Vec<AlertRecord>,
}

/// What happened to one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Issue-order number of the cycle (first cycle is 1).
    pub cycle: u64,
    /// Connectivity this cycle's outcome implies.
    pub outcome: ConnectivityState,
    /// `false` when a newer cycle had already been applied.
    pub applied: bool,
}

/// Read status and alerts concurrently and join both results.
///
/// Both requests always run to completion; a failure of either fails the
/// cycle, with the status error reported first when both fail.
pub async fn gather(client: &BackendClient) -> Result<Gathered, CoreError> {
    let (status, alerts) = tokio::join!(client.status(), client.alerts());

    let (metrics, nodes) = status_to_domain(status?)?;
    let alerts = alerts_to_domain(alerts?);

    debug!(
        metrics = metrics.len(),
        nodes = nodes.len(),
        alerts = alerts.len(),
        "gathered backend snapshot"
    );

    Ok(Gathered {
        metrics,
        nodes,
        alerts,
    })
}
