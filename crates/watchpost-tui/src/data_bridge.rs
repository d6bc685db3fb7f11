//! Data bridge: connects the [`Monitor`]'s view stream to TUI actions.
//!
//! Runs as a background task: starts the monitor, forwards every published
//! view state as an [`Action`], and shuts the monitor down on cancellation.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use watchpost_core::Monitor;

use crate::action::Action;

pub async fn spawn_data_bridge(
    monitor: Monitor,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut view = monitor.view();

    // Initial snapshot so the dashboard draws its empty state immediately
    let _ = action_tx.send(Action::ViewUpdated(view.current().clone()));

    monitor.start();

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = view.changed() => {
                let Some(state) = changed else { break };
                debug!(
                    cycle = state.applied_cycle,
                    connectivity = state.connectivity.label(),
                    "dispatching ViewUpdated"
                );
                let _ = action_tx.send(Action::ViewUpdated(state));
            }
        }
    }

    monitor.shutdown().await;
    debug!("data bridge shut down");
}
