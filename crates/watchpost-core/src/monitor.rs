// ── Monitor: the refresh loop ──
//
// Owns the backend client and the view store. A background task fires a
// cycle immediately and then once per refresh interval; every cycle runs
// as its own task, so a slow backend never delays the next tick. Cycles
// are numbered at issue time and the store drops outcomes that arrive
// after a newer cycle has been applied.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use watchpost_api::{BackendClient, TransportConfig};

use crate::config::MonitorConfig;
use crate::cycle::{CycleReport, gather};
use crate::error::CoreError;
use crate::model::ConnectivityState;
use crate::render::render;
use crate::store::{ViewState, ViewStore};
use crate::stream::ViewStream;

/// Lower bound for the refresh period; `tokio::time::interval` rejects zero.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// The polling engine behind the dashboard.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Call [`start()`](Self::start)
/// to begin polling and [`shutdown()`](Self::shutdown) to stop.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    client: BackendClient,
    store: ViewStore,
    next_cycle: AtomicU64,
    started: AtomicBool,
    cancel: CancellationToken,
    tasks: TaskTracker,
}

impl Monitor {
    /// Create a monitor from configuration. Does NOT start polling.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        if config.refresh_interval.is_zero() {
            return Err(CoreError::Config {
                message: "refresh interval must be greater than zero".into(),
            });
        }
        let transport = TransportConfig::default().with_timeout(config.request_timeout);
        let client = BackendClient::new(config.base_url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a monitor around an existing client.
    pub fn with_client(config: MonitorConfig, client: BackendClient) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                store: ViewStore::new(),
                next_cycle: AtomicU64::new(0),
                started: AtomicBool::new(false),
                cancel: CancellationToken::new(),
                tasks: TaskTracker::new(),
            }),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    /// Subscribe to view-state changes.
    pub fn view(&self) -> ViewStream {
        self.inner.store.subscribe()
    }

    pub fn snapshot(&self) -> Arc<ViewState> {
        self.inner.store.snapshot()
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Spawn the refresh loop. The first cycle fires immediately.
    ///
    /// Returns `false` if the monitor was already started.
    pub fn start(&self) -> bool {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return false;
        }

        let period = self.inner.config.refresh_interval.max(MIN_REFRESH_INTERVAL);
        let monitor = self.clone();
        let cancel = self.inner.cancel.clone();
        self.inner.tasks.spawn(refresh_task(monitor, period, cancel));

        info!(
            url = %self.inner.config.base_url,
            interval_ms = period.as_millis(),
            "monitor started"
        );
        true
    }

    /// Fire one cycle right now, outside the timer.
    ///
    /// The cycle is numbered and sequenced like any timer cycle.
    pub fn trigger(&self) {
        let monitor = self.clone();
        let cancel = self.inner.cancel.clone();
        self.inner.tasks.spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                _ = monitor.run_cycle() => {}
            }
        });
    }

    /// Stop the refresh loop and abandon in-flight cycles.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        info!("monitor stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner.started.load(Ordering::SeqCst) && !self.inner.cancel.is_cancelled()
    }

    // ── Cycle ────────────────────────────────────────────────────

    /// Run one gather → render cycle and apply its outcome.
    pub async fn run_cycle(&self) -> CycleReport {
        let cycle = self.inner.next_cycle.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle, "cycle started");

        match gather(&self.inner.client).await {
            Ok(gathered) => {
                let views = render(&gathered);
                let applied = self.inner.store.apply_success(cycle, views);
                debug!(cycle, applied, "cycle succeeded");
                CycleReport {
                    cycle,
                    outcome: ConnectivityState::Live,
                    applied,
                }
            }
            Err(e) => {
                warn!(cycle, error = %e, "cycle failed");
                let applied = self.inner.store.apply_failure(cycle);
                CycleReport {
                    cycle,
                    outcome: ConnectivityState::Disconnected,
                    applied,
                }
            }
        }
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Fire a cycle on every tick until cancelled. Never waits for a cycle.
async fn refresh_task(monitor: Monitor, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick completes immediately: that is the startup cycle.
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => monitor.trigger(),
        }
    }

    debug!("refresh loop exited");
}
