// ── View store ──
//
// The dashboard's only shared mutable state. Holds the currently displayed
// views plus the connectivity indicator, and publishes every change through
// a `watch` channel. Updates are whole-view replacements guarded by the
// cycle number, so an outcome from an older cycle can never overwrite a
// newer one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use crate::model::ConnectivityState;
use crate::render::RenderedViews;
use crate::stream::ViewStream;

/// Everything the dashboard displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub connectivity: ConnectivityState,
    /// Views from the last applied successful cycle. Left untouched by
    /// failed cycles.
    pub views: RenderedViews,
    /// Number of the newest cycle applied so far; 0 before any.
    pub applied_cycle: u64,
    /// When `views` were last replaced.
    pub last_success: Option<DateTime<Utc>>,
}

impl ViewState {
    /// `true` while the views shown come from an earlier cycle than the
    /// latest outcome.
    pub fn is_stale(&self) -> bool {
        !self.connectivity.is_live() && self.last_success.is_some()
    }
}

/// Owner of the [`ViewState`].
///
/// Cloning a snapshot is cheap (`Arc`); readers subscribe through
/// [`ViewStream`].
pub struct ViewStore {
    state: watch::Sender<Arc<ViewState>>,
}

impl ViewStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Arc::new(ViewState::default()));
        Self { state }
    }

    /// The currently displayed state.
    pub fn snapshot(&self) -> Arc<ViewState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> ViewStream {
        ViewStream::new(self.state.subscribe())
    }

    /// Apply a successful cycle: indicator goes live and all three views
    /// are replaced.
    ///
    /// Returns `false` (and changes nothing) if `cycle` is not newer than
    /// the last applied cycle.
    pub fn apply_success(&self, cycle: u64, views: RenderedViews) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if cycle <= state.applied_cycle {
                return false;
            }
            let next = Arc::make_mut(state);
            next.applied_cycle = cycle;
            next.connectivity = ConnectivityState::Live;
            next.views = views;
            next.last_success = Some(Utc::now());
            applied = true;
            true
        });
        if !applied {
            debug!(cycle, "discarding stale successful cycle");
        }
        applied
    }

    /// Apply a failed cycle: indicator goes disconnected, views stay.
    ///
    /// Subscribers are only woken if the indicator actually changed.
    /// Returns `false` if `cycle` is stale.
    pub fn apply_failure(&self, cycle: u64) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if cycle <= state.applied_cycle {
                return false;
            }
            let was_live = state.connectivity.is_live();
            let next = Arc::make_mut(state);
            next.applied_cycle = cycle;
            next.connectivity = ConnectivityState::Disconnected;
            applied = true;
            was_live
        });
        if !applied {
            debug!(cycle, "discarding stale failed cycle");
        }
        applied
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}
