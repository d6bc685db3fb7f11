//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use watchpost_core::ViewState;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,

    // ── Overlays ──
    ToggleHelp,

    // ── Data ──
    /// Ask the monitor for an out-of-band cycle.
    Refresh,
    /// The monitor published a new view state.
    ViewUpdated(Arc<ViewState>),

    // ── Alerts scrolling ──
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
}
