// ── Reactive view stream ──
//
// Subscription type for consuming view-state changes from the ViewStore.

use std::sync::Arc;

use tokio::sync::watch;

use crate::store::ViewState;

/// A subscription to the dashboard's view state.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed()`](Self::changed).
pub struct ViewStream {
    current: Arc<ViewState>,
    receiver: watch::Receiver<Arc<ViewState>>,
}

impl ViewStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<ViewState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time or at the last `changed()`.
    pub fn current(&self) -> &Arc<ViewState> {
        &self.current
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<ViewState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ConnectivityState;
    use crate::render::RenderedViews;
    use crate::store::ViewStore;

    #[tokio::test]
    async fn changed_yields_new_state() {
        let store = ViewStore::new();
        let mut stream = store.subscribe();
        assert_eq!(stream.current().applied_cycle, 0);

        store.apply_success(1, RenderedViews::default());

        let next = stream.changed().await.unwrap();
        assert_eq!(next.connectivity, ConnectivityState::Live);
        assert_eq!(stream.current().applied_cycle, 1);
    }

    #[tokio::test]
    async fn changed_ends_when_store_drops() {
        let store = ViewStore::new();
        let mut stream = store.subscribe();
        drop(store);

        assert!(stream.changed().await.is_none());
    }
}
