// ── Runtime monitor configuration ──
//
// Describes *where* to poll and *how often*. Never touches disk: the
// config crate or the TUI builds a `MonitorConfig` and hands it in.

use std::time::Duration;

use url::Url;

/// Refresh period used unless configured otherwise.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for polling a single backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Backend root, e.g. `http://127.0.0.1:8080`.
    pub base_url: Url,
    /// Period between cycle starts. Cycles are not serialized against it.
    pub refresh_interval: Duration,
    /// Optional per-request timeout. `None` means requests may hang.
    pub request_timeout: Option<Duration>,
}

impl MonitorConfig {
    /// Poll `base_url` every second with no request timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: None,
        }
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}
