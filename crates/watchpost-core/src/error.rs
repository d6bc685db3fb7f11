// ── Core error types ──
//
// Errors from watchpost-core. Consumers never see raw reqwest or serde
// errors; the `From<watchpost_api::Error>` impl translates transport-layer
// failures into the categories the dashboard cares about.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connectivity errors ──────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    #[error("Backend returned HTTP {status} for /api/{endpoint}")]
    BackendStatus { endpoint: &'static str, status: u16 },

    // ── Data errors ──────────────────────────────────────────────────
    /// Bad JSON, or JSON that breaks the field contract.
    #[error("Malformed /api/{endpoint} payload: {message}")]
    MalformedPayload {
        endpoint: &'static str,
        message: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<watchpost_api::Error> for CoreError {
    fn from(err: watchpost_api::Error) -> Self {
        match err {
            watchpost_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_builder() {
                    CoreError::Internal(format!("failed to build HTTP client: {e}"))
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            watchpost_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            watchpost_api::Error::Status { endpoint, status } => {
                CoreError::BackendStatus { endpoint, status }
            }
            watchpost_api::Error::Deserialization {
                endpoint,
                message,
                body: _,
            } => CoreError::MalformedPayload { endpoint, message },
        }
    }
}
