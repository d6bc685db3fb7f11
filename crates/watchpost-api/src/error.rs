use thiserror::Error;

/// Top-level error type for the `watchpost-api` crate.
///
/// Covers every way a single backend read can fail: the request never
/// completes, the backend answers with a non-success status, or the body
/// does not match the expected shape. `watchpost-core` folds all of these
/// into the dashboard's connectivity state.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, reset, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Backend ─────────────────────────────────────────────────────
    /// The backend answered, but not with a 2xx status.
    #[error("Backend returned HTTP {status} for /api/{endpoint}")]
    Status { endpoint: &'static str, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error on /api/{endpoint}: {message}")]
    Deserialization {
        endpoint: &'static str,
        message: String,
        body: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_endpoint() {
        let err = Error::Status {
            endpoint: "status",
            status: 503,
        };
        assert_eq!(err.to_string(), "Backend returned HTTP 503 for /api/status");
    }

    #[test]
    fn decode_error_hides_the_body() {
        let bad_body = Error::Deserialization {
            endpoint: "alerts",
            message: "expected value".into(),
            body: "<html>".into(),
        };
        assert_eq!(
            bad_body.to_string(),
            "Deserialization error on /api/alerts: expected value"
        );
    }
}
