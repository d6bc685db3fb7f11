// Backend HTTP client
//
// Wraps `reqwest::Client` with URL construction and the status-check /
// decode sequence shared by both endpoints. Callers only ever see typed
// payloads or an `Error`.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{AlertFeed, CentralAlert, StatusPayload};
use crate::transport::TransportConfig;

/// Raw HTTP client for the monitoring backend.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://127.0.0.1:8080`); a path
    /// prefix is allowed and kept.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/status`: aggregate metrics plus per-node status.
    pub async fn status(&self) -> Result<StatusPayload, Error> {
        self.get_json("status").await
    }

    /// `GET /api/alerts`: recent alerts, oldest first.
    ///
    /// A falsy body (`null`, `false`, `0`, `""`) is treated as an empty feed.
    pub async fn alerts(&self) -> Result<Vec<CentralAlert>, Error> {
        let feed: AlertFeed = self.get_json("alerts").await?;
        Ok(feed.alerts)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{endpoint}`.
    pub(crate) fn api_url(&self, endpoint: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request, require a 2xx status, and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, Error> {
        let url = self.api_url(endpoint)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            endpoint,
            message: e.to_string(),
            body,
        })
    }
}
