// watchpost-api: Async HTTP client for the monitoring backend's status and alerts endpoints

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::BackendClient;
pub use error::Error;
pub use models::{AlertFeed, CentralAlert, NodeStatus, StatusPayload};
pub use transport::TransportConfig;
