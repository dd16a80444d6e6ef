// portal-api: Async Rust client for the Wi-Fi captive portal backend

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::PortalClient;
pub use error::Error;
pub use models::{ConnectRequest, ConnectResponse, ErrorBody, ScanEntry};
pub use transport::TransportConfig;
