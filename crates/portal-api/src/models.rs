// Wire types for the portal backend's `/api/wifi/*` endpoints.

use serde::{Deserialize, Serialize};

/// One access point from `GET /api/wifi/scan`.
///
/// Only `name` is guaranteed. The backend also reports the BSSID under `id`
/// and a coarse quality label under `signal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rssi: Option<i64>,
    #[serde(default)]
    pub security: Option<String>,
    #[serde(default, rename = "id")]
    pub bssid: Option<String>,
    #[serde(default)]
    pub signal: Option<String>,
}

/// Body of `POST /api/wifi/connect`.
#[derive(Debug, Serialize)]
pub struct ConnectRequest<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
}

/// Success body of `POST /api/wifi/connect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}
