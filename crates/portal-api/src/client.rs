// Portal backend HTTP client
//
// Wraps `reqwest::Client` with the portal's URL layout and error-body
// handling. Success bodies are decoded into wire models; non-2xx bodies are
// read as `{ error, details }` and surfaced as `Error::Api`. Scan reads error
// bodies leniently; connect requires every body to be JSON.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{ConnectRequest, ConnectResponse, ErrorBody, ScanEntry};
use crate::transport::TransportConfig;

/// HTTP client for the captive portal's `/api/wifi` endpoints.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PortalClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the portal root (e.g. `http://10.42.0.1:8080`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/wifi/scan` -- visible networks, in backend order.
    pub async fn scan(&self) -> Result<Vec<ScanEntry>, Error> {
        let url = self.api_url("scan")?;
        debug!("GET {}", url);

        let (status, body) = Self::read_body(self.http.get(url).send().await?).await?;
        if !status.is_success() {
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(api_error(status, parsed));
        }
        decode(&body)
    }

    /// `POST /api/wifi/connect` -- ask the backend to join `ssid`.
    ///
    /// `password` is empty for open networks. A body that is not JSON, on
    /// either a success or an error status, is `Error::Deserialization`:
    /// whatever answered was not the portal backend.
    pub async fn connect(
        &self,
        ssid: &str,
        password: &SecretString,
    ) -> Result<ConnectResponse, Error> {
        let url = self.api_url("connect")?;
        debug!(ssid, "POST {}", url);

        let request = ConnectRequest {
            ssid,
            password: password.expose_secret(),
        };
        let resp = self.http.post(url).json(&request).send().await?;
        let (status, body) = Self::read_body(resp).await?;
        if !status.is_success() {
            return Err(api_error(status, decode(&body)?));
        }
        decode(&body)
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Build `{base}/api/wifi/{path}`.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/wifi/{path}"))?)
    }

    /// Read the status and full body of a response.
    async fn read_body(resp: reqwest::Response) -> Result<(StatusCode, String), Error> {
        let status = resp.status();
        let body = resp.text().await?;
        trace!(status = status.as_u16(), len = body.len(), "response body");
        Ok((status, body))
    }
}

fn api_error(status: StatusCode, body: ErrorBody) -> Error {
    Error::Api {
        status: status.as_u16(),
        message: body.error,
        details: body.details,
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview = body.chars().take(200).collect::<String>();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}
