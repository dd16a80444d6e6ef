// ── Core error types ──
//
// User-facing errors from portal-core. Consumers never see reqwest errors
// or JSON parse failures directly; the `From<portal_api::Error>` impl
// translates transport-layer errors into these variants.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the portal at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Portal request timed out")]
    Timeout,

    // ── Backend errors ───────────────────────────────────────────────
    #[error("Portal rejected the request (HTTP {status})")]
    Rejected {
        status: u16,
        /// The backend's `error` field, when the body carried one.
        message: Option<String>,
        /// The backend's `details` field (raw tool output, etc.).
        details: Option<String>,
    },

    #[error("Malformed portal response: {message}")]
    MalformedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<portal_api::Error> for CoreError {
    fn from(err: portal_api::Error) -> Self {
        match err {
            ref e if e.is_timeout() => CoreError::Timeout,
            portal_api::Error::Transport(e) => CoreError::Unreachable {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            portal_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            portal_api::Error::Api {
                status,
                message,
                details,
            } => CoreError::Rejected {
                status,
                message,
                details,
            },
            portal_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}
