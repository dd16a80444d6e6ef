// ── Request outcomes ──
//
// Every portal request settles into one of these values at the operation
// boundary. Nothing past this point sees an error type.

use crate::error::CoreError;
use crate::model::Network;

/// Result of a `GET /api/wifi/scan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Networks in backend order; the reducer sorts them.
    Networks(Vec<Network>),
    /// Message to show after the `"Error: "` prefix.
    Failed(String),
}

impl ScanOutcome {
    /// The backend's `error` field wins; a bare rejection falls back to its
    /// status code; anything else shows the error text.
    pub fn from_error(err: &CoreError) -> Self {
        let message = match err {
            CoreError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            CoreError::Rejected {
                status,
                message: None,
                ..
            } => format!("HTTP error! status: {status}"),
            other => other.to_string(),
        };
        Self::Failed(message)
    }
}

impl From<Result<Vec<Network>, CoreError>> for ScanOutcome {
    fn from(result: Result<Vec<Network>, CoreError>) -> Self {
        match result {
            Ok(networks) => Self::Networks(networks),
            Err(err) => Self::from_error(&err),
        }
    }
}

/// Result of a `POST /api/wifi/connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// 2xx. `message` is the backend's own text, logged but not displayed.
    Connected { message: Option<String> },
    /// Non-2xx with whatever the body carried.
    Rejected {
        status: u16,
        error: Option<String>,
        details: Option<String>,
    },
    /// The request could not be sent or completed.
    Unreachable { reason: String },
}

impl ConnectOutcome {
    /// Only a well-formed backend rejection is `Rejected`. A body that is not
    /// the portal's JSON means something else answered, so it reads the same
    /// as no answer at all.
    pub fn from_error(err: CoreError) -> Self {
        match err {
            CoreError::Rejected {
                status,
                message,
                details,
            } => Self::Rejected {
                status,
                error: message,
                details,
            },
            other => Self::Unreachable {
                reason: other.to_string(),
            },
        }
    }
}
