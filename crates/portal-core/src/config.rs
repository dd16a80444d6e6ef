// ── Controller configuration ──

use std::time::Duration;

use url::Url;

/// Address the portal backend listens on when the device runs its hotspot.
pub const DEFAULT_PORTAL_URL: &str = "http://10.42.0.1:8080";

/// Default whole-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the [`PortalController`](crate::PortalController) needs to reach
/// the backend.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Portal root URL, e.g. `http://10.42.0.1:8080`.
    pub url: Url,
    /// Whole-request timeout applied to both scan and connect.
    pub timeout: Duration,
    /// Overrides the default `wifi-portal/<version>` user agent.
    pub user_agent: Option<String>,
}

impl PortalConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }

    pub(crate) fn transport(&self) -> portal_api::TransportConfig {
        let mut transport = portal_api::TransportConfig::default().with_timeout(self.timeout);
        if let Some(ref agent) = self.user_agent {
            transport.user_agent.clone_from(agent);
        }
        transport
    }
}
