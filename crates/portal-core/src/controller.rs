// ── Portal controller ──
//
// Async shell around the reducer. Effects are executed on spawned tasks and
// their completions are sent back as `Event`s, so every state change still
// happens on the consumer's single event loop.

use secrecy::SecretString;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use portal_api::PortalClient;

use crate::config::PortalConfig;
use crate::error::CoreError;
use crate::model::Network;
use crate::outcome::{ConnectOutcome, ScanOutcome};
use crate::state::{Effect, Event};

/// Runs portal requests and reports their outcomes as [`Event`]s.
///
/// Requests are never retried, deduplicated, or cancelled individually;
/// [`shutdown`](Self::shutdown) abandons whatever is still outstanding.
pub struct PortalController {
    client: PortalClient,
    events: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
}

impl PortalController {
    pub fn new(
        config: &PortalConfig,
        events: mpsc::UnboundedSender<Event>,
    ) -> Result<Self, CoreError> {
        let client = PortalClient::new(config.url.clone(), &config.transport())?;
        Ok(Self::with_client(client, events))
    }

    pub fn with_client(client: PortalClient, events: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            client,
            events,
            cancel: CancellationToken::new(),
        }
    }

    /// Execute an effect in the background. The completion event is sent on
    /// the channel given at construction.
    pub fn run(&self, effect: Effect) {
        let client = self.client.clone();
        let events = self.events.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let event = tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    debug!("portal request abandoned on shutdown");
                    return;
                }

                event = execute(&client, effect) => event,
            };

            // Receiver gone means the front end has exited.
            let _ = events.send(event);
        });
    }

    /// Fetch the visible networks (unsorted).
    pub async fn scan(&self) -> ScanOutcome {
        scan(&self.client).await
    }

    /// Ask the backend to join `ssid`.
    pub async fn connect(&self, ssid: &str, password: &SecretString) -> ConnectOutcome {
        connect(&self.client, ssid, password).await
    }

    /// Abandon outstanding requests.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PortalController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn execute(client: &PortalClient, effect: Effect) -> Event {
    match effect {
        Effect::Scan { generation } => Event::ScanFinished {
            generation,
            outcome: scan(client).await,
        },
        Effect::Connect { ssid, password } => {
            Event::ConnectFinished(connect(client, &ssid, &password).await)
        }
    }
}

async fn scan(client: &PortalClient) -> ScanOutcome {
    let result = client
        .scan()
        .await
        .map(|entries| entries.into_iter().map(Network::from).collect::<Vec<_>>())
        .map_err(CoreError::from);

    match &result {
        Ok(networks) => debug!(count = networks.len(), "scan finished"),
        Err(e) => warn!(error = %e, "failed to fetch Wi-Fi networks"),
    }
    ScanOutcome::from(result)
}

async fn connect(client: &PortalClient, ssid: &str, password: &SecretString) -> ConnectOutcome {
    match client.connect(ssid, password).await {
        Ok(resp) => {
            info!(
                ssid,
                message = resp.message.as_deref().unwrap_or(""),
                "connection successful"
            );
            ConnectOutcome::Connected {
                message: resp.message,
            }
        }
        Err(e) => {
            let err = CoreError::from(e);
            match &err {
                CoreError::Rejected {
                    status,
                    message,
                    details,
                } => warn!(
                    ssid,
                    status,
                    error = message
                        .as_deref()
                        .or(details.as_deref())
                        .unwrap_or("Unknown error"),
                    "connection failed"
                ),
                other => warn!(ssid, error = %other, "network request error"),
            }
            ConnectOutcome::from_error(err)
        }
    }
}
