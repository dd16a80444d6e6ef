#![allow(clippy::unwrap_used)]
// End-to-end tests: reducer + `PortalController` against a wiremock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portal_core::{
    Event, PortalConfig, PortalController, PortalState, PrimaryRegion, SecurityIcon,
    SignalTier, Tone,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct Harness {
    server: MockServer,
    controller: PortalController,
    events: mpsc::UnboundedReceiver<Event>,
    state: PortalState,
}

impl Harness {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let url = Url::parse(&server.uri()).unwrap();
        Self::with_url(server, url)
    }

    /// A harness whose controller points at a port nothing listens on.
    async fn unreachable() -> Self {
        Self::with_url(MockServer::start().await, closed_port_url())
    }

    fn with_url(server: MockServer, url: Url) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let controller = PortalController::new(&PortalConfig::new(url), tx).unwrap();
        Self {
            server,
            controller,
            events,
            state: PortalState::new(),
        }
    }

    /// Feed a user event and run its effect, if any.
    fn dispatch(&mut self, event: Event) {
        let transition = std::mem::take(&mut self.state).reduce(event);
        self.state = transition.state;
        if let Some(effect) = transition.effect {
            self.controller.run(effect);
        }
    }

    /// Wait for the next completion and reduce it.
    async fn settle(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("no completion within 5s")
            .expect("event channel closed");
        self.dispatch(event);
    }

    async fn mount_scan(&self, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/wifi/scan"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }
}

/// Reserve a free port, then release it so nothing is listening there.
fn closed_port_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{port}")).unwrap()
}

fn scenario_scan() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!([
        { "name": "Cafe", "rssi": 85, "security": "WPA2" },
        { "name": "Open", "rssi": 10, "security": "None" }
    ]))
}

// ── Scan ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_initial_scan_renders_sorted_rows() {
    let mut h = Harness::start().await;
    h.mount_scan(ResponseTemplate::new(200).set_body_json(json!([
        { "name": "Open", "rssi": 10, "security": "None" },
        { "name": "Cafe", "rssi": 85, "security": "WPA2" }
    ])))
    .await;

    h.dispatch(Event::Initialize);
    h.settle().await;

    let PrimaryRegion::NetworkList(rows) = h.state.view().primary else {
        panic!("expected network list");
    };
    let summary: Vec<(&str, SecurityIcon, SignalTier)> = rows
        .iter()
        .map(|r| (r.name.as_str(), r.security, r.signal))
        .collect();
    assert_eq!(
        summary,
        [
            ("Cafe", SecurityIcon::Locked, SignalTier::Excellent),
            ("Open", SecurityIcon::Unlocked, SignalTier::Weak),
        ]
    );
}

#[tokio::test]
async fn test_empty_scan_shows_no_networks_notice() {
    let mut h = Harness::start().await;
    h.mount_scan(ResponseTemplate::new(200).set_body_json(json!([])))
        .await;

    h.dispatch(Event::Initialize);
    h.settle().await;

    assert_eq!(
        h.state.view().primary,
        PrimaryRegion::LoadingMessage("No Wi-Fi networks found.".into())
    );
}

#[tokio::test]
async fn test_scan_error_body_is_displayed() {
    let mut h = Harness::start().await;
    h.mount_scan(
        ResponseTemplate::new(403).set_body_json(json!({ "error": "Endpoint only supports Linux." })),
    )
    .await;

    h.dispatch(Event::Initialize);
    h.settle().await;

    assert_eq!(
        h.state.view().primary,
        PrimaryRegion::ErrorMessage("Error: Endpoint only supports Linux.".into())
    );
}

#[tokio::test]
async fn test_scan_unparseable_error_falls_back_to_status() {
    let mut h = Harness::start().await;
    h.mount_scan(ResponseTemplate::new(500).set_body_string("boom"))
        .await;

    h.dispatch(Event::Initialize);
    h.settle().await;

    assert_eq!(
        h.state.view().primary,
        PrimaryRegion::ErrorMessage("Error: HTTP error! status: 500".into())
    );
}

#[tokio::test]
async fn test_scan_transport_failure_is_displayed() {
    let mut h = Harness::unreachable().await;

    h.dispatch(Event::Initialize);
    h.settle().await;

    let PrimaryRegion::ErrorMessage(text) = h.state.view().primary else {
        panic!("expected error message, got {:?}", h.state.view().primary);
    };
    assert!(
        text.starts_with("Error: Cannot reach the portal"),
        "got {text:?}"
    );
}

// ── Connect ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_open_network_connects_with_empty_password() {
    let mut h = Harness::start().await;
    h.mount_scan(scenario_scan()).await;
    Mock::given(method("POST"))
        .and(path("/api/wifi/connect"))
        .and(body_json(json!({ "ssid": "Open", "password": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&h.server)
        .await;

    h.dispatch(Event::Initialize);
    h.settle().await;
    h.dispatch(Event::SelectNetwork(1));
    assert!(h.state.view().dialog.unwrap().password.is_none());

    h.dispatch(Event::SubmitConnect);
    h.settle().await;

    let dialog = h.state.view().dialog.unwrap();
    let status = dialog.status.unwrap();
    assert_eq!(status.tone, Tone::Success);
    assert_eq!(dialog.submit.label, "Connect");
    assert!(dialog.submit.enabled);
}

#[tokio::test]
async fn test_wrong_password_clears_field() {
    let mut h = Harness::start().await;
    h.mount_scan(scenario_scan()).await;
    Mock::given(method("POST"))
        .and(path("/api/wifi/connect"))
        .and(body_json(json!({ "ssid": "Cafe", "password": "nope" })))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": "Authentication failed: bad key" })),
        )
        .mount(&h.server)
        .await;

    h.dispatch(Event::Initialize);
    h.settle().await;
    h.dispatch(Event::SelectNetwork(0));
    for ch in "nope".chars() {
        h.dispatch(Event::PasswordInput(ch));
    }
    h.dispatch(Event::SubmitConnect);
    h.settle().await;

    assert_eq!(h.state.password(), "");
    let dialog = h.state.view().dialog.unwrap();
    let status = dialog.status.unwrap();
    assert_eq!(status.tone, Tone::Error);
    assert_eq!(status.text, "Authentication failed: bad key");
    assert!(dialog.submit.enabled);
    assert!(dialog.password.unwrap().enabled);
}

#[tokio::test]
async fn test_backend_failure_without_error_uses_fallback() {
    let mut h = Harness::start().await;
    h.mount_scan(scenario_scan()).await;
    Mock::given(method("POST"))
        .and(path("/api/wifi/connect"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "details": "nmcli: exit 4" })))
        .mount(&h.server)
        .await;

    h.dispatch(Event::Initialize);
    h.settle().await;
    h.dispatch(Event::SelectNetwork(0));
    h.dispatch(Event::PasswordInput('x'));
    h.dispatch(Event::SubmitConnect);
    h.settle().await;

    assert_eq!(h.state.password(), "x");
    assert_eq!(
        h.state.status().unwrap().text,
        "Failed to connect. Please try again."
    );
}

#[tokio::test]
async fn test_one_shot_scan_and_connect() {
    let h = Harness::start().await;
    h.mount_scan(scenario_scan()).await;
    Mock::given(method("POST"))
        .and(path("/api/wifi/connect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Connected to Cafe" })))
        .mount(&h.server)
        .await;

    let outcome = h.controller.scan().await;
    assert!(matches!(outcome, portal_core::ScanOutcome::Networks(ref n) if n.len() == 2));

    let secret = secrecy::SecretString::from("pw".to_owned());
    let outcome = h.controller.connect("Cafe", &secret).await;
    assert_eq!(
        outcome,
        portal_core::ConnectOutcome::Connected {
            message: Some("Connected to Cafe".into())
        }
    );
}

#[tokio::test]
async fn test_non_json_connect_response_reads_as_unreachable() {
    for status in [200, 502] {
        let mut h = Harness::start().await;
        h.mount_scan(scenario_scan()).await;
        Mock::given(method("POST"))
            .and(path("/api/wifi/connect"))
            .respond_with(ResponseTemplate::new(status).set_body_string("<html>gateway</html>"))
            .mount(&h.server)
            .await;

        h.dispatch(Event::Initialize);
        h.settle().await;
        h.dispatch(Event::SelectNetwork(0));
        h.dispatch(Event::PasswordInput('x'));
        h.dispatch(Event::SubmitConnect);
        h.settle().await;

        let status_line = h.state.status().unwrap();
        assert_eq!(status_line.tone, Tone::Error, "HTTP {status}");
        assert_eq!(status_line.text, "Could not reach the server.", "HTTP {status}");
        assert_eq!(h.state.password(), "x");
    }
}

#[tokio::test]
async fn test_unreachable_backend() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let config = PortalConfig::new(closed_port_url());
    let controller = PortalController::new(&config, tx).unwrap();

    let secret = secrecy::SecretString::from(String::new());
    let outcome = controller.connect("Cafe", &secret).await;
    assert!(
        matches!(outcome, portal_core::ConnectOutcome::Unreachable { .. }),
        "got {outcome:?}"
    );
}
