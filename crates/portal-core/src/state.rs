//! Portal UI state and its reducer.
//!
//! [`PortalState`] is a plain value. Every user action and request completion
//! is an [`Event`]; [`PortalState::reduce`] consumes the state and returns the
//! next one together with at most one [`Effect`] for the async shell to run.

use secrecy::SecretString;
use tracing::debug;

use crate::model::{Network, sort_by_signal};
use crate::outcome::{ConnectOutcome, ScanOutcome};

pub const SEARCHING_MESSAGE: &str = "Searching for Wi-Fi networks...";
pub const NO_NETWORKS_MESSAGE: &str = "No Wi-Fi networks found.";
pub const CONNECT_SUCCESS_MESSAGE: &str = "Successfully connected! Your device will now be \
     disconnected from the captive portal. Please check if your router has changed color.";
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect. Please try again.";
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the server.";

/// Substring of a 401 error that means the password was wrong.
pub const AUTH_FAILED_MARKER: &str = "Authentication failed";

// ── State ────────────────────────────────────────────────────────────

/// Primary content region. Exactly one is shown at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Loading,
    /// Scan succeeded with zero networks.
    Empty,
    Failed(String),
    /// Sorted strongest first.
    Networks(Vec<Network>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// The dialog's status slot, shared by connection errors and the success notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub tone: Tone,
    pub text: String,
}

impl StatusLine {
    fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Dialog {
    open: bool,
    password: String,
    password_masked: bool,
    status: Option<StatusLine>,
}

impl Default for Dialog {
    fn default() -> Self {
        Self {
            open: false,
            password: String::new(),
            password_masked: true,
            status: None,
        }
    }
}

/// Complete UI state of the portal page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalState {
    content: Content,
    /// Last network the user opened the dialog for. Never cleared.
    selected: Option<Network>,
    dialog: Dialog,
    connect_in_flight: bool,
    scan_generation: u64,
}

// ── Events and effects ──────────────────────────────────────────────

/// Everything that can change the portal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Startup scan.
    Initialize,
    /// User-requested scan.
    Rescan,
    ScanFinished {
        generation: u64,
        outcome: ScanOutcome,
    },
    /// Index into the rendered (sorted) list.
    SelectNetwork(usize),
    CloseDialog,
    TogglePasswordVisibility,
    PasswordInput(char),
    PasswordBackspace,
    SubmitConnect,
    ConnectFinished(ConnectOutcome),
}

/// I/O requested by a transition.
#[derive(Debug)]
pub enum Effect {
    /// `GET /api/wifi/scan`; the completion must echo `generation`.
    Scan { generation: u64 },
    /// `POST /api/wifi/connect`.
    Connect { ssid: String, password: SecretString },
}

#[must_use]
#[derive(Debug)]
pub struct Transition {
    pub state: PortalState,
    pub effect: Option<Effect>,
}

impl From<PortalState> for Transition {
    fn from(state: PortalState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

// ── Reducer ─────────────────────────────────────────────────────────

impl PortalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(self, event: Event) -> Transition {
        match event {
            Event::Initialize | Event::Rescan => self.start_scan(),
            Event::ScanFinished {
                generation,
                outcome,
            } => self.finish_scan(generation, outcome).into(),
            Event::SelectNetwork(index) => self.select_network(index).into(),
            Event::CloseDialog => self.close_dialog().into(),
            Event::TogglePasswordVisibility => self.toggle_password_visibility().into(),
            Event::PasswordInput(ch) => self.edit_password(|pw| pw.push(ch)).into(),
            Event::PasswordBackspace => self
                .edit_password(|pw| {
                    pw.pop();
                })
                .into(),
            Event::SubmitConnect => self.submit_connect(),
            Event::ConnectFinished(outcome) => self.finish_connect(outcome).into(),
        }
    }

    fn start_scan(mut self) -> Transition {
        self.scan_generation += 1;
        self.content = Content::Loading;
        let generation = self.scan_generation;
        Transition {
            state: self,
            effect: Some(Effect::Scan { generation }),
        }
    }

    fn finish_scan(mut self, generation: u64, outcome: ScanOutcome) -> Self {
        if generation != self.scan_generation {
            debug!(
                generation,
                current = self.scan_generation,
                "dropping stale scan result"
            );
            return self;
        }

        self.content = match outcome {
            ScanOutcome::Networks(networks) if networks.is_empty() => Content::Empty,
            ScanOutcome::Networks(mut networks) => {
                sort_by_signal(&mut networks);
                Content::Networks(networks)
            }
            ScanOutcome::Failed(message) => Content::Failed(message),
        };
        self
    }

    fn select_network(mut self, index: usize) -> Self {
        let Some(network) = self.networks().get(index).cloned() else {
            return self;
        };

        self.selected = Some(network);
        self.dialog.open = true;
        self.dialog.password.clear();
        self.dialog.status = None;
        self
    }

    fn close_dialog(mut self) -> Self {
        self.dialog.open = false;
        self
    }

    fn toggle_password_visibility(mut self) -> Self {
        if self.dialog.open {
            self.dialog.password_masked = !self.dialog.password_masked;
        }
        self
    }

    fn edit_password(mut self, edit: impl FnOnce(&mut String)) -> Self {
        if self.password_editable() {
            edit(&mut self.dialog.password);
        }
        self
    }

    fn submit_connect(mut self) -> Transition {
        if !self.dialog.open || self.connect_in_flight {
            return self.into();
        }
        let Some(ssid) = self.selected.as_ref().map(|n| n.name.clone()) else {
            return self.into();
        };

        self.connect_in_flight = true;
        self.dialog.status = None;
        let password = SecretString::from(self.dialog.password.clone());
        Transition {
            state: self,
            effect: Some(Effect::Connect { ssid, password }),
        }
    }

    fn finish_connect(mut self, outcome: ConnectOutcome) -> Self {
        if !self.connect_in_flight {
            debug!("ignoring connect result with no attempt in flight");
            return self;
        }
        self.connect_in_flight = false;

        self.dialog.status = Some(match outcome {
            ConnectOutcome::Connected { .. } => StatusLine {
                tone: Tone::Success,
                text: CONNECT_SUCCESS_MESSAGE.into(),
            },
            ConnectOutcome::Rejected { status, error, .. } => {
                if status == 401
                    && error
                        .as_deref()
                        .is_some_and(|e| e.contains(AUTH_FAILED_MARKER))
                {
                    self.dialog.password.clear();
                }
                StatusLine::error(error.unwrap_or_else(|| CONNECT_FAILED_MESSAGE.into()))
            }
            ConnectOutcome::Unreachable { .. } => StatusLine::error(UNREACHABLE_MESSAGE),
        });
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Rendered networks; empty unless the list region is showing.
    pub fn networks(&self) -> &[Network] {
        match &self.content {
            Content::Networks(networks) => networks,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&Network> {
        self.selected.as_ref()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.open
    }

    pub fn password(&self) -> &str {
        &self.dialog.password
    }

    pub fn password_masked(&self) -> bool {
        self.dialog.password_masked
    }

    /// The password field is shown for secured networks only.
    pub fn password_field_visible(&self) -> bool {
        self.selected.as_ref().is_some_and(Network::requires_password)
    }

    /// Typing is accepted only while the field is visible and enabled.
    pub fn password_editable(&self) -> bool {
        self.dialog.open && !self.connect_in_flight && self.password_field_visible()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.dialog.status.as_ref()
    }

    pub fn connect_in_flight(&self) -> bool {
        self.connect_in_flight
    }

    pub fn scan_generation(&self) -> u64 {
        self.scan_generation
    }
}
