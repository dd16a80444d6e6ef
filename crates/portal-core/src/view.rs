//! Declarative projection of [`PortalState`] for front ends.

use crate::model::{SecurityIcon, SignalTier};
use crate::state::{
    Content, NO_NETWORKS_MESSAGE, PortalState, SEARCHING_MESSAGE, StatusLine,
};

pub const SUBMIT_LABEL: &str = "Connect";
pub const SUBMITTING_LABEL: &str = "Connecting...";
pub const SHOW_PASSWORD_LABEL: &str = "Show password";
pub const HIDE_PASSWORD_LABEL: &str = "Hide password";

const MASK_CHAR: char = '•';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub primary: PrimaryRegion,
    /// `Some` while the connect dialog is open; drawn over `primary`.
    pub dialog: Option<DialogView>,
}

/// The single visible content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryRegion {
    /// Loading slot. Also carries the terminal "no networks" notice.
    LoadingMessage(String),
    ErrorMessage(String),
    NetworkList(Vec<NetworkRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRow {
    pub name: String,
    pub security: SecurityIcon,
    pub signal: SignalTier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    pub bssid: Option<String>,
    /// `None` for open networks.
    pub password: Option<PasswordFieldView>,
    pub submit: SubmitView,
    pub status: Option<StatusLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordFieldView {
    /// Text to draw: bullets while masked, the password otherwise.
    pub display: String,
    pub masked: bool,
    pub enabled: bool,
    /// Accessible label of the visibility toggle.
    pub toggle_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitView {
    pub label: &'static str,
    pub enabled: bool,
}

impl PortalState {
    pub fn view(&self) -> View {
        View {
            primary: self.primary_region(),
            dialog: self.dialog_view(),
        }
    }

    fn primary_region(&self) -> PrimaryRegion {
        match self.content() {
            Content::Loading => PrimaryRegion::LoadingMessage(SEARCHING_MESSAGE.into()),
            Content::Empty => PrimaryRegion::LoadingMessage(NO_NETWORKS_MESSAGE.into()),
            Content::Failed(message) => PrimaryRegion::ErrorMessage(format!("Error: {message}")),
            Content::Networks(networks) => PrimaryRegion::NetworkList(
                networks
                    .iter()
                    .map(|n| NetworkRow {
                        name: n.name.clone(),
                        security: n.security_icon(),
                        signal: n.signal_tier(),
                    })
                    .collect(),
            ),
        }
    }

    fn dialog_view(&self) -> Option<DialogView> {
        if !self.dialog_open() {
            return None;
        }
        let network = self.selected()?;
        let in_flight = self.connect_in_flight();

        let password = self.password_field_visible().then(|| {
            let masked = self.password_masked();
            PasswordFieldView {
                display: if masked {
                    MASK_CHAR.to_string().repeat(self.password().chars().count())
                } else {
                    self.password().to_owned()
                },
                masked,
                enabled: !in_flight,
                toggle_label: if masked {
                    SHOW_PASSWORD_LABEL
                } else {
                    HIDE_PASSWORD_LABEL
                },
            }
        });

        Some(DialogView {
            title: network.name.clone(),
            bssid: network.bssid.clone(),
            password,
            submit: SubmitView {
                label: if in_flight { SUBMITTING_LABEL } else { SUBMIT_LABEL },
                enabled: !in_flight,
            },
            status: self.status().cloned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Network;
    use crate::outcome::{ConnectOutcome, ScanOutcome};
    use crate::state::{CONNECT_SUCCESS_MESSAGE, Event, Tone};

    fn scenario_networks() -> Vec<Network> {
        vec![
            Network {
                name: "Cafe".into(),
                rssi: Some(85),
                security: Some("WPA2".into()),
                bssid: Some("aa:bb:cc:dd:ee:ff".into()),
            },
            Network {
                name: "Open".into(),
                rssi: Some(10),
                security: Some("None".into()),
                bssid: None,
            },
        ]
    }

    fn run(events: impl IntoIterator<Item = Event>) -> PortalState {
        events
            .into_iter()
            .fold(PortalState::new(), |s, e| s.reduce(e).state)
    }

    fn loaded(networks: Vec<Network>) -> Vec<Event> {
        vec![
            Event::Initialize,
            Event::ScanFinished {
                generation: 1,
                outcome: ScanOutcome::Networks(networks),
            },
        ]
    }

    #[test]
    fn loading_view() {
        let view = run([Event::Initialize]).view();
        assert_eq!(
            view.primary,
            PrimaryRegion::LoadingMessage("Searching for Wi-Fi networks...".into())
        );
        assert_eq!(view.dialog, None);
    }

    #[test]
    fn rows_show_icons_in_signal_order() {
        let view = run(loaded(scenario_networks())).view();
        assert_eq!(
            view.primary,
            PrimaryRegion::NetworkList(vec![
                NetworkRow {
                    name: "Cafe".into(),
                    security: SecurityIcon::Locked,
                    signal: SignalTier::Excellent,
                },
                NetworkRow {
                    name: "Open".into(),
                    security: SecurityIcon::Unlocked,
                    signal: SignalTier::Weak,
                },
            ])
        );
    }

    #[test]
    fn empty_scan_reuses_loading_slot() {
        let view = run(loaded(Vec::new())).view();
        assert_eq!(
            view.primary,
            PrimaryRegion::LoadingMessage("No Wi-Fi networks found.".into())
        );
    }

    #[test]
    fn failed_scan_is_prefixed() {
        let view = run([
            Event::Initialize,
            Event::ScanFinished {
                generation: 1,
                outcome: ScanOutcome::Failed("Endpoint only supports Linux.".into()),
            },
        ])
        .view();
        assert_eq!(
            view.primary,
            PrimaryRegion::ErrorMessage("Error: Endpoint only supports Linux.".into())
        );
    }

    #[test]
    fn dialog_for_open_network_has_no_password_field() {
        let mut events = loaded(scenario_networks());
        events.push(Event::SelectNetwork(1));
        let view = run(events).view();

        assert!(matches!(view.primary, PrimaryRegion::NetworkList(_)));
        assert_eq!(
            view.dialog,
            Some(DialogView {
                title: "Open".into(),
                bssid: None,
                password: None,
                submit: SubmitView {
                    label: "Connect",
                    enabled: true,
                },
                status: None,
            })
        );
    }

    #[test]
    fn password_is_masked_until_toggled() {
        let mut events = loaded(scenario_networks());
        events.extend([
            Event::SelectNetwork(0),
            Event::PasswordInput('a'),
            Event::PasswordInput('b'),
        ]);
        let state = run(events);

        let field = state.view().dialog.unwrap().password.unwrap();
        assert_eq!(field.display, "••");
        assert_eq!(field.toggle_label, "Show password");

        let state = state.reduce(Event::TogglePasswordVisibility).state;
        let field = state.view().dialog.unwrap().password.unwrap();
        assert_eq!(field.display, "ab");
        assert!(!field.masked);
        assert_eq!(field.toggle_label, "Hide password");
    }

    #[test]
    fn submit_disables_controls_until_settled() {
        let mut events = loaded(scenario_networks());
        events.extend([Event::SelectNetwork(0), Event::SubmitConnect]);
        let state = run(events);

        let dialog = state.view().dialog.unwrap();
        assert_eq!(
            dialog.submit,
            SubmitView {
                label: "Connecting...",
                enabled: false,
            }
        );
        assert!(!dialog.password.unwrap().enabled);

        let state = state
            .reduce(Event::ConnectFinished(ConnectOutcome::Connected {
                message: Some("ok".into()),
            }))
            .state;
        let dialog = state.view().dialog.unwrap();
        assert_eq!(
            dialog.submit,
            SubmitView {
                label: "Connect",
                enabled: true,
            }
        );
        assert!(dialog.password.unwrap().enabled);
        let status = dialog.status.unwrap();
        assert_eq!(status.tone, Tone::Success);
        assert_eq!(status.text, CONNECT_SUCCESS_MESSAGE);
    }

    #[test]
    fn closed_dialog_is_not_rendered() {
        let mut events = loaded(scenario_networks());
        events.extend([Event::SelectNetwork(0), Event::CloseDialog]);
        assert_eq!(run(events).view().dialog, None);
    }
}
