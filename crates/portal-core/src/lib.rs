//! Controller logic for the Wi-Fi captive portal client.
//!
//! The crate is split along the reducer pattern:
//!
//! - **[`PortalState`]**: immutable UI state. [`PortalState::reduce`] takes an
//!   [`Event`] and returns a [`Transition`]: the next state plus an optional
//!   [`Effect`] describing I/O to perform.
//!
//! - **[`View`]**: declarative projection of the state
//!   ([`PortalState::view`]). Front ends render only this, so the
//!   "exactly one primary region" rule lives in one place.
//!
//! - **[`PortalController`]**: async shell that executes effects against the
//!   portal backend (`portal-api`) on spawned tasks and feeds completions back
//!   as events.
//!
//! - **Domain model** ([`model`]): [`Network`] with its signal tier and
//!   security icon.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod outcome;
pub mod state;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::PortalConfig;
pub use controller::PortalController;
pub use error::CoreError;
pub use model::{Network, SecurityIcon, SignalTier};
pub use outcome::{ConnectOutcome, ScanOutcome};
pub use state::{Content, Effect, Event, PortalState, StatusLine, Tone, Transition};
pub use view::{DialogView, NetworkRow, PasswordFieldView, PrimaryRegion, SubmitView, View};
