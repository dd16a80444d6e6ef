// ── Domain model ──

pub mod network;

pub use network::{Network, SecurityIcon, SignalTier, sort_by_signal};
