//! All possible UI actions. Actions are the sole mechanism for state mutation.

use portal_core::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ────────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Overlays ─────────────────────────────────────────────────────
    ToggleHelp,

    // ── Portal ───────────────────────────────────────────────────────
    /// Feed an event to the portal reducer.
    Portal(Event),
}

impl From<Event> for Action {
    fn from(event: Event) -> Self {
        Self::Portal(event)
    }
}
