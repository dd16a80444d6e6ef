//! Component trait, implemented by every UI element.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use portal_core::View;

use crate::action::Action;

/// Every UI element implements Component.
///
/// Lifecycle: (`sync` | `handle_key_event` | `handle_mouse_event` | `render`)*
pub trait Component: Send {
    /// Pick up the latest projection of the portal state.
    fn sync(&mut self, view: &View);

    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Handle a mouse event. Return an Action to dispatch, or None.
    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect);
}
