//! Connect dialog: password entry overlay drawn over the networks screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use portal_core::{DialogView, Event, PasswordFieldView, View};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const DIALOG_WIDTH: u16 = 56;
const DIALOG_HEIGHT: u16 = 13;

#[derive(Default)]
pub struct ConnectDialog {
    dialog: Option<DialogView>,
}

impl ConnectDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    fn password_line(field: &PasswordFieldView) -> Line<'static> {
        let (label_style, value_style) = if field.enabled {
            (
                Style::default().fg(theme::ELECTRIC_YELLOW).add_modifier(Modifier::BOLD),
                Style::default().fg(theme::NEON_CYAN),
            )
        } else {
            (theme::disabled(), theme::disabled())
        };
        let cursor = if field.enabled { "▎" } else { "" };

        Line::from(vec![
            Span::styled("  Password  ", label_style),
            Span::styled(field.display.clone(), value_style),
            Span::styled(cursor, Style::default().fg(theme::ELECTRIC_YELLOW)),
        ])
    }

    fn lines(dialog: &DialogView) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(ref bssid) = dialog.bssid {
            lines.push(Line::from(Span::styled(
                format!("  {bssid}"),
                theme::key_hint(),
            )));
        }
        lines.push(Line::from(""));

        match dialog.password {
            Some(ref field) => {
                lines.push(Self::password_line(field));
                lines.push(Line::from(vec![
                    Span::styled("  Tab ", theme::key_hint_key()),
                    Span::styled(field.toggle_label, theme::key_hint()),
                ]));
            }
            None => lines.push(Line::from(Span::styled(
                "  Open network, no password needed.",
                theme::table_row(),
            ))),
        }
        lines.push(Line::from(""));

        let submit_style = if dialog.submit.enabled {
            Style::default()
                .fg(theme::BG_HIGHLIGHT)
                .bg(theme::ELECTRIC_PURPLE)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::disabled()
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!(" {} ", dialog.submit.label), submit_style),
        ]));

        if let Some(ref status) = dialog.status {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {}", status.text),
                theme::status_line(status.tone),
            )));
        }

        lines
    }
}

impl Component for ConnectDialog {
    fn sync(&mut self, view: &View) {
        self.dialog.clone_from(&view.dialog);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let Some(ref dialog) = self.dialog else {
            return Ok(None);
        };

        let event = match key.code {
            KeyCode::Esc => Event::CloseDialog,
            KeyCode::Enter => Event::SubmitConnect,
            KeyCode::Tab => Event::TogglePasswordVisibility,
            KeyCode::Backspace => Event::PasswordBackspace,
            KeyCode::Char(ch)
                if dialog.password.is_some()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Event::PasswordInput(ch)
            }
            _ => return Ok(None),
        };
        Ok(Some(event.into()))
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(ref dialog) = self.dialog else {
            return;
        };

        let overlay_w = DIALOG_WIDTH.min(area.width.saturating_sub(4));
        let overlay_h = DIALOG_HEIGHT.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
        let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
        let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .title(format!(" Connect to {} ", dialog.title))
            .title_style(Style::default().fg(theme::ELECTRIC_YELLOW).add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(vec![
                Span::styled(" Enter", theme::key_hint_key()),
                Span::styled(" connect  ", theme::key_hint()),
                Span::styled("Esc", theme::key_hint_key()),
                Span::styled(" close ", theme::key_hint()),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(theme::border_focused());

        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        frame.render_widget(
            Paragraph::new(Self::lines(dialog)).wrap(Wrap { trim: false }),
            inner,
        );
    }
}
