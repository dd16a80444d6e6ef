//! Networks screen: scan results table, loading notice, or scan error.

use std::cell::Cell;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell as TableCell, Paragraph, Row, Table, TableState, Wrap};

use portal_core::{Event, NetworkRow, PrimaryRegion, View};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::signal_bars::{security_span, signal_span};

/// Rows occupied by the table header.
const HEADER_HEIGHT: u16 = 1;

pub struct NetworksScreen {
    region: PrimaryRegion,
    table_state: TableState,
    /// Where the table body was last drawn, for mouse hit-testing.
    table_area: Cell<Rect>,
    /// Scroll offset ratatui settled on during the last render.
    table_offset: Cell<usize>,
}

impl NetworksScreen {
    pub fn new() -> Self {
        Self {
            region: PrimaryRegion::LoadingMessage(String::new()),
            table_state: TableState::default(),
            table_area: Cell::new(Rect::default()),
            table_offset: Cell::new(0),
        }
    }

    fn rows(&self) -> &[NetworkRow] {
        match &self.region {
            PrimaryRegion::NetworkList(rows) => rows,
            _ => &[],
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.rows().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(idx.min(len - 1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows().is_empty() {
            return;
        }
        self.select(self.selected_index().saturating_add_signed(delta));
    }

    fn open_selected(&self) -> Option<Action> {
        if self.rows().is_empty() {
            return None;
        }
        Some(Event::SelectNetwork(self.selected_index()).into())
    }

    /// Map a terminal position to a row index, if it lands on a rendered row.
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.table_area.get();
        if !area.contains(Position::new(column, row)) || row < area.y + HEADER_HEIGHT {
            return None;
        }
        let idx = self.table_offset.get() + usize::from(row - area.y - HEADER_HEIGHT);
        (idx < self.rows().len()).then_some(idx)
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(area);

        let paragraph = Paragraph::new(Line::from(Span::styled(text.to_owned(), style)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, middle);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, rows: &[NetworkRow]) {
        let header = Row::new(vec![
            TableCell::from("Network").style(theme::table_header()),
            TableCell::from("Security").style(theme::table_header()),
            TableCell::from("Signal").style(theme::table_header()),
        ]);

        let selected_idx = self.selected_index();
        let body: Vec<Row> = rows
            .iter()
            .enumerate()
            .map(|(i, net)| {
                let is_selected = i == selected_idx;
                let prefix = if is_selected { "▸ " } else { "  " };

                let row_style = if is_selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };

                Row::new(vec![
                    TableCell::from(format!("{prefix}{}", net.name)).style(
                        Style::default()
                            .fg(theme::NEON_CYAN)
                            .add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                    TableCell::from(Line::from(vec![
                        security_span(net.security),
                        Span::raw(format!(" {}", net.security)),
                    ])),
                    TableCell::from(Line::from(vec![
                        signal_span(net.signal),
                        Span::raw(format!(" {}", net.signal)),
                    ])),
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(16),
        ];

        let table = Table::new(body, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);

        self.table_area.set(area);
        self.table_offset.set(state.offset());
    }
}

impl Component for NetworksScreen {
    fn sync(&mut self, view: &View) {
        self.region = view.primary.clone();
        if self.rows().is_empty() {
            self.table_state.select(None);
        } else {
            self.select(self.selected_index());
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('j') | KeyCode::Down) => self.move_selection(1),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.move_selection(-1),
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => self.select(0),
            (_, KeyCode::Char('G') | KeyCode::End) => self.select(usize::MAX),
            (_, KeyCode::Enter) => return Ok(self.open_selected()),
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                return Ok(Some(Event::Rescan.into()));
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(idx) = self.row_at(mouse.column, mouse.row) else {
                    return Ok(None);
                };
                self.select(idx);
                Ok(Some(Event::SelectNetwork(idx).into()))
            }
            MouseEventKind::ScrollDown => {
                self.move_selection(1);
                Ok(None)
            }
            MouseEventKind::ScrollUp => {
                self.move_selection(-1);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.region {
            PrimaryRegion::NetworkList(rows) => format!(" Wi-Fi Networks ({}) ", rows.len()),
            _ => " Wi-Fi Networks ".into(),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, hints_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        match &self.region {
            PrimaryRegion::LoadingMessage(text) => {
                Self::render_message(frame, body, text, theme::notice());
            }
            PrimaryRegion::ErrorMessage(text) => {
                Self::render_message(frame, body, text, theme::error_text());
            }
            PrimaryRegion::NetworkList(rows) => self.render_table(frame, body, rows),
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("connect  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("rescan  ", theme::key_hint()),
            Span::styled("? ", theme::key_hint_key()),
            Span::styled("help  ", theme::key_hint()),
            Span::styled("q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), hints_area);
    }
}
