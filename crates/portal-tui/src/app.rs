//! Application core: event loop, reducer plumbing, and action dispatch.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use portal_core::{Content, Event as PortalEvent, PortalConfig, PortalController, PortalState};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, Inbox, RENDER_RATE, TICK_RATE};
use crate::screens::connect_dialog::ConnectDialog;
use crate::screens::networks::NetworksScreen;
use crate::theme;
use crate::tui::Tui;

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Top-level application state and event loop.
pub struct App {
    /// Single source of truth; replaced on every portal event.
    state: PortalState,
    controller: PortalController,
    /// Terminal input, timers, and portal completions.
    inbox: Inbox,
    networks: NetworksScreen,
    dialog: ConnectDialog,
    backend_url: String,
    running: bool,
    help_visible: bool,
    spinner_frame: usize,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let (portal_tx, portal_rx) = mpsc::unbounded_channel();
        let controller = PortalController::new(config, portal_tx)?;
        let inbox = Inbox::new();
        inbox.forward_portal(portal_rx);
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            state: PortalState::new(),
            controller,
            inbox,
            networks: NetworksScreen::new(),
            dialog: ConnectDialog::new(),
            backend_url: config.url.to_string(),
            running: true,
            help_visible: false,
            spinner_frame: 0,
            action_tx,
            action_rx,
        };
        app.sync_view();
        Ok(app)
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.inbox.attach_terminal(TICK_RATE, RENDER_RATE);

        info!("TUI event loop started");
        self.action_tx.send(PortalEvent::Initialize.into())?;

        while self.running {
            // 1. Wait for input, a timer, or a portal completion
            let Some(event) = self.inbox.next().await else {
                break;
            };
            if let Some(action) = self.map_event(event)? {
                self.action_tx.send(action)?;
            }

            // 2. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                let render = action == Action::Render;
                self.process_action(action);

                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.inbox.stop();
        self.controller.shutdown();
        info!("TUI event loop ended");
        Ok(())
    }

    fn map_event(&mut self, event: Event) -> Result<Option<Action>> {
        Ok(match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Mouse(mouse) => self.handle_mouse_event(mouse)?,
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Tick => Some(Action::Tick),
            Event::Render => Some(Action::Render),
            Event::Portal(completion) => Some(Action::Portal(completion)),
        })
    }

    /// Global keys first, then the dialog while it is open, else the list.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        // Typed characters belong to the password field
        if self.dialog.is_open() {
            return self.dialog.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            _ => {}
        }

        self.networks.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.help_visible || self.dialog.is_open() {
            return Ok(None);
        }
        self.networks.handle_mouse_event(mouse)
    }

    fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Tick => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }

            Action::Portal(event) => self.dispatch(event),

            // Render is handled in the main loop
            Action::Render => {}
        }
    }

    /// Reduce one portal event, start its effect, and refresh the components.
    fn dispatch(&mut self, event: PortalEvent) {
        let transition = std::mem::take(&mut self.state).reduce(event);
        self.state = transition.state;

        if let Some(effect) = transition.effect {
            debug!(?effect, "starting portal request");
            self.controller.run(effect);
        }
        self.sync_view();
    }

    fn sync_view(&mut self) {
        let view = self.state.view();
        self.networks.sync(&view);
        self.dialog.sync(&view);
    }

    fn busy(&self) -> bool {
        matches!(self.state.content(), Content::Loading) || self.state.connect_in_flight()
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [title_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_title(frame, title_area);
        self.networks.render(frame, content_area);
        self.render_status_bar(frame, status_area);

        // Overlays, topmost last
        self.dialog.render(frame, area);
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" Wi-Fi Setup ", theme::title_style())];
        if self.busy() {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!("{glyph} "),
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled("● ", Style::default().fg(theme::NEON_CYAN)),
            Span::styled(self.backend_url.clone(), theme::table_row()),
            Span::styled(" │ ? help  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 48u16.min(area.width.saturating_sub(4));
        let help_height = 17u16.min(area.height.saturating_sub(2));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };
        let binding = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("Networks"),
            binding("j/k ↑/↓", "Move up/down"),
            binding("Enter", "Connect to network"),
            binding("click", "Connect to network"),
            binding("r", "Scan again"),
            Line::from(""),
            section("Connect dialog"),
            binding("Tab", "Show / hide password"),
            binding("Enter", "Connect"),
            binding("Esc", "Close"),
            Line::from(""),
            binding("?", "This help"),
            binding("q Ctrl+C", "Quit"),
            Line::from(Span::styled("             Esc or ? to close", theme::key_hint())),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
