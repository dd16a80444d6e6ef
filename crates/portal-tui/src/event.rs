//! The app's single inbox.
//!
//! Terminal input, the tick/render timers, and portal completions all arrive
//! on one channel, so the event loop handles them strictly in arrival order.

use std::time::Duration;

use crossterm::event::{Event as TerminalEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use portal_core::Event as PortalEvent;

/// Spinner cadence.
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// Frame cadence (~30 FPS).
pub const RENDER_RATE: Duration = Duration::from_millis(33);

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    Tick,
    Render,
    /// A background scan or connect request finished.
    Portal(PortalEvent),
}

impl Event {
    /// Key presses, mouse and resize. Releases, repeats, focus and paste are dropped.
    fn from_terminal(event: TerminalEvent) -> Option<Self> {
        match event {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            TerminalEvent::Mouse(mouse) => Some(Self::Mouse(mouse)),
            TerminalEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

pub struct Inbox {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl Inbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Relay controller completions until the controller hangs up.
    pub fn forward_portal(&self, mut completions: mpsc::UnboundedReceiver<PortalEvent>) {
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            loop {
                let completion = tokio::select! {
                    () = cancel.cancelled() => break,
                    completion = completions.recv() => completion,
                };
                let Some(completion) = completion else { break };
                if tx.send(Event::Portal(completion)).is_err() {
                    break;
                }
            }
        });
    }

    /// Start reading the terminal and firing the tick/render timers.
    pub fn attach_terminal(&self, tick_rate: Duration, render_rate: Duration) {
        tokio::spawn(pump_terminal(
            self.tx.clone(),
            self.cancel.clone(),
            tick_rate,
            render_rate,
        ));
    }

    /// Wait for the next event. The inbox holds its own sender, so this only
    /// yields `None` if every producer task has been torn down with it.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Inbox {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump_terminal(
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
    tick_rate: Duration,
    render_rate: Duration,
) {
    let mut input = EventStream::new();
    let mut tick = skipping_interval(tick_rate);
    let mut render = skipping_interval(render_rate);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,

            _ = tick.tick() => Event::Tick,

            _ = render.tick() => Event::Render,

            Some(read) = input.next() => match read {
                Ok(raw) => match Event::from_terminal(raw) {
                    Some(event) => event,
                    None => continue,
                },
                Err(e) => {
                    debug!(error = %e, "terminal read failed");
                    continue;
                }
            },
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}

/// An interval that drops missed ticks instead of bursting to catch up.
fn skipping_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}
