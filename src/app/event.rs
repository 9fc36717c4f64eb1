//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop never blocks on input.
//! Animation frames are driven separately by the main loop's frame timer.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// New terminal size in columns and rows.
    Resize(u16, u16),
}

/// Spawns a task that polls the terminal every `poll_interval` and forwards
/// events through the returned channel.  Key releases are dropped.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        if !event::poll(poll_interval).unwrap_or(false) {
            continue;
        }
        let Ok(ev) = event::read() else {
            continue;
        };
        let app_event = match ev {
            CtEvent::Key(k) if k.kind != KeyEventKind::Release => AppEvent::Key(k),
            CtEvent::Mouse(m) => AppEvent::Mouse(m),
            CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
