//! Terminal event abstraction and the animation frame pump.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.
//! [`FramePump`] is the timer half: the scroll engine asks it for single
//! frames and the main loop sleeps on its deadline.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::scroll::engine::TickScheduler;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(poll_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            // Poll with a timeout so the task notices a dropped receiver
            // even when no input arrives.
            let has_event = event::poll(poll_rate).unwrap_or(false);
            if !has_event {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            if let Ok(ev) = event::read() {
                let app_event = match ev {
                    CtEvent::Key(k) => AppEvent::Key(k),
                    CtEvent::Mouse(m) => AppEvent::Mouse(m),
                    CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                    _ => continue,
                };
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    rx
}

// ───────────────────────────────────────── frame pump ────────

/// ~60 fps animation frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Single-shot frame timer for the scroll animation.
///
/// `schedule` arms a deadline only when none is pending, so retargets
/// while animating never stack extra frames. The main loop sleeps on
/// [`deadline`](Self::deadline) while [`armed`](Self::armed) and calls
/// [`consume`](Self::consume) when it fires; the engine re-schedules
/// itself until it settles.
#[derive(Debug, Default)]
pub struct FramePump {
    deadline: Option<Instant>,
}

impl FramePump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline to sleep on. Meaningful only while armed.
    pub fn deadline(&self) -> Instant {
        self.deadline.unwrap_or_else(Instant::now)
    }

    /// Disarm after the deadline fired, before running the engine tick.
    pub fn consume(&mut self) {
        self.deadline = None;
    }
}

impl TickScheduler for FramePump {
    fn schedule(&mut self) {
        if self.deadline.is_none() {
            self.deadline = Some(Instant::now() + FRAME_INTERVAL);
        }
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_arms_once_and_disarms_on_cancel() {
        let mut pump = FramePump::new();
        assert!(!pump.armed());
        pump.schedule();
        let first = pump.deadline();
        pump.schedule();
        assert_eq!(pump.deadline(), first, "re-schedule must not push the deadline");
        pump.cancel();
        assert!(!pump.armed());
    }

    #[test]
    fn consumed_pump_needs_a_fresh_schedule() {
        let mut pump = FramePump::new();
        pump.schedule();
        pump.consume();
        assert!(!pump.armed());
        pump.schedule();
        assert!(pump.armed());
    }
}
