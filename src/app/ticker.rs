//! Owned repeating task.
//!
//! A [`Ticker`] belongs to whichever demo needs periodic wall-clock events.
//! Dropping it aborts the task, so unmounting a demo can never leave a timer
//! firing into state that no longer exists.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::event::{AppEvent, EventSender};

#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
    period: Duration,
}

impl Ticker {
    /// Send [`AppEvent::CountdownTick`] every `period`, starting one period
    /// from now.  Must be called from within a tokio runtime.
    pub fn every(period: Duration, tx: EventSender) -> Self {
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(AppEvent::CountdownTick).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(?period, "ticker started");
        Self { handle, period }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(period = ?self.period, "ticker stopped");
    }
}
