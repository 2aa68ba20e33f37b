//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::AppConfig;

use super::demo::{Demo, DemoKind};
use super::event::EventSender;

/// Top-level application state.
pub struct AppState {
    /// The mounted demo and its engines.
    pub demo: Demo,
    /// User-configurable keybindings and effect constants.
    pub config: AppConfig,
    /// Length of a fresh countdown, in seconds.
    pub countdown_secs: u64,
    /// Shared event channel; demos that own tickers send through it.
    pub events: EventSender,
    /// Controls overlay.
    pub show_help: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    last_frame: Option<Duration>,
}

impl AppState {
    pub fn new(
        kind: DemoKind,
        config: AppConfig,
        countdown_secs: u64,
        events: EventSender,
        now: Duration,
    ) -> Self {
        let demo = Demo::mount(kind, &config.effects, countdown_secs, &events, now);
        Self {
            demo,
            config,
            countdown_secs,
            events,
            show_help: false,
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
            last_frame: None,
        }
    }

    /// Replace the mounted demo.  The old one is dropped first, which stops
    /// any ticker it owned.
    pub fn mount(&mut self, kind: DemoKind, now: Duration) {
        self.demo = Demo::mount(
            kind,
            &self.config.effects,
            self.countdown_secs,
            &self.events,
            now,
        );
        self.status_message = None;
    }

    /// Remount the current demo from scratch.
    pub fn restart(&mut self, now: Duration) {
        self.mount(self.demo.kind(), now);
    }

    /// One frame: measure the stage, then advance every engine.
    pub fn frame(&mut self, stage: Rect, now: Duration) {
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.saturating_sub(last).as_secs_f64());
        self.last_frame = Some(now);

        self.demo.measure(stage);
        if let Some(message) = self.demo.tick(now, dt) {
            self.status_message = Some(message);
        }
    }
}
