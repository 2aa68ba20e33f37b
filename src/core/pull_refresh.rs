//! Pull-to-refresh.
//!
//! Dragging down while the content sits at its top pulls an indicator open
//! against a resistance factor.  Releasing past the threshold starts a
//! refresh, which locks out further pulls until it completes.

use std::time::Duration;

use super::mapper::map;
use super::transition::TransitionState;

const MESSAGES: &[&str] = &[
    "Looking for fresh news",
    "Fetching the latest",
    "Hang tight",
    "Refreshing",
    "Checking for updates",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullConfig {
    /// Pull distance that arms a refresh on release.
    pub threshold: f64,
    /// Hard cap on pull distance.
    pub max_pull: f64,
    /// Pointer travel → pull distance factor.
    pub resistance: f64,
    /// Indicator height at full pull.
    pub indicator_height: f64,
    pub refresh: Duration,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            threshold: 4.0,
            max_pull: 12.0,
            resistance: 0.5,
            indicator_height: 5.0,
            refresh: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PullToRefresh {
    config: PullConfig,
    start: Option<f64>,
    pull: f64,
    refreshing_until: Option<Duration>,
    refresh_started: Duration,
    refreshes: usize,
}

impl PullToRefresh {
    pub fn new(config: PullConfig) -> Self {
        Self {
            config,
            start: None,
            pull: 0.0,
            refreshing_until: None,
            refresh_started: Duration::ZERO,
            refreshes: 0,
        }
    }

    /// Pointer down at `y`.  Only arms when content is at its top and the
    /// gesture is not blocked (e.g. search is open).
    pub fn touch_start(&mut self, y: f64, at_top: bool, blocked: bool) {
        if at_top && !blocked && !self.is_refreshing() {
            self.start = Some(y);
        }
    }

    pub fn touch_move(&mut self, y: f64, at_top: bool) {
        if self.is_refreshing() {
            return;
        }
        let Some(start) = self.start else {
            return;
        };
        let distance = y - start;
        if distance > 0.0 && at_top {
            self.pull = (distance * self.config.resistance).min(self.config.max_pull);
        } else if distance <= 0.0 {
            self.pull = 0.0;
        }
    }

    /// Pointer up.  Returns `true` if a refresh started.
    pub fn touch_end(&mut self, now: Duration) -> bool {
        let armed = self.start.take().is_some();
        if armed && self.pull > self.config.threshold && !self.is_refreshing() {
            self.refreshing_until = Some(now + self.config.refresh);
            self.refresh_started = now;
            self.refreshes += 1;
            tracing::debug!(pull = self.pull, "refresh started");
            return true;
        }
        if !self.is_refreshing() {
            self.pull = 0.0;
        }
        false
    }

    /// Completes a refresh once its time is up.  Returns `true` on completion.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.refreshing_until {
            Some(until) if now >= until => {
                self.refreshing_until = None;
                self.pull = 0.0;
                tracing::debug!("refresh finished");
                true
            }
            _ => false,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing_until.is_some()
    }

    pub fn pull(&self) -> f64 {
        self.pull
    }

    pub fn state(&self) -> TransitionState {
        if self.is_refreshing() {
            TransitionState::Locked
        } else {
            TransitionState::Idle
        }
    }

    // ── derived indicator parameters ──────────────────────────

    pub fn indicator_height(&self) -> f64 {
        map(
            self.pull,
            (0.0, self.config.threshold),
            (0.0, self.config.indicator_height),
        )
    }

    pub fn opacity(&self) -> f64 {
        map(self.pull, (0.0, self.config.threshold), (0.0, 1.0))
    }

    pub fn scale(&self) -> f64 {
        map(self.pull, (0.0, self.config.threshold), (0.5, 1.0))
    }

    /// Spinner angle in degrees: follows the pull, or spins once per second
    /// while refreshing.
    pub fn rotation(&self, now: Duration) -> f64 {
        if self.is_refreshing() {
            let elapsed = now.saturating_sub(self.refresh_started).as_secs_f64();
            (elapsed * 360.0) % 360.0
        } else {
            self.pull * 4.0
        }
    }

    /// Status line for the current refresh.
    pub fn message(&self) -> Option<&'static str> {
        self.is_refreshing()
            .then(|| MESSAGES[(self.refreshes.saturating_sub(1)) % MESSAGES.len()])
    }
}
