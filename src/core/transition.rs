//! Timed transitions and the animated property they drive.
//!
//! [`AnimatedValue`] behaves like a CSS-transitioned style property: writing
//! a new target starts a tween from wherever the value currently is, unless
//! transitions are switched off, in which case the write lands instantly.
//! Completion is reported once, from [`AnimatedValue::advance`], which is the
//! transition-end signal every controller in this crate keys off.

use std::time::Duration;

use super::easing::Easing;

/// Where a controller is in its transition lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    /// Nothing in flight; derived output tracks the signal directly.
    #[default]
    Idle,
    /// A timed transition is interpolating toward its target.
    Animating,
    /// Input is queued or ignored until a completion or frame callback.
    Locked,
}

impl TransitionState {
    pub fn label(self) -> &'static str {
        match self {
            TransitionState::Idle => "idle",
            TransitionState::Animating => "animating",
            TransitionState::Locked => "locked",
        }
    }
}

/// A single interpolation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    pub fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }

    pub fn sample(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let t = elapsed / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.sample(t)
    }
}

/// A transitioned numeric property.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    value: f64,
    tween: Option<Tween>,
    transitions_enabled: bool,
    duration: Duration,
    delay: Duration,
    easing: Easing,
}

impl AnimatedValue {
    pub fn new(value: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            value,
            tween: None,
            transitions_enabled: true,
            duration,
            delay: Duration::ZERO,
            easing,
        }
    }

    /// Hold the start of every tween back by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Current (possibly mid-tween) value as of the last `advance`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Where the value is heading (or resting).
    pub fn target(&self) -> f64 {
        self.tween.map_or(self.value, |t| t.to)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    pub fn set_transitions(&mut self, enabled: bool) {
        self.transitions_enabled = enabled;
    }

    /// Change the timing used by the next `set`.
    pub fn set_timing(&mut self, duration: Duration, easing: Easing) {
        self.duration = duration;
        self.easing = easing;
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Write a new target.  Starts a tween from the current value, or jumps
    /// when transitions are disabled or the timing is instantaneous.
    pub fn set(&mut self, target: f64, now: Duration) {
        if !self.transitions_enabled || (self.duration.is_zero() && self.delay.is_zero()) {
            self.jump(target);
            return;
        }
        let settled_here = self.tween.is_none() && self.value == target;
        if self.tween.map_or(false, |t| t.to == target) || settled_here {
            return;
        }
        self.tween = Some(Tween::new(
            self.value,
            target,
            now + self.delay,
            self.duration,
            self.easing,
        ));
    }

    /// Land on `value` immediately, cancelling any tween without signalling
    /// completion.
    pub fn jump(&mut self, value: f64) {
        self.value = value;
        self.tween = None;
    }

    /// Step the tween to `now`.  Returns `true` on the one call where the
    /// running tween completes.
    pub fn advance(&mut self, now: Duration) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        if now < tween.start {
            return false;
        }
        if tween.is_done(now) {
            self.value = tween.to;
            self.tween = None;
            return true;
        }
        self.value = tween.sample(now);
        false
    }
}
