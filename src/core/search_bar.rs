//! Search bar focus transition.
//!
//! Focusing the search box lifts it into the header slot and shrinks it to
//! make room for a cancel button, which fades in only after the lift has
//! finished.  Cancelling reverses everything instantly so nothing bounces on
//! the way back.

use std::time::Duration;

use super::easing::Easing;
use super::transition::{AnimatedValue, TransitionState};

const ENTER: Duration = Duration::from_millis(400);
const CANCEL_FADE: Duration = Duration::from_millis(150);
const POPUP_FADE: Duration = Duration::from_millis(200);
/// Main motion plus a short settle before late elements appear.
const APPEARANCE_DELAY: Duration = Duration::from_millis(450);
const WIDTH_EASE: Easing = Easing::CubicBezier(0.4, 0.0, 0.6, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// How far the bar rises when focused.
    pub lift: f64,
    /// Width given up to the cancel button.
    pub cancel_space: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lift: 2.0,
            cancel_space: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchTransition {
    config: SearchConfig,
    searching: bool,
    query: String,
    lift: AnimatedValue,
    shrink: AnimatedValue,
    cancel_opacity: AnimatedValue,
    popup_opacity: AnimatedValue,
    popup_content_opacity: AnimatedValue,
}

impl SearchTransition {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            searching: false,
            query: String::new(),
            lift: AnimatedValue::new(0.0, ENTER, Easing::EaseOut),
            shrink: AnimatedValue::new(0.0, ENTER, WIDTH_EASE),
            cancel_opacity: AnimatedValue::new(0.0, CANCEL_FADE, Easing::Linear)
                .with_delay(APPEARANCE_DELAY),
            popup_opacity: AnimatedValue::new(0.0, POPUP_FADE, Easing::Linear),
            popup_content_opacity: AnimatedValue::new(0.0, POPUP_FADE, Easing::Linear)
                .with_delay(APPEARANCE_DELAY),
        }
    }

    /// Search box gained focus.
    pub fn focus(&mut self, now: Duration) {
        if self.searching {
            return;
        }
        self.searching = true;
        self.lift.set_timing(ENTER, Easing::EaseOut);
        self.shrink.set_timing(ENTER, WIDTH_EASE);
        self.cancel_opacity.set_timing(CANCEL_FADE, Easing::Linear);
        self.cancel_opacity.set_delay(APPEARANCE_DELAY);
        self.popup_opacity.set_timing(POPUP_FADE, Easing::Linear);
        self.popup_content_opacity.set_timing(POPUP_FADE, Easing::Linear);
        self.popup_content_opacity.set_delay(APPEARANCE_DELAY);
        self.apply_targets(now);
        tracing::debug!("search focused");
    }

    /// Cancel button: leave search instantly and drop the query.
    pub fn cancel(&mut self, now: Duration) {
        if !self.searching {
            return;
        }
        self.searching = false;
        self.query.clear();
        for value in self.values_mut() {
            value.set_timing(Duration::ZERO, Easing::Linear);
            value.set_delay(Duration::ZERO);
        }
        self.apply_targets(now);
        tracing::debug!("search cancelled");
    }

    /// Clear button: empty the query but stay focused.
    pub fn clear(&mut self) {
        self.query.clear();
    }

    pub fn push_char(&mut self, c: char) {
        if self.searching {
            self.query.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    pub fn tick(&mut self, now: Duration) {
        for value in self.values_mut() {
            value.advance(now);
        }
    }

    fn apply_targets(&mut self, now: Duration) {
        let on = if self.searching { 1.0 } else { 0.0 };
        self.lift.set(-self.config.lift * on, now);
        self.shrink.set(self.config.cancel_space * on, now);
        self.cancel_opacity.set(on, now);
        self.popup_opacity.set(on, now);
        self.popup_content_opacity.set(on, now);
    }

    fn values_mut(&mut self) -> [&mut AnimatedValue; 5] {
        [
            &mut self.lift,
            &mut self.shrink,
            &mut self.cancel_opacity,
            &mut self.popup_opacity,
            &mut self.popup_content_opacity,
        ]
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn header_visible(&self) -> bool {
        !self.searching
    }

    /// Vertical translate of the bar (non-positive).
    pub fn lift(&self) -> f64 {
        self.lift.value()
    }

    /// Width currently given up to the cancel button.
    pub fn shrink(&self) -> f64 {
        self.shrink.value()
    }

    pub fn cancel_opacity(&self) -> f64 {
        self.cancel_opacity.value()
    }

    pub fn popup_opacity(&self) -> f64 {
        self.popup_opacity.value()
    }

    pub fn popup_content_opacity(&self) -> f64 {
        self.popup_content_opacity.value()
    }

    pub fn state(&self) -> TransitionState {
        let animating = [
            &self.lift,
            &self.shrink,
            &self.cancel_opacity,
            &self.popup_opacity,
            &self.popup_content_opacity,
        ]
        .iter()
        .any(|v| v.is_animating());
        if animating {
            TransitionState::Animating
        } else {
            TransitionState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn focus_lifts_then_reveals_cancel_late() {
        let mut s = SearchTransition::new(SearchConfig::default());
        s.focus(ms(0));
        assert!(!s.header_visible());

        s.tick(ms(200));
        assert!(s.lift() < 0.0 && s.lift() > -2.0);
        assert_eq!(s.cancel_opacity(), 0.0);

        s.tick(ms(400));
        assert_eq!(s.lift(), -2.0);
        assert_eq!(s.shrink(), 10.0);
        assert_eq!(s.cancel_opacity(), 0.0);

        s.tick(ms(700));
        assert_eq!(s.cancel_opacity(), 1.0);
        assert_eq!(s.popup_opacity(), 1.0);
        assert_eq!(s.state(), TransitionState::Idle);
    }

    #[test]
    fn cancel_is_instant_even_mid_transition() {
        let mut s = SearchTransition::new(SearchConfig::default());
        s.focus(ms(0));
        s.push_char('a');
        s.tick(ms(100));
        s.cancel(ms(100));
        assert_eq!(s.lift(), 0.0);
        assert_eq!(s.shrink(), 0.0);
        assert_eq!(s.cancel_opacity(), 0.0);
        assert_eq!(s.popup_content_opacity(), 0.0);
        assert_eq!(s.query(), "");
        assert!(s.header_visible());
        assert_eq!(s.state(), TransitionState::Idle);
    }

    #[test]
    fn refocus_after_cancel_animates_again() {
        let mut s = SearchTransition::new(SearchConfig::default());
        s.focus(ms(0));
        s.tick(ms(1000));
        s.cancel(ms(1000));
        s.focus(ms(2000));
        assert_eq!(s.state(), TransitionState::Animating);
        s.tick(ms(2200));
        assert!(s.lift() > -2.0);
    }

    #[test]
    fn clear_keeps_focus() {
        let mut s = SearchTransition::new(SearchConfig::default());
        s.push_char('x');
        assert_eq!(s.query(), "");
        s.focus(ms(0));
        s.push_char('x');
        s.push_char('y');
        s.pop_char();
        assert_eq!(s.query(), "x");
        s.clear();
        assert_eq!(s.query(), "");
        assert!(s.is_searching());
    }
}
