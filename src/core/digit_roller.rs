//! Odometer-style digit slot.
//!
//! A vertical strip of glyphs `[max, max-1, …, 0, max]` is translated so the
//! current digit sits in the window.  Counting down moves the strip forward
//! one glyph at a time.  The `0 → max` step would otherwise roll backwards
//! across the whole strip, so it instead rolls forward onto the duplicate
//! `max` glyph at the end, then (on transition-end) jumps back to the real
//! `max` glyph at the top with transitions disabled for exactly one frame.
//!
//! While that wrap is in flight the slot is locked: new digits queue in
//! arrival order and are replayed on the frame transitions come back on.

use std::collections::VecDeque;
use std::time::Duration;

use super::easing::Easing;
use super::transition::{AnimatedValue, TransitionState};

/// Notable moments in a roller's life, reported from [`DigitRoller::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollerEvent {
    /// An ordinary roll reached its glyph.
    Settled,
    /// The wrap roll ended and the strip jumped back to the top `max` glyph.
    WrapSnapped,
    /// Transitions were switched back on after the snap frame.
    Reenabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Rolling,
    /// Rolling forward onto the trailing duplicate glyph.
    Wrapping,
    /// Jumped to the top glyph; transitions off until the next frame.
    Snapped,
}

#[derive(Debug, Clone)]
pub struct DigitRoller {
    max_digit: u8,
    glyph_height: f64,
    digit: u8,
    offset: AnimatedValue,
    phase: Phase,
    queued: VecDeque<u8>,
    events: Vec<RollerEvent>,
    wraps: u64,
}

impl DigitRoller {
    /// Mount a slot showing `initial`.  The strip starts at its resting
    /// position; nothing animates in from a default.
    pub fn new(initial: u8, max_digit: u8, glyph_height: f64, roll: Duration) -> Self {
        let max_digit = max_digit.max(1);
        let digit = initial.min(max_digit);
        let rest = translate_for_index(max_digit - digit, glyph_height);
        Self {
            max_digit,
            glyph_height,
            digit,
            offset: AnimatedValue::new(rest, roll, Easing::EaseInOut),
            phase: Phase::Idle,
            queued: VecDeque::new(),
            events: Vec::new(),
            wraps: 0,
        }
    }

    /// Resting translate for `digit` on a freshly mounted strip.
    pub fn initial_translate_y(&self, digit: u8) -> f64 {
        let digit = digit.min(self.max_digit);
        translate_for_index(self.max_digit - digit, self.glyph_height)
    }

    /// Glyphs from top to bottom, including the trailing duplicate.
    pub fn strip(&self) -> Vec<u8> {
        (0..=self.max_digit)
            .rev()
            .chain(std::iter::once(self.max_digit))
            .collect()
    }

    /// Feed a new digit.  Queued while a wrap is in flight.
    pub fn set_digit(&mut self, digit: u8, now: Duration) {
        if digit > self.max_digit {
            tracing::warn!(digit, max = self.max_digit, "digit out of range, clamping");
        }
        let digit = digit.min(self.max_digit);

        if matches!(self.phase, Phase::Wrapping | Phase::Snapped) {
            self.queued.push_back(digit);
            return;
        }
        if digit == self.digit {
            return;
        }

        let previous = self.digit;
        self.digit = digit;

        if previous == 0 && digit == self.max_digit {
            self.phase = Phase::Wrapping;
            let past_end = translate_for_index(self.max_digit + 1, self.glyph_height);
            self.offset.set(past_end, now);
            if !self.offset.is_animating() {
                // Instant timing: no transition-end will ever arrive.
                self.finish_wrap();
            }
            return;
        }

        self.offset.set(self.initial_translate_y(digit), now);
        self.phase = if self.offset.is_animating() {
            Phase::Rolling
        } else {
            Phase::Idle
        };
    }

    /// Transition-end callback for the strip's translate.
    pub fn on_transition_end(&mut self) {
        match self.phase {
            Phase::Wrapping => self.finish_wrap(),
            Phase::Rolling => {
                self.phase = Phase::Idle;
                self.events.push(RollerEvent::Settled);
            }
            Phase::Idle | Phase::Snapped => {}
        }
    }

    /// Next-paint callback.  Ends the snap frame and replays queued digits.
    pub fn on_next_frame(&mut self, now: Duration) {
        if self.phase != Phase::Snapped {
            return;
        }
        self.offset.set_transitions(true);
        self.phase = Phase::Idle;
        self.events.push(RollerEvent::Reenabled);

        // Anything that re-locks the strip lands back in `queued` in order.
        let pending = std::mem::take(&mut self.queued);
        for digit in pending {
            self.set_digit(digit, now);
        }
    }

    /// One frame: close the previous snap window, then advance the roll.
    pub fn tick(&mut self, now: Duration) -> Vec<RollerEvent> {
        self.on_next_frame(now);
        if self.offset.advance(now) {
            self.on_transition_end();
        }
        self.take_events()
    }

    pub fn take_events(&mut self) -> Vec<RollerEvent> {
        std::mem::take(&mut self.events)
    }

    fn finish_wrap(&mut self) {
        self.offset.set_transitions(false);
        self.offset.jump(self.initial_translate_y(self.max_digit));
        self.phase = Phase::Snapped;
        self.wraps += 1;
        self.events.push(RollerEvent::WrapSnapped);
        tracing::debug!(max = self.max_digit, "digit strip wrapped to top");
    }

    // ── read-back ─────────────────────────────────────────────

    pub fn digit(&self) -> u8 {
        self.digit
    }

    /// Most recent digit fed in, including any still queued.
    pub fn latest(&self) -> u8 {
        self.queued.back().copied().unwrap_or(self.digit)
    }

    pub fn glyph_height(&self) -> f64 {
        self.glyph_height
    }

    /// Current translate of the strip (non-positive).
    pub fn offset(&self) -> f64 {
        self.offset.value()
    }

    pub fn transitions_enabled(&self) -> bool {
        self.offset.transitions_enabled()
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// Completed wrap snaps since mount.
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    pub fn state(&self) -> TransitionState {
        match self.phase {
            Phase::Idle => TransitionState::Idle,
            Phase::Rolling => TransitionState::Animating,
            Phase::Wrapping | Phase::Snapped => TransitionState::Locked,
        }
    }
}

fn translate_for_index(index: u8, glyph_height: f64) -> f64 {
    -(index as f64) * glyph_height
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLL: Duration = Duration::from_millis(400);
    const FRAME: Duration = Duration::from_millis(16);

    fn roller(initial: u8) -> DigitRoller {
        DigitRoller::new(initial, 9, 3.0, ROLL)
    }

    /// Tick frames until the roller is idle with nothing queued.
    fn settle(r: &mut DigitRoller, mut now: Duration, log: &mut Vec<RollerEvent>) -> Duration {
        for _ in 0..1000 {
            now += FRAME;
            log.extend(r.tick(now));
            if r.state() == TransitionState::Idle && r.queued_len() == 0 {
                break;
            }
        }
        now
    }

    #[test]
    fn mount_rests_at_initial_translate() {
        let r = roller(4);
        assert_eq!(r.offset(), r.initial_translate_y(4));
        assert_eq!(r.offset(), -15.0);
        assert_eq!(r.state(), TransitionState::Idle);
        assert!(r.transitions_enabled());
    }

    #[test]
    fn strip_has_trailing_duplicate_of_max() {
        let r = DigitRoller::new(0, 5, 1.0, ROLL);
        assert_eq!(r.strip(), vec![5, 4, 3, 2, 1, 0, 5]);
    }

    #[test]
    fn ordinary_decrement_rolls_one_glyph() {
        let mut r = roller(9);
        r.set_digit(8, Duration::ZERO);
        assert_eq!(r.state(), TransitionState::Animating);
        let mut log = Vec::new();
        settle(&mut r, Duration::ZERO, &mut log);
        assert_eq!(log, vec![RollerEvent::Settled]);
        assert_eq!(r.offset(), -3.0);
    }

    #[test]
    fn one_zero_nine_wraps_once_and_rests_at_direct_mount_offset() {
        let mut r = roller(1);
        let mut log = Vec::new();
        let mut now = Duration::ZERO;

        r.set_digit(0, now);
        now = settle(&mut r, now, &mut log);
        assert!(!log.contains(&RollerEvent::WrapSnapped));

        r.set_digit(9, now);
        assert_eq!(r.state(), TransitionState::Locked);
        settle(&mut r, now, &mut log);

        let snaps = log.iter().filter(|e| **e == RollerEvent::WrapSnapped).count();
        assert_eq!(snaps, 1);
        assert_eq!(r.wraps(), 1);
        assert_eq!(r.offset(), DigitRoller::new(9, 9, 3.0, ROLL).offset());
        assert!(r.transitions_enabled());
    }

    #[test]
    fn wrap_rolls_forward_past_the_end() {
        let mut r = roller(0);
        r.set_digit(9, Duration::ZERO);
        r.tick(Duration::from_millis(200));
        // Heading for index 10 (-30), so mid-roll is below index 9 (-27).
        assert!(r.offset() < -27.0);
    }

    #[test]
    fn snap_lasts_exactly_one_frame() {
        let mut r = roller(0);
        r.set_digit(9, Duration::ZERO);
        let events = r.tick(ROLL);
        assert_eq!(events, vec![RollerEvent::WrapSnapped]);
        assert!(!r.transitions_enabled());
        assert_eq!(r.offset(), 0.0);

        let events = r.tick(ROLL + FRAME);
        assert_eq!(events, vec![RollerEvent::Reenabled]);
        assert!(r.transitions_enabled());
        assert_eq!(r.state(), TransitionState::Idle);
    }

    #[test]
    fn digits_arriving_while_locked_are_replayed_in_order() {
        let mut r = roller(0);
        r.set_digit(9, Duration::ZERO);
        r.set_digit(8, Duration::from_millis(100));
        assert_eq!(r.digit(), 9);
        assert_eq!(r.latest(), 8);

        r.tick(ROLL); // snap frame
        r.set_digit(7, ROLL + Duration::from_millis(5));
        assert_eq!(r.queued_len(), 2);

        let events = r.tick(ROLL + FRAME);
        assert!(events.contains(&RollerEvent::Reenabled));
        assert_eq!(r.queued_len(), 0);
        assert_eq!(r.digit(), 7);

        let mut log = Vec::new();
        settle(&mut r, ROLL + FRAME, &mut log);
        assert_eq!(r.offset(), r.initial_translate_y(7));
    }

    #[test]
    fn queued_wrap_relocks_and_keeps_later_digits() {
        let mut r = roller(1);
        r.set_digit(0, Duration::ZERO);
        r.tick(ROLL);
        r.set_digit(9, ROLL);
        // Counting 9 → … → 0 → 9 again while the first wrap is locked.
        for d in [8, 0, 9, 8] {
            r.set_digit(d, ROLL + Duration::from_millis(10));
        }
        let mut log = Vec::new();
        settle(&mut r, ROLL, &mut log);
        assert_eq!(r.wraps(), 2);
        assert_eq!(r.digit(), 8);
        assert_eq!(r.offset(), r.initial_translate_y(8));
    }

    #[test]
    fn countdown_sequence_round_trips_through_many_wraps() {
        let mut r = DigitRoller::new(3, 5, 2.0, ROLL);
        let mut now = Duration::ZERO;
        let mut log = Vec::new();
        let mut digit = 3u8;
        for _ in 0..20 {
            digit = if digit == 0 { 5 } else { digit - 1 };
            r.set_digit(digit, now);
            now = settle(&mut r, now, &mut log);
        }
        assert_eq!(r.offset(), r.initial_translate_y(digit));
        assert_eq!(r.wraps(), 3);
    }

    #[test]
    fn instant_timing_still_wraps_and_reenables() {
        let mut r = DigitRoller::new(0, 9, 1.0, Duration::ZERO);
        r.set_digit(9, Duration::ZERO);
        assert_eq!(r.take_events(), vec![RollerEvent::WrapSnapped]);
        assert_eq!(r.tick(FRAME), vec![RollerEvent::Reenabled]);
        assert_eq!(r.offset(), 0.0);
    }

    #[test]
    fn out_of_range_digit_is_clamped() {
        let mut r = DigitRoller::new(2, 5, 1.0, Duration::ZERO);
        r.set_digit(8, Duration::ZERO);
        assert_eq!(r.digit(), 5);
        assert_eq!(r.offset(), 0.0);
    }
}
