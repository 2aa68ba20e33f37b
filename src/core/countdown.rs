//! Wall-clock countdown split into `HH:MM:SS` digit slots.

use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};

use super::digit_roller::DigitRoller;

/// Largest digit each slot can show, left to right (`H H : M M : S S`).
pub const SLOT_MAXIMA: [u8; 6] = [9, 9, 5, 9, 5, 9];

/// Whole seconds from `now` until `target`, never negative.
pub fn remaining_seconds(target: DateTime<Local>, now: DateTime<Local>) -> u64 {
    (target - now).num_seconds().max(0) as u64
}

/// Split seconds into six digits.  Hours saturate at 99.
pub fn split_digits(seconds: u64) -> [u8; 6] {
    let hours = (seconds / 3600).min(99);
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    [
        (hours / 10) as u8,
        (hours % 10) as u8,
        (minutes / 10) as u8,
        (minutes % 10) as u8,
        (secs / 10) as u8,
        (secs % 10) as u8,
    ]
}

/// Six rollers counting down to a fixed instant.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: DateTime<Local>,
    remaining: u64,
    slots: Vec<DigitRoller>,
}

impl Countdown {
    pub fn new(
        target: DateTime<Local>,
        now: DateTime<Local>,
        glyph_height: f64,
        roll: Duration,
    ) -> Self {
        let remaining = remaining_seconds(target, now);
        let digits = split_digits(remaining);
        let slots = digits
            .iter()
            .zip(SLOT_MAXIMA)
            .map(|(&d, max)| DigitRoller::new(d, max, glyph_height, roll))
            .collect();
        Self {
            target,
            remaining,
            slots,
        }
    }

    /// Start a countdown `seconds` from `now`.
    pub fn starting_in(
        seconds: u64,
        now: DateTime<Local>,
        glyph_height: f64,
        roll: Duration,
    ) -> Self {
        let target = now + TimeDelta::seconds(seconds.min(i64::MAX as u64) as i64);
        Self::new(target, now, glyph_height, roll)
    }

    /// Recompute from the wall clock and push changed digits into the slots.
    /// `frame_now` is the animation clock.
    pub fn sync(&mut self, wall_now: DateTime<Local>, frame_now: Duration) {
        let remaining = remaining_seconds(self.target, wall_now);
        if remaining == self.remaining {
            return;
        }
        self.remaining = remaining;
        for (slot, digit) in self.slots.iter_mut().zip(split_digits(remaining)) {
            slot.set_digit(digit, frame_now);
        }
        if remaining == 0 {
            tracing::debug!("countdown finished");
        }
    }

    pub fn tick(&mut self, frame_now: Duration) {
        for slot in &mut self.slots {
            slot.tick(frame_now);
        }
    }

    pub fn slots(&self) -> &[DigitRoller] {
        &self.slots
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn target(&self) -> DateTime<Local> {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_hhmmss() {
        assert_eq!(split_digits(0), [0, 0, 0, 0, 0, 0]);
        assert_eq!(split_digits(3600), [0, 1, 0, 0, 0, 0]);
        assert_eq!(split_digits(3599), [0, 0, 5, 9, 5, 9]);
        assert_eq!(split_digits(45 * 3600 + 7 * 60 + 31), [4, 5, 0, 7, 3, 1]);
    }

    #[test]
    fn hours_saturate() {
        assert_eq!(split_digits(500 * 3600)[..2], [9, 9]);
    }

    #[test]
    fn remaining_never_negative() {
        let now = Local::now();
        assert_eq!(remaining_seconds(now - TimeDelta::seconds(5), now), 0);
        assert_eq!(remaining_seconds(now + TimeDelta::seconds(90), now), 90);
    }

    #[test]
    fn ticking_across_a_minute_wraps_the_seconds_slots() {
        let start = Local::now();
        let mut c = Countdown::starting_in(61, start, 1.0, Duration::from_millis(100));
        assert_eq!(c.slots()[3].digit(), 1);

        let mut frame = Duration::ZERO;
        for s in 1..=2 {
            c.sync(start + TimeDelta::seconds(s), frame);
            for _ in 0..20 {
                frame += Duration::from_millis(16);
                c.tick(frame);
            }
        }
        // 61 → 60 → 59: seconds-ones wrapped 0 → 9, seconds-tens 0 → 5.
        assert_eq!(c.remaining(), 59);
        assert_eq!(c.slots()[5].wraps(), 1);
        assert_eq!(c.slots()[4].wraps(), 1);
        let digits: Vec<u8> = c.slots().iter().map(|s| s.digit()).collect();
        assert_eq!(digits, vec![0, 0, 0, 0, 5, 9]);
        for s in c.slots() {
            assert_eq!(s.offset(), s.initial_translate_y(s.digit()));
        }
    }

    #[test]
    fn reaches_finished_state() {
        let start = Local::now();
        let mut c = Countdown::starting_in(1, start, 1.0, Duration::ZERO);
        assert!(!c.is_finished());
        c.sync(start + TimeDelta::seconds(3), Duration::ZERO);
        assert!(c.is_finished());
    }
}
