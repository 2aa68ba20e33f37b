//! Full-page section pager.
//!
//! Each wheel notch moves exactly one section.  The swap animation locks the
//! pager; input that arrives before the incoming section has finished
//! entering is dropped, so a fast wheel cannot skip sections.

use std::time::Duration;

use super::easing::Easing;
use super::transition::{AnimatedValue, TransitionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone)]
pub struct SectionPager {
    count: usize,
    index: usize,
    direction: Direction,
    /// Entry progress of the current section, 0 → 1.
    enter: AnimatedValue,
}

impl SectionPager {
    pub fn new(count: usize, duration: Duration) -> Self {
        Self {
            count: count.max(1),
            index: 0,
            direction: Direction::Forward,
            enter: AnimatedValue::new(1.0, duration, Easing::EaseInOut),
        }
    }

    /// Feed a wheel delta.  Returns `true` if it moved the pager.
    pub fn wheel(&mut self, delta: f64, now: Duration) -> bool {
        if self.is_locked() {
            return false;
        }
        let (next, direction) = if delta > 0.0 && self.index + 1 < self.count {
            (self.index + 1, Direction::Forward)
        } else if delta < 0.0 && self.index > 0 {
            (self.index - 1, Direction::Backward)
        } else {
            return false;
        };
        self.index = next;
        self.direction = direction;
        self.enter.jump(0.0);
        self.enter.set(1.0, now);
        tracing::debug!(index = next, ?direction, "section change");
        true
    }

    /// Advances the swap; the lock releases on its completion.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.enter.advance(now)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_locked(&self) -> bool {
        self.enter.is_animating()
    }

    pub fn state(&self) -> TransitionState {
        if self.is_locked() {
            TransitionState::Locked
        } else {
            TransitionState::Idle
        }
    }

    /// Entry progress, 0 → 1.
    pub fn progress(&self) -> f64 {
        self.enter.value()
    }

    /// Header rule: going forward it flashes in on the second section only;
    /// going back it stays until the first section is reached.
    pub fn header_visible(&self) -> bool {
        match self.direction {
            Direction::Forward => self.index == 1,
            Direction::Backward => self.index > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWAP: Duration = Duration::from_millis(800);

    #[test]
    fn wheel_is_ignored_while_swapping() {
        let mut p = SectionPager::new(9, SWAP);
        assert!(p.wheel(1.0, Duration::ZERO));
        assert_eq!(p.state(), TransitionState::Locked);
        assert!(!p.wheel(1.0, Duration::from_millis(100)));
        assert_eq!(p.index(), 1);

        assert!(p.tick(SWAP));
        assert!(p.wheel(1.0, SWAP));
        assert_eq!(p.index(), 2);
    }

    #[test]
    fn stays_within_bounds() {
        let mut p = SectionPager::new(2, Duration::ZERO);
        assert!(!p.wheel(-1.0, Duration::ZERO));
        assert!(p.wheel(1.0, Duration::ZERO));
        assert!(!p.wheel(1.0, Duration::ZERO));
        assert_eq!(p.index(), 1);
    }

    #[test]
    fn header_rule_depends_on_direction() {
        let mut p = SectionPager::new(9, Duration::ZERO);
        p.wheel(1.0, Duration::ZERO);
        assert!(p.header_visible());
        p.wheel(1.0, Duration::ZERO);
        assert!(!p.header_visible());
        p.wheel(-1.0, Duration::ZERO);
        assert!(p.header_visible());
        p.wheel(-1.0, Duration::ZERO);
        assert_eq!(p.index(), 0);
        assert!(!p.header_visible());
    }
}
