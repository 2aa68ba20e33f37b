//! Chip button that expands, holds, then collapses on its own.

use std::time::Duration;

use super::easing::Easing;
use super::mapper::map;
use super::transition::{AnimatedValue, TransitionState};

const RESIZE: Duration = Duration::from_millis(500);
const HOLD: Duration = Duration::from_millis(2500);
const LABEL_IN_DELAY: Duration = Duration::from_millis(200);
const LABEL_IN: Duration = Duration::from_millis(300);
const LABEL_OUT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipPhase {
    Collapsed,
    Expanding,
    Holding { until: Duration },
    Collapsing,
}

impl ChipPhase {
    pub fn label(self) -> &'static str {
        match self {
            ChipPhase::Collapsed => "collapsed",
            ChipPhase::Expanding => "expanding",
            ChipPhase::Holding { .. } => "holding",
            ChipPhase::Collapsing => "collapsing",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChipSequence {
    phase: ChipPhase,
    collapsed_width: f64,
    expanded_width: f64,
    width: AnimatedValue,
    label_opacity: AnimatedValue,
    /// Highlight sweep position across the chip, 0 → 1 while expanding.
    sweep: AnimatedValue,
}

impl ChipSequence {
    pub fn new(collapsed_width: f64, expanded_width: f64) -> Self {
        Self {
            phase: ChipPhase::Collapsed,
            collapsed_width,
            expanded_width,
            width: AnimatedValue::new(collapsed_width, RESIZE, Easing::EaseInOut),
            label_opacity: AnimatedValue::new(0.0, LABEL_IN, Easing::Linear),
            sweep: AnimatedValue::new(0.0, RESIZE, Easing::EaseInOut),
        }
    }

    /// Kick off (or restart) the expand → hold → collapse run.
    pub fn start(&mut self, now: Duration) {
        self.phase = ChipPhase::Expanding;
        self.width.set(self.expanded_width, now);
        self.label_opacity.set_timing(LABEL_IN, Easing::Linear);
        self.label_opacity.set_delay(LABEL_IN_DELAY);
        self.label_opacity.set(1.0, now);
        self.sweep.jump(0.0);
        self.sweep.set(1.0, now);
    }

    pub fn tick(&mut self, now: Duration) {
        let resized = self.width.advance(now);
        self.label_opacity.advance(now);
        self.sweep.advance(now);

        match self.phase {
            ChipPhase::Expanding if resized || !self.width.is_animating() => {
                self.phase = ChipPhase::Holding { until: now + HOLD };
            }
            ChipPhase::Holding { until } if now > until => {
                self.phase = ChipPhase::Collapsing;
                self.width.set(self.collapsed_width, now);
                self.label_opacity.set_timing(LABEL_OUT, Easing::Linear);
                self.label_opacity.set_delay(Duration::ZERO);
                self.label_opacity.set(0.0, now);
            }
            ChipPhase::Collapsing if resized || !self.width.is_animating() => {
                self.phase = ChipPhase::Collapsed;
            }
            _ => {}
        }
    }

    pub fn phase(&self) -> ChipPhase {
        self.phase
    }

    pub fn width(&self) -> f64 {
        self.width.value()
    }

    pub fn label_opacity(&self) -> f64 {
        self.label_opacity.value()
    }

    pub fn sweep_position(&self) -> f64 {
        self.sweep.value()
    }

    /// Sweep fades in and back out over its run: 0 → 0.7 → 0.
    pub fn sweep_opacity(&self) -> f64 {
        if self.phase != ChipPhase::Expanding {
            return 0.0;
        }
        let t = self.sweep.value();
        if t <= 0.5 {
            map(t, (0.0, 0.5), (0.0, 0.7))
        } else {
            map(t, (0.5, 1.0), (0.7, 0.0))
        }
    }

    pub fn state(&self) -> TransitionState {
        match self.phase {
            ChipPhase::Collapsed => TransitionState::Idle,
            _ => TransitionState::Animating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(chip: &mut ChipSequence, from: Duration, to: Duration) {
        let mut now = from;
        while now < to {
            now += Duration::from_millis(20);
            chip.tick(now);
        }
    }

    #[test]
    fn runs_expand_hold_collapse() {
        let mut chip = ChipSequence::new(3.0, 20.0);
        chip.start(Duration::ZERO);
        assert_eq!(chip.phase(), ChipPhase::Expanding);

        run(&mut chip, Duration::ZERO, Duration::from_millis(600));
        assert!(matches!(chip.phase(), ChipPhase::Holding { .. }));
        assert_eq!(chip.width(), 20.0);
        assert_eq!(chip.label_opacity(), 1.0);

        run(&mut chip, Duration::from_millis(600), Duration::from_millis(3000));
        assert!(matches!(chip.phase(), ChipPhase::Holding { .. }));

        run(&mut chip, Duration::from_millis(3000), Duration::from_millis(4000));
        assert_eq!(chip.phase(), ChipPhase::Collapsed);
        assert_eq!(chip.width(), 3.0);
        assert_eq!(chip.label_opacity(), 0.0);
        assert_eq!(chip.state(), TransitionState::Idle);
    }

    #[test]
    fn hold_lasts_through_its_final_instant() {
        let mut chip = ChipSequence::new(3.0, 20.0);
        chip.start(Duration::ZERO);
        chip.tick(Duration::from_millis(500));
        let until = Duration::from_millis(3000);
        assert_eq!(chip.phase(), ChipPhase::Holding { until });

        chip.tick(until);
        assert_eq!(chip.phase(), ChipPhase::Holding { until });

        chip.tick(until + Duration::from_millis(1));
        assert_eq!(chip.phase(), ChipPhase::Collapsing);
    }

    #[test]
    fn sweep_peaks_midway() {
        let mut chip = ChipSequence::new(3.0, 20.0);
        chip.start(Duration::ZERO);
        chip.tick(Duration::from_millis(250));
        assert!((chip.sweep_opacity() - 0.7).abs() < 1e-3);
    }
}
