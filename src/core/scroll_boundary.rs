//! Scroll handoff between a pinned upper region and a scrollable lower one.
//!
//! The upper region (a hero image with a title) stays pinned while the outer
//! scroll offset climbs to its measured height.  Once the offset reaches that
//! height, control hands off: the lower region becomes the scrolling
//! viewport and the mode flag flips to `Internal`, which the header reads to
//! show its title.
//!
//! The flag only flips on a genuine crossing.  A remeasure of the upper
//! region moves the threshold for future crossings but never rewrites the
//! mode that is already committed.

use super::mapper::Mapper;
use super::smoothing::{CriticalSpring, ExpFollow};

/// Which scroll container currently owns the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// The page scrolls; the upper region is on screen.
    #[default]
    External,
    /// The lower region scrolls; the header shows its title.
    Internal,
}

impl ScrollMode {
    pub fn label(self) -> &'static str {
        match self {
            ScrollMode::External => "external",
            ScrollMode::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConfig {
    /// Sub-cell band below the threshold that must be cleared before
    /// `Internal` falls back to `External`.
    pub hysteresis: f64,
    /// Identical consecutive measurements needed before a height is trusted.
    pub settle_samples: u32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            hysteresis: 0.5,
            settle_samples: 2,
        }
    }
}

/// Threshold flag driven by the outer scroll offset.
#[derive(Debug, Clone)]
pub struct ScrollBoundary {
    config: BoundaryConfig,
    mode: ScrollMode,
    /// Armed transition point, once a stable measurement exists.
    point: Option<f64>,
    pending: Option<(f64, u32)>,
    scroll: f64,
}

impl ScrollBoundary {
    pub fn new(config: BoundaryConfig) -> Self {
        Self {
            config,
            mode: ScrollMode::External,
            point: None,
            pending: None,
            scroll: 0.0,
        }
    }

    /// Report the upper region's rendered height.  Non-positive heights are
    /// ignored.  Returns `Some(mode)` only when this arms the boundary for
    /// the first time and the restored scroll position is already past it.
    pub fn measure(&mut self, height: f64) -> Option<ScrollMode> {
        if !(height > 0.0) {
            return None;
        }
        if self.point == Some(height) {
            self.pending = None;
            return None;
        }
        let samples = match self.pending {
            Some((h, n)) if h == height => n + 1,
            _ => 1,
        };
        if samples < self.config.settle_samples.max(1) {
            self.pending = Some((height, samples));
            return None;
        }

        self.pending = None;
        let first = self.point.is_none();
        self.point = Some(height);
        tracing::debug!(height, first, "scroll boundary armed");

        if first && self.scroll >= height && self.mode == ScrollMode::External {
            self.mode = ScrollMode::Internal;
            return Some(self.mode);
        }
        None
    }

    /// Feed the outer scroll offset.  Returns the new mode on a flip.
    pub fn on_scroll(&mut self, offset: f64) -> Option<ScrollMode> {
        self.scroll = offset;
        let point = self.point?;
        let next = match self.mode {
            ScrollMode::External if offset >= point => ScrollMode::Internal,
            ScrollMode::Internal if offset < point - self.config.hysteresis => ScrollMode::External,
            _ => return None,
        };
        tracing::debug!(offset, point, mode = next.label(), "scroll mode flip");
        self.mode = next;
        Some(next)
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// Armed transition point, or `None` before a stable measurement.
    pub fn point(&self) -> Option<f64> {
        self.point
    }

    pub fn header_title_visible(&self) -> bool {
        self.mode == ScrollMode::Internal
    }
}

/// Where a wheel delta ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelTarget {
    Outer,
    Inner,
    /// Nothing left to scroll in that direction.
    None,
}

/// Two stacked scroll containers sharing one wheel, plus the derived
/// parallax and slide-up parameters for rendering.
#[derive(Debug, Clone)]
pub struct NestedScroll {
    boundary: ScrollBoundary,
    outer: f64,
    inner: f64,
    inner_max: f64,
    /// Lower region slides from `h` up to `0`.
    slide: Mapper,
    slide_spring: CriticalSpring,
    /// Upper region drifts up by `parallax_depth`.
    parallax: Mapper,
    inner_follow: ExpFollow,
}

impl NestedScroll {
    pub fn new(config: BoundaryConfig, parallax_depth: f64) -> Self {
        Self {
            boundary: ScrollBoundary::new(config),
            outer: 0.0,
            inner: 0.0,
            inner_max: 0.0,
            slide: Mapper::new((0.0, 0.0), (0.0, 0.0)),
            slide_spring: CriticalSpring::new(0.0, 14.0),
            parallax: Mapper::new((0.0, 0.0), (0.0, -parallax_depth)),
            inner_follow: ExpFollow::new(0.0, 0.35),
        }
    }

    /// Report the upper region's height and the lower list's overflow.
    pub fn measure(&mut self, upper_height: f64, inner_max: f64) {
        self.inner_max = inner_max.max(0.0);
        self.inner = self.inner.min(self.inner_max);
        self.inner_follow.set_target(self.inner);
        self.boundary.measure(upper_height);
        if let Some(point) = self.boundary.point() {
            if self.slide.domain.1 != point {
                self.slide = Mapper::new((0.0, point), (point, 0.0));
                self.parallax = self.parallax.with_hi(point);
                self.outer = self.outer.min(point);
                self.slide_spring.snap(self.slide.map(self.outer));
            }
        }
    }

    /// Route a wheel delta (positive = down).
    pub fn wheel(&mut self, delta: f64) -> WheelTarget {
        let Some(point) = self.boundary.point() else {
            return WheelTarget::None;
        };

        let target = match self.boundary.mode() {
            ScrollMode::External => {
                let next = (self.outer + delta).clamp(0.0, point);
                if next != self.outer {
                    self.outer = next;
                    WheelTarget::Outer
                } else if delta > 0.0 && self.outer >= point {
                    // Parked on the point after a shrinking remeasure; this
                    // wheel is the crossing.
                    WheelTarget::Outer
                } else {
                    WheelTarget::None
                }
            }
            ScrollMode::Internal => {
                if delta < 0.0 && self.inner <= 0.0 {
                    // Inner list at its top: hand the wheel back outward.
                    self.outer = (self.outer + delta).clamp(0.0, point);
                    WheelTarget::Outer
                } else {
                    let next = (self.inner + delta).clamp(0.0, self.inner_max);
                    if next == self.inner {
                        WheelTarget::None
                    } else {
                        self.inner = next;
                        self.inner_follow.set_target(next);
                        WheelTarget::Inner
                    }
                }
            }
        };

        if target == WheelTarget::Outer {
            self.boundary.on_scroll(self.outer);
            self.slide_spring.set_target(self.slide.map(self.outer));
        }
        target
    }

    pub fn tick(&mut self, dt: f64) {
        self.slide_spring.tick(dt);
        self.inner_follow.tick();
    }

    pub fn mode(&self) -> ScrollMode {
        self.boundary.mode()
    }

    pub fn boundary(&self) -> &ScrollBoundary {
        &self.boundary
    }

    pub fn outer(&self) -> f64 {
        self.outer
    }

    /// Logical inner scroll offset.
    pub fn inner(&self) -> f64 {
        self.inner
    }

    /// Smoothed inner offset for rendering.
    pub fn inner_rendered(&self) -> f64 {
        self.inner_follow.value()
    }

    /// Lower region's translate below its pinned position.
    pub fn slide_offset(&self) -> f64 {
        if self.slide.is_measured() {
            self.slide_spring.value()
        } else {
            0.0
        }
    }

    /// Upper region's parallax translate (non-positive).
    pub fn parallax_offset(&self) -> f64 {
        self.parallax.map(self.outer)
    }

    pub fn is_animating(&self) -> bool {
        self.slide_spring.is_animating() || self.inner_follow.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(point: f64) -> ScrollBoundary {
        let mut b = ScrollBoundary::new(BoundaryConfig::default());
        b.measure(point);
        b.measure(point);
        assert_eq!(b.point(), Some(point));
        b
    }

    #[test]
    fn scenario_sequence_flips_once() {
        let mut b = armed(100.0);
        let modes: Vec<ScrollMode> = [0.0, 50.0, 120.0, 200.0]
            .into_iter()
            .map(|s| {
                b.on_scroll(s);
                b.mode()
            })
            .collect();
        use ScrollMode::*;
        assert_eq!(modes, vec![External, External, Internal, Internal]);
    }

    #[test]
    fn monotonic_sweep_flips_exactly_once_at_or_after_crossing() {
        let mut b = armed(100.0);
        let mut flips = Vec::new();
        let mut s = 0.0;
        while s <= 300.0 {
            if let Some(mode) = b.on_scroll(s) {
                flips.push((s, mode));
            }
            s += 0.25;
        }
        assert_eq!(flips, vec![(100.0, ScrollMode::Internal)]);
    }

    #[test]
    fn jitter_at_threshold_does_not_oscillate() {
        let mut b = armed(100.0);
        b.on_scroll(100.0);
        assert_eq!(b.mode(), ScrollMode::Internal);
        for s in [99.8, 100.1, 99.6, 100.0, 99.9] {
            assert_eq!(b.on_scroll(s), None);
        }
        assert_eq!(b.on_scroll(99.0), Some(ScrollMode::External));
    }

    #[test]
    fn unmeasured_boundary_never_flips() {
        let mut b = ScrollBoundary::new(BoundaryConfig::default());
        b.measure(0.0);
        b.measure(-4.0);
        assert_eq!(b.on_scroll(1e6), None);
        assert_eq!(b.mode(), ScrollMode::External);
    }

    #[test]
    fn single_unstable_measurement_does_not_arm() {
        let mut b = ScrollBoundary::new(BoundaryConfig::default());
        b.measure(80.0);
        b.measure(90.0);
        assert_eq!(b.point(), None);
        b.measure(90.0);
        assert_eq!(b.point(), Some(90.0));
    }

    #[test]
    fn remeasure_does_not_rewrite_committed_mode() {
        let mut b = armed(100.0);
        b.on_scroll(110.0);
        assert_eq!(b.mode(), ScrollMode::Internal);

        // Image loads; upper region grows past the current scroll.
        assert_eq!(b.measure(150.0), None);
        assert_eq!(b.measure(150.0), None);
        assert_eq!(b.point(), Some(150.0));
        assert_eq!(b.mode(), ScrollMode::Internal);

        // The next real scroll event compares against the new point.
        assert_eq!(b.on_scroll(112.0), Some(ScrollMode::External));
    }

    #[test]
    fn restored_scroll_commits_initial_mode_on_first_arm() {
        let mut b = ScrollBoundary::new(BoundaryConfig::default());
        b.on_scroll(240.0);
        assert_eq!(b.measure(100.0), None);
        assert_eq!(b.measure(100.0), Some(ScrollMode::Internal));
    }

    #[test]
    fn wheel_hands_off_inward_and_back_out() {
        let mut n = NestedScroll::new(BoundaryConfig::default(), 4.0);
        n.measure(10.0, 20.0);
        n.measure(10.0, 20.0);

        for _ in 0..3 {
            assert_eq!(n.wheel(3.0), WheelTarget::Outer);
        }
        assert_eq!(n.mode(), ScrollMode::External);
        assert_eq!(n.wheel(3.0), WheelTarget::Outer);
        assert_eq!(n.outer(), 10.0);
        assert_eq!(n.mode(), ScrollMode::Internal);
        assert_eq!(n.parallax_offset(), -4.0);

        assert_eq!(n.wheel(5.0), WheelTarget::Inner);
        assert_eq!(n.inner(), 5.0);
        assert_eq!(n.wheel(-5.0), WheelTarget::Inner);
        assert_eq!(n.inner(), 0.0);

        // Inner at top: the next upward wheel goes outward and flips mode.
        assert_eq!(n.wheel(-2.0), WheelTarget::Outer);
        assert_eq!(n.outer(), 8.0);
        assert_eq!(n.mode(), ScrollMode::External);
    }

    #[test]
    fn slide_spring_follows_outer_scroll() {
        let mut n = NestedScroll::new(BoundaryConfig::default(), 4.0);
        n.measure(10.0, 0.0);
        n.measure(10.0, 0.0);
        assert_eq!(n.slide_offset(), 10.0);
        n.wheel(10.0);
        for _ in 0..120 {
            n.tick(1.0 / 30.0);
        }
        assert_eq!(n.slide_offset(), 0.0);
        assert!(!n.is_animating());
    }

    #[test]
    fn wheel_hands_off_after_upper_region_shrinks() {
        let mut n = NestedScroll::new(BoundaryConfig::default(), 4.0);
        n.measure(10.0, 20.0);
        n.measure(10.0, 20.0);
        for _ in 0..8 {
            n.wheel(1.0);
        }
        assert_eq!(n.outer(), 8.0);
        assert_eq!(n.mode(), ScrollMode::External);

        n.measure(6.0, 20.0);
        n.measure(6.0, 20.0);
        assert_eq!(n.outer(), 6.0);
        // The remeasure alone never commits a flip.
        assert_eq!(n.mode(), ScrollMode::External);

        assert_eq!(n.wheel(1.0), WheelTarget::Outer);
        assert_eq!(n.mode(), ScrollMode::Internal);
        assert!(n.boundary().header_title_visible());
        assert_eq!(n.wheel(1.0), WheelTarget::Inner);
    }

    #[test]
    fn wheel_up_at_top_stays_put() {
        let mut n = NestedScroll::new(BoundaryConfig::default(), 4.0);
        n.measure(10.0, 20.0);
        n.measure(10.0, 20.0);
        assert_eq!(n.wheel(-1.0), WheelTarget::None);
        assert_eq!(n.mode(), ScrollMode::External);
    }

    #[test]
    fn wheel_before_measure_is_ignored() {
        let mut n = NestedScroll::new(BoundaryConfig::default(), 4.0);
        assert_eq!(n.wheel(5.0), WheelTarget::None);
        assert_eq!(n.slide_offset(), 0.0);
    }
}
