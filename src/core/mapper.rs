//! Clamped linear mapping from a raw signal to a derived visual parameter.
//!
//! Every effect in the playground reduces some part of its output to this:
//! take a scroll offset, drag offset or pull distance, clamp it into a
//! domain, and interpolate into an output range.  Mappers are stateless and
//! cheap, so several of them can read the same signal every frame.

/// Map `signal` from `domain` onto `range`, clamping at both ends.
///
/// A degenerate domain (`hi <= lo`, e.g. a height that has not been measured
/// yet) yields `range.0` without dividing.
pub fn map(signal: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (lo, hi) = domain;
    let (a, b) = range;
    if !(hi > lo) || signal.is_nan() {
        return a;
    }
    if signal <= lo {
        return a;
    }
    if signal >= hi {
        return b;
    }
    a + (signal - lo) / (hi - lo) * (b - a)
}

/// Fraction of the way `signal` has travelled through `[lo, hi]`, in `[0, 1]`.
pub fn progress(signal: f64, lo: f64, hi: f64) -> f64 {
    map(signal, (lo, hi), (0.0, 1.0))
}

/// A stored domain/range pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapper {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl Mapper {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, signal: f64) -> f64 {
        map(signal, self.domain, self.range)
    }

    /// Replace the domain's upper bound, e.g. after a remeasure.
    pub fn with_hi(mut self, hi: f64) -> Self {
        self.domain.1 = hi;
        self
    }

    /// `true` once the domain has positive width.
    pub fn is_measured(&self) -> bool {
        self.domain.1 > self.domain.0
    }
}
