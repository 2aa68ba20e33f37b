//! Smoothing filters placed between a mapper and the value a renderer reads.
//!
//! Mapped targets can jump by whole cells between frames.  These filters
//! turn those jumps into visible glides without changing where things end up.

/// Critically damped spring: approaches its target as fast as possible
/// without overshooting.
#[derive(Debug, Clone)]
pub struct CriticalSpring {
    value: f64,
    velocity: f64,
    target: f64,
    /// Natural frequency (rad/s).  Higher settles faster.
    omega: f64,
    /// Below this distance and speed the spring lands on its target.
    rest_delta: f64,
}

impl CriticalSpring {
    pub fn new(value: f64, omega: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            omega: omega.max(0.1),
            rest_delta: 0.001,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Teleport to `value` and stop.
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Integrate over `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if !self.is_animating() || dt <= 0.0 {
            return;
        }
        let x = self.omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
        let change = self.value - self.target;
        let temp = (self.velocity + self.omega * change) * dt;
        self.velocity = (self.velocity - self.omega * temp) * decay;
        self.value = self.target + (change + temp) * decay;

        // Large frame gaps can carry the approximation past the target.
        if change != 0.0 && (change > 0.0) != (self.value - self.target > 0.0) {
            self.snap(self.target);
            return;
        }
        if (self.value - self.target).abs() < self.rest_delta
            && self.velocity.abs() < self.rest_delta
        {
            self.snap(self.target);
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.value != self.target || self.velocity != 0.0
    }
}

/// Exponential follower: the remaining distance shrinks by a fixed fraction
/// every frame.
#[derive(Debug, Clone)]
pub struct ExpFollow {
    /// Remaining displacement from the target.
    offset: f64,
    target: f64,
    /// `offset *= (1 - speed)` each frame.  Good range: 0.25–0.45 at 30 fps.
    speed: f64,
}

impl ExpFollow {
    pub fn new(value: f64, speed: f64) -> Self {
        Self {
            offset: 0.0,
            target: value,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Move the target, keeping the rendered position where it is.
    pub fn set_target(&mut self, target: f64) {
        self.offset += self.target - target;
        self.target = target;
    }

    /// Decay the displacement.  Call once per frame.
    pub fn tick(&mut self) {
        self.offset *= 1.0 - self.speed;
        if self.offset.abs() < 0.05 {
            self.offset = 0.0;
        }
    }

    pub fn value(&self) -> f64 {
        self.target + self.offset
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.offset != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_settles_without_overshoot() {
        let mut s = CriticalSpring::new(100.0, 14.0);
        s.set_target(0.0);
        let mut prev = s.value();
        for _ in 0..300 {
            s.tick(1.0 / 30.0);
            assert!(s.value() >= 0.0, "overshot to {}", s.value());
            assert!(s.value() <= prev + 1e-9);
            prev = s.value();
        }
        assert!(!s.is_animating());
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn retarget_onto_current_value_keeps_momentum() {
        let mut s = CriticalSpring::new(0.0, 14.0);
        s.set_target(10.0);
        for _ in 0..3 {
            s.tick(1.0 / 30.0);
        }
        let here = s.value();
        s.set_target(here);
        s.tick(1.0 / 30.0);
        assert!(s.value() > here, "stopped dead at {here}");
        assert!(s.is_animating());

        for _ in 0..300 {
            s.tick(1.0 / 30.0);
        }
        assert!(!s.is_animating());
        assert_eq!(s.value(), here);
    }

    #[test]
    fn spring_snap_stops_motion() {
        let mut s = CriticalSpring::new(0.0, 14.0);
        s.set_target(10.0);
        s.tick(0.016);
        s.snap(3.0);
        assert!(!s.is_animating());
        assert_eq!(s.value(), 3.0);
    }

    #[test]
    fn follower_keeps_position_then_decays() {
        let mut f = ExpFollow::new(0.0, 0.5);
        f.set_target(8.0);
        assert_eq!(f.value(), 0.0);
        f.tick();
        assert_eq!(f.value(), 4.0);
        for _ in 0..20 {
            f.tick();
        }
        assert!(!f.is_animating());
        assert_eq!(f.value(), 8.0);
    }
}
