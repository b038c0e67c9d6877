//! Damped-impulse actuator driving the paddle
//!
//! Holding a direction key ramps an impulse timer; releasing it lets the
//! timer decay so the paddle coasts to a stop and its lean returns to zero.

use crate::consts::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Force {
    position: f32,
    rotation: f32,
    /// Impulse timer, `0..=FORCE_TIME_MAX`
    time: f32,
    mass: f32,
    force: f32,
    delta: f32,
    /// `apply` was called since the last `update`
    active: bool,
}

impl Force {
    pub fn new(position: f32) -> Self {
        Self {
            position,
            rotation: 0.0,
            time: 0.0,
            mass: FORCE_MASS,
            force: 0.0,
            delta: 0.0,
            active: false,
        }
    }

    /// Push with `force` this tick.
    ///
    /// Each call ramps the timer, so two calls in one tick ramp twice and
    /// the last force wins.
    pub fn apply(&mut self, force: f32) {
        self.time = (self.time + FORCE_RAMP).min(FORCE_TIME_MAX);
        self.force = force;
        self.active = true;
    }

    /// Advance one tick, keeping the position within `[lo, hi]`
    pub fn update(&mut self, lo: f32, hi: f32) {
        self.delta = self.force * self.time / self.mass;
        if !self.active {
            self.time = (self.time - FORCE_DECAY).max(0.0);
        }

        self.rotation = self.delta * self.time;
        if self.rotation.abs() > MAX_LEAN {
            self.rotation = MAX_LEAN.copysign(self.delta);
        }

        // max/min rather than clamp: a paddle wider than the arena pins to `hi`
        self.position = (self.position + self.delta).max(lo).min(hi);
        self.active = false;
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Lean in degrees, within `±MAX_LEAN`
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_idle_force_stays_put() {
        let mut force = Force::new(100.0);
        for _ in 0..10 {
            force.update(0.0, 200.0);
        }
        assert_eq!(force.position(), 100.0);
        assert_eq!(force.rotation(), 0.0);
    }

    #[test]
    fn test_held_force_ramps_and_moves() {
        let mut force = Force::new(100.0);
        let mut last = force.position();
        for _ in 0..20 {
            force.apply(PADDLE_FORCE);
            force.update(0.0, 1000.0);
            assert!(force.position() > last);
            last = force.position();
        }
        assert!((force.time() - 20.0 * FORCE_RAMP).abs() < 1e-4);
        assert!(force.rotation() > 0.0);
    }

    #[test]
    fn test_timer_caps() {
        let mut force = Force::new(0.0);
        for _ in 0..500 {
            force.apply(-PADDLE_FORCE);
            force.update(-1e6, 1e6);
        }
        assert_eq!(force.time(), FORCE_TIME_MAX);
        assert_eq!(force.rotation(), -MAX_LEAN);
    }

    #[test]
    fn test_single_push_settles() {
        let mut force = Force::new(350.0);
        force.apply(-PADDLE_FORCE);
        force.update(42.0, 658.0);
        let first = force.rotation();
        assert!(first < 0.0);

        let mut prev = first.abs();
        for _ in 0..300 {
            force.update(42.0, 658.0);
            let now = force.rotation().abs();
            assert!(now < prev || now == 0.0, "lean grew from {prev} to {now}");
            prev = now;
        }
        assert_eq!(force.rotation(), 0.0);
        assert_eq!(force.time(), 0.0);

        let settled = force.position();
        force.update(42.0, 658.0);
        assert_eq!(force.position(), settled);
        assert!(settled < 350.0);
    }

    #[test]
    fn test_both_directions_ramp_twice() {
        let mut force = Force::new(350.0);
        force.apply(-PADDLE_FORCE);
        force.apply(PADDLE_FORCE);
        force.update(0.0, 700.0);
        assert!((force.time() - 2.0 * FORCE_RAMP).abs() < 1e-6);
        // Last call wins the direction
        assert!(force.position() > 350.0);
    }

    #[test]
    fn test_clamped_to_bounds() {
        let mut force = Force::new(50.0);
        for _ in 0..200 {
            force.apply(-PADDLE_FORCE);
            force.update(42.0, 658.0);
        }
        assert_eq!(force.position(), 42.0);
    }

    proptest! {
        #[test]
        fn prop_position_and_lean_bounded(
            start in 0.0f32..700.0,
            lo in 0.0f32..300.0,
            width in 0.0f32..400.0,
            inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 1..400),
        ) {
            let hi = lo + width;
            let mut force = Force::new(start);
            for (left, right) in inputs {
                if left {
                    force.apply(-PADDLE_FORCE);
                }
                if right {
                    force.apply(PADDLE_FORCE);
                }
                force.update(lo, hi);
                prop_assert!(force.position() >= lo && force.position() <= hi);
                prop_assert!(force.rotation().abs() <= MAX_LEAN);
                prop_assert!(force.time() >= 0.0 && force.time() <= FORCE_TIME_MAX);
            }
        }
    }
}
