/// Variable-step frame clock driven by display-refresh timestamps.
/// Turns successive `requestAnimationFrame` timestamps (milliseconds)
/// into elapsed seconds per tick.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous tick, in milliseconds.
    last_ms: Option<f64>,
    /// Upper bound on a single delta, in seconds.
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous tick. The first tick yields 0.
    /// Negative gaps (clock skew) yield 0; long gaps (hidden tab) are capped.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            None => 0.0,
            // max/min rather than clamp: a bad cap must not panic mid-frame.
            Some(last) => (((now_ms - last) / 1000.0) as f32).min(self.max_dt).max(0.0),
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.tick(1234.0), 0.0);
    }

    #[test]
    fn delta_is_in_seconds() {
        let mut clock = FrameClock::new(0.25);
        clock.tick(1000.0);
        let dt = clock.tick(1016.0);
        assert!((dt - 0.016).abs() < 1e-6, "dt was {}", dt);
    }

    #[test]
    fn long_gaps_are_capped() {
        let mut clock = FrameClock::new(0.25);
        clock.tick(0.0);
        assert_eq!(clock.tick(10_000.0), 0.25);
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::new(0.25);
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0), 0.0);
    }

    #[test]
    fn negative_cap_yields_zero_instead_of_panicking() {
        let mut clock = FrameClock::new(-0.5);
        clock.tick(0.0);
        assert_eq!(clock.tick(16.0), 0.0);
    }
}
