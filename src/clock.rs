/// Measures the time between animation frames, like `THREE.Clock::getDelta`.
///
/// Host timestamps are milliseconds (`performance.now()`); deltas are seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_ms: f64,
}

impl FrameClock {
    /// The first delta is measured from `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self { last_ms: start_ms }
    }

    /// Seconds elapsed since the previous call. Out-of-order timestamps yield zero.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() || now_ms <= self.last_ms {
            return 0.0;
        }
        let delta = (now_ms - self.last_ms) / 1000.0;
        self.last_ms = now_ms;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_delta_measures_from_start() {
        let mut clock = FrameClock::new(1000.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_timestamp_is_zero_and_kept_out() {
        let mut clock = FrameClock::new(500.0);
        assert_eq!(clock.delta(400.0), 0.0);
        // The stale timestamp must not become the new baseline.
        assert!((clock.delta(600.0) - 0.1).abs() < 1e-6);
    }
}
