//! Pausable frame clock.

use web_time::Instant;

/// Measures frame deltas and stops while the host surface is blurred.
///
/// While paused every tick returns 0, so nothing downstream (rotation,
/// debounce, decay, orbit time) advances. Resuming restarts measurement at
/// the resume instant: time spent blurred is discarded, never replayed.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Option<Instant>,
    running: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Running clock; the first tick measures nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            running: true,
        }
    }

    /// Seconds since the previous tick (0 on the first tick or while
    /// paused).
    pub fn tick(&mut self, now: Instant) -> f32 {
        if !self.running {
            return 0.0;
        }
        let dt = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last = Some(now);
        dt
    }

    /// Stop the clock.
    pub fn pause(&mut self) {
        self.running = false;
        self.last = None;
    }

    /// Restart the clock at `now`.
    pub fn resume(&mut self, now: Instant) {
        self.running = true;
        self.last = Some(now);
    }

    /// Whether the clock is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn measures_deltas_between_ticks() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(t0), 0.0);
        let dt = clock.tick(t0 + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn paused_time_is_discarded() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        let _ = clock.tick(t0);
        clock.pause();
        assert!(!clock.is_running());
        assert_eq!(clock.tick(t0 + Duration::from_secs(5)), 0.0);
        clock.resume(t0 + Duration::from_secs(10));
        let dt = clock.tick(t0 + Duration::from_millis(10_016));
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn going_backwards_measures_zero() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        let _ = clock.tick(t0 + Duration::from_secs(1));
        assert_eq!(clock.tick(t0), 0.0);
    }
}
