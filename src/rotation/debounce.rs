//! Cancelable one-shot timer driven by frame deltas.

/// Fires once, `timeout` seconds of ticked time after the last
/// [`arm`](Self::arm). Re-arming reschedules; nothing fires unless the
/// owner ticks it, so a paused driver pauses the timer too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debounce {
    timeout: f32,
    remaining: Option<f32>,
}

impl Debounce {
    /// Disarmed timer with the given quiet period (seconds).
    #[must_use]
    pub fn new(timeout: f32) -> Self {
        Self {
            timeout: timeout.max(0.0),
            remaining: None,
        }
    }

    /// Schedule (or reschedule) the timer a full timeout from now.
    pub fn arm(&mut self) {
        self.remaining = Some(self.timeout);
    }

    /// Drop any pending schedule.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether a fire is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt` seconds. Returns `true` exactly once per arm, on the
    /// tick where the quiet period runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let step = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let left = remaining - step;
        if left <= 0.0 {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_timeout() {
        let mut debounce = Debounce::new(0.2);
        debounce.arm();
        assert!(!debounce.tick(0.1));
        assert!(debounce.tick(0.1));
        assert!(!debounce.tick(0.1));
        assert!(!debounce.is_armed());
    }

    #[test]
    fn rearming_reschedules() {
        let mut debounce = Debounce::new(0.2);
        debounce.arm();
        assert!(!debounce.tick(0.15));
        debounce.arm();
        assert!(!debounce.tick(0.15));
        assert!(debounce.tick(0.05));
    }

    #[test]
    fn cancel_prevents_fire() {
        let mut debounce = Debounce::new(0.2);
        debounce.arm();
        debounce.cancel();
        assert!(!debounce.tick(1.0));
    }

    #[test]
    fn zero_delta_never_elapses() {
        let mut debounce = Debounce::new(0.2);
        debounce.arm();
        for _ in 0..100 {
            assert!(!debounce.tick(0.0));
        }
        assert!(!debounce.tick(f32::NAN));
        assert!(debounce.is_armed());
    }
}
