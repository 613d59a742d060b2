/// Accumulates frame deltas into the time broadcast to the orbit evaluator.
///
/// Accumulation runs in `f64` so long sessions do not lose sub-frame
/// precision; [`time`](Self::time) hands the evaluator a single `f32`, the
/// same value a shader would receive as a uniform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitClock {
    elapsed: f64,
}

impl OrbitClock {
    /// Clock at `t = 0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's delta (seconds). Non-finite or negative deltas are
    /// ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += f64::from(dt);
        }
    }

    /// Current broadcast time.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.elapsed as f32
    }

    /// Restart from zero.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
