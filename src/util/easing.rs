//! Easing curves for rate and position transitions.

use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First inner control value.
        c1: f32,
        /// Second inner control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }

    /// Whether the curve's control values are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            EasingFunction::CubicHermite { c1, c2 } => {
                c1.is_finite() && c2.is_finite()
            }
            _ => true,
        }
    }

    /// Eased blend from `from` to `to` at progress `t`.
    #[inline]
    #[must_use]
    pub fn blend(&self, from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * self.evaluate(t)
    }
}

impl Default for EasingFunction {
    /// Quadratic ease-out, the rotation decay curve.
    #[inline]
    fn default() -> Self {
        Self::QuadraticOut
    }
}
