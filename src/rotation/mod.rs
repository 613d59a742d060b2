//! Inertial rotation of the helix assembly.
//!
//! [`RotationController`] owns the tuning and the settle timer;
//! [`RotationState`] is owned by the driver and passed in by `&mut`.
//! [`FrameClock`] supplies the frame deltas and stops while blurred.

mod clock;
mod controller;
mod debounce;

pub use clock::FrameClock;
pub use controller::RotationController;
pub use debounce::Debounce;

/// Which way the assembly turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Positive angle.
    Up,
    /// Negative angle.
    #[default]
    Down,
}

impl Direction {
    /// `+1.0` for up, `-1.0` for down.
    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// Rotation controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    /// Turning at the idle rate.
    Settled,
    /// Input active, turning at the maximum rate.
    Accelerating,
    /// Easing back to the idle rate.
    Decaying,
    /// Stopped while a link is hovered.
    Held,
}

/// One normalized wheel-style input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationInput {
    /// Requested direction.
    pub direction: Direction,
    /// Absolute input magnitude.
    pub magnitude: f32,
}

impl RotationInput {
    /// Input from a wheel delta: non-negative deltas turn up.
    #[must_use]
    pub fn from_wheel(delta_y: f32) -> Self {
        let direction = if delta_y >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };
        Self {
            direction,
            magnitude: delta_y.abs(),
        }
    }
}

/// Mutable rotation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    /// Angular rate (radians per second, unsigned).
    pub current_rate: f32,
    /// Turning direction.
    pub direction: Direction,
    /// Controller phase.
    pub phase: RotationPhase,
    /// Accumulated assembly angle (radians).
    pub angle: f32,
}

impl RotationState {
    /// Settled state turning down at `rate`.
    #[must_use]
    pub fn new(rate: f32) -> Self {
        Self {
            current_rate: rate,
            direction: Direction::Down,
            phase: RotationPhase::Settled,
            angle: 0.0,
        }
    }

    /// Whether the rate is easing back to idle.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.phase == RotationPhase::Decaying
    }
}
