use super::debounce::Debounce;
use super::{Direction, RotationInput, RotationPhase, RotationState};
use crate::options::RotationOptions;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Decay {
    from: f32,
    elapsed: f32,
}

/// Turns wheel, drag and hover input into a rotation rate.
///
/// Any input snaps the rate to `max_rate`. Wheel input re-arms a settle
/// debounce; when it fires (or a drag is released) the rate eases back to
/// `default_rate`. Hovering a link holds the assembly still.
#[derive(Debug, Clone)]
pub struct RotationController {
    options: RotationOptions,
    settle: Debounce,
    decay: Option<Decay>,
}

impl RotationController {
    /// Controller tuned by `options`.
    #[must_use]
    pub fn new(options: RotationOptions) -> Self {
        let settle = Debounce::new(options.settle_timeout);
        Self {
            options,
            settle,
            decay: None,
        }
    }

    /// State before any input: `initial_rate`, turning down, settled.
    #[must_use]
    pub fn initial_state(&self) -> RotationState {
        RotationState::new(self.options.initial_rate)
    }

    /// Current tuning.
    #[must_use]
    pub fn options(&self) -> &RotationOptions {
        &self.options
    }

    /// Whether a settle is scheduled.
    #[must_use]
    pub fn is_settle_pending(&self) -> bool {
        self.settle.is_armed()
    }

    /// Wheel-style input. The rate saturates at `max_rate` whatever the
    /// magnitude; non-finite magnitudes are ignored.
    pub fn on_input(&mut self, state: &mut RotationState, input: RotationInput) {
        if !input.magnitude.is_finite() {
            return;
        }
        self.accelerate(state, input.direction);
        self.settle.arm();
    }

    /// Pointer drag. Stays at `max_rate` until [`on_release`](Self::on_release).
    pub fn on_drag(&mut self, state: &mut RotationState, direction: Direction) {
        self.accelerate(state, direction);
        self.settle.cancel();
    }

    /// Pointer released: ease back toward `default_rate`.
    pub fn on_release(&mut self, state: &mut RotationState) {
        self.settle.cancel();
        self.begin_decay(state);
    }

    /// Stop rotating until [`release_hold`](Self::release_hold).
    pub fn hold(&mut self, state: &mut RotationState) {
        self.settle.cancel();
        self.decay = None;
        state.current_rate = 0.0;
        state.phase = RotationPhase::Held;
        log::debug!("rotation held");
    }

    /// Resume at `default_rate` after a hold. No-op unless held.
    pub fn release_hold(&mut self, state: &mut RotationState) {
        if state.phase != RotationPhase::Held {
            return;
        }
        state.current_rate = self.options.default_rate;
        state.phase = RotationPhase::Settled;
        log::debug!("rotation released");
    }

    /// Advance by `dt` seconds: fire the settle debounce if due, advance the
    /// decay, then accumulate `rate × direction × dt` into the angle.
    /// Returns the angle delta.
    pub fn tick(&mut self, state: &mut RotationState, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.settle.tick(dt) {
            self.begin_decay(state);
        }

        if let Some(decay) = self.decay.as_mut() {
            decay.elapsed += dt;
            let t = decay.elapsed / self.options.decay_duration;
            if t >= 1.0 {
                self.decay = None;
                settle(state, self.options.default_rate);
            } else {
                state.current_rate =
                    self.options
                        .decay_easing
                        .blend(decay.from, self.options.default_rate, t);
            }
        }

        let delta = state.current_rate * state.direction.sign() * dt;
        state.angle += delta;
        delta
    }

    fn accelerate(&mut self, state: &mut RotationState, direction: Direction) {
        self.decay = None;
        state.direction = direction;
        state.current_rate = self.options.max_rate;
        if state.phase != RotationPhase::Accelerating {
            log::debug!("rotation accelerating {direction:?}");
        }
        state.phase = RotationPhase::Accelerating;
    }

    fn begin_decay(&mut self, state: &mut RotationState) {
        if state.phase == RotationPhase::Held {
            return;
        }
        if self.options.decay_duration <= 0.0 {
            self.decay = None;
            settle(state, self.options.default_rate);
            return;
        }
        self.decay = Some(Decay {
            from: state.current_rate,
            elapsed: 0.0,
        });
        state.phase = RotationPhase::Decaying;
        log::debug!("rotation decaying from {}", state.current_rate);
    }
}

fn settle(state: &mut RotationState, rate: f32) {
    state.current_rate = rate;
    state.phase = RotationPhase::Settled;
}
