//! Keyframed marker flights.
//!
//! A flight moves one marker through an ordered list of targets on a
//! loop-once clock:
//!
//! ```text
//! Idle --start--> Playing --clock >= last timestamp--> Finished --reset--> Idle
//! ```
//!
//! Timestamps are measured on the animator's own clock, which starts at 0
//! on [`FlightAnimator::start`]. The start offset gates the marker: it is
//! hidden until the clock reaches the offset, then follows the track from
//! that point. Giving N animators offsets `0, 1, .., N-1` over the same
//! targets sends the markers along the path in round-robin order.

use glam::Vec3;

use super::keyframes::KeyframeTrack;
use crate::error::HelixError;

/// Lifecycle of a [`FlightAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    /// No flight loaded.
    Idle,
    /// Clock running toward the last keyframe.
    Playing,
    /// Clamped at the last keyframe; completion already reported.
    Finished,
}

/// Completion callback for one play.
type FinishCallback = Box<dyn FnOnce()>;

struct Flight {
    positions: KeyframeTrack<Vec3>,
    opacity: KeyframeTrack<f32>,
    start_offset: f32,
    clock: f32,
    on_finish: Option<FinishCallback>,
}

/// Moves a marker along piecewise-linear keyframes and reports completion
/// exactly once per [`start`](Self::start).
pub struct FlightAnimator {
    flight: Option<Flight>,
    state: FlightState,
    opacity_keys: [f32; 3],
}

impl std::fmt::Debug for FlightAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightAnimator")
            .field("state", &self.state)
            .field("clock", &self.clock())
            .finish_non_exhaustive()
    }
}

impl Default for FlightAnimator {
    fn default() -> Self {
        Self::new([1.0; 3])
    }
}

impl FlightAnimator {
    /// Idle animator whose flights use `opacity_keys` at their start,
    /// midpoint and end.
    #[must_use]
    pub fn new(opacity_keys: [f32; 3]) -> Self {
        Self {
            flight: None,
            state: FlightState::Idle,
            opacity_keys,
        }
    }

    /// Load a flight and start playing it.
    ///
    /// Any flight already loaded is dropped, along with its callback,
    /// without firing it. On error the animator is left `Idle`.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidKeyframes`] for empty or mismatched
    /// `targets`/`timestamps`, timestamps that are not strictly increasing,
    /// or a negative or non-finite `start_offset`.
    pub fn start(
        &mut self,
        targets: Vec<Vec3>,
        timestamps: Vec<f32>,
        start_offset: f32,
    ) -> Result<(), HelixError> {
        self.reset();

        if !start_offset.is_finite() || start_offset < 0.0 {
            return Err(HelixError::InvalidKeyframes(format!(
                "start offset must be finite and non-negative, got {start_offset}"
            )));
        }
        if targets.iter().any(|p| !p.is_finite()) {
            return Err(HelixError::InvalidKeyframes(
                "non-finite target position".to_owned(),
            ));
        }
        let positions = KeyframeTrack::new(timestamps, targets)?;

        let (start, end) = (positions.start_time(), positions.end_time());
        let opacity = if end > start {
            KeyframeTrack::new(
                vec![start, (start + end) * 0.5, end],
                self.opacity_keys.to_vec(),
            )?
        } else {
            KeyframeTrack::new(vec![start], vec![self.opacity_keys[2]])?
        };

        self.flight = Some(Flight {
            positions,
            opacity,
            start_offset,
            clock: 0.0,
            on_finish: None,
        });
        self.state = FlightState::Playing;
        Ok(())
    }

    /// Register the completion callback for the current play. Ignored when
    /// idle; replaces any callback registered earlier for the same play.
    pub fn on_finish(&mut self, callback: impl FnOnce() + 'static) {
        if self.state != FlightState::Playing {
            return;
        }
        if let Some(flight) = self.flight.as_mut() {
            flight.on_finish = Some(Box::new(callback));
        }
    }

    /// Advance the clock by `dt` seconds and return the new state.
    ///
    /// The transition to [`FlightState::Finished`] runs the callback once;
    /// later calls keep the marker clamped at the last target.
    pub fn advance(&mut self, dt: f32) -> FlightState {
        if self.state != FlightState::Playing {
            return self.state;
        }
        let Some(flight) = self.flight.as_mut() else {
            return self.state;
        };

        if dt.is_finite() && dt > 0.0 {
            flight.clock += dt;
        }
        let done_at = flight.positions.end_time().max(flight.start_offset);
        if flight.clock >= done_at {
            self.state = FlightState::Finished;
            if let Some(callback) = flight.on_finish.take() {
                callback();
            }
        }
        self.state
    }

    /// Drop the flight and any pending callback and return to `Idle`.
    pub fn reset(&mut self) {
        self.flight = None;
        self.state = FlightState::Idle;
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FlightState {
        self.state
    }

    /// Whether a flight is loaded and not yet finished.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == FlightState::Playing
    }

    /// Running clock of the loaded flight (0 when idle).
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.flight.as_ref().map_or(0.0, |f| f.clock)
    }

    /// Marker position, or `None` when idle or before the start offset.
    #[must_use]
    pub fn position(&self) -> Option<Vec3> {
        let flight = self.flight.as_ref()?;
        if self.state == FlightState::Finished {
            return Some(flight.positions.last_value());
        }
        if flight.clock < flight.start_offset {
            return None;
        }
        Some(flight.positions.sample(flight.clock))
    }

    /// Marker opacity, or `None` whenever [`position`](Self::position) is.
    #[must_use]
    pub fn opacity(&self) -> Option<f32> {
        let flight = self.flight.as_ref()?;
        if self.position().is_none() {
            return None;
        }
        Some(flight.opacity.sample(flight.clock))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn targets() -> Vec<Vec3> {
        (0..8).map(|i| Vec3::new(i as f32, (i * i) as f32, -(i as f32))).collect()
    }

    fn timestamps() -> Vec<f32> {
        (0..8).map(|i| i as f32).collect()
    }

    fn counter(animator: &mut FlightAnimator) -> Rc<Cell<u32>> {
        let fired = Rc::new(Cell::new(0));
        let sink = Rc::clone(&fired);
        animator.on_finish(move || sink.set(sink.get() + 1));
        fired
    }

    #[test]
    fn staggered_start_scenario() {
        let mut animator = FlightAnimator::default();
        animator.start(targets(), timestamps(), 3.0).unwrap();
        let fired = counter(&mut animator);

        assert_eq!(animator.position(), None);
        assert_eq!(animator.advance(3.0), FlightState::Playing);
        assert_eq!(animator.position(), Some(targets()[3]));

        assert_eq!(animator.advance(10.0), FlightState::Finished);
        assert_eq!(animator.position(), Some(targets()[7]));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn completion_fires_once_after_many_advances() {
        let mut animator = FlightAnimator::default();
        animator.start(targets(), timestamps(), 0.0).unwrap();
        let fired = counter(&mut animator);
        for _ in 0..1000 {
            let _ = animator.advance(0.5);
        }
        assert_eq!(fired.get(), 1);
        assert_eq!(animator.state(), FlightState::Finished);
        assert_eq!(animator.position(), Some(targets()[7]));
    }

    #[test]
    fn hidden_until_offset() {
        let mut animator = FlightAnimator::default();
        animator.start(targets(), timestamps(), 2.0).unwrap();
        let _ = animator.advance(1.5);
        assert_eq!(animator.position(), None);
        assert_eq!(animator.opacity(), None);
        let _ = animator.advance(1.0);
        let p = animator.position().unwrap();
        assert!((p - Vec3::new(2.5, 6.5, -2.5)).length() < 1e-5);
        assert_eq!(animator.opacity(), Some(1.0));
    }

    #[test]
    fn interpolates_linearly_between_targets() {
        let mut animator = FlightAnimator::default();
        animator
            .start(vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)], vec![0.0, 2.0], 0.0)
            .unwrap();
        let _ = animator.advance(0.5);
        assert!((animator.position().unwrap() - Vec3::new(2.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn invalid_keyframes_leave_animator_idle() {
        let mut animator = FlightAnimator::default();
        assert!(matches!(
            animator.start(vec![], vec![], 0.0),
            Err(HelixError::InvalidKeyframes(_))
        ));
        assert!(animator.start(targets(), vec![0.0, 1.0], 0.0).is_err());
        assert!(animator.start(targets(), timestamps(), -1.0).is_err());
        assert!(animator.start(targets(), timestamps(), f32::NAN).is_err());
        assert!(animator
            .start(vec![Vec3::splat(f32::INFINITY)], vec![0.0], 0.0)
            .is_err());
        assert_eq!(animator.state(), FlightState::Idle);
        assert_eq!(animator.position(), None);
    }

    #[test]
    fn reset_mid_flight_drops_callback() {
        let mut animator = FlightAnimator::default();
        animator.start(targets(), timestamps(), 0.0).unwrap();
        let fired = counter(&mut animator);
        let _ = animator.advance(3.0);
        animator.reset();
        assert_eq!(animator.state(), FlightState::Idle);
        for _ in 0..10 {
            assert_eq!(animator.advance(5.0), FlightState::Idle);
        }
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn restart_replaces_pending_flight() {
        let mut animator = FlightAnimator::default();
        animator.start(targets(), timestamps(), 0.0).unwrap();
        let first = counter(&mut animator);
        animator.start(targets(), timestamps(), 0.0).unwrap();
        let second = counter(&mut animator);
        let _ = animator.advance(100.0);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn reusable_after_reset() {
        let mut animator = FlightAnimator::default();
        for round in 1..=3 {
            animator.start(targets(), timestamps(), 0.0).unwrap();
            let fired = counter(&mut animator);
            let _ = animator.advance(7.0);
            let _ = animator.advance(7.0);
            assert_eq!(fired.get(), 1, "round {round}");
            animator.reset();
        }
    }

    #[test]
    fn callback_ignored_when_idle() {
        let mut animator = FlightAnimator::default();
        let fired = counter(&mut animator);
        animator.start(targets(), timestamps(), 0.0).unwrap();
        let _ = animator.advance(8.0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn opacity_track_follows_configured_keys() {
        let mut animator = FlightAnimator::new([0.0, 1.0, 0.5]);
        animator
            .start(vec![Vec3::ZERO, Vec3::ONE], vec![0.0, 2.0], 0.0)
            .unwrap();
        assert_eq!(animator.opacity(), Some(0.0));
        let _ = animator.advance(1.0);
        assert_eq!(animator.opacity(), Some(1.0));
        let _ = animator.advance(0.5);
        assert!((animator.opacity().unwrap() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn single_target_finishes_immediately_at_offset() {
        let mut animator = FlightAnimator::default();
        animator.start(vec![Vec3::ONE], vec![0.0], 1.0).unwrap();
        let fired = counter(&mut animator);
        assert_eq!(animator.advance(0.5), FlightState::Playing);
        assert_eq!(animator.advance(0.5), FlightState::Finished);
        assert_eq!(animator.position(), Some(Vec3::ONE));
        assert_eq!(fired.get(), 1);
    }
}
