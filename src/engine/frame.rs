//! Per-frame advance for HelixEngine

use glam::Vec3;
use web_time::Instant;

use super::HelixEngine;
use crate::animation::{FlightAnimator, FlightState};

/// Which marker a flight moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    /// The camera marker driven by `FlyTo`.
    Camera,
    /// Tour marker, one per link.
    Tour(usize),
}

/// A visible marker this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerFrame {
    /// World-space position.
    pub position: Vec3,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl MarkerFrame {
    fn of(flight: &FlightAnimator) -> Option<Self> {
        Some(Self {
            position: flight.position()?,
            opacity: flight.opacity()?,
        })
    }
}

/// Everything the renderer needs after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Seconds of active time this tick covered (0 while paused).
    pub dt: f32,
    /// Accumulated assembly rotation (radians).
    pub angle: f32,
    /// Rotation added this tick.
    pub angle_delta: f32,
    /// Broadcast orbit time.
    pub time: f32,
    /// Whether point colors changed since the previous frame.
    pub colors_dirty: bool,
    /// Camera marker position.
    pub camera: Vec3,
    /// Tour markers in link order; `None` while a marker is hidden.
    pub tour_markers: Vec<Option<MarkerFrame>>,
    /// Flights that completed this tick.
    pub completed: Vec<MarkerId>,
}

impl HelixEngine {
    /// Advance one frame ending at `now`.
    ///
    /// Order: rotation, orbit time, flights, color flush. While paused
    /// nothing advances; after a resume the clock restarts at `now`, so
    /// blurred time is dropped.
    pub fn tick(&mut self, now: Instant) -> FrameOutput {
        if self.resume_pending {
            self.resume_at(now);
        }
        let dt = self.frame_clock.tick(now);
        self.advance(dt)
    }

    /// Advance one frame by an explicit `dt` (seconds). A paused engine
    /// ignores `dt`.
    pub fn tick_delta(&mut self, dt: f32) -> FrameOutput {
        if self.resume_pending {
            self.resume_at(Instant::now());
        }
        let dt = if self.frame_clock.is_running() && dt.is_finite() {
            dt.max(0.0)
        } else {
            0.0
        };
        self.advance(dt)
    }

    fn advance(&mut self, dt: f32) -> FrameOutput {
        let angle_delta = self.rotation.tick(&mut self.rotation_state, dt);

        self.orbit_clock.advance(dt);

        if self.camera_flight.advance(dt) == FlightState::Finished {
            if let Some(end) = self.camera_flight.position() {
                self.camera_position = end;
            }
        }
        for flight in &mut self.tour_flights {
            let _ = flight.advance(dt);
        }
        let camera = self.camera_position();
        let tour_markers = self.tour_flights.iter().map(MarkerFrame::of).collect();

        let completed: Vec<_> = self.completed.borrow_mut().drain(..).collect();
        for id in &completed {
            log::debug!("flight {id:?} finished");
        }
        if self.camera_flight.state() == FlightState::Finished {
            self.camera_flight.reset();
        }
        for flight in &mut self.tour_flights {
            if flight.state() == FlightState::Finished {
                flight.reset();
            }
        }

        let colors_dirty = self.field.take_color_dirty();

        FrameOutput {
            dt,
            angle: self.rotation_state.angle,
            angle_delta,
            time: self.orbit_clock.time(),
            colors_dirty,
            camera,
            tour_markers,
            completed,
        }
    }
}
