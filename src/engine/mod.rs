//! Host driver that owns every component and advances them in a fixed
//! order once per frame.

/// Engine command vocabulary.
pub mod command;
mod execute;
mod frame;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

pub use self::command::EngineCommand;
pub use self::frame::{FrameOutput, MarkerFrame, MarkerId};
use crate::animation::FlightAnimator;
use crate::error::HelixError;
use crate::field::PointField;
use crate::input::InputProcessor;
use crate::links::LinkRegistry;
use crate::options::Options;
use crate::orbit::{OrbitClock, OrbitParams};
use crate::rotation::{FrameClock, RotationController, RotationState};

/// The helix engine.
///
/// # Construction
///
/// [`HelixEngine::new`] generates the point field and selects the links;
/// both fail before the first frame if the options are unusable.
///
/// # Frame loop
///
/// Each frame, call [`tick`](Self::tick) (or [`tick_delta`](Self::tick_delta)
/// with an explicit delta) and hand the returned [`FrameOutput`] to the
/// renderer. Raw input goes through [`handle_event`](Self::handle_event);
/// host code can also issue commands directly with
/// [`execute`](Self::execute).
pub struct HelixEngine {
    options: Options,
    field: PointField,
    links: LinkRegistry,
    /// Rest positions of every link, in link order.
    link_positions: Vec<Vec3>,
    orbit: OrbitParams,
    orbit_clock: OrbitClock,
    rotation: RotationController,
    rotation_state: RotationState,
    frame_clock: FrameClock,
    /// Set by `Resume`; the clock restarts on the next tick.
    resume_pending: bool,
    input: InputProcessor,
    /// Link currently under the pointer.
    hovered: Option<usize>,
    /// Resting camera position between flights.
    camera_position: Vec3,
    camera_flight: FlightAnimator,
    tour_flights: Vec<FlightAnimator>,
    /// Flights that finished during the current tick.
    completed: Rc<RefCell<Vec<MarkerId>>>,
}

impl HelixEngine {
    /// Build the field, select the links and settle the rotation.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidConfiguration`] for any option that fails
    /// [`Options::validate`],
    /// [`HelixError::LinkIndexOutOfRange`] if the link policy points past
    /// the field.
    pub fn new(options: Options) -> Result<Self, HelixError> {
        options.validate()?;
        let mut field = PointField::from_options(&options.field)?;
        let links =
            LinkRegistry::select(&field, options.links.count, options.links.policy)?;
        let orbit = options.orbit.params();
        let link_positions = links.sample_link_positions(&field, &orbit)?;

        if options.colors.base != [0.0; 3] {
            field.fill_color(Vec3::from_array(options.colors.base));
        }

        let rotation = RotationController::new(options.rotation.clone());
        let rotation_state = rotation.initial_state();
        let opacity_keys = options.flight.opacity_keys;
        let tour_flights = (0..links.links().len())
            .map(|_| FlightAnimator::new(opacity_keys))
            .collect();

        log::info!(
            "helix engine: {} points ({} helix), {} links",
            field.len(),
            field.num_helix(),
            links.links().len()
        );

        Ok(Self {
            camera_position: link_positions.first().copied().unwrap_or(Vec3::ZERO),
            options,
            field,
            links,
            link_positions,
            orbit,
            orbit_clock: OrbitClock::new(),
            rotation,
            rotation_state,
            frame_clock: FrameClock::new(),
            resume_pending: false,
            input: InputProcessor::new(),
            hovered: None,
            camera_flight: FlightAnimator::new(opacity_keys),
            tour_flights,
            completed: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The point field.
    #[must_use]
    pub fn field(&self) -> &PointField {
        &self.field
    }

    /// The link registry.
    #[must_use]
    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    /// Rest positions of every link, in link order.
    #[must_use]
    pub fn link_positions(&self) -> &[Vec3] {
        &self.link_positions
    }

    /// Orbit speeds.
    #[must_use]
    pub fn orbit(&self) -> &OrbitParams {
        &self.orbit
    }

    /// Current broadcast orbit time.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.orbit_clock.time()
    }

    /// Current rotation state.
    #[must_use]
    pub fn rotation_state(&self) -> &RotationState {
        &self.rotation_state
    }

    /// Link currently hovered, if any.
    #[must_use]
    pub fn hovered_link(&self) -> Option<usize> {
        self.hovered
    }

    /// Whether the frame clock is stopped.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        !self.frame_clock.is_running() || self.resume_pending
    }

    /// Camera marker position: mid-flight position, or where the last
    /// flight left it.
    #[must_use]
    pub fn camera_position(&self) -> Vec3 {
        self.camera_flight.position().unwrap_or(self.camera_position)
    }

    /// Whether any flight is running.
    #[must_use]
    pub fn is_flying(&self) -> bool {
        self.camera_flight.is_playing() || self.tour_flights.iter().any(FlightAnimator::is_playing)
    }
}
