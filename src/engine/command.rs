//! Everything the engine can be asked to do.
//!
//! Commands come from the [`InputProcessor`](crate::input::InputProcessor)
//! or straight from host code, and are applied by
//! [`HelixEngine::execute`](super::HelixEngine::execute).

use crate::rotation::{Direction, RotationInput};

/// One engine operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    /// Wheel-style rotation input.
    Rotate {
        /// Normalized wheel input.
        input: RotationInput,
    },
    /// Pointer drag in progress.
    Drag {
        /// Direction the drag pushes the assembly.
        direction: Direction,
    },
    /// Pointer released after a drag.
    ReleaseDrag,
    /// Pointer entered a link label.
    HoverLink {
        /// Position of the link in the link set.
        link: usize,
    },
    /// Pointer left a link label.
    LeaveLink {
        /// Position of the link in the link set.
        link: usize,
    },
    /// Fly the camera marker from where it is to a link's rest position.
    FlyTo {
        /// Position of the link in the link set.
        link: usize,
    },
    /// One marker per link, staggered round-robin through every link.
    Tour,
    /// Stop every flight without reporting completion.
    CancelFlights,
    /// Host surface lost focus.
    Pause,
    /// Host surface regained focus.
    Resume,
}

impl EngineCommand {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rotate { .. } => "rotate",
            Self::Drag { .. } => "drag",
            Self::ReleaseDrag => "release_drag",
            Self::HoverLink { .. } => "hover_link",
            Self::LeaveLink { .. } => "leave_link",
            Self::FlyTo { .. } => "fly_to",
            Self::Tour => "tour",
            Self::CancelFlights => "cancel_flights",
            Self::Pause => "pause",
            Self::Resume => "resume",
        }
    }
}
