//! Marker animation: keyframe tracks and the loop-once flight animator.

pub mod flight;
pub mod keyframes;

pub use flight::{FlightAnimator, FlightState};
pub use keyframes::{KeyframeTrack, Lerp};
