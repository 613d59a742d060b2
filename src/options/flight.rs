use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{check_non_negative, check_positive};
use crate::error::HelixError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Flight", inline)]
#[serde(default)]
/// Marker flight timing.
pub struct FlightOptions {
    /// Duration of a single fly-to hop (seconds).
    #[schemars(title = "Hop Duration", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub hop_duration: f32,
    /// Time between consecutive keyframes of a tour (seconds).
    #[schemars(title = "Tour Step", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub tour_step: f32,
    /// Start offset between consecutive tour markers (seconds).
    #[schemars(title = "Tour Stagger", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub tour_stagger: f32,
    /// Opacity at the start, middle and end of a flight.
    #[schemars(skip)]
    pub opacity_keys: [f32; 3],
}

impl Default for FlightOptions {
    fn default() -> Self {
        Self {
            hop_duration: 1.5,
            tour_step: 1.0,
            tour_stagger: 1.0,
            opacity_keys: [1.0, 1.0, 1.0],
        }
    }
}

impl FlightOptions {
    /// Hop and step durations must be positive, the stagger non-negative
    /// and every opacity key finite within `[0, 1]`.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<(), HelixError> {
        check_positive("hop_duration", self.hop_duration)?;
        check_positive("tour_step", self.tour_step)?;
        check_non_negative("tour_stagger", self.tour_stagger)?;
        if let Some(bad) = self
            .opacity_keys
            .iter()
            .find(|k| !(0.0..=1.0).contains(*k))
        {
            return Err(HelixError::InvalidConfiguration(format!(
                "opacity keys must lie in [0, 1], got {bad}"
            )));
        }
        Ok(())
    }
}
