use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::check_non_negative;
use crate::error::HelixError;
use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rotation", inline)]
#[serde(default)]
/// Inertial rotation of the whole assembly.
pub struct RotationOptions {
    /// Rate before any input arrives (radians per second).
    #[schemars(title = "Initial Rate", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub initial_rate: f32,
    /// Rate the assembly settles back to after input stops.
    #[schemars(title = "Idle Rate", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub default_rate: f32,
    /// Rate while wheel or drag input is active.
    #[schemars(title = "Active Rate", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub max_rate: f32,
    /// Quiet period after the last wheel event before settling (seconds).
    #[schemars(title = "Settle Timeout", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub settle_timeout: f32,
    /// Time taken to ease from the active rate to the idle rate (seconds).
    #[schemars(title = "Decay Time", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub decay_duration: f32,
    /// Curve used while decaying.
    #[schemars(skip)]
    pub decay_easing: EasingFunction,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            initial_rate: 0.4,
            default_rate: 0.25,
            max_rate: 2.0,
            settle_timeout: 0.2,
            decay_duration: 0.35,
            decay_easing: EasingFunction::default(),
        }
    }
}

impl RotationOptions {
    /// Reject negative or non-finite rates and timings, and a decay curve
    /// with non-finite control values.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<(), HelixError> {
        check_non_negative("initial_rate", self.initial_rate)?;
        check_non_negative("default_rate", self.default_rate)?;
        check_non_negative("max_rate", self.max_rate)?;
        check_non_negative("settle_timeout", self.settle_timeout)?;
        check_non_negative("decay_duration", self.decay_duration)?;
        if !self.decay_easing.is_finite() {
            return Err(HelixError::InvalidConfiguration(format!(
                "decay_easing has non-finite control values: {:?}",
                self.decay_easing
            )));
        }
        Ok(())
    }
}
