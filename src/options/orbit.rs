use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::check_finite;
use crate::error::HelixError;
use crate::orbit::OrbitParams;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit", inline)]
#[serde(default)]
/// Angular speeds of the per-point orbit motion (radians per second).
pub struct OrbitOptions {
    /// Axial drift frequency.
    #[schemars(title = "Drift Speed", range(min = 0.0, max = 20.0), extend("step" = 0.1))]
    pub drift_speed: f32,
    /// Radius pulse frequency.
    #[schemars(title = "Pulse Speed", range(min = 0.0, max = 20.0), extend("step" = 0.1))]
    pub pulse_speed: f32,
    /// Spin frequency around the helix axis.
    #[schemars(title = "Spin Speed", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub spin_speed: f32,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        let params = OrbitParams::default();
        Self {
            drift_speed: params.drift_speed,
            pulse_speed: params.pulse_speed,
            spin_speed: params.spin_speed,
        }
    }
}

impl OrbitOptions {
    /// Evaluator parameters for these speeds.
    #[must_use]
    pub fn params(&self) -> OrbitParams {
        OrbitParams {
            drift_speed: self.drift_speed,
            pulse_speed: self.pulse_speed,
            spin_speed: self.spin_speed,
        }
    }

    /// Reject non-finite speeds. Negative speeds run the motion backwards
    /// and are allowed.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidConfiguration`] naming the offending speed.
    pub fn validate(&self) -> Result<(), HelixError> {
        check_finite("drift_speed", self.drift_speed)?;
        check_finite("pulse_speed", self.pulse_speed)?;
        check_finite("spin_speed", self.spin_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_speed_is_rejected() {
        for speed in [f32::NAN, f32::INFINITY] {
            let opts = OrbitOptions {
                spin_speed: speed,
                ..OrbitOptions::default()
            };
            assert!(matches!(
                opts.validate(),
                Err(HelixError::InvalidConfiguration(_))
            ));
        }
        let reversed = OrbitOptions {
            drift_speed: -4.0,
            ..OrbitOptions::default()
        };
        reversed.validate().unwrap();
    }
}
