use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::check_non_negative;
use crate::error::HelixError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Point Field", inline)]
#[serde(default)]
/// Procedural point-field layout and shape parameters.
pub struct FieldOptions {
    /// Points in the helix zone (two interleaved strands).
    #[schemars(title = "Helix Points", range(min = 1, max = 200_000))]
    pub num_helix: usize,
    /// Number of cross-sectional bands.
    #[schemars(title = "Bands", range(min = 1, max = 1000))]
    pub num_bands: usize,
    /// Points per band.
    #[schemars(title = "Points per Band", range(min = 1, max = 10_000))]
    pub num_per_band: usize,
    /// Half of the helix length along the x axis.
    #[schemars(title = "Half Length", range(min = 1.0, max = 1000.0), extend("step" = 1.0))]
    pub half_length: f32,
    /// Orbit radius of every helix point.
    #[schemars(title = "Helix Radius", range(min = 0.0, max = 100.0), extend("step" = 0.5))]
    pub helix_radius: f32,
    /// Half-width of a band ribbon (radius sweeps `-scale..scale`).
    #[schemars(title = "Band Radius", range(min = 0.0, max = 100.0), extend("step" = 0.5))]
    pub band_radius_scale: f32,
    /// Jitter scale applied to helix base positions.
    #[schemars(title = "Helix Jitter", range(min = 0.0, max = 20.0), extend("step" = 0.1))]
    pub helix_jitter: f32,
    /// Jitter scale applied to band base positions.
    #[schemars(title = "Band Jitter", range(min = 0.0, max = 20.0), extend("step" = 0.1))]
    pub band_jitter: f32,
    /// Fixed RNG seed; `None` draws from OS entropy on every generation.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            num_helix: 6000,
            num_bands: 50,
            num_per_band: 100,
            half_length: 150.0,
            helix_radius: 20.0,
            band_radius_scale: 18.0,
            helix_jitter: 6.0,
            band_jitter: 1.0,
            seed: None,
        }
    }
}

impl FieldOptions {
    /// Total point count `num_helix + num_bands * num_per_band`, or `None`
    /// when it does not fit in `usize`.
    #[must_use]
    pub fn point_count(&self) -> Option<usize> {
        self.num_bands
            .checked_mul(self.num_per_band)
            .and_then(|bands| bands.checked_add(self.num_helix))
    }

    /// Reject zero counts, an overflowing total, and negative or
    /// non-finite shape parameters.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<(), HelixError> {
        let counts = [
            ("num_helix", self.num_helix),
            ("num_bands", self.num_bands),
            ("num_per_band", self.num_per_band),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(HelixError::InvalidConfiguration(format!(
                    "{name} must be positive"
                )));
            }
        }
        if self.point_count().is_none() {
            return Err(HelixError::InvalidConfiguration(format!(
                "point count {} + {} x {} overflows",
                self.num_helix, self.num_bands, self.num_per_band
            )));
        }

        check_non_negative("half_length", self.half_length)?;
        check_non_negative("helix_radius", self.helix_radius)?;
        check_non_negative("band_radius_scale", self.band_radius_scale)?;
        check_non_negative("helix_jitter", self.helix_jitter)?;
        check_non_negative("band_jitter", self.band_jitter)
    }
}
