//! Host-side orbit evaluation.
//!
//! Every point orbits its base position: a small axial drift, a spin around
//! the helix axis at its own phase, and a radius that pulses with the drift.
//! The same formula is written independently in WGSL
//! (`assets/shaders/modules/orbit.wgsl`); the two are checked against each
//! other by golden-value tests rather than sharing code.
//!
//! ```text
//! s     = sin(t * pulse_speed + delay)
//! amp   = radius + s
//! out.x = base.x + sin(t * drift_speed + delay)
//! out.y = base.y + sin(radian + t * spin_speed) * amp
//! out.z = base.z + cos(radian + t * spin_speed) * amp
//! ```

mod clock;

pub use clock::OrbitClock;

use glam::{Vec3, Vec4};

use crate::error::HelixError;
use crate::field::{PointField, PointRecord};

/// Angular speeds of the orbit (radians per unit time).
///
/// The evaluator is stateless: `t` is always supplied by the caller, so a
/// host loop summing frame deltas and a shader receiving `t` as a uniform
/// evaluate the same function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Axial drift frequency.
    pub drift_speed: f32,
    /// Radius pulse frequency.
    pub pulse_speed: f32,
    /// Spin frequency around the helix axis.
    pub spin_speed: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            drift_speed: 4.0,
            pulse_speed: 4.0,
            spin_speed: 0.4,
        }
    }
}

impl OrbitParams {
    /// Displaced position of `record` at time `t`.
    ///
    /// Fails with [`HelixError::InvalidTime`] for non-finite `t`; every
    /// finite input has a result.
    pub fn evaluate(
        &self,
        record: &PointRecord,
        t: f32,
    ) -> Result<Vec3, HelixError> {
        check_time(t)?;
        Ok(self.displace(record.base_position, record.radian, record.radius, record.delay, t))
    }

    /// Homogeneous variant of [`evaluate`](Self::evaluate) (`w = 1`).
    pub fn evaluate_homogeneous(
        &self,
        record: &PointRecord,
        t: f32,
    ) -> Result<Vec4, HelixError> {
        self.evaluate(record, t).map(|p| p.extend(1.0))
    }

    /// Rest position: the orbit sampled at `t = 0`, which depends only on
    /// the record's own attributes.
    #[must_use]
    pub fn rest_position(&self, record: &PointRecord) -> Vec3 {
        self.displace(record.base_position, record.radian, record.radius, record.delay, 0.0)
    }

    /// Evaluate every point of `field` at `t` into `out` (cleared first).
    pub fn evaluate_field(
        &self,
        field: &PointField,
        t: f32,
        out: &mut Vec<Vec3>,
    ) -> Result<(), HelixError> {
        check_time(t)?;
        out.clear();
        out.reserve(field.len());
        let positions = field.positions_flat().chunks_exact(3);
        let attrs = field
            .radians()
            .iter()
            .zip(field.radii())
            .zip(field.delays());
        for (base, ((&radian, &radius), &delay)) in positions.zip(attrs) {
            let base = Vec3::new(base[0], base[1], base[2]);
            out.push(self.displace(base, radian, radius, delay, t));
        }
        Ok(())
    }

    #[inline]
    fn displace(
        &self,
        base: Vec3,
        radian: f32,
        radius: f32,
        delay: f32,
        t: f32,
    ) -> Vec3 {
        let drift = (t * self.drift_speed + delay).sin();
        let amp = radius + (t * self.pulse_speed + delay).sin();
        let spin = radian + t * self.spin_speed;
        base + Vec3::new(drift, spin.sin() * amp, spin.cos() * amp)
    }
}

fn check_time(t: f32) -> Result<(), HelixError> {
    if t.is_finite() {
        Ok(())
    } else {
        Err(HelixError::InvalidTime(t))
    }
}
