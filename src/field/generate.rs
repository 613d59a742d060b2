use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{FieldLayout, PointField};
use crate::error::HelixError;
use crate::options::FieldOptions;

/// Degrees swept by both strands (and by the bands) along the axis.
const HELIX_SWEEP_DEG: f32 = 900.0;
/// Phase between the two interleaved strands.
const STRAND_OFFSET_DEG: f32 = 180.0;

impl PointField {
    /// Generate a field from options, seeding the RNG from
    /// [`FieldOptions::seed`] or from OS entropy when unset.
    pub fn from_options(options: &FieldOptions) -> Result<Self, HelixError> {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::generate(&mut rng, options)
    }

    /// Generate a field with the given RNG.
    ///
    /// Fails with [`HelixError::InvalidConfiguration`] when
    /// [`FieldOptions::validate`] does; nothing is allocated in that case.
    pub fn generate<R: Rng>(
        rng: &mut R,
        options: &FieldOptions,
    ) -> Result<Self, HelixError> {
        options.validate()?;

        let layout = FieldLayout {
            num_helix: options.num_helix,
            num_bands: options.num_bands,
            num_per_band: options.num_per_band,
        };
        let len = layout.len();
        let mut field = Self {
            layout,
            positions: Vec::with_capacity(len),
            radians: Vec::with_capacity(len),
            radii: Vec::with_capacity(len),
            delays: Vec::with_capacity(len),
            colors: vec![[0.0; 3]; len],
            color_dirty: false,
        };

        let num_helix = options.num_helix as f32;
        for i in 0..options.num_helix {
            let along = i as f32 / num_helix;
            let jitter = soft_jitter(rng, options.helix_jitter);
            let x = (along * 2.0 - 1.0) * options.half_length;
            let strand = (i % 2) as f32 * STRAND_OFFSET_DEG;

            field.positions.push([x + jitter.x, jitter.y, jitter.z]);
            field
                .radians
                .push((along * HELIX_SWEEP_DEG + strand).to_radians());
            field.radii.push(options.helix_radius);
            field.delays.push(random_phase(rng));
        }

        let num_bands = options.num_bands as f32;
        let num_per_band = options.num_per_band as f32;
        for j in 0..options.num_bands {
            let along = j as f32 / num_bands;
            let radian = (along * HELIX_SWEEP_DEG).to_radians();
            let x = (along * 2.0 - 1.0) * options.half_length;
            for k in 0..options.num_per_band {
                let jitter = soft_jitter(rng, options.band_jitter);
                let across = k as f32 / num_per_band * 2.0 - 1.0;

                field.positions.push([x + jitter.x, jitter.y, jitter.z]);
                field.radians.push(radian);
                field.radii.push(across * options.band_radius_scale);
                field.delays.push(random_phase(rng));
            }
        }

        log::debug!(
            "generated point field: {} helix + {}x{} band points",
            layout.num_helix,
            layout.num_bands,
            layout.num_per_band
        );
        Ok(field)
    }
}

/// Per-axis `uniform(-1, 1) * m * scale` with one magnitude `m` shared by
/// all three axes, which pulls the spread toward the base position.
fn soft_jitter<R: Rng>(rng: &mut R, scale: f32) -> Vec3 {
    let magnitude: f32 = rng.random();
    let x = (rng.random::<f32>() * 2.0 - 1.0) * magnitude * scale;
    let y = (rng.random::<f32>() * 2.0 - 1.0) * magnitude * scale;
    let z = (rng.random::<f32>() * 2.0 - 1.0) * magnitude * scale;
    Vec3::new(x, y, z)
}

fn random_phase<R: Rng>(rng: &mut R) -> f32 {
    (rng.random::<f32>() * 360.0).to_radians()
}
