//! Procedurally generated point field.
//!
//! A [`PointField`] is a fixed-length sequence of point records split into
//! two zones that never move once built:
//!
//! - the *helix zone* `[0, num_helix)`: two interleaved strands,
//! - the *band zone* `[num_helix, len)`: `num_bands` contiguous ribbons of
//!   `num_per_band` points each.
//!
//! Attributes are stored struct-of-arrays so each one can be handed to a
//! renderer as a flat `f32` slice. Only colors change after construction.

mod generate;

use std::ops::Range;

use glam::Vec3;

/// One point as seen by the orbit evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    /// Static position before orbit displacement.
    pub base_position: Vec3,
    /// Phase angle around the helix axis (radians).
    pub radian: f32,
    /// Orbit radius. Band points carry a signed ribbon offset.
    pub radius: f32,
    /// Per-point phase offset (radians).
    pub delay: f32,
    /// Current RGB color.
    pub color: Vec3,
}

/// Interleaved per-point attributes for GPU storage buffers.
///
/// Layout matches `struct GpuPoint` in `modules/orbit.wgsl`: the `vec3`
/// position packs with `radian` into the first 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPoint {
    /// Base position.
    pub position: [f32; 3],
    /// Phase angle (radians).
    pub radian: f32,
    /// Orbit radius.
    pub radius: f32,
    /// Phase offset (radians).
    pub delay: f32,
    /// Padding to the 16-byte WGSL struct alignment.
    pub(crate) _pad: [f32; 2],
}

/// Fixed zone layout of a point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Points in the helix zone.
    pub num_helix: usize,
    /// Number of bands in the band zone.
    pub num_bands: usize,
    /// Points per band.
    pub num_per_band: usize,
}

impl FieldLayout {
    /// Total number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.num_helix + self.num_bands * self.num_per_band
    }

    /// Whether the layout holds no points at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Point records plus the color-dirty flag the renderer polls.
#[derive(Debug, Clone)]
pub struct PointField {
    layout: FieldLayout,
    positions: Vec<[f32; 3]>,
    radians: Vec<f32>,
    radii: Vec<f32>,
    delays: Vec<f32>,
    colors: Vec<[f32; 3]>,
    color_dirty: bool,
}

impl PointField {
    /// Zone layout.
    #[must_use]
    pub fn layout(&self) -> FieldLayout {
        self.layout
    }

    /// Total number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.radians.len()
    }

    /// Whether the field holds no points (never true for a generated field).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radians.is_empty()
    }

    /// Number of points in the helix zone.
    #[must_use]
    pub fn num_helix(&self) -> usize {
        self.layout.num_helix
    }

    /// Index range of the helix zone.
    #[must_use]
    pub fn helix_range(&self) -> Range<usize> {
        0..self.layout.num_helix
    }

    /// Index range of the band zone.
    #[must_use]
    pub fn band_range(&self) -> Range<usize> {
        self.layout.num_helix..self.len()
    }

    /// Index range of band `j`, or `None` past the last band.
    #[must_use]
    pub fn band(&self, j: usize) -> Option<Range<usize>> {
        if j >= self.layout.num_bands {
            return None;
        }
        let start = self.layout.num_helix + j * self.layout.num_per_band;
        Some(start..start + self.layout.num_per_band)
    }

    /// Assemble the record at `index`.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<PointRecord> {
        if index >= self.len() {
            return None;
        }
        Some(PointRecord {
            base_position: Vec3::from_array(self.positions[index]),
            radian: self.radians[index],
            radius: self.radii[index],
            delay: self.delays[index],
            color: Vec3::from_array(self.colors[index]),
        })
    }

    /// Iterate over every record in index order.
    pub fn records(&self) -> impl Iterator<Item = PointRecord> + '_ {
        (0..self.len()).filter_map(|i| self.record(i))
    }

    /// Base positions as a flat `xyz` slice.
    #[must_use]
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Phase angles.
    #[must_use]
    pub fn radians(&self) -> &[f32] {
        &self.radians
    }

    /// Orbit radii.
    #[must_use]
    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    /// Phase offsets.
    #[must_use]
    pub fn delays(&self) -> &[f32] {
        &self.delays
    }

    /// Colors as a flat `rgb` slice.
    #[must_use]
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Color of one point.
    #[must_use]
    pub fn color(&self, index: usize) -> Option<Vec3> {
        self.colors.get(index).map(|c| Vec3::from_array(*c))
    }

    /// Interleaved attributes for a GPU storage buffer.
    #[must_use]
    pub fn gpu_points(&self) -> Vec<GpuPoint> {
        (0..self.len())
            .map(|i| GpuPoint {
                position: self.positions[i],
                radian: self.radians[i],
                radius: self.radii[i],
                delay: self.delays[i],
                _pad: [0.0; 2],
            })
            .collect()
    }

    /// Overwrite the color of one point and mark colors dirty.
    ///
    /// Returns `false` (and changes nothing) if `index` is out of range.
    pub fn set_color(&mut self, index: usize, color: Vec3) -> bool {
        let Some(slot) = self.colors.get_mut(index) else {
            return false;
        };
        *slot = color.to_array();
        self.color_dirty = true;
        true
    }

    /// Paint every point `color` and mark colors dirty.
    pub fn fill_color(&mut self, color: Vec3) {
        self.colors.fill(color.to_array());
        self.color_dirty = true;
    }

    /// Paint one helix strand: every helix point whose index has parity
    /// `parity % 2`. Band points are never touched.
    pub fn paint_helix_strand(&mut self, parity: usize, color: Vec3) {
        let rgb = color.to_array();
        let helix = &mut self.colors[..self.layout.num_helix];
        for slot in helix.iter_mut().skip(parity % 2).step_by(2) {
            *slot = rgb;
        }
        self.color_dirty = true;
    }

    /// Whether colors changed since the last flush.
    #[must_use]
    pub fn is_color_dirty(&self) -> bool {
        self.color_dirty
    }

    /// Clear and return the color-dirty flag. Called once per tick after
    /// all color writes so the renderer re-reads the array at most once.
    pub fn take_color_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.color_dirty, false)
    }
}
