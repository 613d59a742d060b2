//! Link points: the subset of field indices exposed for UI interaction.
//!
//! A [`LinkRegistry`] picks its indices once, after the field exists, and
//! never changes them. UI code keeps one element per entry, in the same
//! order, and forwards hover into the color API below.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::HelixError;
use crate::field::PointField;
use crate::orbit::OrbitParams;

/// How link indices are spread over the point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkPolicy {
    /// `index[i] = i * (num_helix / count)`: evenly across the helix zone.
    Stride,
    /// `index[i] = base + i * stride`: concentrated in one region.
    FixedOffset {
        /// Index of the first link.
        base: usize,
        /// Distance between consecutive links.
        stride: usize,
    },
}

impl Default for LinkPolicy {
    /// The shipped layout: eight links from index 2200, 201 apart.
    fn default() -> Self {
        Self::FixedOffset {
            base: 2200,
            stride: 201,
        }
    }
}

impl LinkPolicy {
    /// Compute `count` indices for `field`.
    ///
    /// # Errors
    ///
    /// - [`HelixError::InvalidConfiguration`] when `Stride` asks for more
    ///   links than helix points.
    /// - [`HelixError::LinkIndexOutOfRange`] when a `FixedOffset` index
    ///   would fall outside the field. Indices are never clamped.
    pub fn select(
        self,
        field: &PointField,
        count: usize,
    ) -> Result<Vec<usize>, HelixError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        match self {
            Self::Stride => {
                let num_helix = field.num_helix();
                if count > num_helix {
                    return Err(HelixError::InvalidConfiguration(format!(
                        "{count} links requested from {num_helix} helix points"
                    )));
                }
                let stride = num_helix / count;
                Ok((0..count).map(|i| i * stride).collect())
            }
            Self::FixedOffset { base, stride } => {
                let len = field.len();
                let last = stride
                    .checked_mul(count - 1)
                    .and_then(|span| span.checked_add(base))
                    .unwrap_or(usize::MAX);
                if last >= len {
                    return Err(HelixError::LinkIndexOutOfRange {
                        index: last,
                        len,
                    });
                }
                Ok((0..count).map(|i| base + i * stride).collect())
            }
        }
    }
}

/// Ordered, immutable link indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkSet {
    indices: Vec<usize>,
}

impl LinkSet {
    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Point index of link `link`.
    #[must_use]
    pub fn get(&self, link: usize) -> Option<usize> {
        self.indices.get(link).copied()
    }

    /// All point indices in link order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate over point indices in link order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

/// Owns the [`LinkSet`] and mutates point colors on its behalf.
///
/// Color writes only touch the requested points and set the field's
/// color-dirty flag; repeating a write is a no-op in effect.
#[derive(Debug, Clone)]
pub struct LinkRegistry {
    links: LinkSet,
    policy: LinkPolicy,
}

impl LinkRegistry {
    /// Select `count` links from `field` with `policy`.
    pub fn select(
        field: &PointField,
        count: usize,
        policy: LinkPolicy,
    ) -> Result<Self, HelixError> {
        let indices = policy.select(field, count)?;
        log::debug!("selected {} link points with {:?}", indices.len(), policy);
        Ok(Self {
            links: LinkSet { indices },
            policy,
        })
    }

    /// The selected links.
    #[must_use]
    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    /// Policy the links were selected with.
    #[must_use]
    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    /// Set the color of a single point.
    pub fn change_helix_color(
        &self,
        field: &mut PointField,
        index: usize,
        color: Vec3,
    ) -> Result<(), HelixError> {
        if field.set_color(index, color) {
            Ok(())
        } else {
            Err(HelixError::LinkIndexOutOfRange {
                index,
                len: field.len(),
            })
        }
    }

    /// Set the color of every helix point sharing the parity of
    /// `parity_source` (even indices from 0, odd from 1, stride 2).
    ///
    /// This lights up a whole strand, not just the point near a link.
    pub fn change_helix_colors(
        &self,
        field: &mut PointField,
        color: Vec3,
        parity_source: usize,
    ) {
        field.paint_helix_strand(parity_source, color);
    }

    /// Hover-enter behaviour: light the strand the link sits on.
    pub fn highlight_link(
        &self,
        field: &mut PointField,
        link: usize,
        color: Vec3,
    ) -> Result<(), HelixError> {
        let index = self.point_index(link)?;
        self.change_helix_colors(field, color, index);
        Ok(())
    }

    /// Hover-leave behaviour: return the link's strand to `base_color`.
    pub fn clear_highlight(
        &self,
        field: &mut PointField,
        link: usize,
        base_color: Vec3,
    ) -> Result<(), HelixError> {
        self.highlight_link(field, link, base_color)
    }

    /// Rest position of the point at `index`: the orbit sampled at `t = 0`.
    ///
    /// Used to place link markers and seed flights independently of the
    /// live frame time.
    pub fn sample_link_position(
        &self,
        field: &PointField,
        orbit: &OrbitParams,
        index: usize,
    ) -> Result<Vec3, HelixError> {
        let record =
            field
                .record(index)
                .ok_or(HelixError::LinkIndexOutOfRange {
                    index,
                    len: field.len(),
                })?;
        Ok(orbit.rest_position(&record))
    }

    /// Rest positions of every link, in link order.
    pub fn sample_link_positions(
        &self,
        field: &PointField,
        orbit: &OrbitParams,
    ) -> Result<Vec<Vec3>, HelixError> {
        self.links
            .iter()
            .map(|index| self.sample_link_position(field, orbit, index))
            .collect()
    }

    fn point_index(&self, link: usize) -> Result<usize, HelixError> {
        self.links.get(link).ok_or(HelixError::LinkIndexOutOfRange {
            index: link,
            len: self.links.len(),
        })
    }
}
