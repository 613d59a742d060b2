use serde::{Deserialize, Serialize};

use super::check_finite;
use crate::error::HelixError;

/// `#00a0d5`, the highlight used for every link in the shipped palette.
const LINK_BLUE: [f32; 3] = [0.0, 160.0 / 255.0, 213.0 / 255.0];

/// Color palette for the point field and link highlights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Resting RGB color of every point.
    pub base: [f32; 3],
    /// Per-link highlight colors, in link order.
    pub link_highlights: Vec<[f32; 3]>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            base: [0.0, 0.0, 0.0],
            link_highlights: vec![LINK_BLUE; 8],
        }
    }
}

impl ColorOptions {
    /// Highlight color for a link. Wraps around the palette and falls back
    /// to the shipped blue when the palette is empty.
    #[must_use]
    pub fn link_highlight(&self, link: usize) -> [f32; 3] {
        if self.link_highlights.is_empty() {
            return LINK_BLUE;
        }
        self.link_highlights[link % self.link_highlights.len()]
    }

    /// Every channel of the base and highlight colors must be finite.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidConfiguration`] for the first non-finite channel.
    pub fn validate(&self) -> Result<(), HelixError> {
        for channel in self.base {
            check_finite("colors.base", channel)?;
        }
        for channel in self.link_highlights.iter().flatten() {
            check_finite("colors.link_highlights", *channel)?;
        }
        Ok(())
    }
}
