//! Centralized engine options with TOML preset support.
//!
//! Every tunable of the point field, orbit motion, link selection, rotation
//! controller, flights and palette lives here. Options serialize to/from
//! TOML so a look can be saved as a preset and reloaded.

mod colors;
mod field;
mod flight;
mod links;
mod orbit;
mod rotation;

use std::path::Path;

pub use colors::ColorOptions;
pub use field::FieldOptions;
pub use flight::FlightOptions;
pub use links::LinkOptions;
pub use orbit::OrbitOptions;
pub use rotation::RotationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::HelixError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[rotation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Point-field layout and shape.
    pub field: FieldOptions,
    /// Orbit angular speeds.
    pub orbit: OrbitOptions,
    /// Link-point selection.
    pub links: LinkOptions,
    /// Inertial rotation parameters.
    pub rotation: RotationOptions,
    /// Marker flight timing.
    pub flight: FlightOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// [`json_schema`](Self::json_schema) as pretty-printed JSON, for UI
    /// code that builds its controls from the schema.
    pub fn json_schema_string() -> Result<String, HelixError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| HelixError::OptionsParse(e.to_string()))
    }

    /// Check every section, stopping at the first bad value.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<(), HelixError> {
        self.field.validate()?;
        self.orbit.validate()?;
        self.rotation.validate()?;
        self.flight.validate()?;
        self.colors.validate()
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, HelixError> {
        toml::from_str(content)
            .map_err(|e| HelixError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, HelixError> {
        let content = std::fs::read_to_string(path).map_err(HelixError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), HelixError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HelixError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HelixError::Io)?;
        }
        std::fs::write(path, content).map_err(HelixError::Io)
    }
}

fn check_finite(name: &str, value: f32) -> Result<(), HelixError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HelixError::InvalidConfiguration(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<(), HelixError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HelixError::InvalidConfiguration(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

fn check_positive(name: &str, value: f32) -> Result<(), HelixError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HelixError::InvalidConfiguration(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkPolicy;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[rotation]
max_rate = 3.5
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.rotation.max_rate, 3.5);
        // Everything else should be default
        assert_eq!(opts.rotation.default_rate, 0.25);
        assert_eq!(opts.field.num_helix, 6000);
        assert_eq!(opts.links.count, 8);
    }

    #[test]
    fn link_policy_parses_from_toml() {
        let toml_str = r#"
[links]
count = 4
policy = { kind = "fixed_offset", base = 2000, stride = 200 }
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(
            opts.links.policy,
            LinkPolicy::FixedOffset {
                base: 2000,
                stride: 200
            }
        );

        let stride = Options::from_toml("[links]\npolicy = { kind = \"stride\" }")
            .unwrap();
        assert_eq!(stride.links.policy, LinkPolicy::Stride);
    }

    #[test]
    fn defaults_validate() {
        Options::default().validate().unwrap();
    }

    #[test]
    fn nan_in_any_section_is_rejected() {
        for preset in [
            "[field]\nhalf_length = nan",
            "[orbit]\nspin_speed = nan",
            "[rotation]\ndecay_duration = nan",
            "[flight]\ntour_step = nan",
            "[colors]\nbase = [0.0, nan, 0.0]",
        ] {
            let opts = Options::from_toml(preset).unwrap();
            assert!(
                matches!(opts.validate(), Err(HelixError::InvalidConfiguration(_))),
                "accepted {preset:?}"
            );
        }
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[field]\nnum_helix = \"many\"").unwrap_err();
        assert!(matches!(err, HelixError::OptionsParse(_)));
    }

    #[test]
    fn seed_survives_round_trip() {
        let mut opts = Options::default();
        opts.field.seed = Some(42);
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(parsed.field.seed, Some(42));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("field"));
        assert!(props.contains_key("orbit"));
        assert!(props.contains_key("rotation"));
        assert!(props.contains_key("flight"));
        assert!(props.contains_key("links"));

        // Palette is not UI-exposed
        assert!(!props.contains_key("colors"));

        let rotation = &props["rotation"]["properties"];
        assert!(rotation.get("max_rate").is_some());
        assert!(rotation.get("decay_easing").is_none());
        let links = &props["links"]["properties"];
        assert!(links.get("count").is_some());
        assert!(links.get("policy").is_none());
    }

    #[test]
    fn schema_text_is_valid_json() {
        let text = Options::json_schema_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["properties"]["field"].is_object());
    }

    #[test]
    fn link_highlight_wraps_palette() {
        let colors = ColorOptions {
            base: [0.0; 3],
            link_highlights: vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        };
        assert_eq!(colors.link_highlight(3), [0.0, 1.0, 0.0]);
        let empty = ColorOptions {
            base: [0.0; 3],
            link_highlights: Vec::new(),
        };
        assert_eq!(empty.link_highlight(0), ColorOptions::default().link_highlight(0));
    }

    #[test]
    fn save_then_load_preset() {
        let dir = std::env::temp_dir().join("dna-helix-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.orbit.spin_speed = 0.5;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_file(&path);
    }
}
